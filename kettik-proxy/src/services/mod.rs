pub mod prober;
pub mod upstream;

pub use prober::{FallbackProber, ProbeOutcome};
pub use upstream::{UpstreamAuth, UpstreamClient, UpstreamResponse};
