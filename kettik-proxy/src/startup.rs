//! Application startup and lifecycle management.

use crate::config::Config;
use crate::services::{FallbackProber, UpstreamClient};
use crate::{build_router, AppState};
use tokio::net::TcpListener;

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration. Binds the
    /// listener immediately (port 0 = random port for testing).
    pub async fn build(config: Config) -> anyhow::Result<Self> {
        let upstream = UpstreamClient::new(config.upstream.clone())?;
        if upstream.is_configured() {
            tracing::info!(upstream = %upstream.base_url(), "upstream client initialized");
        } else {
            tracing::warn!(
                "BOT_API_KEY not configured - verification endpoints will answer 500"
            );
        }

        let prober = FallbackProber::new(&config.upstream.verify_paths)?;

        let state = AppState {
            config: config.clone(),
            upstream,
            prober,
        };

        let addr = format!("{}:{}", config.server.host, config.server.port);
        let listener = TcpListener::bind(&addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            anyhow::Error::new(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("kettik-proxy listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> anyhow::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router).await?;
        Ok(())
    }
}
