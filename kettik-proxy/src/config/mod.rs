use anyhow::Result;
use dotenvy::dotenv;
use secrecy::Secret;
use serde::Deserialize;
use std::env;

/// Upstream paths tried, in order, by the verification-check handler.
/// Ordering is significant: the first candidate that answers 200 wins.
pub const DEFAULT_VERIFY_PATHS: [&str; 4] = [
    "/auth/verify-code/",
    "/auth/verify/",
    "/auth/check-verification/",
    "/auth/bot/check/",
];

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub security: SecurityConfig,
    pub service_name: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Clone, Debug)]
pub struct UpstreamConfig {
    pub base_url: String,
    /// Service credential sent as `X-Bot-API-Key`. May be empty; handlers
    /// that need it fail with a configuration error before going outbound.
    pub bot_api_key: Secret<String>,
    /// Dev convenience: substituted when a create-verification request
    /// carries no chat_id.
    pub dev_chat_id: Option<i64>,
    pub timeout_secs: u64,
    pub verify_paths: Vec<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SecurityConfig {
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let host = env::var("PROXY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PROXY_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()?;

        let base_url = env::var("KETTIK_UPSTREAM_URL")
            .unwrap_or_else(|_| "https://kettik.kicksharing.asia/api/v1".to_string());
        let bot_api_key = env::var("BOT_API_KEY").unwrap_or_default();
        let dev_chat_id = match env::var("KETTIK_DEV_CHAT_ID") {
            Ok(raw) => Some(raw.parse()?),
            Err(_) => None,
        };
        let timeout_secs = env::var("KETTIK_UPSTREAM_TIMEOUT_SECS")
            .unwrap_or_else(|_| "15".to_string())
            .parse()?;
        let verify_paths = match env::var("KETTIK_VERIFY_PATHS") {
            Ok(raw) => raw
                .split(',')
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect(),
            Err(_) => DEFAULT_VERIFY_PATHS.iter().map(|p| p.to_string()).collect(),
        };

        let allowed_origins = env::var("PROXY_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        Ok(Self {
            server: ServerConfig { host, port },
            upstream: UpstreamConfig {
                base_url,
                bot_api_key: Secret::new(bot_api_key),
                dev_chat_id,
                timeout_secs,
                verify_paths,
            },
            security: SecurityConfig { allowed_origins },
            service_name: "kettik-proxy".to_string(),
        })
    }
}
