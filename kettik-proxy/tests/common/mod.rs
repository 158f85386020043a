use kettik_proxy::config::{
    Config, SecurityConfig, ServerConfig, UpstreamConfig, DEFAULT_VERIFY_PATHS,
};
use kettik_proxy::startup::Application;
use secrecy::Secret;

pub const TEST_BOT_KEY: &str = "test-bot-key";
pub const TEST_USER_TOKEN: &str = "user-token-123";

pub struct TestApp {
    pub address: String,
}

impl TestApp {
    /// Spawn the proxy on a random port, pointed at the given upstream
    /// (usually a wiremock server), with the service key configured.
    pub async fn spawn(upstream_url: &str) -> Self {
        Self::spawn_with(upstream_url, TEST_BOT_KEY, None, 5).await
    }

    pub async fn spawn_with(
        upstream_url: &str,
        bot_api_key: &str,
        dev_chat_id: Option<i64>,
        timeout_secs: u64,
    ) -> Self {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0, // Random port
            },
            upstream: UpstreamConfig {
                base_url: upstream_url.to_string(),
                bot_api_key: Secret::new(bot_api_key.to_string()),
                dev_chat_id,
                timeout_secs,
                verify_paths: DEFAULT_VERIFY_PATHS.iter().map(|p| p.to_string()).collect(),
            },
            security: SecurityConfig {
                allowed_origins: vec!["*".to_string()],
            },
            service_name: "kettik-proxy".to_string(),
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address }
    }
}
