use crate::application::insights::{ClientOptions, InsightsClient};
use crate::domain::error::WattsonError;
use crate::domain::traits::Generator;
use crate::infrastructure::config::Config;
use crate::infrastructure::network::gemini::GeminiGenerator;
use crate::infrastructure::network::http::create_client;
use crate::infrastructure::network::ollama::OllamaGenerator;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub insights: InsightsClient,
}

impl AppState {
    /// Wires config -> backend -> insights client. Needs a running
    /// tokio runtime (the client spawns its scheduler task here).
    pub fn new(config: Config) -> Result<Self, WattsonError> {
        let http_client = create_client()?;

        let (backend, options): (Arc<dyn Generator>, ClientOptions) =
            match config.backend.as_str() {
                "gemini" => (
                    Arc::new(GeminiGenerator::new(http_client, config.gemini.clone())),
                    ClientOptions {
                        min_request_interval: Duration::from_millis(
                            config.gemini.min_request_interval_ms,
                        ),
                        max_retries: config.insights.max_retries,
                        retry_delay: Duration::from_millis(config.gemini.retry_delay_ms),
                        cache_ttl: Duration::from_secs(config.insights.cache_ttl_secs),
                    },
                ),
                "ollama" => (
                    Arc::new(OllamaGenerator::new(http_client, config.ollama.clone())),
                    ClientOptions {
                        min_request_interval: Duration::from_millis(
                            config.ollama.min_request_interval_ms,
                        ),
                        max_retries: config.insights.max_retries,
                        retry_delay: Duration::from_millis(config.ollama.retry_delay_ms),
                        cache_ttl: Duration::from_secs(config.insights.cache_ttl_secs),
                    },
                ),
                other => {
                    return Err(WattsonError::Config(format!("Unknown backend: {}", other)));
                }
            };

        let insights = InsightsClient::new(backend, options);

        Ok(Self { config, insights })
    }
}
