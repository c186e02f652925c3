use crate::domain::error::WattsonError;
use crate::domain::model::GenerationOptions;
use crate::domain::traits::Generator;
use crate::infrastructure::config::OllamaConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

#[derive(Deserialize, Debug)]
struct OllamaResponse {
    response: Option<String>,
}

/// Locally addressable model-serving backend.
pub struct OllamaGenerator {
    client: Client,
    config: OllamaConfig,
}

impl OllamaGenerator {
    pub fn new(client: Client, config: OllamaConfig) -> Self {
        Self { client, config }
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.config.resolve_base_url())
    }

    /// One reduced-complexity call used when the server reports an
    /// overload. Shorter prompt, colder sampling, smaller budget.
    async fn recover(&self, prompt: &str) -> Result<String, WattsonError> {
        let short_prompt: String = prompt.chars().take(120).collect();
        let body = json!({
            "model": self.config.model,
            "prompt": short_prompt,
            "stream": false,
            "options": {
                "temperature": 0.1,
                "num_predict": 100,
            }
        });

        let response = self.client.post(self.generate_url()).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(WattsonError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let parsed = response.json::<OllamaResponse>().await?;
        let text = parsed.response.unwrap_or_default();
        if text.trim().is_empty() {
            return Ok("Analysis not available at the moment.".to_string());
        }
        Ok(text)
    }
}

#[async_trait]
impl Generator for OllamaGenerator {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, WattsonError> {
        let body = json!({
            "model": self.config.model,
            "prompt": prompt,
            "stream": false,
            "options": {
                "temperature": options.temperature,
                "top_k": options.top_k,
                "top_p": options.top_p,
                "num_predict": options.max_tokens,
                "stop": options.stop,
                "repeat_penalty": options.repeat_penalty,
            }
        });

        let response = self.client.post(self.generate_url()).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), %message, "Ollama error response");

            // A 500 usually means the model is overloaded; try once
            // with a simpler request before giving up on this attempt.
            if status.as_u16() == 500 {
                if let Ok(text) = self.recover(prompt).await {
                    return Ok(text);
                }
            }

            return Err(WattsonError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let parsed = response.json::<OllamaResponse>().await?;
        let text = parsed.response.unwrap_or_default();

        if text.trim().is_empty() {
            return Err(WattsonError::Api("Empty response from Ollama".to_string()));
        }

        Ok(text)
    }
}
