use crate::domain::error::WattsonError;
use crate::domain::model::GenerationOptions;
use crate::domain::traits::Generator;
use crate::infrastructure::config::GeminiConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

// Gemini generateContent response structures
#[derive(Deserialize, Debug)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize, Debug)]
struct Content {
    parts: Option<Vec<Part>>,
}

#[derive(Deserialize, Debug)]
struct Part {
    text: Option<String>,
}

/// Hosted generative-language backend.
pub struct GeminiGenerator {
    client: Client,
    config: GeminiConfig,
}

impl GeminiGenerator {
    pub fn new(client: Client, config: GeminiConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl Generator for GeminiGenerator {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, WattsonError> {
        let api_key = self
            .config
            .resolve_api_key()
            .ok_or_else(|| WattsonError::Config("Gemini API key not configured".to_string()))?;

        let url = format!(
            "{}/{}:generateContent?key={}",
            BASE_URL, self.config.model, api_key
        );

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": options.temperature,
                "topK": options.top_k,
                "topP": options.top_p,
                "maxOutputTokens": options.max_tokens,
                "stopSequences": options.stop,
            }
        });

        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(WattsonError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let parsed = response.json::<GeminiResponse>().await?;
        let text = parsed
            .candidates
            .and_then(|mut c| c.drain(..).next())
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .and_then(|mut p| p.drain(..).next())
            .and_then(|p| p.text)
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(WattsonError::Api("Empty response from Gemini".to_string()));
        }

        Ok(text)
    }
}
