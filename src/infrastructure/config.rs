use crate::domain::error::WattsonError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Which upstream backend to use: "ollama" or "gemini"
    #[serde(default = "default_backend")]
    pub backend: String,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub ollama: OllamaConfig,
    #[serde(default)]
    pub insights: InsightsConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_gemini_model")]
    pub model: String,
    /// Minimum spacing between upstream calls, in milliseconds
    #[serde(default = "default_gemini_interval_ms")]
    pub min_request_interval_ms: u64,
    #[serde(default = "default_gemini_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OllamaConfig {
    #[serde(default = "default_ollama_base_url")]
    pub base_url: String,
    #[serde(default = "default_ollama_model")]
    pub model: String,
    /// The local server needs more breathing room between calls
    #[serde(default = "default_ollama_interval_ms")]
    pub min_request_interval_ms: u64,
    #[serde(default = "default_ollama_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct InsightsConfig {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            logging: Logging::default(),
            gemini: GeminiConfig::default(),
            ollama: OllamaConfig::default(),
            insights: InsightsConfig::default(),
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: "WARN".to_string(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_gemini_model(),
            min_request_interval_ms: default_gemini_interval_ms(),
            retry_delay_ms: default_gemini_retry_delay_ms(),
        }
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_ollama_base_url(),
            model: default_ollama_model(),
            min_request_interval_ms: default_ollama_interval_ms(),
            retry_delay_ms: default_ollama_retry_delay_ms(),
        }
    }
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

impl GeminiConfig {
    /// API key from config, falling back to the GEMINI_API_KEY env var.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .filter(|k| !k.is_empty())
    }
}

impl OllamaConfig {
    /// Base URL, with the OLLAMA_HOST env var taking precedence.
    pub fn resolve_base_url(&self) -> String {
        std::env::var("OLLAMA_HOST")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| self.base_url.clone())
    }
}

// Defaults
fn default_backend() -> String {
    "ollama".to_string()
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "WARN".to_string()
}
fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}
fn default_gemini_interval_ms() -> u64 {
    1000
}
fn default_gemini_retry_delay_ms() -> u64 {
    2000
}
fn default_ollama_base_url() -> String {
    "http://localhost:11434".to_string()
}
fn default_ollama_model() -> String {
    "llama3.2:latest".to_string()
}
fn default_ollama_interval_ms() -> u64 {
    2000
}
fn default_ollama_retry_delay_ms() -> u64 {
    5000
}
fn default_max_retries() -> u32 {
    3
}
fn default_cache_ttl_secs() -> u64 {
    300
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("wattson").join("config.toml"))
}

pub fn load_config() -> Result<Config, WattsonError> {
    let config_path = get_config_path();

    if let Some(path) = config_path {
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            match toml::from_str::<Config>(&content) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse config file: {}. Using defaults.",
                        e
                    );
                }
            }
        }
    }

    Ok(Config::default())
}

pub fn generate_config_sample() -> Result<(), WattsonError> {
    let config_path = get_config_path();

    if let Some(path) = config_path {
        if path.exists() {
            eprintln!("Config file already exists at: {}", path.display());
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let sample = Config::default();
        let toml_content = toml::to_string_pretty(&sample)
            .map_err(|e| WattsonError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, toml_content)
            .map_err(|e| WattsonError::Config(format!("Failed to write config file: {}", e)))?;
        println!("Generated config file at: {}", path.display());
    } else {
        return Err(WattsonError::Config(
            "Cannot determine config directory".to_string(),
        ));
    }

    Ok(())
}
