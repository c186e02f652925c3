use thiserror::Error;

#[derive(Error, Debug)]
pub enum WattsonError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("API Error: {0}")]
    Api(String),

    #[error("Insights scheduler is no longer running")]
    ChannelClosed,
}

impl WattsonError {
    /// Whether another attempt against the upstream could succeed.
    ///
    /// Network failures, overload statuses and malformed bodies retry;
    /// auth/config problems do not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Api(_) => true,
            Self::Upstream { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}
