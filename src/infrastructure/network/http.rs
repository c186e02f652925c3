// HTTP client utilities
use crate::domain::error::WattsonError;
use reqwest::Client;

/// Create a default HTTP client with appropriate settings
pub fn create_client() -> Result<Client, WattsonError> {
    Ok(Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(std::time::Duration::from_secs(30))
        .timeout(std::time::Duration::from_secs(30))
        .user_agent("wattson/0.1.0")
        .build()?)
}
