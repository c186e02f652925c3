//! Configuration defaults and TOML parsing.

use wattson::infrastructure::config::Config;

#[test]
fn defaults_match_the_documented_tuning() {
    let config = Config::default();

    assert_eq!(config.backend, "ollama");

    assert_eq!(config.gemini.model, "gemini-1.5-flash");
    assert_eq!(config.gemini.min_request_interval_ms, 1000);
    assert_eq!(config.gemini.retry_delay_ms, 2000);

    assert_eq!(config.ollama.base_url, "http://localhost:11434");
    assert_eq!(config.ollama.model, "llama3.2:latest");
    assert_eq!(config.ollama.min_request_interval_ms, 2000);
    assert_eq!(config.ollama.retry_delay_ms, 5000);

    assert_eq!(config.insights.max_retries, 3);
    assert_eq!(config.insights.cache_ttl_secs, 300);

    assert!(config.logging.enable);
    assert_eq!(config.logging.level, "WARN");
}

#[test]
fn partial_toml_fills_in_defaults() {
    let toml_content = r#"
backend = "gemini"

[gemini]
api_key = "test-key"

[logging]
level = "DEBUG"
"#;

    let config: Config = toml::from_str(toml_content).unwrap();

    assert_eq!(config.backend, "gemini");
    assert_eq!(config.gemini.api_key.as_deref(), Some("test-key"));
    // Untouched fields fall back to defaults
    assert_eq!(config.gemini.min_request_interval_ms, 1000);
    assert_eq!(config.ollama.model, "llama3.2:latest");
    assert_eq!(config.insights.max_retries, 3);
    assert_eq!(config.logging.level, "DEBUG");
    assert!(config.logging.enable);
}

#[test]
fn tuning_knobs_are_overridable() {
    let toml_content = r#"
[ollama]
base_url = "http://models.lan:11434"
min_request_interval_ms = 500

[insights]
max_retries = 5
cache_ttl_secs = 60
"#;

    let config: Config = toml::from_str(toml_content).unwrap();

    assert_eq!(config.ollama.base_url, "http://models.lan:11434");
    assert_eq!(config.ollama.min_request_interval_ms, 500);
    assert_eq!(config.insights.max_retries, 5);
    assert_eq!(config.insights.cache_ttl_secs, 60);
}
