use serde::Deserialize;

/// gridscan runtime configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// SQLite database path
    pub db_path: String,
    /// OpenAI API key; absent means mock mode, never a startup failure
    pub openai_api_key: Option<String>,
    /// Vision model to request
    pub openai_model: String,
    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8000,
            db_path: "gridscan.db".to_string(),
            openai_api_key: None,
            openai_model: "gpt-4o".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: std::env::var("GRIDSCAN_BIND")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("GRIDSCAN_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            db_path: std::env::var("GRIDSCAN_DB")
                .unwrap_or_else(|_| "gridscan.db".to_string()),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            openai_model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-4o".to_string()),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}
