//! Configuration module

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// API key for the OpenAI-compatible chat API.
    /// When unset, the advisor client always returns its fallbacks.
    pub openai_api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API
    pub openai_base_url: String,

    /// Chat model used for sentiment analysis and suggestions
    pub openai_model: String,

    /// Request timeout for chat API calls, in seconds
    pub openai_timeout_seconds: u64,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            openai_api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),

            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),

            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),

            openai_timeout_seconds: env::var("OPENAI_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
