//! OpenAI-compatible client configuration with sensible defaults.
//!
//! The pipeline works against any provider exposing the OpenAI chat
//! completions API; the default configuration targets Groq.

use crate::config::LlmSettings;
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Create a client for the configured OpenAI-compatible endpoint.
///
/// The API key is read from the environment variable named in the settings;
/// if unset, the async-openai default (`OPENAI_API_KEY`) applies.
pub fn create_client(settings: &LlmSettings) -> Client<OpenAIConfig> {
    let mut config = OpenAIConfig::new().with_api_base(&settings.api_base);

    if let Ok(key) = std::env::var(&settings.api_key_env) {
        config = config.with_api_key(key);
    }

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.timeout_seconds))
        .build()
        .expect("Failed to create HTTP client");

    Client::with_config(config).with_http_client(http_client)
}
