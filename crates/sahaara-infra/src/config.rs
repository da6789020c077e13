//! Environment-based service configuration.

use secrecy::SecretString;

/// Default OpenAI-compatible endpoint (Groq).
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default primary model.
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Models tried when the primary fails before producing any text.
pub const FALLBACK_MODELS: &[&str] = &["llama-3.1-70b-versatile", "llama-3.3-70b-versatile"];

/// Runtime configuration read from the environment.
///
/// A missing API key is not an error: the service starts in a degraded mode
/// where every chat request reports that the model is not configured.
pub struct AppConfig {
    pub api_key: Option<SecretString>,
    pub base_url: String,
    pub models: Vec<String>,
}

impl AppConfig {
    /// Read configuration from `SAHAARA_API_KEY`, `SAHAARA_BASE_URL`, and
    /// `SAHAARA_MODEL`.
    pub fn from_env() -> Self {
        let api_key = std::env::var("SAHAARA_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .map(SecretString::from);
        let base_url =
            std::env::var("SAHAARA_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let primary =
            std::env::var("SAHAARA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Self {
            api_key,
            base_url,
            models: model_chain(&primary),
        }
    }
}

/// The primary model followed by the fixed fallbacks, without duplicates.
fn model_chain(primary: &str) -> Vec<String> {
    let mut models = vec![primary.to_string()];
    for fallback in FALLBACK_MODELS {
        if *fallback != primary {
            models.push((*fallback).to_string());
        }
    }
    models
}
