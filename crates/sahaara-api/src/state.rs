//! Application state wiring the chat engine to its concrete infrastructure.
//!
//! The engine is generic over the session store, the LLM provider, and the
//! plan renderer; AppState pins them to the in-memory store, the Groq-hosted
//! OpenAI-compatible provider, and the PDF renderer.

use std::sync::Arc;

use secrecy::ExposeSecret;

use sahaara_core::engine::ChatEngine;
use sahaara_core::llm::CompletionClient;
use sahaara_core::session::InMemorySessionStore;
use sahaara_infra::config::AppConfig;
use sahaara_infra::llm::OpenAiCompatibleProvider;
use sahaara_infra::pdf::PdfPlanRenderer;

/// Shared application state holding the chat engine.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ChatEngine>,
}

impl AppState {
    /// Initialize the application state from environment configuration.
    pub fn init() -> Self {
        Self::from_config(AppConfig::from_env())
    }

    /// Wire the engine from an explicit configuration.
    ///
    /// A missing API key yields an engine in degraded mode rather than a
    /// startup failure, so the health endpoint stays reachable.
    pub fn from_config(config: AppConfig) -> Self {
        let client = config.api_key.as_ref().map(|key| {
            let provider = OpenAiCompatibleProvider::new(
                "groq",
                &config.base_url,
                key.expose_secret(),
                &config.models[0],
            );
            CompletionClient::new(Box::new(provider), config.models.clone())
        });

        if client.is_none() {
            tracing::warn!("no API key configured; chat requests will report the model as not configured");
        }

        Self {
            engine: Arc::new(ChatEngine::new(
                Arc::new(InMemorySessionStore::new()),
                client,
                Arc::new(PdfPlanRenderer),
            )),
        }
    }
}
