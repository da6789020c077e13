//! LlmProvider trait definition.
//!
//! The single abstraction the completion client talks through. The chat
//! path is streaming-only, and `stream` returns a boxed stream, so the
//! trait is object-safe as-is -- implementations are carried around as
//! `Box<dyn LlmProvider>`.

use std::pin::Pin;

use futures_util::Stream;

use sahaara_types::llm::{CompletionRequest, LlmError, StreamEvent};

/// Trait for hosted chat-completion backends.
///
/// Implementations live in sahaara-infra (e.g. the Groq-hosted
/// OpenAI-compatible provider).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g. "groq").
    fn name(&self) -> &str;

    /// Send a streaming completion request. Returns a stream of events.
    fn stream(
        &self,
        request: CompletionRequest,
    ) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>>;
}

/// Type-erased provider for runtime backend selection.
pub type BoxLlmProvider = Box<dyn LlmProvider>;
