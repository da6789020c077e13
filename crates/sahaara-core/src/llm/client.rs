//! Completion client with ordered model fallback.
//!
//! One provider, several model ids tried in order. A model that fails
//! before producing any text is skipped and the next one is tried; a model
//! that fails mid-stream after producing text yields the partial text
//! rather than an error, since a truncated supportive reply beats a blank
//! screen in this domain.

use futures_util::StreamExt;
use tracing::{debug, warn};

use sahaara_types::llm::{CompletionRequest, LlmError, Message, MessageRole, StreamEvent};
use sahaara_types::session::{ChatMessage, ChatRole};

use crate::llm::provider::BoxLlmProvider;

const DEFAULT_MAX_TOKENS: u32 = 2048;

/// What a single model attempt produced.
enum Attempt {
    /// Stream ran to completion (possibly with zero text).
    Complete(String),
    /// Stream failed after yielding some text.
    Partial(String, LlmError),
    /// Stream failed before yielding any text.
    Failed(LlmError),
}

/// Client for generating chat completions with model fallback.
pub struct CompletionClient {
    provider: BoxLlmProvider,
    models: Vec<String>,
    max_tokens: u32,
}

impl CompletionClient {
    /// Build a client over `provider` trying `models` in order.
    pub fn new(provider: BoxLlmProvider, models: Vec<String>) -> Self {
        Self {
            provider,
            models,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// The model ids this client will try, in order.
    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Generate a completion for `user_content` against `system` and the
    /// session `history`, trying each configured model in order.
    ///
    /// Returns the concatenated text of the first attempt that produces
    /// output. A completed stream with no text deltas yields an empty
    /// string (the caller substitutes its own fallback copy). Only when
    /// every model fails before producing text is the last error returned.
    pub async fn generate(
        &self,
        system: &str,
        history: &[ChatMessage],
        user_content: &str,
        temperature: f64,
    ) -> Result<String, LlmError> {
        let messages = build_messages(history, user_content);
        let mut last_error = LlmError::Provider {
            message: "no models configured".into(),
        };

        for model in &self.models {
            let request = CompletionRequest {
                model: model.clone(),
                messages: messages.clone(),
                system: Some(system.to_string()),
                max_tokens: self.max_tokens,
                temperature: Some(temperature),
                stream: true,
            };

            debug!(provider = self.provider.name(), %model, "requesting completion");
            match collect_stream(self.provider.stream(request)).await {
                Attempt::Complete(text) => return Ok(text),
                Attempt::Partial(text, error) => {
                    warn!(%model, %error, "stream failed mid-response, returning partial text");
                    return Ok(text);
                }
                Attempt::Failed(error) => {
                    warn!(%model, %error, "model failed before producing text, trying next");
                    last_error = error;
                }
            }
        }

        Err(last_error)
    }
}

/// Flatten session history plus the current message into the wire shape.
fn build_messages(history: &[ChatMessage], user_content: &str) -> Vec<Message> {
    let mut messages: Vec<Message> = history
        .iter()
        .map(|m| Message {
            role: match m.role {
                ChatRole::User => MessageRole::User,
                ChatRole::Assistant => MessageRole::Assistant,
            },
            content: m.content.clone(),
        })
        .collect();
    messages.push(Message {
        role: MessageRole::User,
        content: user_content.to_string(),
    });
    messages
}

/// Drain a stream into accumulated text, distinguishing clean completion,
/// mid-stream failure with partial output, and failure with none.
async fn collect_stream(
    mut stream: std::pin::Pin<
        Box<dyn futures_util::Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>,
    >,
) -> Attempt {
    let mut text = String::new();
    while let Some(event) = stream.next().await {
        match event {
            Ok(StreamEvent::TextDelta { text: delta }) => text.push_str(&delta),
            Ok(StreamEvent::Connected) => {}
            Ok(StreamEvent::Done) => break,
            Err(error) => {
                if text.is_empty() {
                    return Attempt::Failed(error);
                }
                return Attempt::Partial(text, error);
            }
        }
    }
    Attempt::Complete(text)
}

#[cfg(test)]
mod tests {
    use std::pin::Pin;
    use std::sync::{Arc, Mutex};

    use futures_util::Stream;

    use super::*;
    use crate::llm::provider::LlmProvider;

    /// Scripted provider: each call pops the next canned stream and records
    /// which model was requested.
    struct ScriptedProvider {
        scripts: Mutex<Vec<Vec<Result<StreamEvent, LlmError>>>>,
        requested: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedProvider {
        fn new(scripts: Vec<Vec<Result<StreamEvent, LlmError>>>) -> Self {
            let mut scripts = scripts;
            scripts.reverse();
            Self {
                scripts: Mutex::new(scripts),
                requested: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        fn stream(
            &self,
            request: CompletionRequest,
        ) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>> {
            self.requested.lock().unwrap().push(request.model);
            let script = self
                .scripts
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| vec![Err(LlmError::Provider {
                    message: "script exhausted".into(),
                })]);
            Box::pin(futures_util::stream::iter(script))
        }
    }

    fn delta(text: &str) -> Result<StreamEvent, LlmError> {
        Ok(StreamEvent::TextDelta {
            text: text.to_string(),
        })
    }

    fn provider_error() -> Result<StreamEvent, LlmError> {
        Err(LlmError::Provider {
            message: "upstream 500".into(),
        })
    }

    fn models() -> Vec<String> {
        vec![
            "llama-3.1-8b-instant".into(),
            "llama-3.1-70b-versatile".into(),
            "llama-3.3-70b-versatile".into(),
        ]
    }

    #[tokio::test]
    async fn test_first_model_success() {
        let provider = Box::new(ScriptedProvider::new(vec![vec![
            Ok(StreamEvent::Connected),
            delta("Hello, "),
            delta("I'm here."),
            Ok(StreamEvent::Done),
        ]]));
        let client = CompletionClient::new(provider, models());

        let text = client.generate("sys", &[], "hi", 0.7).await.unwrap();
        assert_eq!(text, "Hello, I'm here.");
    }

    #[tokio::test]
    async fn test_fallback_walks_models_in_order() {
        let provider = ScriptedProvider::new(vec![
            vec![provider_error()],
            vec![provider_error()],
            vec![delta("third model answered"), Ok(StreamEvent::Done)],
        ]);
        let client = CompletionClient::new(Box::new(provider), models());

        let text = client.generate("sys", &[], "hi", 0.7).await.unwrap();
        assert_eq!(text, "third model answered");
    }

    #[tokio::test]
    async fn test_fallback_requests_models_in_configured_order() {
        let provider = Box::new(ScriptedProvider::new(vec![
            vec![provider_error()],
            vec![delta("ok"), Ok(StreamEvent::Done)],
        ]));
        let requested = Arc::clone(&provider.requested);
        let client = CompletionClient::new(provider, models());

        client.generate("sys", &[], "hi", 0.7).await.unwrap();

        assert_eq!(
            *requested.lock().unwrap(),
            vec![
                "llama-3.1-8b-instant".to_string(),
                "llama-3.1-70b-versatile".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_partial_text_survives_midstream_failure() {
        let provider = Box::new(ScriptedProvider::new(vec![vec![
            delta("I'm here with you. "),
            provider_error(),
        ]]));
        let client = CompletionClient::new(provider, models());

        let text = client.generate("sys", &[], "hi", 0.9).await.unwrap();
        assert_eq!(text, "I'm here with you. ");
    }

    #[tokio::test]
    async fn test_all_models_exhausted_returns_last_error() {
        let provider = Box::new(ScriptedProvider::new(vec![
            vec![provider_error()],
            vec![provider_error()],
            vec![Err(LlmError::RateLimited {
                retry_after_ms: Some(1000),
            })],
        ]));
        let client = CompletionClient::new(provider, models());

        let err = client.generate("sys", &[], "hi", 0.7).await.unwrap_err();
        assert!(matches!(err, LlmError::RateLimited { .. }));
    }

    #[tokio::test]
    async fn test_empty_stream_yields_empty_string() {
        let provider = Box::new(ScriptedProvider::new(vec![vec![
            Ok(StreamEvent::Connected),
            Ok(StreamEvent::Done),
        ]]));
        let client = CompletionClient::new(provider, models());

        let text = client.generate("sys", &[], "hi", 0.7).await.unwrap();
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn test_history_precedes_current_message() {
        let history = vec![
            ChatMessage::user("hello"),
            ChatMessage::assistant("hi, how are you?"),
        ];
        let messages = build_messages(&history, "not great");
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[1].role, MessageRole::Assistant);
        assert_eq!(messages[2].content, "not great");
    }
}
