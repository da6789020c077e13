//! Per-message control flow tying the agents, the session store, and the
//! safety plan generator together.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use sahaara_types::agent::{AgentKind, Language};
use sahaara_types::llm::LlmError;
use sahaara_types::session::{ChatMessage, SessionId, SessionRecord};

use crate::agent::{InterviewAgent, OrchestratorAgent};
use crate::llm::CompletionClient;
use crate::plan::{self, PlanRenderer};
use crate::prompt;
use crate::session::SessionStore;

/// Substring marking that the reply already carries the specialist's
/// self-introduction, so the canned welcome is not appended twice.
const SPECIALIST_INTRO: &str = "I'm a psychiatric interview specialist";

/// What one exchange produced, as reported to the caller.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub response: String,
    pub current_agent: AgentKind,
    pub language: Option<Language>,
    pub safety_plan_available: bool,
}

/// Drives a full user exchange: load session, dispatch to the active
/// agent, handle the hand-off, persist the updated session.
///
/// The completion client is optional: without one the engine runs in a
/// degraded mode where every message reports `LlmError::NotConfigured`.
pub struct ChatEngine {
    store: Arc<dyn SessionStore>,
    client: Option<CompletionClient>,
    renderer: Arc<dyn PlanRenderer>,
}

impl ChatEngine {
    pub fn new(
        store: Arc<dyn SessionStore>,
        client: Option<CompletionClient>,
        renderer: Arc<dyn PlanRenderer>,
    ) -> Self {
        Self {
            store,
            client,
            renderer,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Handle one user message for the session.
    ///
    /// `user_message` is the text the user typed; `model_content` is what is
    /// forwarded to the model (the same text, possibly with an attached
    /// image note). The session is created on first use.
    pub async fn handle_message(
        &self,
        session_id: SessionId,
        user_message: &str,
        model_content: &str,
    ) -> Result<ChatOutcome, LlmError> {
        let client = self.client.as_ref().ok_or(LlmError::NotConfigured)?;
        let mut session = self.store.get(&session_id).unwrap_or_default();

        let response = match session.current_agent {
            AgentKind::Orchestrator => {
                let reply =
                    OrchestratorAgent::respond(client, &mut session, user_message, model_content)
                        .await?;
                let mut text = reply.text;
                if reply.switch_to_interview {
                    info!(%session_id, "session handed off to interview specialist");
                    session.current_agent = AgentKind::Interview;
                    session.referral_offered = true;
                    if !text.contains(SPECIALIST_INTRO) {
                        text.push_str("\n\n");
                        text.push_str(prompt::interview_welcome(
                            session.language,
                            &session.history,
                        ));
                    }
                }
                text
            }
            AgentKind::Interview => {
                let mut text =
                    InterviewAgent::respond(client, &mut session, user_message, model_content)
                        .await;

                let now = Utc::now();
                let safety_plan = plan::generate(user_message, session.language, now);
                let escalation = plan::trigger_escalation(user_message, now);
                info!(
                    %session_id,
                    triggered = escalation.triggered,
                    priority = %escalation.priority,
                    "escalation recorded"
                );

                text.push_str("\n\n");
                text.push_str(&plan::render_markdown(&safety_plan));

                match self.renderer.render(&safety_plan) {
                    Ok(bytes) => session.safety_plan_pdf = Some(bytes),
                    Err(error) => warn!(%session_id, %error, "plan document rendering failed"),
                }
                text
            }
        };

        session.history.push(ChatMessage::user(model_content));
        session.history.push(ChatMessage::assistant(response.clone()));

        let outcome = ChatOutcome {
            response,
            current_agent: session.current_agent,
            language: session.language,
            safety_plan_available: session.safety_plan_pdf.is_some(),
        };
        self.store.put(session_id, session);
        Ok(outcome)
    }

    /// Hard-reset the session to a fresh orchestrator conversation and
    /// return the welcome text.
    pub fn reset_session(&self, session_id: &SessionId) -> &'static str {
        self.store.reset(session_id);
        prompt::orchestrator_welcome()
    }

    /// The rendered safety plan for the session, if one was generated.
    pub fn safety_plan_pdf(&self, session_id: &SessionId) -> Option<Vec<u8>> {
        self.store.get(session_id)?.safety_plan_pdf
    }
}

#[cfg(test)]
mod tests {
    use std::pin::Pin;
    use std::sync::Mutex;

    use futures_util::Stream;
    use uuid::Uuid;

    use sahaara_types::llm::{CompletionRequest, StreamEvent};
    use sahaara_types::plan::SafetyPlan;

    use super::*;
    use crate::llm::LlmProvider;
    use crate::plan::RenderError;
    use crate::prompt::persona;
    use crate::session::InMemorySessionStore;

    struct CannedProvider {
        replies: Mutex<Vec<String>>,
    }

    impl LlmProvider for CannedProvider {
        fn name(&self) -> &str {
            "canned"
        }

        fn stream(
            &self,
            _request: CompletionRequest,
        ) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>> {
            let reply = self.replies.lock().unwrap().pop().unwrap_or_default();
            Box::pin(futures_util::stream::iter(vec![
                Ok(StreamEvent::TextDelta { text: reply }),
                Ok(StreamEvent::Done),
            ]))
        }
    }

    struct FakeRenderer;

    impl PlanRenderer for FakeRenderer {
        fn render(&self, _plan: &SafetyPlan) -> Result<Vec<u8>, RenderError> {
            Ok(b"%PDF-fake".to_vec())
        }
    }

    fn engine(replies: &[&str]) -> ChatEngine {
        let mut replies: Vec<String> = replies.iter().map(|s| s.to_string()).collect();
        replies.reverse();
        let client = CompletionClient::new(
            Box::new(CannedProvider {
                replies: Mutex::new(replies),
            }),
            vec!["test-model".into()],
        );
        ChatEngine::new(
            Arc::new(InMemorySessionStore::new()),
            Some(client),
            Arc::new(FakeRenderer),
        )
    }

    async fn send(engine: &ChatEngine, id: SessionId, message: &str) -> ChatOutcome {
        engine.handle_message(id, message, message).await.unwrap()
    }

    #[tokio::test]
    async fn test_benign_exchange_stays_with_orchestrator() {
        let engine = engine(&["Nice to meet you! How are you feeling today?"]);
        let id = Uuid::now_v7();

        let outcome = send(&engine, id, "hello").await;

        assert_eq!(outcome.current_agent, AgentKind::Orchestrator);
        assert!(!outcome.safety_plan_available);
        assert_eq!(outcome.response, "Nice to meet you! How are you feeling today?");
    }

    #[tokio::test]
    async fn test_history_persists_across_turns() {
        let engine = engine(&["First reply.", "Second reply."]);
        let id = Uuid::now_v7();

        send(&engine, id, "one").await;
        send(&engine, id, "two").await;

        let session = engine.store.get(&id).unwrap();
        assert_eq!(session.history.len(), 4);
        assert_eq!(session.history[0].content, "one");
        assert_eq!(session.history[3].content, "Second reply.");
    }

    #[tokio::test]
    async fn test_suicidal_message_switches_and_appends_welcome() {
        let engine = engine(&[]);
        let id = Uuid::now_v7();

        let outcome = send(&engine, id, "I want to end my life").await;

        assert_eq!(outcome.current_agent, AgentKind::Interview);
        assert!(outcome.response.starts_with(persona::REFERRAL_HANDOFF_EN));
        assert!(outcome.response.contains(SPECIALIST_INTRO));
    }

    #[tokio::test]
    async fn test_welcome_not_duplicated_when_response_introduces_specialist() {
        let engine = engine(&[
            "I'm a psychiatric interview specialist and I'll take it from here. [REFER_TO_INTERVIEW_AGENT]",
        ]);
        let id = Uuid::now_v7();

        let outcome = send(&engine, id, "everything is too much for me").await;

        assert_eq!(outcome.current_agent, AgentKind::Interview);
        assert_eq!(outcome.response.matches(SPECIALIST_INTRO).count(), 1);
    }

    #[tokio::test]
    async fn test_interview_turn_appends_plan_and_stores_document() {
        let engine = engine(&[
            // Orchestrator bypass needs no reply; interview turn does.
            "I'm here with you. Are you safe right now?",
        ]);
        let id = Uuid::now_v7();

        send(&engine, id, "I want to end my life").await;
        let outcome = send(&engine, id, "no one can help me").await;

        assert_eq!(outcome.current_agent, AgentKind::Interview);
        assert!(outcome.safety_plan_available);
        assert!(outcome.response.contains("Personalized Safety Plan"));
        assert_eq!(engine.safety_plan_pdf(&id).unwrap(), b"%PDF-fake");
    }

    #[tokio::test]
    async fn test_unconfigured_engine_reports_not_configured() {
        let engine = ChatEngine::new(
            Arc::new(InMemorySessionStore::new()),
            None,
            Arc::new(FakeRenderer),
        );

        let err = engine
            .handle_message(Uuid::now_v7(), "hello", "hello")
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::NotConfigured));
        assert!(!engine.is_configured());
    }

    #[tokio::test]
    async fn test_reset_returns_to_orchestrator() {
        let engine = engine(&["Back with you."]);
        let id = Uuid::now_v7();

        send(&engine, id, "I want to end my life").await;
        let welcome = engine.reset_session(&id);
        assert!(welcome.contains("in which language would you prefer"));

        let outcome = send(&engine, id, "hello again").await;
        assert_eq!(outcome.current_agent, AgentKind::Orchestrator);
    }

    #[tokio::test]
    async fn test_safety_plan_pdf_absent_for_unknown_session() {
        let engine = engine(&[]);
        assert!(engine.safety_plan_pdf(&Uuid::now_v7()).is_none());
    }
}
