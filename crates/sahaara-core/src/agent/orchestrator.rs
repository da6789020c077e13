//! First-contact support agent.
//!
//! Handles general conversation and decides when the session moves to the
//! interview specialist. The suicidal-keyword check runs before any model
//! call so escalation can never be lost to a model outage.

use tracing::info;

use sahaara_types::agent::Language;
use sahaara_types::llm::LlmError;
use sahaara_types::session::SessionRecord;

use crate::agent::routing::parse_routing_signal;
use crate::classify;
use crate::llm::CompletionClient;
use crate::prompt::{self, persona};

/// Trailing history window sent with each orchestrator turn.
const HISTORY_WINDOW: usize = 10;

const TEMPERATURE: f64 = 0.7;

/// An agent's reply plus whether the session hands off to the interview
/// specialist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentReply {
    pub text: String,
    pub switch_to_interview: bool,
}

pub struct OrchestratorAgent;

impl OrchestratorAgent {
    /// Produce the orchestrator's reply, updating the session's language
    /// and referral flag in place.
    ///
    /// `user_message` is what the user typed and drives all classification;
    /// `model_content` is what goes to the model (it may carry an attached
    /// image note).
    pub async fn respond(
        client: &CompletionClient,
        session: &mut SessionRecord,
        user_message: &str,
        model_content: &str,
    ) -> Result<AgentReply, LlmError> {
        // Language is sticky: detected once, then kept for the session.
        if session.language.is_none() {
            session.language = classify::detect_language(user_message);
        }

        // Escalation keywords bypass the model entirely.
        if classify::is_suicidal(user_message) {
            session.referral_offered = true;
            info!("suicidal keywords detected, bypassing model and handing off");
            return Ok(AgentReply {
                text: prompt::referral_handoff(session.language).to_string(),
                switch_to_interview: true,
            });
        }

        if session.language.is_none() {
            session.language = detect_language_from_history(session);
        }

        let system = prompt::orchestrator_system_prompt(session.language);
        let output = client
            .generate(
                &system,
                session.recent_history(HISTORY_WINDOW),
                model_content,
                TEMPERATURE,
            )
            .await?;
        let output = if output.is_empty() {
            persona::ORCHESTRATOR_EMPTY_FALLBACK.to_string()
        } else {
            output
        };

        let (mut text, mut switch) = parse_routing_signal(&output);

        if switch {
            session.referral_offered = true;
        } else if session.referral_offered && classify::is_referral_consent(user_message) {
            switch = true;
            text.push_str("\n\n");
            text.push_str(persona::CONSENT_HANDOFF);
        } else if classify::is_mental_health_concern(user_message) {
            session.referral_offered = true;
        }

        Ok(AgentReply {
            text,
            switch_to_interview: switch,
        })
    }
}

fn detect_language_from_history(session: &SessionRecord) -> Option<Language> {
    session
        .recent_user_contents(3)
        .find_map(classify::detect_language)
}
