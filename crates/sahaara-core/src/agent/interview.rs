//! Psychiatric interview specialist agent.
//!
//! Runs the safety assessment after a hand-off. The post-generation guard
//! is the load-bearing piece: when the model refuses or tries to end a
//! crisis conversation, its output is replaced with a deterministic safety
//! question so the assessment always moves forward.

use tracing::warn;

use sahaara_types::agent::Language;
use sahaara_types::session::SessionRecord;

use crate::classify;
use crate::llm::CompletionClient;
use crate::prompt::{self, persona};

/// Trailing history window sent with each interview turn.
const HISTORY_WINDOW: usize = 15;

/// Assistant turns inspected when choosing the next safety question.
const ASKED_SCAN_WINDOW: usize = 6;

const TEMPERATURE: f64 = 0.7;
const CRISIS_TEMPERATURE: f64 = 0.9;

/// Refusal and conversation-ending phrasings that trigger the guard.
const REFUSAL_PATTERNS: &[&str] = &[
    "cannot continue",
    "cannot help",
    "cannot provide",
    "cannot assist",
    "please seek help",
    "contact a professional",
    "i cannot",
    "is there anything else",
    "mental health professional",
    "crisis hotline",
    "seek help from",
    "anything else i can help",
    "can help you with",
];

const MEANS_QUESTION: &str =
    "Do you have access to that building right now? Can you get to the 8th floor?";
const TIMELINE_QUESTION: &str =
    "When do you think you might do this? Today, tonight, or later?";
const LOCATION_QUESTION: &str = "Are you alone right now, or is someone with you?";
const PLAN_QUESTION: &str = "Do you have a plan? What were you thinking?";
const SUPPORT_QUESTION: &str =
    "Can you be with someone you trust right now? Or can you move to a safer place?";

pub struct InterviewAgent;

impl InterviewAgent {
    /// Produce the interview specialist's reply, updating the session's
    /// language in place. Never surfaces a model error: a crisis turn falls
    /// back to an immediate safety question, any other failure to a generic
    /// continuation prompt.
    ///
    /// `user_message` drives the crisis classification; `model_content` is
    /// what goes to the model and drives the specific-plan check (it may
    /// carry an attached image note).
    pub async fn respond(
        client: &CompletionClient,
        session: &mut SessionRecord,
        user_message: &str,
        model_content: &str,
    ) -> String {
        if session.language.is_none() {
            session.language = detect_language(session);
        }

        let crisis = classify::is_mental_health_concern(user_message);
        let specific_plan = classify::mentions_specific_plan(model_content);

        let system = prompt::interview_system_prompt(session.language, crisis, specific_plan);
        let content = if crisis {
            prompt::frame_crisis_content(model_content, specific_plan)
        } else {
            model_content.to_string()
        };
        let temperature = if crisis { CRISIS_TEMPERATURE } else { TEMPERATURE };

        let output = match client
            .generate(
                &system,
                session.recent_history(HISTORY_WINDOW),
                &content,
                temperature,
            )
            .await
        {
            Ok(text) => text,
            Err(error) => {
                warn!(%error, crisis, "interview model call failed, using fixed fallback");
                String::new()
            }
        };

        if output.is_empty() {
            return if crisis {
                persona::INTERVIEW_CRISIS_FALLBACK.to_string()
            } else {
                persona::INTERVIEW_EMPTY_FALLBACK.to_string()
            };
        }

        if crisis && is_refusal(&output) {
            warn!("model refused during crisis, overriding with next safety question");
            return override_response(session, specific_plan);
        }

        output
    }
}

fn detect_language(session: &SessionRecord) -> Option<Language> {
    session
        .recent_user_contents(5)
        .find_map(classify::detect_language)
}

fn is_refusal(output: &str) -> bool {
    let lower = output.to_lowercase();
    REFUSAL_PATTERNS.iter().any(|p| lower.contains(p))
}

/// Pick the next unasked safety question by scanning recent assistant
/// turns, in severity order: means access, timeline, whereabouts, plan,
/// then generic support.
fn next_safety_question(session: &SessionRecord, specific_plan: bool) -> &'static str {
    let recent: Vec<String> = session
        .recent_assistant_contents(ASKED_SCAN_WINDOW)
        .map(|content| content.to_lowercase())
        .collect();
    let asked =
        |needles: &[&str]| recent.iter().any(|c| needles.iter().any(|n| c.contains(n)));

    let asked_plan = asked(&["plan"]);
    let asked_means = asked(&["access", "means", "building", "floor"]);
    let asked_timeline = asked(&["when", "timeline", "today", "tonight"]);
    let asked_location = asked(&["alone", "with you", "location"]);

    if specific_plan && !asked_means {
        MEANS_QUESTION
    } else if specific_plan && !asked_timeline {
        TIMELINE_QUESTION
    } else if !asked_location {
        LOCATION_QUESTION
    } else if !asked_plan {
        PLAN_QUESTION
    } else {
        SUPPORT_QUESTION
    }
}

fn override_response(session: &SessionRecord, specific_plan: bool) -> String {
    let question = next_safety_question(session, specific_plan);
    match session.language {
        Some(Language::UrduHindi) => {
            format!("Main aap ke saath hoon. Stay with me. {question}")
        }
        _ => format!("I'm here with you. Stay with me. Let me ask you something important. {question}"),
    }
}
