//! System-instruction construction for both agents.
//!
//! Behavior is table-driven: a static base persona per agent, concatenated
//! with conditional appendices selected by detected language and, for the
//! interview agent, by crisis/plan classification of the current message.

pub mod persona;

use sahaara_types::agent::Language;
use sahaara_types::session::{ChatMessage, ChatRole};

use crate::classify;

/// Language-lock directive appended when the session language is known.
fn language_lock(language: Language) -> String {
    match language {
        Language::UrduHindi => "\n\nCRITICAL LANGUAGE REQUIREMENT\n\nThe user has been communicating in Urdu/Hindi (including Roman Urdu -- Urdu written in English letters). You MUST respond in the SAME language format the user is using: Roman Urdu gets Roman Urdu, Urdu script (اردو) gets Urdu script, Hindi script (हिंदी) gets Hindi script. DO NOT switch to English. Use phrases like 'Main aap ke saath hoon', 'Aap kaise hain?', 'Bataiye kya ho raha hai?' to maintain connection and trust.".to_string(),
        other => format!(
            "\n\nCRITICAL LANGUAGE REQUIREMENT\n\nThe user has been communicating in {other}. You MUST respond in {other}. DO NOT switch to English. Continue the conversation in {other} to maintain connection and trust."
        ),
    }
}

/// Directive appended to the interview prompt when the current message is a
/// crisis without a specific plan.
const CRISIS_DIRECTIVE: &str = "\n\nCRISIS DETECTED IN CURRENT MESSAGE\n\nYou MUST: continue the conversation (never refuse or end it); conduct a COMPLETE safety assessment asking multiple questions, one per response; systematically cover immediate safety, plan, means access, timeline, environment, and support; keep the user engaged with 'Stay with me' or 'I'm here with you'; respond in the user's language; keep each response to 2-3 short sentences. Never say 'I cannot continue this conversation', 'please seek help' as a way to end, or 'is there anything else I can help you with?'.";

/// Stronger directive appended when the current message names a specific plan.
const SPECIFIC_PLAN_DIRECTIVE: &str = "\n\nHIGH RISK -- SPECIFIC PLAN DETECTED\n\nThe user provided a specific plan; this is when questioning is MOST critical. You MUST: never stop or refuse; ask follow-up questions about access to means, timeline, current location, and support, one per response; complete the FULL safety assessment; keep the user engaged with 'Stay with me'. Never say 'I cannot continue this conversation', 'I cannot help', 'please seek help from a professional' as a way to end, or 'is there anything else I can help you with?'. Keep responses to 2 short sentences maximum.";

/// Build the orchestrator system instruction for the given session language.
pub fn orchestrator_system_prompt(language: Option<Language>) -> String {
    let mut prompt = persona::ORCHESTRATOR_PERSONA.to_string();
    if let Some(lang) = language {
        prompt.push_str(&language_lock(lang));
    }
    prompt
}

/// Build the interview system instruction for the given language and the
/// crisis/plan classification of the current message.
pub fn interview_system_prompt(
    language: Option<Language>,
    crisis: bool,
    specific_plan: bool,
) -> String {
    let mut prompt = persona::INTERVIEW_PERSONA.to_string();
    if let Some(lang) = language {
        prompt.push_str(&language_lock(lang));
    }
    if crisis {
        if specific_plan {
            prompt.push_str(SPECIFIC_PLAN_DIRECTIVE);
        } else {
            prompt.push_str(CRISIS_DIRECTIVE);
        }
    }
    prompt
}

/// Wrap the user content in the crisis framing injected into the user turn
/// so the model treats the message as an assessment continuation rather
/// than a request it might refuse.
pub fn frame_crisis_content(user_content: &str, specific_plan: bool) -> String {
    if specific_plan {
        format!(
            "[HIGH RISK CRISIS - USER PROVIDED SPECIFIC PLAN: '{user_content}']\n\nAs the psychiatric interviewer, the user has provided a specific plan. You MUST continue the assessment and ask follow-up questions about access to means, timeline, current location, and support availability. Do NOT stop or refuse. Complete the full safety assessment."
        )
    } else {
        format!(
            "[CRISIS SITUATION - USER EXPRESSED SUICIDAL THOUGHTS: '{user_content}']\n\nAs the psychiatric interviewer, you MUST continue this conversation and conduct a COMPLETE safety assessment: immediate safety, plan, means, timeline, environment, support. Keep the user engaged. Do NOT refuse to continue."
        )
    }
}

/// The orchestrator's welcome text shown on (re)entry to the chat.
pub fn orchestrator_welcome() -> &'static str {
    persona::ORCHESTRATOR_WELCOME
}

/// The interview specialist's welcome, localized.
///
/// When the session language is unset, the last few user turns are scanned
/// for Urdu/Hindi indicators, matching how the specialist greets users who
/// never stated a preference.
pub fn interview_welcome(language: Option<Language>, history: &[ChatMessage]) -> &'static str {
    let language = language.or_else(|| {
        history
            .iter()
            .rev()
            .filter(|m| m.role == ChatRole::User)
            .take(5)
            .find_map(|m| classify::detect_language(&m.content))
    });

    match language {
        Some(Language::UrduHindi) => persona::INTERVIEW_WELCOME_UR,
        Some(Language::Spanish) => persona::INTERVIEW_WELCOME_ES,
        _ => persona::INTERVIEW_WELCOME_EN,
    }
}

/// Fixed hand-off message for the suicidal-keyword bypass, localized.
pub fn referral_handoff(language: Option<Language>) -> &'static str {
    match language {
        Some(Language::UrduHindi) => persona::REFERRAL_HANDOFF_UR,
        _ => persona::REFERRAL_HANDOFF_EN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orchestrator_prompt_without_language() {
        let prompt = orchestrator_system_prompt(None);
        assert!(prompt.contains("Sahaara Support Orchestrator"));
        assert!(prompt.contains("[REFER_TO_INTERVIEW_AGENT]"));
        assert!(!prompt.contains("CRITICAL LANGUAGE REQUIREMENT"));
    }

    #[test]
    fn test_orchestrator_prompt_language_lock() {
        let prompt = orchestrator_system_prompt(Some(Language::Spanish));
        assert!(prompt.contains("CRITICAL LANGUAGE REQUIREMENT"));
        assert!(prompt.contains("communicating in Spanish"));

        let urdu = orchestrator_system_prompt(Some(Language::UrduHindi));
        assert!(urdu.contains("Roman Urdu"));
    }

    #[test]
    fn test_orchestrator_prompt_footer_contract() {
        let prompt = orchestrator_system_prompt(None);
        assert!(prompt.contains("(LANGUAGE-AWARE RISK ASSESSMENT: [RISK_LEVEL])"));
        assert!(prompt.contains("Risk Level: [RISK_LEVEL]"));
    }

    #[test]
    fn test_interview_prompt_appendix_selection() {
        let base = interview_system_prompt(None, false, false);
        assert!(!base.contains("CRISIS DETECTED IN CURRENT MESSAGE"));
        assert!(!base.contains("SPECIFIC PLAN DETECTED"));

        let crisis = interview_system_prompt(None, true, false);
        assert!(crisis.contains("CRISIS DETECTED IN CURRENT MESSAGE"));
        assert!(!crisis.contains("SPECIFIC PLAN DETECTED"));

        let plan = interview_system_prompt(None, true, true);
        assert!(plan.contains("SPECIFIC PLAN DETECTED"));
        assert!(!plan.contains("CRISIS DETECTED IN CURRENT MESSAGE"));
    }

    #[test]
    fn test_frame_crisis_content_embeds_original() {
        let framed = frame_crisis_content("I will jump from the 8th floor", true);
        assert!(framed.contains("I will jump from the 8th floor"));
        assert!(framed.starts_with("[HIGH RISK CRISIS"));

        let framed = frame_crisis_content("I want to die", false);
        assert!(framed.starts_with("[CRISIS SITUATION"));
    }

    #[test]
    fn test_interview_welcome_localization() {
        use sahaara_types::session::ChatMessage;

        let en = interview_welcome(None, &[]);
        assert!(en.contains("psychiatric interview specialist"));

        let ur = interview_welcome(Some(Language::UrduHindi), &[]);
        assert!(ur.starts_with("Assalam-o-Alaikum"));

        // Language inferred from history when unset.
        let history = vec![ChatMessage::user("mein bahut pareshan hoon")];
        let inferred = interview_welcome(None, &history);
        assert!(inferred.starts_with("Assalam-o-Alaikum"));
    }

    #[test]
    fn test_referral_handoff_localization() {
        assert!(referral_handoff(Some(Language::UrduHindi)).starts_with("Main aapko"));
        assert!(referral_handoff(None).starts_with("I'm connecting you"));
    }
}
