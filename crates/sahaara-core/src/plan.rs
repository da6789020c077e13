//! Safety plan generation, escalation records, and transcript rendering.
//!
//! Everything here is a static table lookup keyed on language and the
//! keyword classifier. Nothing is model-generated: the plan shown during a
//! crisis must not depend on an upstream call succeeding.

use chrono::{DateTime, Utc};

use sahaara_types::agent::{Language, RiskLevel};
use sahaara_types::plan::{Escalation, EscalationPriority, PlanSections, SafetyPlan};

use crate::classify;

/// Crisis and emergency mental-health helpline number.
pub const HELPLINE: &str = "1166";

/// Renders a safety plan into a downloadable document. The concrete
/// renderer lives in the infra crate; the engine only sees this seam.
pub trait PlanRenderer: Send + Sync {
    fn render(&self, plan: &SafetyPlan) -> Result<Vec<u8>, RenderError>;
}

#[derive(Debug, thiserror::Error)]
#[error("safety plan rendering failed: {0}")]
pub struct RenderError(pub String);

fn sections_urdu_hindi() -> PlanSections {
    PlanSections {
        immediate_safety: vec![
            "Agar aap khud ko nuqsan pahunchane ki soch rahe hain, to pehle kisi se baat karein"
                .into(),
            "Kisi trusted person ke saath rehne ki koshish karein".into(),
            "Emergency helpline par call karein (1166)".into(),
            "Agar zarurat ho to nearest hospital jayen".into(),
        ],
        coping_strategies: vec![
            "Gehri saans lein (deep breathing)".into(),
            "Muslim prayer ya meditation karein".into(),
            "Apni pasand ki music sunen".into(),
            "Thoda walk karein ya exercise karein".into(),
        ],
        support_resources: vec![
            "Mental Health Helpline: 1166".into(),
            "Crisis Support: Aapki madad ke liye hamesha koi available hai".into(),
            "Trusted friends ya family members se baat karein".into(),
        ],
        emergency_contacts: Vec::new(),
    }
}

fn sections_english() -> PlanSections {
    PlanSections {
        immediate_safety: vec![
            "If you're thinking of harming yourself, reach out to someone first".into(),
            "Stay with a trusted person if possible".into(),
            "Call emergency helpline (1166 or local crisis line)".into(),
            "Go to nearest hospital if needed".into(),
        ],
        coping_strategies: vec![
            "Practice deep breathing exercises".into(),
            "Use prayer or meditation".into(),
            "Listen to calming music".into(),
            "Take a walk or do light exercise".into(),
        ],
        support_resources: vec![
            "Mental Health Helpline: 1166".into(),
            "Crisis Support: Someone is always available to help".into(),
            "Talk to trusted friends or family members".into(),
        ],
        emergency_contacts: Vec::new(),
    }
}

/// Build a safety plan for the message that triggered it.
pub fn generate(user_message: &str, language: Option<Language>, now: DateTime<Utc>) -> SafetyPlan {
    let language = language.unwrap_or(Language::English);
    let has_crisis =
        classify::is_suicidal(user_message) || classify::is_mental_health_concern(user_message);

    let sections = if language.is_urdu_hindi() {
        sections_urdu_hindi()
    } else {
        sections_english()
    };

    SafetyPlan {
        created_at: now,
        language,
        risk_level: if has_crisis {
            RiskLevel::Crisis
        } else {
            RiskLevel::High
        },
        sections,
    }
}

/// Record a human-escalation event for the message.
///
/// `notified` is a placeholder: the clinician/moderator notification
/// integration is out of scope and nothing is actually paged.
pub fn trigger_escalation(user_message: &str, now: DateTime<Utc>) -> Escalation {
    let has_crisis =
        classify::is_suicidal(user_message) || classify::is_mental_health_concern(user_message);
    Escalation {
        triggered: has_crisis,
        timestamp: now,
        priority: if has_crisis {
            EscalationPriority::Urgent
        } else {
            EscalationPriority::High
        },
        notified: true,
    }
}

/// Localized reassurance line shown alongside the plan.
pub fn support_message(language: Option<Language>) -> &'static str {
    match language {
        Some(Language::UrduHindi) => {
            "Main aapke saath hoon. Aapki safety hamari priority hai. Hum aapki madad kar rahe hain."
        }
        _ => "I'm here with you. Your safety is our priority. We're working to support you.",
    }
}

/// Section heading, with the native-script suffix for Urdu/Hindi plans.
fn section_titles(language: Language) -> [(&'static str, &'static str); 4] {
    if language.is_urdu_hindi() {
        [
            ("immediate_safety", "Immediate Safety Steps / فوری حفاظتی اقدامات"),
            ("coping_strategies", "Coping Strategies / نمٹنے کی حکمت عملی"),
            ("support_resources", "Support Resources / مدد کے وسائل"),
            ("emergency_contacts", "Emergency Contacts / ایمرجنسی رابطے"),
        ]
    } else {
        [
            ("immediate_safety", "Immediate Safety Steps"),
            ("coping_strategies", "Coping Strategies"),
            ("support_resources", "Support Resources"),
            ("emergency_contacts", "Emergency Contacts"),
        ]
    }
}

/// The plan's sections in display order, paired with their table key.
pub fn ordered_sections(plan: &SafetyPlan) -> [(&'static str, &[String]); 4] {
    [
        ("immediate_safety", &plan.sections.immediate_safety),
        ("coping_strategies", &plan.sections.coping_strategies),
        ("support_resources", &plan.sections.support_resources),
        ("emergency_contacts", &plan.sections.emergency_contacts),
    ]
}

/// Document title, with the native-script suffix for Urdu/Hindi plans.
pub fn plan_title(language: Language) -> &'static str {
    if language.is_urdu_hindi() {
        "Personalized Safety Plan / شخصی حفاظتی منصوبہ"
    } else {
        "Personalized Safety Plan"
    }
}

/// Render the plan as marked-up text appended to the chat transcript.
/// Empty sections are skipped.
pub fn render_markdown(plan: &SafetyPlan) -> String {
    let titles = section_titles(plan.language);
    let mut out = String::new();

    out.push_str(&format!("## {}\n\n", plan_title(plan.language)));
    out.push_str(&format!(
        "**Generated:** {}\n",
        plan.created_at.format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str(&format!("**Risk Level:** {}\n", plan.risk_level));

    for (key, items) in ordered_sections(plan) {
        if items.is_empty() {
            continue;
        }
        let title = titles
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, t)| *t)
            .unwrap_or(key);
        out.push_str(&format!("\n### {title}\n"));
        for item in items {
            out.push_str(&format!("- {item}\n"));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crisis_message_yields_crisis_plan() {
        let plan = generate("I want to end my life", None, Utc::now());
        assert_eq!(plan.risk_level, RiskLevel::Crisis);
        assert_eq!(plan.language, Language::English);
    }

    #[test]
    fn test_non_crisis_message_yields_high_plan() {
        // The plan is only generated on interview turns, so even a calm
        // message is never below HIGH.
        let plan = generate("I'm feeling a bit better today", None, Utc::now());
        assert_eq!(plan.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_urdu_hindi_templates_selected() {
        let plan = generate("mujhe madad chahiye", Some(Language::UrduHindi), Utc::now());
        assert!(plan.sections.immediate_safety[0].starts_with("Agar aap"));
        assert!(plan
            .sections
            .support_resources
            .iter()
            .any(|s| s.contains(HELPLINE)));
    }

    #[test]
    fn test_escalation_priority() {
        let urgent = trigger_escalation("I want to die", Utc::now());
        assert!(urgent.triggered);
        assert_eq!(urgent.priority, EscalationPriority::Urgent);

        let high = trigger_escalation("thank you", Utc::now());
        assert!(!high.triggered);
        assert_eq!(high.priority, EscalationPriority::High);
    }

    #[test]
    fn test_support_message_localized() {
        assert!(support_message(Some(Language::UrduHindi)).starts_with("Main aapke saath"));
        assert!(support_message(None).starts_with("I'm here with you"));
    }

    #[test]
    fn test_render_markdown_skips_empty_sections() {
        let plan = generate("I feel hopeless", None, Utc::now());
        let md = render_markdown(&plan);
        assert!(md.starts_with("## Personalized Safety Plan"));
        assert!(md.contains("**Risk Level:** CRISIS"));
        assert!(md.contains("### Immediate Safety Steps"));
        // emergency_contacts is always empty in the templates.
        assert!(!md.contains("Emergency Contacts"));
    }

    #[test]
    fn test_render_markdown_native_script_headings() {
        let plan = generate("khud kushi", Some(Language::UrduHindi), Utc::now());
        let md = render_markdown(&plan);
        assert!(md.contains("شخصی حفاظتی منصوبہ"));
        assert!(md.contains("Immediate Safety Steps / فوری حفاظتی اقدامات"));
    }
}
