//! Safety plan and escalation record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::agent::{Language, RiskLevel};

/// The four fixed sections of a safety plan, each an ordered list of
/// recommendations. Populated from static per-language templates, never
/// model-generated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanSections {
    pub immediate_safety: Vec<String>,
    pub coping_strategies: Vec<String>,
    pub support_resources: Vec<String>,
    pub emergency_contacts: Vec<String>,
}

/// A generated safety plan. Constructed fresh per request; only the rendered
/// document blob survives in the session for download.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyPlan {
    pub created_at: DateTime<Utc>,
    pub language: Language,
    pub risk_level: RiskLevel,
    pub sections: PlanSections,
}

/// Priority of a human-escalation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EscalationPriority {
    Urgent,
    High,
}

impl fmt::Display for EscalationPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EscalationPriority::Urgent => write!(f, "URGENT"),
            EscalationPriority::High => write!(f, "HIGH"),
        }
    }
}

/// Escalation record produced alongside every safety plan.
///
/// `notified` is always true: the external notification integration
/// (on-call clinician / moderator / helpline callback) is a placeholder
/// that was never wired up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Escalation {
    pub triggered: bool,
    pub timestamp: DateTime<Utc>,
    pub priority: EscalationPriority,
    pub notified: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_sections_default_empty() {
        let sections = PlanSections::default();
        assert!(sections.immediate_safety.is_empty());
        assert!(sections.emergency_contacts.is_empty());
    }

    #[test]
    fn test_escalation_priority_serde() {
        let json = serde_json::to_string(&EscalationPriority::Urgent).unwrap();
        assert_eq!(json, "\"URGENT\"");
    }

    #[test]
    fn test_safety_plan_serde_roundtrip() {
        let plan = SafetyPlan {
            created_at: Utc::now(),
            language: Language::English,
            risk_level: RiskLevel::High,
            sections: PlanSections::default(),
        };
        let json = serde_json::to_string(&plan).unwrap();
        let parsed: SafetyPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.risk_level, RiskLevel::High);
        assert_eq!(parsed.language, Language::English);
    }
}
