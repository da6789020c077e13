//! Agent identity, language, and risk classification types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which conversational persona currently owns a session.
///
/// Every session starts with the orchestrator. The only defined transition is
/// orchestrator -> interview; once escalated, the session stays escalated
/// until it is explicitly reset at the chat entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    #[default]
    Orchestrator,
    Interview,
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentKind::Orchestrator => write!(f, "orchestrator"),
            AgentKind::Interview => write!(f, "interview"),
        }
    }
}

impl FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "orchestrator" => Ok(AgentKind::Orchestrator),
            "interview" => Ok(AgentKind::Interview),
            other => Err(format!("invalid agent kind: '{other}'")),
        }
    }
}

/// Detected or declared conversation language.
///
/// Urdu and Hindi are treated as one bucket: the user base writes both in
/// romanized form and the keyword tables overlap almost entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    English,
    UrduHindi,
    Spanish,
    French,
    Arabic,
}

impl Language {
    /// Whether replies should use the Urdu/Hindi localized variants.
    pub fn is_urdu_hindi(&self) -> bool {
        matches!(self, Language::UrduHindi)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::English => write!(f, "English"),
            Language::UrduHindi => write!(f, "Urdu/Hindi"),
            Language::Spanish => write!(f, "Spanish"),
            Language::French => write!(f, "French"),
            Language::Arabic => write!(f, "Arabic"),
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "english" => Ok(Language::English),
            "urdu/hindi" | "urdu" | "hindi" => Ok(Language::UrduHindi),
            "spanish" => Ok(Language::Spanish),
            "french" => Ok(Language::French),
            "arabic" => Ok(Language::Arabic),
            other => Err(format!("invalid language: '{other}'")),
        }
    }
}

/// Risk level attached to a message or a generated safety plan.
///
/// The uppercase serde names match the literal risk-assessment footer the
/// model is instructed to emit, so the two never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Crisis,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Moderate => write!(f, "MODERATE"),
            RiskLevel::High => write!(f, "HIGH"),
            RiskLevel::Crisis => write!(f, "CRISIS"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_kind_roundtrip() {
        for kind in [AgentKind::Orchestrator, AgentKind::Interview] {
            let s = kind.to_string();
            let parsed: AgentKind = s.parse().unwrap();
            assert_eq!(kind, parsed);
        }
    }

    #[test]
    fn test_agent_kind_default_is_orchestrator() {
        assert_eq!(AgentKind::default(), AgentKind::Orchestrator);
    }

    #[test]
    fn test_language_display() {
        assert_eq!(Language::UrduHindi.to_string(), "Urdu/Hindi");
        assert_eq!(Language::English.to_string(), "English");
    }

    #[test]
    fn test_language_parse_aliases() {
        assert_eq!("urdu".parse::<Language>().unwrap(), Language::UrduHindi);
        assert_eq!("hindi".parse::<Language>().unwrap(), Language::UrduHindi);
        assert_eq!("Urdu/Hindi".parse::<Language>().unwrap(), Language::UrduHindi);
        assert!("klingon".parse::<Language>().is_err());
    }

    #[test]
    fn test_risk_level_serde_uppercase() {
        let json = serde_json::to_string(&RiskLevel::Crisis).unwrap();
        assert_eq!(json, "\"CRISIS\"");
        let parsed: RiskLevel = serde_json::from_str("\"HIGH\"").unwrap();
        assert_eq!(parsed, RiskLevel::High);
    }

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Crisis > RiskLevel::High);
        assert!(RiskLevel::High > RiskLevel::Moderate);
        assert!(RiskLevel::Moderate > RiskLevel::Low);
    }
}
