//! Session record and conversation history types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::agent::{AgentKind, Language};

/// Opaque session identifier handed to the caller on session creation.
pub type SessionId = Uuid;

/// Role of a message in the stored conversation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One turn of conversation. Immutable once appended; ordering is
/// chronological and is the only structure the history has.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Per-session state mutated after every exchange.
///
/// Invariant: exactly one agent is active at a time. `referral_offered`
/// tracks that the orchestrator has suggested the interview specialist and
/// is waiting for the user's consent on a following turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub current_agent: AgentKind,
    pub language: Option<Language>,
    pub history: Vec<ChatMessage>,
    pub referral_offered: bool,
    /// Rendered safety-plan document, kept for the download endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_plan_pdf: Option<Vec<u8>>,
}

impl Default for SessionRecord {
    fn default() -> Self {
        Self {
            current_agent: AgentKind::Orchestrator,
            language: None,
            history: Vec::new(),
            referral_offered: false,
            safety_plan_pdf: None,
        }
    }
}

impl SessionRecord {
    /// Trailing window of the history, oldest first.
    pub fn recent_history(&self, n: usize) -> &[ChatMessage] {
        let len = self.history.len();
        &self.history[len.saturating_sub(n)..]
    }

    /// The most recent `n` user turns, newest first.
    pub fn recent_user_contents(&self, n: usize) -> impl Iterator<Item = &str> {
        self.history
            .iter()
            .rev()
            .filter(|m| m.role == ChatRole::User)
            .take(n)
            .map(|m| m.content.as_str())
    }

    /// The most recent `n` assistant turns, newest first.
    pub fn recent_assistant_contents(&self, n: usize) -> impl Iterator<Item = &str> {
        self.history
            .iter()
            .rev()
            .filter(|m| m.role == ChatRole::Assistant)
            .take(n)
            .map(|m| m.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session_is_orchestrator() {
        let record = SessionRecord::default();
        assert_eq!(record.current_agent, AgentKind::Orchestrator);
        assert!(record.language.is_none());
        assert!(record.history.is_empty());
        assert!(!record.referral_offered);
        assert!(record.safety_plan_pdf.is_none());
    }

    #[test]
    fn test_recent_history_window() {
        let mut record = SessionRecord::default();
        for i in 0..12 {
            record.history.push(ChatMessage::user(format!("m{i}")));
        }
        let window = record.recent_history(10);
        assert_eq!(window.len(), 10);
        assert_eq!(window[0].content, "m2");
        assert_eq!(window[9].content, "m11");
    }

    #[test]
    fn test_recent_history_shorter_than_window() {
        let mut record = SessionRecord::default();
        record.history.push(ChatMessage::user("only"));
        assert_eq!(record.recent_history(10).len(), 1);
    }

    #[test]
    fn test_recent_user_contents_newest_first() {
        let mut record = SessionRecord::default();
        record.history.push(ChatMessage::user("first"));
        record.history.push(ChatMessage::assistant("reply"));
        record.history.push(ChatMessage::user("second"));
        let contents: Vec<&str> = record.recent_user_contents(3).collect();
        assert_eq!(contents, vec!["second", "first"]);
    }
}
