//! Session persistence behind a trait so the engine never depends on a
//! concrete backing store.

use dashmap::DashMap;

use sahaara_types::session::{SessionId, SessionRecord};

/// Storage for per-session conversation state.
///
/// Writes are whole-record: concurrent requests against the same session are
/// last-writer-wins, which is accepted for a single-user chat session.
pub trait SessionStore: Send + Sync {
    /// Fetch a snapshot of the session, if it exists.
    fn get(&self, id: &SessionId) -> Option<SessionRecord>;

    /// Store the session record, replacing any previous state.
    fn put(&self, id: SessionId, record: SessionRecord);

    /// Reset the session to a fresh record (creating it if absent) and
    /// return the new state.
    fn reset(&self, id: &SessionId) -> SessionRecord;
}

/// Process-local store. Sessions live for the lifetime of the server; there
/// is no expiry, only the explicit reset at the chat entry point.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<SessionId, SessionRecord>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, id: &SessionId) -> Option<SessionRecord> {
        self.sessions.get(id).map(|r| r.clone())
    }

    fn put(&self, id: SessionId, record: SessionRecord) {
        self.sessions.insert(id, record);
    }

    fn reset(&self, id: &SessionId) -> SessionRecord {
        let record = SessionRecord::default();
        self.sessions.insert(*id, record.clone());
        record
    }
}

#[cfg(test)]
mod tests {
    use sahaara_types::agent::AgentKind;
    use sahaara_types::session::ChatMessage;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_get_missing_session() {
        let store = InMemorySessionStore::new();
        assert!(store.get(&Uuid::now_v7()).is_none());
    }

    #[test]
    fn test_put_then_get() {
        let store = InMemorySessionStore::new();
        let id = Uuid::now_v7();
        let mut record = SessionRecord::default();
        record.history.push(ChatMessage::user("hello"));
        store.put(id, record);

        let fetched = store.get(&id).unwrap();
        assert_eq!(fetched.history.len(), 1);
    }

    #[test]
    fn test_reset_discards_state() {
        let store = InMemorySessionStore::new();
        let id = Uuid::now_v7();
        let mut record = SessionRecord::default();
        record.current_agent = AgentKind::Interview;
        record.referral_offered = true;
        record.history.push(ChatMessage::user("hello"));
        store.put(id, record);

        let fresh = store.reset(&id);
        assert_eq!(fresh.current_agent, AgentKind::Orchestrator);
        assert!(fresh.history.is_empty());

        let fetched = store.get(&id).unwrap();
        assert!(!fetched.referral_offered);
    }

    #[test]
    fn test_reset_creates_when_absent() {
        let store = InMemorySessionStore::new();
        let id = Uuid::now_v7();
        store.reset(&id);
        assert!(store.get(&id).is_some());
    }
}
