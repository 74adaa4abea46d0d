//! Session store: the live conversation plus persisted history

use super::store::{HistoryEntry, Message, Role, SessionRecord};
use crate::storage::KeyValueStore;
use crate::utils::now_millis;
use tracing::{debug, info, warn};

/// Default storage key for the persisted history
pub const HISTORY_KEY: &str = "chatHistory";

/// Owns the live conversation and reads/writes the saved history.
///
/// The history is stored as one JSON array under a single key and is
/// rewritten in full on every save.
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
    history_key: String,
    live: Vec<Message>,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Create a store using the default history key
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, HISTORY_KEY)
    }

    /// Create a store using a custom history key
    pub fn with_key(storage: S, history_key: impl Into<String>) -> Self {
        Self {
            storage,
            history_key: history_key.into(),
            live: Vec::new(),
        }
    }

    /// Append a message to the live conversation.
    ///
    /// No validation happens here; callers admit and sanitize first.
    pub fn append(&mut self, role: Role, text: impl Into<String>) {
        self.live.push(Message::new(role, text));
    }

    /// The live conversation, oldest first
    pub fn messages(&self) -> &[Message] {
        &self.live
    }

    /// Clear the live conversation
    pub fn reset(&mut self) {
        debug!("Clearing {} live messages", self.live.len());
        self.live.clear();
    }

    /// Read the persisted history.
    ///
    /// A missing, unreadable or corrupt value yields an empty history.
    pub fn load_history(&self) -> Vec<SessionRecord> {
        let raw = match self.storage.get(&self.history_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read chat history, treating as empty: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<SessionRecord>>(&raw) {
            Ok(history) => history,
            Err(e) => {
                warn!("Stored chat history is corrupt, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Save the live conversation as a new record and persist the full history.
    ///
    /// Returns the id of the new record.
    pub fn save(&self) -> crate::Result<u64> {
        let title = format!("Chat {}", chrono::Local::now().format("%H:%M:%S"));
        self.save_as(title)
    }

    /// Save with an explicit title
    pub fn save_as(&self, title: impl Into<String>) -> crate::Result<u64> {
        let mut history = self.load_history();
        let id = next_session_id(&history, now_millis());

        history.push(SessionRecord {
            id,
            title: title.into(),
            messages: self.live.clone(),
        });

        let serialized = serde_json::to_string(&history)?;
        self.storage.set(&self.history_key, &serialized)?;
        info!(
            "Saved session {} with {} messages ({} sessions in history)",
            id,
            self.live.len(),
            history.len()
        );
        Ok(id)
    }

    /// `{id, title}` pairs of the persisted history, in saved order
    pub fn load_history_index(&self) -> Vec<HistoryEntry> {
        self.load_history().iter().map(SessionRecord::entry).collect()
    }

    /// Replace the live conversation with a saved record's messages.
    ///
    /// Returns `false` and leaves the live conversation untouched when no
    /// record has this id.
    pub fn load_session(&mut self, id: u64) -> bool {
        match self.load_history().into_iter().find(|s| s.id == id) {
            Some(record) => {
                debug!("Loaded session {} ({} messages)", id, record.messages.len());
                self.live = record.messages;
                true
            }
            None => {
                debug!("Session {} not found in history", id);
                false
            }
        }
    }
}

/// Pick an id for a new record: the current millisecond, bumped past any
/// id already in the history so two saves in the same millisecond differ.
pub fn next_session_id(history: &[SessionRecord], now_ms: u64) -> u64 {
    match history.iter().map(|s| s.id).max() {
        Some(max) if max >= now_ms => max + 1,
        _ => now_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStore, MemoryStore};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn store() -> SessionStore<MemoryStore> {
        SessionStore::new(MemoryStore::new())
    }

    #[test]
    fn test_append_and_reset() {
        let mut sessions = store();
        sessions.append(Role::User, "Hello");
        sessions.append(Role::Bot, "Hi there!");
        assert_eq!(sessions.messages().len(), 2);
        assert_eq!(sessions.messages()[1].role(), Role::Bot);

        sessions.reset();
        assert!(sessions.messages().is_empty());
    }

    #[test]
    fn test_append_does_not_validate() {
        let mut sessions = store();
        sessions.append(Role::User, "");
        assert_eq!(sessions.messages()[0].content(), "");
    }

    #[test]
    fn test_empty_history_when_nothing_stored() {
        let sessions = store();
        assert!(sessions.load_history().is_empty());
        assert!(sessions.load_history_index().is_empty());
    }

    #[test]
    fn test_corrupt_history_degrades_to_empty() {
        for corrupt in ["{not json", "null", r#"{"id":1}"#, r#"[{"id":"x"}]"#, ""] {
            let storage = MemoryStore::new();
            storage.set(HISTORY_KEY, corrupt).unwrap();
            let sessions = SessionStore::new(storage);
            assert!(sessions.load_history().is_empty(), "{corrupt:?}");
            assert!(sessions.load_history_index().is_empty());
        }
    }

    #[test]
    fn test_save_then_load_reproduces_messages() {
        let mut sessions = store();
        sessions.append(Role::User, "What is a firewall?");
        sessions.append(Role::Bot, "A firewall filters traffic &lt;in&gt; and out.");
        let expected = sessions.messages().to_vec();

        let id = sessions.save().unwrap();
        sessions.reset();
        assert!(sessions.messages().is_empty());

        assert!(sessions.load_session(id));
        assert_eq!(sessions.messages(), expected.as_slice());
    }

    #[test]
    fn test_loaded_session_is_a_copy() {
        let mut sessions = store();
        sessions.append(Role::User, "one");
        let id = sessions.save().unwrap();

        assert!(sessions.load_session(id));
        sessions.append(Role::User, "two");

        let history = sessions.load_history();
        assert_eq!(history[0].messages.len(), 1);
    }

    #[test]
    fn test_load_unknown_session_is_noop() {
        let mut sessions = store();
        sessions.append(Role::User, "keep me");
        assert!(!sessions.load_session(42));
        assert_eq!(sessions.messages().len(), 1);
        assert_eq!(sessions.messages()[0].content(), "keep me");
    }

    #[test]
    fn test_rapid_saves_get_distinct_ids() {
        let mut sessions = store();
        sessions.append(Role::User, "a");
        let first = sessions.save().unwrap();
        let second = sessions.save().unwrap();
        let third = sessions.save().unwrap();
        assert!(first < second && second < third);

        let index = sessions.load_history_index();
        let ids: Vec<u64> = index.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![first, second, third]);
    }

    #[test]
    fn test_next_session_id() {
        assert_eq!(next_session_id(&[], 1000), 1000);

        let history = vec![SessionRecord {
            id: 1000,
            title: "Chat".to_string(),
            messages: Vec::new(),
        }];
        assert_eq!(next_session_id(&history, 1000), 1001);
        assert_eq!(next_session_id(&history, 999), 1001);
        assert_eq!(next_session_id(&history, 5000), 5000);
    }

    #[test]
    fn test_save_title_format() {
        let sessions = store();
        sessions.save().unwrap();
        let index = sessions.load_history_index();
        assert!(index[0].title.starts_with("Chat "));
        assert_eq!(index[0].title.len(), "Chat 00:00:00".len());
    }

    #[test]
    fn test_save_overwrites_corrupt_history() {
        let storage = Arc::new(MemoryStore::new());
        storage.set(HISTORY_KEY, "garbage").unwrap();
        let mut sessions = SessionStore::new(storage.clone());
        sessions.append(Role::User, "fresh");
        sessions.save_as("Recovered").unwrap();

        let raw = storage.get(HISTORY_KEY).unwrap().unwrap();
        let parsed: Vec<SessionRecord> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].title, "Recovered");
    }

    #[test]
    fn test_history_survives_restart() {
        let temp_dir = TempDir::new().unwrap();

        let mut sessions = SessionStore::new(FileStore::new(temp_dir.path()));
        sessions.append(Role::User, "persist me");
        let id = sessions.save_as("Chat 09:00:00").unwrap();
        drop(sessions);

        let mut reopened = SessionStore::new(FileStore::new(temp_dir.path()));
        assert_eq!(
            reopened.load_history_index(),
            vec![HistoryEntry {
                id,
                title: "Chat 09:00:00".to_string()
            }]
        );
        assert!(reopened.load_session(id));
        assert_eq!(reopened.messages()[0].content(), "persist me");
    }

    #[test]
    fn test_custom_history_key() {
        let storage = Arc::new(MemoryStore::new());
        let sessions = SessionStore::with_key(storage.clone(), "otherHistory");
        sessions.save_as("x").unwrap();
        assert!(storage.get("otherHistory").unwrap().is_some());
        assert!(storage.get(HISTORY_KEY).unwrap().is_none());
    }
}
