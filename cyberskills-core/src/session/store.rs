//! Session data structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Bot => f.write_str("bot"),
        }
    }
}

/// A chat message.
///
/// Content is stored exactly as given; callers pass text that has already
/// been sanitized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    /// Create a new message
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A saved, named snapshot of a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Creation time in milliseconds since the Unix epoch, unique within a history
    pub id: u64,
    /// Human-readable title
    pub title: String,
    /// Messages at save time
    pub messages: Vec<Message>,
}

impl SessionRecord {
    /// Index entry for this record
    pub fn entry(&self) -> HistoryEntry {
        HistoryEntry {
            id: self.id,
            title: self.title.clone(),
        }
    }
}

/// The `{id, title}` projection shown in a history list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: u64,
    pub title: String,
}
