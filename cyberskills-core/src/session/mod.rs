//! Session management for conversation history
//!
//! The live conversation is held in memory; saved conversations are kept
//! as one JSON history document in durable storage.

pub mod manager;
pub mod store;

pub use manager::{next_session_id, SessionStore, HISTORY_KEY};
pub use store::{HistoryEntry, Message, Role, SessionRecord};
