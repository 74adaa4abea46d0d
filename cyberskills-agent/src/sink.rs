//! Collaborators the controller drives but does not implement

use async_trait::async_trait;
use cyberskills_core::session::{Message, Role};
use std::sync::Arc;

/// Where messages are rendered.
///
/// Text handed to a sink is already sanitized; the sink only shows it.
pub trait DisplaySink: Send + Sync {
    /// Append a message and make it visible
    fn append(&self, role: Role, text: &str);

    /// Remove everything shown so far
    fn clear(&self);

    /// Replace the shown conversation
    fn render(&self, messages: &[Message]) {
        self.clear();
        for message in messages {
            self.append(message.role(), message.content());
        }
    }
}

impl<T: DisplaySink + ?Sized> DisplaySink for Arc<T> {
    fn append(&self, role: Role, text: &str) {
        (**self).append(role, text)
    }

    fn clear(&self) {
        (**self).clear()
    }

    fn render(&self, messages: &[Message]) {
        (**self).render(messages)
    }
}

/// Asks the user to confirm a destructive action
#[async_trait]
pub trait ConfirmPrompt: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Answers every prompt the same way, for non-interactive runs
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

#[async_trait]
impl ConfirmPrompt for AutoConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}
