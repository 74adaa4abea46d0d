//! Chat controller: composes admission, session store, backend and display

use cyberskills_client::ChatBackend;
use cyberskills_core::safety::{sanitize, Admission, AdmissionPipeline, Rejection};
use cyberskills_core::session::{HistoryEntry, Message, Role, SessionStore};
use cyberskills_core::storage::KeyValueStore;
use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use crate::sink::{ConfirmPrompt, DisplaySink};
use crate::topics::Topic;

pub const TOO_LONG_NOTICE: &str = "Your message is too long. Please shorten it.";
pub const UNSAFE_NOTICE: &str = "For safety reasons, I can’t respond to that request. \
     Try rephrasing it as a general cybersecurity awareness question.";
pub const RATE_LIMITED_NOTICE: &str = "Please wait a few seconds before sending another message.";
pub const CONNECTION_ERROR_NOTICE: &str = "Error connecting to backend.";
pub const RESET_NOTICE: &str = "Conversation reset.";
pub const SAVE_FAILED_NOTICE: &str = "Could not save this conversation.";

pub const RESET_PROMPT: &str = "Are you sure you want to reset the conversation?";
pub const NEW_CHAT_PROMPT: &str = "Start a new chat?";

/// What happened to a send request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Shown and transmitted; the reply (or failure notice) has been shown
    Sent,
    /// Dropped without any notice (empty input)
    Ignored,
    /// Refused with a notice
    Rejected(Rejection),
}

/// The user-facing notice for a rejection; `None` means stay silent
pub fn rejection_notice(rejection: &Rejection) -> Option<&'static str> {
    match rejection {
        Rejection::Empty => None,
        Rejection::TooLong => Some(TOO_LONG_NOTICE),
        Rejection::Unsafe => Some(UNSAFE_NOTICE),
        Rejection::RateLimited { .. } => Some(RATE_LIMITED_NOTICE),
    }
}

struct ControllerState<S> {
    pipeline: AdmissionPipeline,
    sessions: SessionStore<S>,
}

/// Drives the send path and the session operations.
///
/// All operations take `&self`. Mutable state sits behind a mutex that is
/// released before every backend call or prompt, so a second send can run
/// while the first is still waiting for its reply.
pub struct ChatController<B, D, C, S> {
    backend: B,
    display: D,
    confirm: C,
    state: Mutex<ControllerState<S>>,
}

impl<B, D, C, S> ChatController<B, D, C, S>
where
    B: ChatBackend,
    D: DisplaySink,
    C: ConfirmPrompt,
    S: KeyValueStore,
{
    pub fn new(
        pipeline: AdmissionPipeline,
        sessions: SessionStore<S>,
        backend: B,
        display: D,
        confirm: C,
    ) -> Self {
        Self {
            backend,
            display,
            confirm,
            state: Mutex::new(ControllerState { pipeline, sessions }),
        }
    }

    /// Send user-typed text through the full admission pipeline
    pub async fn send_message(&self, raw: &str) -> SendOutcome {
        let admission = self.state.lock().pipeline.admit(raw);

        match admission {
            Admission::Accepted(message) => {
                self.deliver(message).await;
                SendOutcome::Sent
            }
            Admission::Rejected(rejection) => {
                debug!("Message rejected: {}", rejection);
                match rejection_notice(&rejection) {
                    Some(notice) => {
                        self.post(Role::Bot, notice);
                        SendOutcome::Rejected(rejection)
                    }
                    None => SendOutcome::Ignored,
                }
            }
        }
    }

    /// Send a topic shortcut.
    ///
    /// Skips the rate limit, validity and unsafe checks; the prompt is
    /// still sanitized before it is shown or transmitted.
    pub async fn send_topic(&self, topic: Topic) -> SendOutcome {
        info!("Starting topic: {}", topic);
        self.deliver(sanitize(&topic.prompt())).await;
        SendOutcome::Sent
    }

    async fn deliver(&self, message: String) {
        self.post(Role::User, &message);

        let reply = match self.backend.chat(&message).await {
            Ok(response) => response.text().to_string(),
            Err(e) => {
                warn!("Chat backend call failed: {}", e);
                CONNECTION_ERROR_NOTICE.to_string()
            }
        };

        self.post(Role::Bot, &sanitize(&reply));
    }

    fn post(&self, role: Role, text: &str) {
        self.state.lock().sessions.append(role, text);
        self.display.append(role, text);
    }

    /// Confirm, then reset the backend and the local conversation
    pub async fn reset_conversation(&self) -> bool {
        self.confirm_and_reset(RESET_PROMPT).await
    }

    /// Confirm, then start over with an empty conversation
    pub async fn new_chat(&self) -> bool {
        self.confirm_and_reset(NEW_CHAT_PROMPT).await
    }

    async fn confirm_and_reset(&self, prompt: &str) -> bool {
        if !self.confirm.confirm(prompt).await {
            debug!("Reset declined");
            return false;
        }

        if let Err(e) = self.backend.reset().await {
            warn!("Backend reset failed, clearing local state anyway: {}", e);
        }

        self.state.lock().sessions.reset();
        self.display.clear();
        self.post(Role::Bot, RESET_NOTICE);
        info!("Conversation reset");
        true
    }

    /// Save the live conversation; a storage failure is shown, not returned
    pub fn save_session(&self) -> Option<u64> {
        let result = self.state.lock().sessions.save();
        match result {
            Ok(id) => Some(id),
            Err(e) => {
                error!("Failed to save session: {}", e);
                self.post(Role::Bot, SAVE_FAILED_NOTICE);
                None
            }
        }
    }

    /// Saved sessions, for a selectable list
    pub fn history_index(&self) -> Vec<HistoryEntry> {
        self.state.lock().sessions.load_history_index()
    }

    /// Load a saved session and re-render it; unknown ids are ignored
    pub fn load_session(&self, id: u64) -> bool {
        let messages = {
            let mut state = self.state.lock();
            if !state.sessions.load_session(id) {
                return false;
            }
            state.sessions.messages().to_vec()
        };

        self.display.render(&messages);
        true
    }

    /// Snapshot of the live conversation
    pub fn messages(&self) -> Vec<Message> {
        self.state.lock().sessions.messages().to_vec()
    }
}
