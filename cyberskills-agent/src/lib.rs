//! Chat widget logic for the Cyberskills assistant
//!
//! Wires the admission pipeline, the session store and the chat backend
//! behind one controller. Rendering and confirmation prompts are left to
//! the front end through the traits in [`sink`].

pub mod controller;
pub mod sink;
pub mod topics;

pub use controller::{rejection_notice, ChatController, SendOutcome};
pub use sink::{AutoConfirm, ConfirmPrompt, DisplaySink};
pub use topics::Topic;
