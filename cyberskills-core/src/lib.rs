//! Core types and services for the Cyberskills assistant
//!
//! This crate holds the two leaf components of the chat client: the
//! message admission pipeline ([`safety`]) and the local session store
//! ([`session`]), together with the storage, configuration and logging
//! plumbing they share.

pub mod config;
pub mod error;
pub mod logging;
pub mod preferences;
pub mod safety;
pub mod session;
pub mod storage;
pub mod utils;

pub use error::{Error, Result};
