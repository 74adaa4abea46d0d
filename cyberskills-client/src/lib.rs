//! Chat backend client for the Cyberskills assistant
//!
//! The backend is an opaque service: one call sends a message and returns
//! a reply or an error string, another clears its conversation state.

pub mod base;
pub mod http;

pub use base::{
    BackendError, BackendResult, ChatBackend, ChatRequest, ChatResponse, NO_RESPONSE_TEXT,
};
pub use http::HttpBackend;

use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
impl<T: ChatBackend + ?Sized> ChatBackend for Arc<T> {
    async fn chat(&self, message: &str) -> BackendResult<ChatResponse> {
        (**self).chat(message).await
    }

    async fn reset(&self) -> BackendResult<()> {
        (**self).reset().await
    }
}
