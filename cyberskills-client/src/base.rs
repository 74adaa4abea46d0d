//! Base trait for the chat backend

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Text shown when the backend answers with neither a reply nor an error
pub const NO_RESPONSE_TEXT: &str = "No response from backend.";

/// Error type for backend calls
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Body of a chat call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Decoded body of a chat response.
///
/// The backend answers `{"reply": …}` on success and `{"error": …}` when it
/// could not produce one. Any other shape leaves both fields empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatResponse {
    pub reply: Option<String>,
    pub error: Option<String>,
}

impl ChatResponse {
    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            reply: Some(text.into()),
            error: None,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            reply: None,
            error: Some(text.into()),
        }
    }

    /// Extract the string `reply`/`error` fields from any JSON value
    pub fn from_value(value: &Value) -> Self {
        let field = |name: &str| {
            value
                .get(name)
                .and_then(Value::as_str)
                .map(ToString::to_string)
        };
        Self {
            reply: field("reply"),
            error: field("error"),
        }
    }

    /// The text to show: a non-empty reply, else a non-empty error, else
    /// the fixed no-response notice
    pub fn text(&self) -> &str {
        non_empty(&self.reply)
            .or_else(|| non_empty(&self.error))
            .unwrap_or(NO_RESPONSE_TEXT)
    }
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|t| !t.is_empty())
}

/// The remote chat service
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send one sanitized message and wait for the answer
    async fn chat(&self, message: &str) -> BackendResult<ChatResponse>;

    /// Ask the backend to drop its server-side conversation state.
    ///
    /// The response body is not interpreted.
    async fn reset(&self) -> BackendResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reply_preferred_over_error() {
        let response = ChatResponse::from_value(&json!({"reply": "Hi", "error": "nope"}));
        assert_eq!(response.text(), "Hi");
    }

    #[test]
    fn test_error_used_when_no_reply() {
        let response = ChatResponse::from_value(&json!({
            "error": "Azure OpenAI is not configured."
        }));
        assert_eq!(response.text(), "Azure OpenAI is not configured.");

        let response = ChatResponse::from_value(&json!({"reply": "", "error": "boom"}));
        assert_eq!(response.text(), "boom");
    }

    #[test]
    fn test_other_shapes_fall_back() {
        for value in [
            json!({}),
            json!({"status": "ok"}),
            json!({"reply": 5}),
            json!({"detail": [{"msg": "field required"}]}),
            json!(["reply"]),
            json!(null),
            json!({"reply": "", "error": ""}),
        ] {
            assert_eq!(ChatResponse::from_value(&value).text(), NO_RESPONSE_TEXT, "{value}");
        }
    }

    #[test]
    fn test_request_wire_format() {
        let body = serde_json::to_string(&ChatRequest {
            message: "&lt;b&gt;".to_string(),
        })
        .unwrap();
        assert_eq!(body, r#"{"message":"&lt;b&gt;"}"#);
    }
}
