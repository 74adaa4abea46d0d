//! HTTP chat backend client

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::base::{BackendError, BackendResult, ChatBackend, ChatRequest, ChatResponse};

/// Client for the `/chat` and `/reset` endpoints
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a client for a backend base URL such as `https://host/api`
    pub fn new(base_url: impl Into<String>) -> BackendResult<Self> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(BackendError::ConfigError(
                "backend base URL must not be empty".to_string(),
            ));
        }

        Ok(Self {
            client: Client::builder()
                .http1_only()
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url,
        })
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn chat(&self, message: &str) -> BackendResult<ChatResponse> {
        let url = self.endpoint("chat");
        debug!("Sending chat request to {}", url);

        let response = self
            .client
            .post(&url)
            .json(&ChatRequest {
                message: message.to_string(),
            })
            .send()
            .await?;

        // Error statuses still carry a JSON body worth showing.
        let status = response.status();
        if !status.is_success() {
            warn!("Chat backend returned HTTP {}", status);
        }

        let body = response.text().await?;
        let value: Value = serde_json::from_str(&body)?;
        Ok(ChatResponse::from_value(&value))
    }

    async fn reset(&self) -> BackendResult<()> {
        let url = self.endpoint("reset");
        debug!("Sending reset request to {}", url);

        let response = self.client.post(&url).send().await?;
        debug!("Reset request answered with HTTP {}", response.status());
        Ok(())
    }
}
