//! HTTP client for the chat-reply service
//!
//! The wire protocol is a single JSON request/response pair: one
//! `POST {endpoint}` with body `{"message": "<text>"}` returns
//! `{"reply": "<text>"}`. One request maps to exactly one response; there is
//! no authentication, session identifier, or streaming.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from one round trip to the chat service
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to reach chat service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("chat service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed reply from chat service: {0}")]
    MalformedReply(String),
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    reply: String,
}

/// Client for the chat-reply service
#[derive(Debug, Clone)]
pub struct ChatClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl ChatClient {
    /// Create a new client for the given endpoint
    pub fn new(endpoint: impl Into<String>, timeout: std::time::Duration) -> Result<Self, ClientError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Perform one round trip: send a user message, return the bot reply.
    pub async fn send(&self, message: &str) -> Result<String, ClientError> {
        tracing::debug!(endpoint = %self.endpoint, "sending chat message");

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&ChatRequest { message })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        let body = response.text().await?;
        match serde_json::from_str::<ChatReply>(&body) {
            Ok(parsed) => Ok(parsed.reply),
            Err(e) => Err(ClientError::MalformedReply(e.to_string())),
        }
    }
}
