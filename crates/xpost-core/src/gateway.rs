//! ============================================================================
//! Posting Gateway - Thin adapter over the posting API client
//! ============================================================================
//! The gateway owns no network code. It re-checks the message bounds and
//! hands the call to an injected `PostingClient`, mapping client failures to
//! `XpostError::RemoteApi`.
//! ============================================================================

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info};

use crate::error::{Result, XpostError};
use crate::types::PostResult;

/// Failures raised by a posting API client
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unauthorized ({status}): {body}")]
    Unauthorized { status: u16, body: String },

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse response: {0}")]
    Decode(String),
}

/// Anything that can create posts on the platform
#[async_trait]
pub trait PostingClient: Send + Sync {
    /// Create a plain text post
    async fn create_post(&self, text: &str) -> std::result::Result<PostResult, ApiError>;

    /// Create a post quoting `quote_id`
    async fn create_quote_post(
        &self,
        text: &str,
        quote_id: &str,
    ) -> std::result::Result<PostResult, ApiError>;
}

/// Gateway issuing posts through a `PostingClient`
pub struct PostingGateway<C> {
    client: C,
    max_chars: usize,
}

impl<C: PostingClient> PostingGateway<C> {
    pub fn new(client: C, max_chars: usize) -> Self {
        Self { client, max_chars }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Non-blank and at most `max_chars` characters
    pub fn check_message(&self, message: &str) -> Result<()> {
        if message.trim().is_empty() {
            return Err(XpostError::Validation(
                "The text cannot be empty!".to_string(),
            ));
        }

        let chars = message.chars().count();
        if chars > self.max_chars {
            return Err(XpostError::Validation(format!(
                "The text is {} characters long, the maximum is {}",
                chars, self.max_chars
            )));
        }

        Ok(())
    }

    /// Submit a plain post
    pub async fn post(&self, message: &str) -> Result<PostResult> {
        self.check_message(message)?;
        info!("Posting: {}...", preview(message));

        let result = self.client.create_post(message).await.map_err(|e| {
            error!("Post failed: {}", e);
            XpostError::RemoteApi(e.to_string())
        })?;

        info!("Posted {}", result.url);
        Ok(result)
    }

    /// Submit a post quoting `quote_id`
    pub async fn post_quote(&self, message: &str, quote_id: &str) -> Result<PostResult> {
        self.check_message(message)?;
        info!("Posting quote of {}: {}...", quote_id, preview(message));

        let result = self
            .client
            .create_quote_post(message, quote_id)
            .await
            .map_err(|e| {
                error!("Quote post failed: {}", e);
                XpostError::RemoteApi(e.to_string())
            })?;

        info!("Posted {}", result.url);
        Ok(result)
    }
}

/// First 50 characters, for logs
pub(crate) fn preview(text: &str) -> String {
    text.chars().take(50).collect()
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Call recorded by `RecordingClient`
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        Post(String),
        Quote(String, String),
    }

    /// In-memory client recording every call
    #[derive(Default)]
    pub struct RecordingClient {
        pub calls: Mutex<Vec<Call>>,
        pub fail_with: Option<(u16, String)>,
    }

    impl RecordingClient {
        pub fn failing(status: u16, body: &str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_with: Some((status, body.to_string())),
            }
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn respond(&self) -> std::result::Result<PostResult, ApiError> {
            match &self.fail_with {
                Some((status, body)) => Err(ApiError::Status {
                    status: *status,
                    body: body.clone(),
                }),
                None => Ok(PostResult::new("1000")),
            }
        }
    }

    #[async_trait]
    impl PostingClient for RecordingClient {
        async fn create_post(&self, text: &str) -> std::result::Result<PostResult, ApiError> {
            self.calls.lock().unwrap().push(Call::Post(text.to_string()));
            self.respond()
        }

        async fn create_quote_post(
            &self,
            text: &str,
            quote_id: &str,
        ) -> std::result::Result<PostResult, ApiError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Quote(text.to_string(), quote_id.to_string()));
            self.respond()
        }
    }
}
