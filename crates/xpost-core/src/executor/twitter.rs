//! ============================================================================
//! Twitter Executor - Posting via X API v2
//! ============================================================================
//! Creates posts with OAuth 1.0a user-context signing:
//! - Plain text posts
//! - Quote posts (`quote_tweet_id`)
//! ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::auth::OAuth1Signer;
use crate::config::Credentials;
use crate::error::{Result, XpostError};
use crate::gateway::{preview, ApiError, PostingClient};
use crate::types::PostResult;

/// X API v2 post creation endpoint
const TWITTER_TWEET_URL: &str = "https://api.twitter.com/2/tweets";

/// Upper bound on one API round-trip
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Executor for X posting operations
pub struct TwitterExecutor {
    client: reqwest::Client,
    signer: OAuth1Signer,
    endpoint: String,
}

impl TwitterExecutor {
    /// Create a new TwitterExecutor with user-context credentials
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_endpoint(credentials, TWITTER_TWEET_URL)
    }

    /// Same as `new` but against another endpoint
    pub fn with_endpoint(credentials: Credentials, endpoint: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| XpostError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            signer: OAuth1Signer::new(credentials),
            endpoint: endpoint.to_string(),
        })
    }

    async fn create(&self, body: &CreateTweetRequest<'_>) -> std::result::Result<PostResult, ApiError> {
        let auth = self
            .signer
            .authorization_header("POST", &self.endpoint, &[])
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", auth)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("X API returned {}", status);
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized {
                    status: status.as_u16(),
                    body,
                },
                StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited(body),
                _ => ApiError::Status {
                    status: status.as_u16(),
                    body,
                },
            });
        }

        let tweet_response: TwitterTweetResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        let result = PostResult::new(tweet_response.data.id);
        info!("Tweet posted: {}", result.url);
        Ok(result)
    }
}

#[async_trait]
impl PostingClient for TwitterExecutor {
    async fn create_post(&self, text: &str) -> std::result::Result<PostResult, ApiError> {
        debug!("Creating tweet: {}...", preview(text));
        self.create(&CreateTweetRequest {
            text,
            quote_tweet_id: None,
        })
        .await
    }

    async fn create_quote_post(
        &self,
        text: &str,
        quote_id: &str,
    ) -> std::result::Result<PostResult, ApiError> {
        debug!("Creating quote of {}: {}...", quote_id, preview(text));
        self.create(&CreateTweetRequest {
            text,
            quote_tweet_id: Some(quote_id),
        })
        .await
    }
}

// ============================================================================
// Twitter API Types
// ============================================================================

#[derive(Debug, Serialize)]
struct CreateTweetRequest<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    quote_tweet_id: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TwitterTweetResponse {
    data: TwitterTweetData,
}

#[derive(Debug, Deserialize)]
struct TwitterTweetData {
    id: String,
}
