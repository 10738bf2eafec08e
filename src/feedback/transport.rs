//! Feedback Transport
//!
//! Sends a [`FeedbackSubmission`] to `POST /feedbacks` and hands back the
//! status plus the JSON body, whatever the status was.

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use super::{FeedbackSubmission, SubmissionResult};

/// Path of the feedback endpoint
pub const FEEDBACK_PATH: &str = "/feedbacks";

/// Raw reply from the feedback endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl TransportResponse {
    pub fn new(status: u16, body: serde_json::Value) -> Self {
        Self { status, body }
    }

    /// 2xx, the range a fetch `Response.ok` accepts
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Interpret the body according to the status.
    ///
    /// A missing `message`/`error` field yields an empty string.
    pub fn into_result(self) -> SubmissionResult {
        let field = |name: &str| {
            self.body
                .get(name)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };

        if self.is_ok() {
            SubmissionResult::Accepted {
                message: field("message"),
            }
        } else {
            SubmissionResult::Rejected {
                error: field("error"),
            }
        }
    }
}

/// Carries a submission to the backend
#[async_trait]
pub trait FeedbackTransport: Send + Sync {
    async fn post_feedback(
        &self,
        submission: &FeedbackSubmission,
    ) -> Result<TransportResponse, TransportError>;
}

/// reqwest-backed transport
///
/// No timeout and no retries: a submission waits for its single response.
#[derive(Debug, Clone)]
pub struct HttpFeedbackTransport {
    client: Client,
    endpoint: String,
}

impl HttpFeedbackTransport {
    /// Transport posting to `<base_url>/feedbacks`
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), FEEDBACK_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl FeedbackTransport for HttpFeedbackTransport {
    async fn post_feedback(
        &self,
        submission: &FeedbackSubmission,
    ) -> Result<TransportResponse, TransportError> {
        // .json() also sets Content-Type: application/json
        let response = self
            .client
            .post(&self.endpoint)
            .json(submission)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout
                } else if e.is_connect() {
                    TransportError::Unavailable(e.to_string())
                } else {
                    TransportError::Request(e)
                }
            })?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let body = serde_json::from_slice(&bytes)
            .map_err(|e| TransportError::MalformedBody(e.to_string()))?;

        Ok(TransportResponse { status, body })
    }
}

/// Failures before a usable response was obtained
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Request timeout")]
    Timeout,

    #[error("Response body is not valid JSON: {0}")]
    MalformedBody(String),
}
