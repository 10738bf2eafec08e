//! Feedback Submission
//!
//! Client side of the `POST /feedbacks` contract: serialize a form into a
//! [`FeedbackSubmission`], send it, and render a success or error status.
//!
//! - [`transport`]: the HTTP call and its failure modes
//! - [`submitter`]: the per-submission state machine and the form/status
//!   abstractions it drives

pub mod submitter;
pub mod transport;

pub use submitter::{
    FeedbackForm, FeedbackFormBinding, FeedbackSubmitter, StatusDisplay, StatusVariant,
    SubmissionState, GENERIC_FAILURE_MESSAGE,
};
pub use transport::{
    FeedbackTransport, HttpFeedbackTransport, TransportError, TransportResponse, FEEDBACK_PATH,
};

use serde::{Deserialize, Serialize};

/// Body of `POST /feedbacks`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackSubmission {
    pub id: String,
    pub feedback: String,
}

/// Backend answer, discriminated by HTTP status
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionResult {
    Accepted { message: String },
    Rejected { error: String },
}
