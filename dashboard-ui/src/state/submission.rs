//! Feedback Submission State
//!
//! One form submission goes `Idle -> Submitting -> (Succeeded |
//! FailedWithServerMessage | FailedWithTransportError)`.

use crate::api::FeedbackReply;

/// Shown when no response could be obtained
///
/// Same text as `sentiment_board::feedback::GENERIC_FAILURE_MESSAGE`; keep
/// the two in sync.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred while submitting feedback";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded { message: String },
    FailedWithServerMessage { error: String },
    FailedWithTransportError,
}

impl SubmissionState {
    /// Interpret the outcome of a feedback POST.
    ///
    /// 2xx reads `message`, anything else reads `error`; a missing field is
    /// an empty string.
    pub fn from_outcome(outcome: Result<FeedbackReply, String>) -> Self {
        let reply = match outcome {
            Ok(reply) => reply,
            Err(_) => return SubmissionState::FailedWithTransportError,
        };

        let field = |name: &str| {
            reply
                .body
                .get(name)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };

        if (200..300).contains(&reply.status) {
            SubmissionState::Succeeded {
                message: field("message"),
            }
        } else {
            SubmissionState::FailedWithServerMessage {
                error: field("error"),
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionState::Succeeded { .. })
    }

    /// Text for the response message element, if one should be shown
    pub fn status_text(&self) -> Option<&str> {
        match self {
            SubmissionState::Succeeded { message } => Some(message),
            SubmissionState::FailedWithServerMessage { error } => Some(error),
            SubmissionState::FailedWithTransportError => Some(GENERIC_FAILURE_MESSAGE),
            SubmissionState::Idle | SubmissionState::Submitting => None,
        }
    }

    /// Bootstrap alert classes for the response message element
    pub fn status_class(&self) -> Option<&'static str> {
        match self {
            SubmissionState::Succeeded { .. } => Some("alert alert-success"),
            SubmissionState::FailedWithServerMessage { .. }
            | SubmissionState::FailedWithTransportError => Some("alert alert-danger"),
            SubmissionState::Idle | SubmissionState::Submitting => None,
        }
    }
}
