//! Feedback Form Submission
//!
//! Drives one submission of a feedback form:
//!
//! ```text
//! Idle -> Submitting -> Succeeded
//!                    -> FailedWithServerMessage
//!                    -> FailedWithTransportError
//! ```
//!
//! The form and the status display are only touched before and after the
//! network await, never while the request is in flight.

use super::transport::{FeedbackTransport, TransportError, TransportResponse};
use super::{FeedbackSubmission, SubmissionResult};

/// Shown when no response could be obtained
///
/// The dashboard's `state::submission` module carries a copy of this text.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred while submitting feedback";

/// Form holding the two submitted fields
pub trait FeedbackForm {
    /// Value of the `feedbackId` field
    fn feedback_id(&self) -> String;
    /// Value of the `feedbackText` field
    fn feedback_text(&self) -> String;
    /// Clear every field
    fn reset(&mut self);
}

/// Element showing the outcome of a submission
pub trait StatusDisplay {
    fn set_variant(&mut self, variant: StatusVariant);
    fn set_text(&mut self, text: &str);
    fn show(&mut self);
}

/// Style of the status display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusVariant {
    Success,
    Danger,
}

impl StatusVariant {
    /// Bootstrap alert classes
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusVariant::Success => "alert alert-success",
            StatusVariant::Danger => "alert alert-danger",
        }
    }
}

/// Where a form binding is in its submission cycle
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
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionState::Succeeded { .. })
    }
}

/// Sends form contents through a [`FeedbackTransport`]
pub struct FeedbackSubmitter<T> {
    transport: T,
}

impl<T: FeedbackTransport> FeedbackSubmitter<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Submit the form once and render the outcome.
    ///
    /// Never fails: server rejections and transport errors both end up in
    /// the status display. The form is reset only on success.
    pub async fn submit<F, D>(&self, form: &mut F, display: &mut D) -> SubmissionState
    where
        F: FeedbackForm + ?Sized,
        D: StatusDisplay + ?Sized,
    {
        let submission = FeedbackSubmission {
            id: form.feedback_id(),
            feedback: form.feedback_text(),
        };

        tracing::debug!(feedback_id = %submission.id, "Submitting feedback");

        let outcome = self.transport.post_feedback(&submission).await;
        render_outcome(outcome, form, display)
    }
}

fn render_outcome<F, D>(
    outcome: Result<TransportResponse, TransportError>,
    form: &mut F,
    display: &mut D,
) -> SubmissionState
where
    F: FeedbackForm + ?Sized,
    D: StatusDisplay + ?Sized,
{
    let state = match outcome.map(|r| r.into_result()) {
        Ok(SubmissionResult::Accepted { message }) => {
            display.set_variant(StatusVariant::Success);
            display.set_text(&message);
            form.reset();
            SubmissionState::Succeeded { message }
        }
        Ok(SubmissionResult::Rejected { error }) => {
            display.set_variant(StatusVariant::Danger);
            display.set_text(&error);
            SubmissionState::FailedWithServerMessage { error }
        }
        Err(e) => {
            tracing::error!(error = %e, "Feedback submission failed");
            display.set_variant(StatusVariant::Danger);
            display.set_text(GENERIC_FAILURE_MESSAGE);
            SubmissionState::FailedWithTransportError
        }
    };

    display.show();
    state
}

/// A submitter attached to a form and its status display
pub struct FeedbackFormBinding<'s, T, F, D> {
    submitter: &'s FeedbackSubmitter<T>,
    form: F,
    display: D,
    state: SubmissionState,
}

impl<'s, T, F, D> FeedbackFormBinding<'s, T, F, D>
where
    T: FeedbackTransport,
    F: FeedbackForm,
    D: StatusDisplay,
{
    /// Attach to `form` if the page has one.
    ///
    /// An absent form is not an error: nothing is attached and `None` comes
    /// back.
    pub fn attach(
        submitter: &'s FeedbackSubmitter<T>,
        form: Option<F>,
        display: D,
    ) -> Option<Self> {
        let Some(form) = form else {
            tracing::debug!("No feedback form present, submit handler not attached");
            return None;
        };

        Some(Self {
            submitter,
            form,
            display,
            state: SubmissionState::Idle,
        })
    }

    /// Handle one submit event
    pub async fn on_submit(&mut self) -> &SubmissionState {
        self.state = SubmissionState::Submitting;
        self.state = self
            .submitter
            .submit(&mut self.form, &mut self.display)
            .await;
        &self.state
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn display(&self) -> &D {
        &self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct MemoryForm {
        id: String,
        text: String,
    }

    impl MemoryForm {
        fn filled(id: &str, text: &str) -> Self {
            Self {
                id: id.to_string(),
                text: text.to_string(),
            }
        }
    }

    impl FeedbackForm for MemoryForm {
        fn feedback_id(&self) -> String {
            self.id.clone()
        }

        fn feedback_text(&self) -> String {
            self.text.clone()
        }

        fn reset(&mut self) {
            self.id.clear();
            self.text.clear();
        }
    }

    #[derive(Debug, Default)]
    struct MemoryDisplay {
        class: Option<&'static str>,
        text: String,
        visible: bool,
    }

    impl StatusDisplay for MemoryDisplay {
        fn set_variant(&mut self, variant: StatusVariant) {
            self.class = Some(variant.css_class());
        }

        fn set_text(&mut self, text: &str) {
            self.text = text.to_string();
        }

        fn show(&mut self) {
            self.visible = true;
        }
    }

    enum Reply {
        Response(u16, serde_json::Value),
        Unreachable,
        Malformed,
    }

    struct StubTransport {
        reply: Reply,
        seen: Mutex<Vec<FeedbackSubmission>>,
    }

    impl StubTransport {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl FeedbackTransport for StubTransport {
        async fn post_feedback(
            &self,
            submission: &FeedbackSubmission,
        ) -> Result<TransportResponse, TransportError> {
            self.seen.lock().unwrap().push(submission.clone());
            match &self.reply {
                Reply::Response(status, body) => Ok(TransportResponse::new(*status, body.clone())),
                Reply::Unreachable => Err(TransportError::Unavailable(
                    "connection refused".to_string(),
                )),
                Reply::Malformed => Err(TransportError::MalformedBody(
                    "expected value at line 1 column 1".to_string(),
                )),
            }
        }
    }

    #[tokio::test]
    async fn test_success_clears_form() {
        let submitter = FeedbackSubmitter::new(StubTransport::new(Reply::Response(
            200,
            json!({"message": "Thanks!"}),
        )));
        let mut form = MemoryForm::filled("7", "Great service");
        let mut display = MemoryDisplay::default();

        let state = submitter.submit(&mut form, &mut display).await;

        assert_eq!(
            state,
            SubmissionState::Succeeded {
                message: "Thanks!".to_string()
            }
        );
        assert_eq!(display.class, Some("alert alert-success"));
        assert_eq!(display.text, "Thanks!");
        assert!(display.visible);
        assert_eq!(form, MemoryForm::default());

        let seen = submitter.transport().seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].id, "7");
        assert_eq!(seen[0].feedback, "Great service");
    }

    #[tokio::test]
    async fn test_server_rejection_keeps_form() {
        let submitter = FeedbackSubmitter::new(StubTransport::new(Reply::Response(
            400,
            json!({"error": "Invalid id"}),
        )));
        let mut form = MemoryForm::filled("7", "Great service");
        let mut display = MemoryDisplay::default();

        let state = submitter.submit(&mut form, &mut display).await;

        assert_eq!(
            state,
            SubmissionState::FailedWithServerMessage {
                error: "Invalid id".to_string()
            }
        );
        assert_eq!(display.class, Some("alert alert-danger"));
        assert_eq!(display.text, "Invalid id");
        assert!(display.visible);
        assert_eq!(form, MemoryForm::filled("7", "Great service"));
    }

    #[tokio::test]
    async fn test_transport_failure_shows_generic_message() {
        for reply in [Reply::Unreachable, Reply::Malformed] {
            let submitter = FeedbackSubmitter::new(StubTransport::new(reply));
            let mut form = MemoryForm::filled("7", "Great service");
            let mut display = MemoryDisplay::default();

            let state = submitter.submit(&mut form, &mut display).await;

            assert_eq!(state, SubmissionState::FailedWithTransportError);
            assert_eq!(display.class, Some("alert alert-danger"));
            assert_eq!(display.text, GENERIC_FAILURE_MESSAGE);
            assert!(display.visible);
            assert_eq!(form, MemoryForm::filled("7", "Great service"));
        }
    }

    #[tokio::test]
    async fn test_binding_absent_form_attaches_nothing() {
        let transport = StubTransport::new(Reply::Response(200, json!({"message": "ok"})));
        let submitter = FeedbackSubmitter::new(transport);

        let binding = FeedbackFormBinding::<_, MemoryForm, _>::attach(
            &submitter,
            None,
            MemoryDisplay::default(),
        );

        assert!(binding.is_none());
        assert!(submitter.transport().seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_binding_is_reusable_after_failure() {
        let submitter = FeedbackSubmitter::new(StubTransport::new(Reply::Response(
            409,
            json!({"error": "Feedback with this ID already exists"}),
        )));
        let mut binding = FeedbackFormBinding::attach(
            &submitter,
            Some(MemoryForm::filled("1", "first")),
            MemoryDisplay::default(),
        )
        .unwrap();

        assert_eq!(binding.state(), &SubmissionState::Idle);

        binding.on_submit().await;
        assert!(matches!(
            binding.state(),
            SubmissionState::FailedWithServerMessage { .. }
        ));

        binding.form_mut().id = "2".to_string();
        binding.on_submit().await;

        let seen = submitter.transport().seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].id, "2");
        assert_eq!(seen[1].feedback, "first");
        assert_eq!(binding.display().text, "Feedback with this ID already exists");
    }

    #[test]
    fn test_variant_classes() {
        assert_eq!(StatusVariant::Success.css_class(), "alert alert-success");
        assert_eq!(StatusVariant::Danger.css_class(), "alert alert-danger");
    }
}
