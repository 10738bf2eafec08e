//! Feedback Form Component
//!
//! Form posting `{id, feedback}` to the API and reporting the outcome in the
//! status message below it.

use leptos::*;

use crate::api::{self, FeedbackSubmission};
use crate::components::StatusMessage;
use crate::state::{GlobalState, SubmissionState};

/// Feedback form component
#[component]
pub fn FeedbackForm() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (feedback_id, set_feedback_id) = create_signal(String::new());
    let (feedback_text, set_feedback_text) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);
    let outcome = create_rw_signal(SubmissionState::Idle);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        // One request at a time; the button is disabled too
        if submitting.get_untracked() {
            return;
        }

        let submission = FeedbackSubmission {
            id: feedback_id.get_untracked(),
            feedback: feedback_text.get_untracked(),
        };

        set_submitting.set(true);

        let state = state.clone();
        spawn_local(async move {
            let result = api::submit_feedback(&submission).await;
            if let Err(e) = &result {
                web_sys::console::error_1(&format!("Error: {}", e).into());
            }

            let next = SubmissionState::from_outcome(result);
            if next.is_success() {
                set_feedback_id.set(String::new());
                set_feedback_text.set(String::new());
                state.refresh_chart();
            }

            outcome.set(next);
            set_submitting.set(false);
        });
    };

    view! {
        <form id="feedbackForm" on:submit=on_submit class="vstack gap-3">
            <div>
                <label for="feedbackId" class="form-label">"Feedback ID"</label>
                <input
                    id="feedbackId"
                    type="text"
                    class="form-control"
                    prop:value=move || feedback_id.get()
                    on:input=move |ev| set_feedback_id.set(event_target_value(&ev))
                />
            </div>

            <div>
                <label for="feedbackText" class="form-label">"Feedback"</label>
                <textarea
                    id="feedbackText"
                    rows="4"
                    class="form-control"
                    prop:value=move || feedback_text.get()
                    on:input=move |ev| set_feedback_text.set(event_target_value(&ev))
                />
            </div>

            <button
                type="submit"
                disabled=move || submitting.get()
                class="btn btn-primary"
            >
                {move || if submitting.get() { "Sending..." } else { "Send Feedback" }}
            </button>

            <StatusMessage outcome=outcome />
        </form>
    }
}
