//! Status Message Component
//!
//! The `responseMessage` element showing the outcome of the last submission.

use leptos::*;

use crate::state::SubmissionState;

/// Hidden until a submission finishes
#[component]
pub fn StatusMessage(
    #[prop(into)]
    outcome: Signal<SubmissionState>,
) -> impl IntoView {
    view! {
        <div
            id="responseMessage"
            role="alert"
            class=move || outcome.with(|o| o.status_class().unwrap_or_default())
            style=move || {
                if outcome.with(|o| o.status_text().is_some()) {
                    "display: block"
                } else {
                    "display: none"
                }
            }
        >
            {move || outcome.with(|o| o.status_text().unwrap_or_default().to_string())}
        </div>
    }
}
