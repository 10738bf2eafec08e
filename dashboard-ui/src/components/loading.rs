//! Loading Component
//!
//! Spinner shown while the chart is fetched.

use leptos::*;

/// Inline loading spinner
#[component]
pub fn InlineLoading() -> impl IntoView {
    view! {
        <span class="spinner-border spinner-border-sm" role="status" />
    }
}
