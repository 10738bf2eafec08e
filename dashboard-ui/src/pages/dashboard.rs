//! Dashboard Page
//!
//! Sentiment chart next to the feedback form.

use leptos::*;

use crate::components::{FeedbackForm, InlineLoading, SentimentChart};
use crate::state::GlobalState;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // Fetch the chart once on mount, then periodically until unmounted
    state.refresh_chart();
    state.start_auto_refresh();

    let loading = state.loading;
    let chart = state.chart;

    view! {
        <div class="row g-4">
            <section class="col-lg-8">
                <div class="card">
                    <div class="card-body">
                        <div class="d-flex align-items-center justify-content-between mb-3">
                            <h2 class="h5 mb-0">"Feedback Sentiment"</h2>
                            {move || loading.get().then(|| view! { <InlineLoading /> })}
                        </div>
                        <SentimentChart />
                        <p class="text-muted small mt-2 mb-0">
                            {move || {
                                chart.get()
                                    .map(|c| format!("{} feedbacks", c.total()))
                                    .unwrap_or_default()
                            }}
                        </p>
                    </div>
                </div>
            </section>

            <section class="col-lg-4">
                <div class="card">
                    <div class="card-body">
                        <h2 class="h5 mb-3">"Send Feedback"</h2>
                        <FeedbackForm />
                    </div>
                </div>
            </section>
        </div>
    }
}
