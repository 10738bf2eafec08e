//! Sentiment Chart Component
//!
//! Bar chart of sentiment counts rendered by Chart.js on the
//! `sentimentChart` canvas.

use leptos::*;

use crate::chart_js::SentimentChart as RenderedChart;
use crate::state::GlobalState;

/// Element id of the chart canvas
pub const CHART_CANVAS_ID: &str = "sentimentChart";

/// Sentiment bar chart component
#[component]
pub fn SentimentChart() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let canvas_ref = create_node_ref::<html::Canvas>();
    let rendered = store_value(None::<RenderedChart>);

    // Rebuild the chart whenever a new configuration arrives
    let chart = state.chart;
    create_effect(move |_| {
        let Some(config) = chart.get() else {
            return;
        };
        let Some(canvas) = canvas_ref.get() else {
            return;
        };

        rendered.update_value(|slot| {
            // Chart.js refuses a canvas that is still in use
            *slot = None;
            match RenderedChart::render(&canvas, &config) {
                Ok(chart) => *slot = Some(chart),
                Err(e) => web_sys::console::error_1(&e),
            }
        });
    });

    let is_empty = move || chart.get().map(|c| c.total() == 0).unwrap_or(false);

    view! {
        <div class="position-relative">
            <canvas id=CHART_CANVAS_ID node_ref=canvas_ref width="800" height="400" />

            {move || {
                if is_empty() {
                    view! {
                        <p class="text-muted text-center mt-2">"No feedback received yet"</p>
                    }.into_view()
                } else {
                    view! {}.into_view()
                }
            }}

            {move || {
                state.chart_error.get().map(|e| view! {
                    <p class="text-danger text-center mt-2">{e}</p>
                })
            }}

            // Window selector
            <div class="d-flex justify-content-center gap-2 mt-3">
                <WindowButton label="All" days=None />
                <WindowButton label="7D" days=Some(7) />
                <WindowButton label="30D" days=Some(30) />
                <WindowButton label="90D" days=Some(90) />
            </div>
        </div>
    }
}

/// Chart window selection button
#[component]
fn WindowButton(
    label: &'static str,
    days: Option<i64>,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let window = state.chart_days;
    let is_active = create_memo(move |_| window.get() == days);

    let on_click = move |_| {
        state.chart_days.set(days);
        state.refresh_chart();
    };

    view! {
        <button
            type="button"
            on:click=on_click
            class=move || {
                if is_active.get() {
                    "btn btn-sm btn-primary"
                } else {
                    "btn btn-sm btn-outline-secondary"
                }
            }
        >
            {label}
        </button>
    }
}
