//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;

use crate::api::{self, ChartConfig};

/// Chart refresh period while the page is open
pub const CHART_REFRESH_MS: u32 = 60_000;

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Latest chart configuration from the API
    pub chart: RwSignal<Option<ChartConfig>>,
    /// Chart window in days; `None` covers all feedback
    pub chart_days: RwSignal<Option<i64>>,
    /// Last time the chart was fetched (epoch millis)
    pub last_sync: RwSignal<Option<i64>>,
    /// Chart fetch in flight
    pub loading: RwSignal<bool>,
    /// Last chart fetch error
    pub chart_error: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        chart: create_rw_signal(None),
        chart_days: create_rw_signal(None),
        last_sync: create_rw_signal(None),
        loading: create_rw_signal(false),
        chart_error: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
    /// Refetch the chart configuration for the current window
    pub fn refresh_chart(&self) {
        let state = self.clone();
        spawn_local(async move {
            state.loading.set(true);

            match api::fetch_chart_config(state.chart_days.get_untracked()).await {
                Ok(config) => {
                    state.chart.set(Some(config));
                    state.chart_error.set(None);
                    state.last_sync.set(Some(chrono::Utc::now().timestamp_millis()));
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch chart: {}", e).into());
                    state.chart_error.set(Some(e));
                }
            }

            state.loading.set(false);
        });
    }

    /// Refresh the chart every [`CHART_REFRESH_MS`] while the calling
    /// component is mounted
    pub fn start_auto_refresh(&self) {
        let state = self.clone();
        repeat_while_mounted(CHART_REFRESH_MS, move || state.refresh_chart());
    }
}

/// Run `tick` every `period_ms` until the current reactive owner is cleaned up
pub fn repeat_while_mounted(period_ms: u32, tick: impl FnMut() + 'static) {
    let interval = gloo_timers::callback::Interval::new(period_ms, tick);
    on_cleanup(move || drop(interval));
}
