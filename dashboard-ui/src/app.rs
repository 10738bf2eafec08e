//! App Root Component
//!
//! Main application component with routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::pages::Dashboard;
use crate::state::global::{provide_global_state, GlobalState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    provide_global_state();

    view! {
        <Router>
            <div class="min-vh-100 d-flex flex-column bg-light">
                <nav class="navbar navbar-dark bg-dark">
                    <div class="container">
                        <A href="/" class="navbar-brand">"Sentiment Board"</A>
                    </div>
                </nav>

                // Main content area
                <main class="container flex-grow-1 py-4">
                    <Routes>
                        <Route path="/" view=Dashboard />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                // Footer with sync status
                <Footer />
            </div>
        </Router>
    }
}

/// Footer component showing the API and last chart refresh
#[component]
fn Footer() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let api_base = api::get_api_base();

    view! {
        <footer class="border-top bg-white py-2">
            <div class="container d-flex justify-content-between small text-muted">
                <span>{format!("API: {}", api_base)}</span>
                <span>
                    {move || {
                        state.last_sync.get()
                            .and_then(chrono::DateTime::from_timestamp_millis)
                            .map(|dt| format!("Last sync: {}", dt.format("%H:%M:%S")))
                            .unwrap_or_else(|| "Not synced".to_string())
                    }}
                </span>
            </div>
        </footer>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="text-center py-5">
            <h1 class="h3 mb-2">"Page Not Found"</h1>
            <p class="text-muted mb-4">"The page you're looking for doesn't exist."</p>
            <A href="/" class="btn btn-primary">"Go to Dashboard"</A>
        </div>
    }
}
