//! Sentiment Board Dashboard
//!
//! Feedback sentiment dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Sentiment bar chart rendered with Chart.js
//! - Feedback form posting to `POST /feedbacks`
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It talks to the Sentiment Board API over HTTP. Chart.js is
//! loaded by `index.html` and reached through `chart_js`.

use leptos::*;

mod api;
mod app;
mod chart_js;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
