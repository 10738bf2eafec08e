//! UI Components
//!
//! Leptos components for the dashboard.

pub mod feedback_form;
pub mod loading;
pub mod sentiment_chart;
pub mod status_message;

pub use feedback_form::FeedbackForm;
pub use loading::InlineLoading;
pub use sentiment_chart::SentimentChart;
pub use status_message::StatusMessage;
