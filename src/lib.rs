//! # Sentiment Board
//!
//! Feedback sentiment dashboard: collects user feedback, classifies its
//! sentiment, and serves chart-ready summaries to a browser dashboard.
//!
//! ## Modules
//!
//! - [`chart`]: Chart.js bar chart configuration from sentiment records
//! - [`feedback`]: Feedback form submission (state machine + HTTP transport)
//! - [`sentiment`]: Sentiment labels, aggregation and analyzers
//! - [`store`]: In-memory feedback store
//! - [`report`]: Weekly feedback report, its schedule and delivery sinks
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sentiment_board::feedback::{
//!     FeedbackForm, FeedbackSubmitter, HttpFeedbackTransport, StatusDisplay, StatusVariant,
//! };
//!
//! struct Form { id: String, text: String }
//!
//! impl FeedbackForm for Form {
//!     fn feedback_id(&self) -> String { self.id.clone() }
//!     fn feedback_text(&self) -> String { self.text.clone() }
//!     fn reset(&mut self) { self.id.clear(); self.text.clear(); }
//! }
//!
//! struct Console;
//!
//! impl StatusDisplay for Console {
//!     fn set_variant(&mut self, _variant: StatusVariant) {}
//!     fn set_text(&mut self, text: &str) { println!("{}", text); }
//!     fn show(&mut self) {}
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let submitter = FeedbackSubmitter::new(HttpFeedbackTransport::new("http://localhost:8082"));
//!     let mut form = Form { id: "7".into(), text: "Great service".into() };
//!
//!     let state = submitter.submit(&mut form, &mut Console).await;
//!     println!("{:?}", state);
//! }
//! ```

pub mod api;
pub mod chart;
pub mod config;
pub mod feedback;
pub mod report;
pub mod sentiment;
pub mod store;
pub mod telemetry;

// Re-export top-level types for convenience
pub use chart::{ChartConfig, ChartConfigBuilder, TooltipFormatter, CHART_CANVAS_ID};

pub use feedback::{
    FeedbackForm, FeedbackFormBinding, FeedbackSubmission, FeedbackSubmitter, FeedbackTransport,
    HttpFeedbackTransport, StatusDisplay, StatusVariant, SubmissionResult, SubmissionState,
    TransportError,
};

pub use sentiment::{
    AnalyzerConfig, AnalyzerError, FeedbackAnalysis, NoopAnalyzer, OpenAiAnalyzer, Sentiment,
    SentimentAnalyzer, SentimentRecord,
};

pub use store::{FeatureCount, FeedbackRecord, FeedbackStore, StoreError};

pub use report::{ReportSchedule, ReportSink, WeeklyReport, WeeklyReportScheduler};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{
    Config, ConfigError, ConfigSource, DashboardConfig, LoggingConfig, ReportSinkKind,
    ReportsConfig,
};
