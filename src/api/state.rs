//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::chart::ChartConfigBuilder;
use crate::sentiment::{NoopAnalyzer, SentimentAnalyzer};
use crate::store::FeedbackStore;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Analyzed feedback
    pub store: Arc<FeedbackStore>,
    /// Spam filter and sentiment classifier
    pub analyzer: Arc<dyn SentimentAnalyzer>,
    /// Chart configuration builder for the dashboard
    pub chart_builder: ChartConfigBuilder,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create state with the given analyzer
    pub fn new(
        store: Arc<FeedbackStore>,
        analyzer: Arc<dyn SentimentAnalyzer>,
        config: ApiConfig,
    ) -> Self {
        Self {
            store,
            analyzer,
            chart_builder: ChartConfigBuilder::new(),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Create state that accepts all feedback and labels it inconclusive
    pub fn without_analyzer(store: Arc<FeedbackStore>, config: ApiConfig) -> Self {
        Self::new(store, Arc::new(NoopAnalyzer), config)
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Allowed CORS origins; empty allows any
    pub cors_origins: Vec<String>,
    /// Maximum accepted feedback length in characters
    pub max_feedback_len: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8082,
            cors_origins: Vec::new(),
            max_feedback_len: 5_000,
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
