//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

// ============================================
// FEEDBACK DTOs
// ============================================

/// Feedback creation request
///
/// Both fields are optional here so that a missing one is reported with
/// the endpoint's own error body rather than a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CreateFeedbackRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub feedback: Option<String>,
}

/// Feedback creation response
#[derive(Debug, Serialize)]
pub struct CreateFeedbackResponse {
    pub message: String,
}

// ============================================
// SENTIMENT DTOs
// ============================================

/// Query parameters for the sentiment summary and chart
#[derive(Debug, Default, Deserialize)]
pub struct SentimentQuery {
    /// Restrict to the last N days; all feedback when absent
    #[serde(default)]
    pub days: Option<i64>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok"
    pub status: String,
    pub uptime_seconds: u64,
    pub version: String,
    pub feedback_count: usize,
    /// Name of the active analyzer
    pub analyzer: String,
}
