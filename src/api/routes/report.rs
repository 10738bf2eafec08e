//! Report Routes
//!
//! - GET /api/v1/reports/weekly - Digest of the last seven days

use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::api::state::AppState;
use crate::report::WeeklyReport;

/// GET /api/v1/reports/weekly
pub async fn weekly_report(State(state): State<Arc<AppState>>) -> Json<WeeklyReport> {
    let report = WeeklyReport::generate(&state.store, Utc::now()).await;

    tracing::debug!(
        total = report.total_feedbacks,
        features = report.feature_requests.len(),
        "Generated weekly report"
    );

    Json(report)
}
