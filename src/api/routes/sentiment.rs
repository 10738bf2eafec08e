//! Sentiment Routes
//!
//! - GET /api/v1/sentiment - Per-label counts and percentages
//! - GET /api/v1/sentiment/chart - Chart.js configuration for the dashboard

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use crate::api::dto::SentimentQuery;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::chart::ChartConfig;
use crate::sentiment::SentimentRecord;

/// GET /api/v1/sentiment
pub async fn sentiment_summary(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SentimentQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<SentimentRecord>>> {
    let since = window_start(&parse_query(query)?)?;
    Ok(Json(state.store.sentiment_summary(since).await))
}

/// GET /api/v1/sentiment/chart
pub async fn sentiment_chart(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SentimentQuery>, QueryRejection>,
) -> ApiResult<Json<ChartConfig>> {
    let since = window_start(&parse_query(query)?)?;
    let records = state.store.sentiment_summary(since).await;
    Ok(Json(state.chart_builder.build(&records)))
}

fn parse_query(query: Result<Query<SentimentQuery>, QueryRejection>) -> ApiResult<SentimentQuery> {
    query.map(|Query(q)| q).map_err(|e| {
        tracing::debug!(error = %e, "Rejected sentiment query");
        ApiError::Validation("days must be an integer".to_string())
    })
}

fn window_start(query: &SentimentQuery) -> ApiResult<Option<DateTime<Utc>>> {
    match query.days {
        None => Ok(None),
        Some(days) if (1..=3650).contains(&days) => Ok(Some(Utc::now() - Duration::days(days))),
        Some(_) => Err(ApiError::Validation(
            "days must be between 1 and 3650".to_string(),
        )),
    }
}
