//! Feedback Routes
//!
//! - POST /feedbacks - Submit a feedback for analysis and storage
//! - GET /feedbacks/:id - Fetch a stored feedback

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{CreateFeedbackRequest, CreateFeedbackResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::sentiment::FeedbackAnalysis;
use crate::store::FeedbackRecord;

const INVALID_REQUEST: &str = "Invalid request data";
const SPAM_REJECTED: &str = "Feedback rejected as spam";
const CREATED_MESSAGE: &str = "Feedback processed and stored successfully";

/// POST /feedbacks
///
/// Validate, spam-filter, classify and store a feedback.
pub async fn create_feedback(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateFeedbackRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreateFeedbackResponse>)> {
    let Json(req) = payload.map_err(|e| {
        tracing::debug!(error = %e, "Rejected feedback body");
        ApiError::Validation(INVALID_REQUEST.to_string())
    })?;

    let (id, feedback) = validate_feedback_request(req, state.config.max_feedback_len)?;

    if state.store.get(&id).await.is_some() {
        return Err(ApiError::Conflict(
            "Feedback with this ID already exists".to_string(),
        ));
    }

    match state.analyzer.is_valid(&feedback).await {
        Ok(true) => {}
        Ok(false) => {
            tracing::info!(feedback_id = %id, "Feedback flagged as spam");
            return Err(ApiError::Rejected(SPAM_REJECTED.to_string()));
        }
        Err(e) => {
            tracing::warn!(feedback_id = %id, error = %e, "Spam filter failed, accepting feedback");
        }
    }

    let analysis = match state.analyzer.analyze(&id, &feedback).await {
        Ok(analysis) => analysis,
        Err(e) => {
            tracing::warn!(
                feedback_id = %id,
                analyzer = state.analyzer.name(),
                error = %e,
                "Sentiment analysis failed, storing as inconclusive"
            );
            FeedbackAnalysis::inconclusive()
        }
    };

    let record = FeedbackRecord::from_analysis(id, feedback, analysis);
    let (record_id, sentiment) = (record.id.clone(), record.sentiment);

    // A concurrent request may have taken the id while we were analyzing
    state.store.insert(record).await?;

    tracing::info!(feedback_id = %record_id, sentiment = %sentiment, "Stored feedback");

    Ok((
        StatusCode::CREATED,
        Json(CreateFeedbackResponse {
            message: CREATED_MESSAGE.to_string(),
        }),
    ))
}

/// GET /feedbacks/:id
pub async fn get_feedback(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<FeedbackRecord>> {
    state
        .store
        .get(&id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Feedback '{}' not found", id)))
}

/// Validate a feedback request, returning the trimmed id and the text
fn validate_feedback_request(
    req: CreateFeedbackRequest,
    max_len: usize,
) -> ApiResult<(String, String)> {
    let (Some(id), Some(feedback)) = (req.id, req.feedback) else {
        return Err(ApiError::Validation(INVALID_REQUEST.to_string()));
    };

    let id = id.trim().to_string();
    if id.is_empty() || feedback.trim().is_empty() {
        return Err(ApiError::Validation(INVALID_REQUEST.to_string()));
    }

    if feedback.chars().count() > max_len {
        return Err(ApiError::Validation(format!(
            "Feedback exceeds maximum length of {} characters",
            max_len
        )));
    }

    Ok((id, feedback))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(id: Option<&str>, feedback: Option<&str>) -> CreateFeedbackRequest {
        CreateFeedbackRequest {
            id: id.map(str::to_string),
            feedback: feedback.map(str::to_string),
        }
    }

    #[test]
    fn test_validate_valid() {
        let (id, text) = validate_feedback_request(request(Some(" 7 "), Some("Great service")), 100)
            .unwrap();
        assert_eq!(id, "7");
        assert_eq!(text, "Great service");
    }

    #[test]
    fn test_validate_missing_fields() {
        assert!(validate_feedback_request(request(None, Some("text")), 100).is_err());
        assert!(validate_feedback_request(request(Some("1"), None), 100).is_err());
        assert!(validate_feedback_request(request(Some("  "), Some("text")), 100).is_err());
        assert!(validate_feedback_request(request(Some("1"), Some("")), 100).is_err());
    }

    #[test]
    fn test_validate_too_long() {
        let err = validate_feedback_request(request(Some("1"), Some("abcdef")), 5).unwrap_err();
        assert_eq!(err.to_string(), "Feedback exceeds maximum length of 5 characters");
    }
}
