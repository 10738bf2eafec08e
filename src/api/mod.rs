//! Sentiment Board REST API
//!
//! HTTP API layer built with Axum.
//!
//! # Endpoints
//!
//! ## Feedback
//! - `POST /feedbacks` - Submit a feedback (`{"id", "feedback"}`)
//! - `GET /feedbacks/:id` - Fetch a stored feedback
//!
//! ## Dashboard
//! - `GET /api/v1/sentiment` - Sentiment summary (`?days=N`)
//! - `GET /api/v1/sentiment/chart` - Chart.js configuration (`?days=N`)
//! - `GET /api/v1/reports/weekly` - Seven-day report
//!
//! ## Health
//! - `GET /health/live` - Liveness check
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use sentiment_board::api::{serve, ApiConfig, AppState};
//! use sentiment_board::store::FeedbackStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::default();
//!     let state = AppState::without_analyzer(Arc::new(FeedbackStore::new()), config.clone());
//!     serve(state, &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/sentiment", get(routes::sentiment::sentiment_summary))
        .route("/sentiment/chart", get(routes::sentiment::sentiment_chart))
        .route("/reports/weekly", get(routes::report::weekly_report));

    let cors = cors_layer(&state.config.cors_origins);

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .route("/feedbacks", post(routes::feedback::create_feedback))
        .route("/feedbacks/:id", get(routes::feedback::get_feedback))
        .nest("/api/v1", api_routes)
        .route("/health", get(routes::health::full_health))
        .route("/health/live", get(routes::health::liveness))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// CORS for the dashboard; any origin when none are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        base.allow_origin(Any)
    } else {
        base.allow_origin(AllowOrigin::list(allowed))
    }
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Sentiment Board API listening on {}", addr);

    serve_with_listener(listener, state).await?;

    tracing::info!("Sentiment Board API shut down gracefully");
    Ok(())
}

/// Serve on an already bound listener until a shutdown signal arrives
pub async fn serve_with_listener(listener: TcpListener, state: AppState) -> Result<(), ApiError> {
    let router = build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::{AnalyzerError, FeedbackAnalysis, Sentiment, SentimentAnalyzer};
    use crate::store::FeedbackStore;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    /// Labels feedback mentioning "love" positive, "hate" negative; "buy now" is spam
    struct KeywordAnalyzer;

    #[async_trait]
    impl SentimentAnalyzer for KeywordAnalyzer {
        fn name(&self) -> &'static str {
            "keyword"
        }

        async fn is_valid(&self, feedback: &str) -> Result<bool, AnalyzerError> {
            Ok(!feedback.contains("buy now"))
        }

        async fn analyze(&self, _id: &str, feedback: &str) -> Result<FeedbackAnalysis, AnalyzerError> {
            if feedback.contains("explode") {
                return Err(AnalyzerError::Unavailable);
            }
            let sentiment = if feedback.contains("love") {
                Sentiment::Positive
            } else if feedback.contains("hate") {
                Sentiment::Negative
            } else {
                Sentiment::Inconclusive
            };
            Ok(FeedbackAnalysis {
                sentiment,
                feature_code: feedback.contains("dark").then(|| "DARK_MODE".to_string()),
                feature_reason: None,
            })
        }
    }

    fn create_test_app() -> Router {
        let state = AppState::new(
            Arc::new(FeedbackStore::new()),
            Arc::new(KeywordAnalyzer),
            ApiConfig::default(),
        );
        build_router(state)
    }

    fn post_feedback(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/feedbacks")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app();
        let response = app.oneshot(get("/health/live")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let app = create_test_app();
        let response = app.oneshot(get("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["analyzer"], "keyword");
    }

    #[tokio::test]
    async fn test_create_feedback() {
        let app = create_test_app();
        let response = app
            .clone()
            .oneshot(post_feedback(r#"{"id": "7", "feedback": "I love it, add dark theme"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["message"], "Feedback processed and stored successfully");

        let stored = app.oneshot(get("/feedbacks/7")).await.unwrap();
        assert_eq!(stored.status(), StatusCode::OK);
        let record = json_body(stored).await;
        assert_eq!(record["sentiment"], "POSITIVO");
        assert_eq!(record["requested_feature"]["code"], "DARK_MODE");
    }

    #[tokio::test]
    async fn test_create_feedback_missing_field() {
        let app = create_test_app();
        let response = app.oneshot(post_feedback(r#"{"id": "7"}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Invalid request data");
    }

    #[tokio::test]
    async fn test_create_feedback_invalid_json() {
        let app = create_test_app();
        let response = app.oneshot(post_feedback("not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Invalid request data");
    }

    #[tokio::test]
    async fn test_create_feedback_duplicate() {
        let app = create_test_app();
        let body = r#"{"id": "dup", "feedback": "I hate waiting"}"#;

        let first = app.clone().oneshot(post_feedback(body)).await.unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = app.oneshot(post_feedback(body)).await.unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
        let body = json_body(second).await;
        assert_eq!(body["error"], "Feedback with this ID already exists");
    }

    #[tokio::test]
    async fn test_create_feedback_spam() {
        let app = create_test_app();
        let response = app
            .oneshot(post_feedback(r#"{"id": "s", "feedback": "buy now cheap pills"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Feedback rejected as spam");
    }

    #[tokio::test]
    async fn test_analyzer_failure_stores_inconclusive() {
        let app = create_test_app();
        let response = app
            .clone()
            .oneshot(post_feedback(r#"{"id": "x", "feedback": "this will explode"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let record = json_body(app.oneshot(get("/feedbacks/x")).await.unwrap()).await;
        assert_eq!(record["sentiment"], "INCONCLUSIVO");
    }

    #[tokio::test]
    async fn test_get_feedback_not_found() {
        let app = create_test_app();
        let response = app.oneshot(get("/feedbacks/missing")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert!(body["error"].as_str().unwrap().contains("missing"));
    }

    #[tokio::test]
    async fn test_sentiment_summary_and_chart() {
        let app = create_test_app();
        for (id, text) in [("1", "love"), ("2", "love"), ("3", "hate"), ("4", "meh")] {
            let body = format!(r#"{{"id": "{}", "feedback": "{}"}}"#, id, text);
            let response = app.clone().oneshot(post_feedback(&body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let summary = json_body(app.clone().oneshot(get("/api/v1/sentiment")).await.unwrap()).await;
        assert_eq!(summary[0]["sentiment"], "POSITIVO");
        assert_eq!(summary[0]["count"], 2);
        assert_eq!(summary[0]["percentage"], 50.0);
        assert_eq!(summary[2]["count"], 1);

        let chart = json_body(
            app.oneshot(get("/api/v1/sentiment/chart?days=7"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(chart["type"], "bar");
        assert_eq!(chart["data"]["labels"][1], "NEGATIVO");
        assert_eq!(chart["data"]["datasets"][0]["data"][0], 2);
        assert_eq!(chart["options"]["scales"]["y"]["beginAtZero"], true);
    }

    #[tokio::test]
    async fn test_sentiment_invalid_days() {
        let app = create_test_app();
        let response = app.oneshot(get("/api/v1/sentiment?days=0")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_non_numeric_days_uses_error_body() {
        for uri in ["/api/v1/sentiment?days=abc", "/api/v1/sentiment/chart?days=1.5"] {
            let app = create_test_app();
            let response = app.oneshot(get(uri)).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let body = json_body(response).await;
            assert_eq!(body["error"], "days must be an integer");
            assert_eq!(body["code"], "VALIDATION_ERROR");
            assert!(body["request_id"].is_string());
        }
    }

    #[tokio::test]
    async fn test_weekly_report() {
        let app = create_test_app();
        app.clone()
            .oneshot(post_feedback(r#"{"id": "1", "feedback": "hate the lack of dark mode"}"#))
            .await
            .unwrap();

        let response = app.oneshot(get("/api/v1/reports/weekly")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let report = json_body(response).await;
        assert_eq!(report["total_feedbacks"], 1);
        assert_eq!(report["feature_requests"][0]["feature_code"], "DARK_MODE");
    }

    struct Form {
        id: String,
        text: String,
    }

    impl crate::feedback::FeedbackForm for Form {
        fn feedback_id(&self) -> String {
            self.id.clone()
        }
        fn feedback_text(&self) -> String {
            self.text.clone()
        }
        fn reset(&mut self) {
            self.id.clear();
            self.text.clear();
        }
    }

    #[derive(Default)]
    struct Status {
        variant: Option<crate::feedback::StatusVariant>,
        text: String,
        shown: bool,
    }

    impl crate::feedback::StatusDisplay for Status {
        fn set_variant(&mut self, variant: crate::feedback::StatusVariant) {
            self.variant = Some(variant);
        }
        fn set_text(&mut self, text: &str) {
            self.text = text.to_string();
        }
        fn show(&mut self) {
            self.shown = true;
        }
    }

    #[tokio::test]
    async fn test_submitter_against_live_server() {
        use crate::feedback::{
            FeedbackSubmitter, HttpFeedbackTransport, StatusVariant, SubmissionState,
        };

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let state = AppState::new(
            Arc::new(FeedbackStore::new()),
            Arc::new(KeywordAnalyzer),
            ApiConfig::default(),
        );
        tokio::spawn(async move { axum::serve(listener, build_router(state)).await });

        let submitter = FeedbackSubmitter::new(HttpFeedbackTransport::new(&base_url));

        let mut form = Form {
            id: "live-1".to_string(),
            text: "I love the new layout".to_string(),
        };
        let mut status = Status::default();
        let state = submitter.submit(&mut form, &mut status).await;

        assert!(state.is_success());
        assert_eq!(status.variant, Some(StatusVariant::Success));
        assert_eq!(status.text, "Feedback processed and stored successfully");
        assert!(status.shown);
        assert!(form.id.is_empty() && form.text.is_empty());

        let mut form = Form {
            id: "live-1".to_string(),
            text: "again".to_string(),
        };
        let mut status = Status::default();
        let state = submitter.submit(&mut form, &mut status).await;

        assert_eq!(
            state,
            SubmissionState::FailedWithServerMessage {
                error: "Feedback with this ID already exists".to_string()
            }
        );
        assert_eq!(status.variant, Some(StatusVariant::Danger));
        assert_eq!(form.id, "live-1");
    }

    #[tokio::test]
    async fn test_submitter_server_unreachable() {
        use crate::feedback::{
            FeedbackSubmitter, HttpFeedbackTransport, StatusVariant, SubmissionState,
            GENERIC_FAILURE_MESSAGE,
        };

        // Bind then drop so nothing listens on the port
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let submitter = FeedbackSubmitter::new(HttpFeedbackTransport::new(&base_url));
        let mut form = Form {
            id: "9".to_string(),
            text: "hello".to_string(),
        };
        let mut status = Status::default();
        let state = submitter.submit(&mut form, &mut status).await;

        assert_eq!(state, SubmissionState::FailedWithTransportError);
        assert_eq!(status.variant, Some(StatusVariant::Danger));
        assert_eq!(status.text, GENERIC_FAILURE_MESSAGE);
        assert_eq!(form.id, "9");
    }

    fn preflight(origin: &str) -> Request<Body> {
        Request::builder()
            .method("OPTIONS")
            .uri("/feedbacks")
            .header("Origin", origin)
            .header("Access-Control-Request-Method", "POST")
            .header("Access-Control-Request-Headers", "content-type")
            .body(Body::empty())
            .unwrap()
    }

    fn app_with_origins(origins: &[&str]) -> Router {
        let config = ApiConfig {
            cors_origins: origins.iter().map(|o| o.to_string()).collect(),
            ..ApiConfig::default()
        };
        build_router(AppState::without_analyzer(Arc::new(FeedbackStore::new()), config))
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_configured_origin() {
        // Invalid entries are skipped
        let app = app_with_origins(&["http://localhost:8084", "bad\norigin"]);

        let allowed = app
            .clone()
            .oneshot(preflight("http://localhost:8084"))
            .await
            .unwrap();
        assert_eq!(
            allowed.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:8084"
        );

        let denied = app.oneshot(preflight("http://evil.example")).await.unwrap();
        assert!(denied.headers().get("access-control-allow-origin").is_none());
    }

    #[tokio::test]
    async fn test_cors_without_origins_allows_any() {
        let app = app_with_origins(&[]);
        let response = app.oneshot(preflight("http://anywhere.example")).await.unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }
}
