//! HTTP API Client
//!
//! Functions for communicating with the Sentiment Board REST API.

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8082";

const API_BASE_KEY: &str = "sentiment_board_api_url";

/// Get the API base URL from local storage (`sentiment_board_api_url`) or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_BASE_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    normalize_base(&url)
}

fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

// ============ Response Types ============

/// Chart.js bar chart configuration served by `/api/v1/sentiment/chart`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: ChartData,
    pub options: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<u64>,
    pub background_color: Vec<String>,
    pub border_color: Vec<String>,
    pub border_width: u32,
    #[serde(default)]
    pub percentages: Vec<Option<f64>>,
}

impl ChartConfig {
    pub fn dataset(&self) -> Option<&Dataset> {
        self.data.datasets.first()
    }

    pub fn total(&self) -> u64 {
        self.dataset().map(|d| d.data.iter().sum()).unwrap_or(0)
    }
}

/// Body of `POST /feedbacks`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackSubmission {
    pub id: String,
    pub feedback: String,
}

/// Status and parsed body of a feedback POST, whatever the status was
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackReply {
    pub status: u16,
    pub body: serde_json::Value,
}

/// Error body returned by the API
#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub error: String,
}

// ============ API Functions ============

/// Fetch the sentiment chart configuration, optionally for the last `days`
pub async fn fetch_chart_config(days: Option<i64>) -> Result<ChartConfig, String> {
    let api_base = get_api_base();
    let url = match days {
        Some(d) => format!("{}/api/v1/sentiment/chart?days={}", api_base, d),
        None => format!("{}/api/v1/sentiment/chart", api_base),
    };

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        let error: ApiError = response.json().await.unwrap_or(ApiError {
            error: "Unknown error".to_string(),
        });
        return Err(error.error);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Post a feedback.
///
/// Any HTTP status comes back as `Ok`; only a failed request or a body that
/// is not JSON is an `Err`.
pub async fn submit_feedback(submission: &FeedbackSubmission) -> Result<FeedbackReply, String> {
    let api_base = get_api_base();

    let response = Request::post(&format!("{}/feedbacks", api_base))
        .json(submission)
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    let status = response.status();
    let body = response
        .json::<serde_json::Value>()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(FeedbackReply { status, body })
}
