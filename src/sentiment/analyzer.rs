//! Feedback Analyzers
//!
//! Classifies feedback sentiment, extracts the most important requested
//! feature and filters spam. The OpenAI-compatible analyzer talks to any
//! chat-completions endpoint; the no-op analyzer is used when no model is
//! configured.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Sentiment;
use crate::report::WeeklyReport;

/// Result of analyzing one feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackAnalysis {
    pub sentiment: Sentiment,
    pub feature_code: Option<String>,
    pub feature_reason: Option<String>,
}

impl FeedbackAnalysis {
    /// Analysis carrying no information
    pub fn inconclusive() -> Self {
        Self {
            sentiment: Sentiment::Inconclusive,
            feature_code: None,
            feature_reason: None,
        }
    }
}

/// Classifier used by the feedback endpoint
#[async_trait]
pub trait SentimentAnalyzer: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Whether the feedback is coherent and relevant (not spam)
    async fn is_valid(&self, feedback: &str) -> Result<bool, AnalyzerError>;

    /// Label sentiment and extract the most requested feature
    async fn analyze(&self, id: &str, feedback: &str) -> Result<FeedbackAnalysis, AnalyzerError>;

    /// Write the weekly report as an HTML fragment
    async fn report_html(&self, report: &WeeklyReport) -> Result<String, AnalyzerError> {
        Ok(report.to_html())
    }
}

/// Accepts everything and labels it inconclusive
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAnalyzer;

#[async_trait]
impl SentimentAnalyzer for NoopAnalyzer {
    fn name(&self) -> &'static str {
        "noop"
    }

    async fn is_valid(&self, _feedback: &str) -> Result<bool, AnalyzerError> {
        Ok(true)
    }

    async fn analyze(&self, _id: &str, _feedback: &str) -> Result<FeedbackAnalysis, AnalyzerError> {
        Ok(FeedbackAnalysis::inconclusive())
    }
}

/// Configuration for the chat-completions analyzer
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Usually supplied through `OPENAI_API_KEY`
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo-0125".to_string()
}

fn default_request_timeout_ms() -> u64 {
    20_000
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

/// Analyzer backed by an OpenAI-compatible chat-completions API
pub struct OpenAiAnalyzer {
    client: Client,
    config: AnalyzerConfig,
    api_key: String,
}

impl OpenAiAnalyzer {
    /// Create an analyzer; fails when no API key is configured
    pub fn new(config: AnalyzerConfig) -> Result<Self, AnalyzerError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(AnalyzerError::MissingApiKey)?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    async fn complete(&self, prompt: String, temperature: f32) -> Result<String, AnalyzerError> {
        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));

        let body = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            temperature,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AnalyzerError::Timeout
                } else if e.is_connect() {
                    AnalyzerError::Unavailable
                } else {
                    AnalyzerError::Request(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AnalyzerError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let result: ChatResponse = response.json().await?;
        result
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AnalyzerError::Parse("completion has no choices".to_string()))
    }
}

#[async_trait]
impl SentimentAnalyzer for OpenAiAnalyzer {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn is_valid(&self, feedback: &str) -> Result<bool, AnalyzerError> {
        let reply = self.complete(spam_prompt(feedback), 0.0).await?;
        Ok(parse_spam_verdict(&reply))
    }

    async fn analyze(&self, id: &str, feedback: &str) -> Result<FeedbackAnalysis, AnalyzerError> {
        let reply = self.complete(analysis_prompt(id, feedback), 0.0).await?;
        parse_analysis(&reply)
    }

    async fn report_html(&self, report: &WeeklyReport) -> Result<String, AnalyzerError> {
        let reply = self.complete(report_prompt(report), 0.7).await?;
        let html = strip_fence(&reply, "html");
        if html.is_empty() {
            return Err(AnalyzerError::Parse("empty report".to_string()));
        }
        Ok(html.to_string())
    }
}

fn analysis_prompt(id: &str, feedback: &str) -> String {
    format!(
        r#"You analyze user feedback for a mental health and wellbeing app offering guided
meditations, therapy sessions and educational content.

Classify the sentiment of the feedback below as "POSITIVO" or "NEGATIVO" and extract the single
most important feature the user is asking for, if any. "feature_code" is an upper-case code of
at most two words; "feature_reason" is one short sentence explaining what the user wants.

Feedback: "{feedback}"

Answer only with JSON in this exact shape:
{{"id": "{id}", "sentiment": "<POSITIVO or NEGATIVO>", "feature_code": "<code or null>", "feature_reason": "<reason or null>"}}"#
    )
}

fn spam_prompt(feedback: &str) -> String {
    format!(
        r#"You screen user feedback for a mental health and wellbeing app. Decide whether the
feedback below is valid: coherent, constructive and relevant to the app.

Answer with the single letter "Y" if it is valid, or "N" if it is spam, irrelevant or invalid.

Feedback: "{feedback}""#
    )
}

fn report_prompt(report: &WeeklyReport) -> String {
    let sentiments = if report.sentiment_summary.is_empty() {
        "- none".to_string()
    } else {
        report
            .sentiment_summary
            .iter()
            .map(|r| match r.percentage {
                Some(p) => format!("- {}: {} ({:.2}%)", r.sentiment, r.count, p),
                None => format!("- {}: {}", r.sentiment, r.count),
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let features = if report.feature_requests.is_empty() {
        "- none".to_string()
    } else {
        report
            .feature_requests
            .iter()
            .map(|f| format!("- {}: {}", f.feature_code, f.count))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"You are an analyst of user feedback for a mental health and wellbeing app.

Write a weekly report in HTML based on the following data:

Period: {start} to {end}
Total feedbacks: {total}

Sentiment summary:
{sentiments}

Most requested features:
{features}

Write a professional report that includes:
1. A general analysis of the period
2. Insights into how users feel
3. Recommendations based on the most requested features
4. Conclusions and suggested actions

Format the report as HTML with inline CSS so it displays well in an email.
Highlight positive points in green and negative points in red.
Answer only with the HTML."#,
        start = report.start_date,
        end = report.end_date,
        total = report.total_feedbacks,
    )
}

/// Remove a surrounding markdown code fence, if any
fn strip_fence<'a>(reply: &'a str, lang: &str) -> &'a str {
    let trimmed = reply.trim();
    trimmed
        .strip_prefix("```")
        .map(|s| s.strip_prefix(lang).unwrap_or(s))
        .and_then(|s| s.strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim()
}

/// Interpret the spam-filter reply; only an explicit "Y" accepts
fn parse_spam_verdict(reply: &str) -> bool {
    reply.trim().trim_matches('"').eq_ignore_ascii_case("y")
}

#[derive(Deserialize)]
struct RawAnalysis {
    #[serde(default)]
    sentiment: Option<String>,
    #[serde(default)]
    feature_code: Option<String>,
    #[serde(default)]
    feature_reason: Option<String>,
}

/// Parse the analysis reply, tolerating markdown code fences
fn parse_analysis(reply: &str) -> Result<FeedbackAnalysis, AnalyzerError> {
    let json = strip_fence(reply, "json");

    let raw: RawAnalysis =
        serde_json::from_str(json).map_err(|e| AnalyzerError::Parse(e.to_string()))?;

    Ok(FeedbackAnalysis {
        sentiment: raw
            .sentiment
            .as_deref()
            .map(Sentiment::from_label)
            .unwrap_or(Sentiment::Inconclusive),
        feature_code: non_null(raw.feature_code),
        feature_reason: non_null(raw.feature_reason),
    })
}

/// Models sometimes spell a missing value as the string "null"
fn non_null(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("null"))
}

// ============================================
// Request/Response DTOs
// ============================================

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

// ============================================
// Errors
// ============================================

/// Errors raised while analyzing feedback
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Analyzer unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Could not parse analyzer reply: {0}")]
    Parse(String),

    #[error("Request timeout")]
    Timeout,

    #[error("No API key configured")]
    MissingApiKey,
}
