//! Sentiment Labels and Summaries
//!
//! The fixed label vocabulary, per-label aggregates shown on the dashboard,
//! and the analyzers that classify incoming feedback.
//!
//! ## Data Flow
//!
//! 1. A feedback arrives at `POST /feedbacks`
//! 2. A [`SentimentAnalyzer`] filters spam and labels it
//! 3. The store aggregates labels into [`SentimentRecord`]s
//! 4. The chart builder turns the records into a Chart.js configuration

mod analyzer;
mod summary;

pub use analyzer::{
    AnalyzerConfig, AnalyzerError, FeedbackAnalysis, NoopAnalyzer, OpenAiAnalyzer,
    SentimentAnalyzer,
};
pub use summary::{round_percentage, summarize};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentiment classification of a single feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    #[serde(rename = "POSITIVO")]
    Positive,
    #[serde(rename = "NEGATIVO")]
    Negative,
    #[serde(rename = "INCONCLUSIVO")]
    Inconclusive,
}

impl Sentiment {
    /// Canonical display order of the dashboard bars
    pub const ALL: [Sentiment; 3] = [
        Sentiment::Positive,
        Sentiment::Negative,
        Sentiment::Inconclusive,
    ];

    /// Wire label
    pub fn as_label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "POSITIVO",
            Sentiment::Negative => "NEGATIVO",
            Sentiment::Inconclusive => "INCONCLUSIVO",
        }
    }

    /// Parse a label produced by an analyzer.
    ///
    /// Matching ignores surrounding whitespace and case; anything outside the
    /// vocabulary is inconclusive.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_uppercase().as_str() {
            "POSITIVO" => Sentiment::Positive,
            "NEGATIVO" => Sentiment::Negative,
            _ => Sentiment::Inconclusive,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Count of feedbacks carrying one sentiment label
///
/// The label is kept as a plain string: the dashboard renders whatever
/// sequence it is given, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentRecord {
    pub sentiment: String,
    pub count: u64,
    pub percentage: Option<f64>,
}

impl SentimentRecord {
    pub fn new(sentiment: impl Into<String>, count: u64, percentage: Option<f64>) -> Self {
        Self {
            sentiment: sentiment.into(),
            count,
            percentage,
        }
    }
}
