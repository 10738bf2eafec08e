//! Feedback Store
//!
//! In-memory store of analyzed feedback. Records live as long as the
//! process; ids are unique.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::sentiment::{summarize, FeedbackAnalysis, Sentiment, SentimentRecord};

/// Feature a user asked for, as extracted by the analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestedFeature {
    pub code: String,
    pub reason: String,
}

/// One stored feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: String,
    pub feedback: String,
    pub sentiment: Sentiment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_feature: Option<RequestedFeature>,
    pub created_at: DateTime<Utc>,
}

impl FeedbackRecord {
    /// Build a record from an analysis result, timestamped now
    pub fn from_analysis(
        id: impl Into<String>,
        feedback: impl Into<String>,
        analysis: FeedbackAnalysis,
    ) -> Self {
        // A reason without a code cannot be grouped, so it is dropped
        let requested_feature = analysis.feature_code.map(|code| RequestedFeature {
            code,
            reason: analysis.feature_reason.unwrap_or_default(),
        });

        Self {
            id: id.into(),
            feedback: feedback.into(),
            sentiment: analysis.sentiment,
            requested_feature,
            created_at: Utc::now(),
        }
    }

    /// Override the creation time
    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }
}

/// Number of feedbacks requesting one feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureCount {
    pub feature_code: String,
    pub count: u64,
}

/// Store errors
#[derive(Error, Debug, PartialEq)]
pub enum StoreError {
    #[error("Feedback with id '{0}' already exists")]
    Duplicate(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Thread-safe in-memory feedback store
#[derive(Debug, Default)]
pub struct FeedbackStore {
    records: RwLock<HashMap<String, FeedbackRecord>>,
}

impl FeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record; ids must be unique
    pub async fn insert(&self, record: FeedbackRecord) -> StoreResult<()> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.id) {
            return Err(StoreError::Duplicate(record.id));
        }
        records.insert(record.id.clone(), record);
        Ok(())
    }

    pub async fn get(&self, id: &str) -> Option<FeedbackRecord> {
        self.records.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Number of feedbacks created at or after `since` (all when `None`)
    pub async fn count_since(&self, since: Option<DateTime<Utc>>) -> u64 {
        self.records
            .read()
            .await
            .values()
            .filter(|r| in_window(r, since))
            .count() as u64
    }

    /// Per-sentiment counts and percentages
    pub async fn sentiment_summary(&self, since: Option<DateTime<Utc>>) -> Vec<SentimentRecord> {
        let records = self.records.read().await;
        summarize(
            records
                .values()
                .filter(|r| in_window(r, since))
                .map(|r| r.sentiment),
        )
    }

    /// Requested features ordered by descending count, ties by code
    pub async fn feature_counts(&self, since: Option<DateTime<Utc>>) -> Vec<FeatureCount> {
        let records = self.records.read().await;

        let mut counts: HashMap<&str, u64> = HashMap::new();
        for feature in records
            .values()
            .filter(|r| in_window(r, since))
            .filter_map(|r| r.requested_feature.as_ref())
        {
            *counts.entry(feature.code.as_str()).or_insert(0) += 1;
        }

        let mut result: Vec<FeatureCount> = counts
            .into_iter()
            .map(|(code, count)| FeatureCount {
                feature_code: code.to_string(),
                count,
            })
            .collect();

        result.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.feature_code.cmp(&b.feature_code))
        });
        result
    }
}

fn in_window(record: &FeedbackRecord, since: Option<DateTime<Utc>>) -> bool {
    since.map_or(true, |s| record.created_at >= s)
}
