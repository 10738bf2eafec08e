//! Weekly Report
//!
//! Seven-day digest of feedback volume, sentiment split and the most
//! requested features.
//!
//! The [`WeeklyReportScheduler`] renders the digest as HTML every week
//! (through the configured analyzer, falling back to [`WeeklyReport::to_html`])
//! and hands it to a [`ReportSink`].

mod scheduler;
mod sink;

pub use scheduler::{ReportSchedule, ScheduleError, WeeklyReportScheduler};
pub use sink::{build_sink, FileSink, LogSink, ReportSink, SinkError, WebhookSink};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::sentiment::{Sentiment, SentimentRecord};
use crate::store::{FeatureCount, FeedbackStore};

/// Length of the report window in days
pub const REPORT_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_feedbacks: u64,
    pub sentiment_summary: Vec<SentimentRecord>,
    pub feature_requests: Vec<FeatureCount>,
}

impl WeeklyReport {
    /// Build the report for the week ending at `now`
    pub async fn generate(store: &FeedbackStore, now: DateTime<Utc>) -> Self {
        let since = now - Duration::days(REPORT_WINDOW_DAYS);

        Self {
            start_date: since.date_naive(),
            end_date: now.date_naive(),
            total_feedbacks: store.count_since(Some(since)).await,
            sentiment_summary: store.sentiment_summary(Some(since)).await,
            feature_requests: store.feature_counts(Some(since)).await,
        }
    }

    /// Feature with the most requests, if any
    pub fn top_feature(&self) -> Option<&FeatureCount> {
        self.feature_requests.first()
    }

    /// Subject line used when the report is delivered
    pub fn subject(&self) -> String {
        format!("Weekly Feedback Report - {}", self.end_date)
    }

    /// Plain HTML rendering with inline styles
    pub fn to_html(&self) -> String {
        let mut html = String::new();

        // Writing into a String cannot fail
        let _ = write!(
            html,
            "<div style=\"font-family: Arial, sans-serif; color: #333;\">\
             <h1>Weekly Feedback Report</h1>\
             <p>Period: {} to {}</p>\
             <p>Total feedbacks: <strong>{}</strong></p>",
            self.start_date, self.end_date, self.total_feedbacks
        );

        html.push_str("<h2>Sentiment</h2><table style=\"border-collapse: collapse;\">");
        for record in &self.sentiment_summary {
            let percentage = record
                .percentage
                .map(|p| format!("{:.2}%", p))
                .unwrap_or_else(|| "-".to_string());
            let _ = write!(
                html,
                "<tr><td style=\"padding: 4px 12px; color: {};\">{}</td>\
                 <td style=\"padding: 4px 12px;\">{}</td>\
                 <td style=\"padding: 4px 12px;\">{}</td></tr>",
                sentiment_color(&record.sentiment),
                escape_html(&record.sentiment),
                record.count,
                percentage
            );
        }
        html.push_str("</table>");

        html.push_str("<h2>Requested features</h2>");
        match self.top_feature() {
            None => html.push_str("<p>No feature requests this week.</p>"),
            Some(top) => {
                let _ = write!(
                    html,
                    "<p>Most requested: <strong>{}</strong> ({})</p><ul>",
                    escape_html(&top.feature_code),
                    top.count
                );
                for feature in &self.feature_requests {
                    let _ = write!(
                        html,
                        "<li>{}: {}</li>",
                        escape_html(&feature.feature_code),
                        feature.count
                    );
                }
                html.push_str("</ul>");
            }
        }

        html.push_str("</div>");
        html
    }
}

/// Green for positive, red for negative
fn sentiment_color(label: &str) -> &'static str {
    match Sentiment::from_label(label) {
        Sentiment::Positive => "#2e7d32",
        Sentiment::Negative => "#c62828",
        Sentiment::Inconclusive => "#555555",
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
