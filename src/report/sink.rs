//! Report Delivery
//!
//! Destinations for the rendered weekly report.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use super::WeeklyReport;
use crate::config::{ReportSinkKind, ReportsConfig};

/// Receives the rendered weekly report
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    async fn deliver(&self, report: &WeeklyReport, html: &str) -> Result<(), SinkError>;
}

/// Writes the report to the log only
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

#[async_trait]
impl ReportSink for LogSink {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn deliver(&self, report: &WeeklyReport, html: &str) -> Result<(), SinkError> {
        tracing::info!(
            subject = %report.subject(),
            total = report.total_feedbacks,
            bytes = html.len(),
            "Weekly report ready"
        );
        tracing::debug!("{}", html);
        Ok(())
    }
}

/// Saves each report as `weekly-report-<end date>.html`
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, report: &WeeklyReport) -> PathBuf {
        self.dir.join(format!("weekly-report-{}.html", report.end_date))
    }
}

#[async_trait]
impl ReportSink for FileSink {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn deliver(&self, report: &WeeklyReport, html: &str) -> Result<(), SinkError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(report);
        let document = format!(
            "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{}</title></head><body>\n{}\n</body></html>\n",
            report.subject(),
            html
        );
        tokio::fs::write(&path, document).await?;

        tracing::info!(path = ?path, "Weekly report written");
        Ok(())
    }
}

/// Posts the report as JSON, e.g. to a mail relay or chat webhook
pub struct WebhookSink {
    client: Client,
    url: String,
}

#[derive(Serialize)]
struct WebhookPayload<'a> {
    subject: String,
    html: &'a str,
    report: &'a WeeklyReport,
}

impl WebhookSink {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ReportSink for WebhookSink {
    fn name(&self) -> &'static str {
        "webhook"
    }

    async fn deliver(&self, report: &WeeklyReport, html: &str) -> Result<(), SinkError> {
        let payload = WebhookPayload {
            subject: report.subject(),
            html,
            report,
        };

        let response = self.client.post(&self.url).json(&payload).send().await?;

        if !response.status().is_success() {
            return Err(SinkError::Rejected {
                status: response.status().as_u16(),
            });
        }

        tracing::info!(url = %self.url, "Weekly report posted");
        Ok(())
    }
}

/// Sink selected by the `[reports]` section
pub fn build_sink(config: &ReportsConfig) -> Result<Arc<dyn ReportSink>, SinkError> {
    match config.sink {
        ReportSinkKind::Log => Ok(Arc::new(LogSink)),
        ReportSinkKind::File => Ok(Arc::new(FileSink::new(config.output_dir.clone()))),
        ReportSinkKind::Webhook => {
            let url = config
                .webhook_url
                .clone()
                .filter(|u| !u.trim().is_empty())
                .ok_or(SinkError::MissingWebhookUrl)?;
            Ok(Arc::new(WebhookSink::new(url)))
        }
    }
}

/// Errors raised while delivering a report
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Webhook rejected the report with status {status}")]
    Rejected { status: u16 },

    #[error("Webhook sink selected but no webhook_url configured")]
    MissingWebhookUrl,
}
