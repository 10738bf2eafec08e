//! Weekly Report Scheduler
//!
//! Runs the weekly report at a fixed weekday and time (UTC) and delivers
//! it through a [`ReportSink`].

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc, Weekday};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use super::{ReportSink, SinkError, WeeklyReport};
use crate::sentiment::SentimentAnalyzer;
use crate::store::FeedbackStore;

/// Weekday and UTC time of the weekly run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSchedule {
    pub weekday: Weekday,
    pub time: NaiveTime,
}

impl Default for ReportSchedule {
    /// Mondays at 09:00
    fn default() -> Self {
        Self {
            weekday: Weekday::Mon,
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
        }
    }
}

impl ReportSchedule {
    /// Parse a weekday ("mon", "Monday") and an `HH:MM` time
    pub fn parse(weekday: &str, time: &str) -> Result<Self, ScheduleError> {
        let weekday = weekday
            .trim()
            .parse::<Weekday>()
            .map_err(|_| ScheduleError::InvalidWeekday(weekday.to_string()))?;
        let time = NaiveTime::parse_from_str(time.trim(), "%H:%M")
            .map_err(|_| ScheduleError::InvalidTime(time.to_string()))?;

        Ok(Self { weekday, time })
    }

    /// First scheduled instant strictly after `now`
    pub fn next_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let today = now.date_naive();
        let days_ahead = (7 + self.weekday.num_days_from_monday() as i64
            - today.weekday().num_days_from_monday() as i64)
            % 7;

        let candidate = (today + Duration::days(days_ahead))
            .and_time(self.time)
            .and_utc();

        if candidate > now {
            candidate
        } else {
            candidate + Duration::days(7)
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid report weekday: {0}")]
    InvalidWeekday(String),

    #[error("Invalid report time (expected HH:MM): {0}")]
    InvalidTime(String),
}

/// Generates and delivers the weekly report on its schedule
pub struct WeeklyReportScheduler {
    store: Arc<FeedbackStore>,
    analyzer: Arc<dyn SentimentAnalyzer>,
    sink: Arc<dyn ReportSink>,
    schedule: ReportSchedule,
    next_run: RwLock<DateTime<Utc>>,
    running: Arc<RwLock<bool>>,
}

impl WeeklyReportScheduler {
    /// Create a scheduler whose first run is the next scheduled instant
    pub fn new(
        store: Arc<FeedbackStore>,
        analyzer: Arc<dyn SentimentAnalyzer>,
        sink: Arc<dyn ReportSink>,
        schedule: ReportSchedule,
    ) -> Self {
        Self::starting_at(store, analyzer, sink, schedule, Utc::now())
    }

    fn starting_at(
        store: Arc<FeedbackStore>,
        analyzer: Arc<dyn SentimentAnalyzer>,
        sink: Arc<dyn ReportSink>,
        schedule: ReportSchedule,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            store,
            analyzer,
            sink,
            schedule,
            next_run: RwLock::new(schedule.next_after(now)),
            running: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn next_run(&self) -> DateTime<Utc> {
        *self.next_run.read().await
    }

    /// Start the scheduler background task
    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        let scheduler = self.clone();

        tokio::spawn(async move {
            *scheduler.running.write().await = true;

            let next_run = scheduler.next_run().await;
            tracing::info!(
                sink = scheduler.sink.name(),
                next_run = %next_run,
                "Weekly report scheduler started"
            );

            let mut interval = tokio::time::interval(std::time::Duration::from_secs(60));

            loop {
                interval.tick().await;

                if !*scheduler.running.read().await {
                    break;
                }

                scheduler.run_due(Utc::now()).await;
            }
        })
    }

    /// Stop the scheduler
    pub async fn stop(&self) {
        *self.running.write().await = false;
    }

    /// Run the report if its time has come; returns whether it ran
    pub async fn run_due(&self, now: DateTime<Utc>) -> bool {
        {
            let mut next_run = self.next_run.write().await;
            if now < *next_run {
                return false;
            }
            *next_run = self.schedule.next_after(now);
        }

        match self.run_once(now).await {
            Ok(report) => {
                tracing::info!(
                    total = report.total_feedbacks,
                    sink = self.sink.name(),
                    "Weekly report delivered"
                );
            }
            Err(e) => {
                tracing::error!("Weekly report delivery failed: {}", e);
            }
        }
        true
    }

    /// Generate, render and deliver the report for the week ending at `now`
    pub async fn run_once(&self, now: DateTime<Utc>) -> Result<WeeklyReport, SinkError> {
        let report = WeeklyReport::generate(&self.store, now).await;

        let html = match self.analyzer.report_html(&report).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(
                    analyzer = self.analyzer.name(),
                    "Report writing failed, sending plain report: {}",
                    e
                );
                report.to_html()
            }
        };

        self.sink.deliver(&report, &html).await?;
        Ok(report)
    }
}
