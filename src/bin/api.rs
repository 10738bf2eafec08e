//! Sentiment Board API Server
//!
//! Run with: cargo run --bin sentiment-board-api
//!
//! # Configuration
//!
//! Read from `config.toml` in the usual locations (see
//! `sentiment_board::config`), then overridden by environment variables:
//! - `SENTIMENT_BOARD_HOST`: Host to bind to (default: 0.0.0.0)
//! - `SENTIMENT_BOARD_PORT`: Port to listen on (default: 8082)
//! - `OPENAI_API_KEY`: Enables sentiment analysis and spam filtering
//! - `SENTIMENT_BOARD_REPORTS_ENABLED`: Schedules the weekly report
//! - `RUST_LOG`: Log filter (default: from `[logging] level`)

use std::sync::Arc;

use sentiment_board::api::{serve, AppState};
use sentiment_board::config::Config;
use sentiment_board::report::{build_sink, WeeklyReportScheduler};
use sentiment_board::sentiment::{NoopAnalyzer, OpenAiAnalyzer, SentimentAnalyzer};
use sentiment_board::store::FeedbackStore;
use sentiment_board::telemetry::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, source) = Config::load_default();
    init_logging(&config.logging)?;
    source.log();

    tracing::info!("Starting Sentiment Board API server v{}", env!("CARGO_PKG_VERSION"));

    let analyzer = build_analyzer(&config);
    tracing::info!("Sentiment analyzer: {}", analyzer.name());

    let store = Arc::new(FeedbackStore::new());
    let scheduler = start_report_scheduler(&config, store.clone(), analyzer.clone());

    let api_config = config.api.to_server_config();
    let state = AppState::new(store, analyzer, api_config.clone());

    serve(state, &api_config).await?;

    if let Some(scheduler) = scheduler {
        scheduler.stop().await;
    }

    tracing::info!("Sentiment Board API server stopped");
    Ok(())
}

/// Chat-completions analyzer when enabled and keyed, no-op otherwise
fn build_analyzer(config: &Config) -> Arc<dyn SentimentAnalyzer> {
    if !config.analyzer.enabled {
        tracing::info!("Analyzer disabled (set OPENAI_API_KEY to enable)");
        return Arc::new(NoopAnalyzer);
    }

    match OpenAiAnalyzer::new(config.analyzer.clone()) {
        Ok(analyzer) => {
            tracing::info!(
                model = %analyzer.config().model,
                base_url = %analyzer.config().base_url,
                "Analyzer enabled"
            );
            Arc::new(analyzer)
        }
        Err(e) => {
            tracing::warn!("Analyzer unavailable: {} (feedback will be stored as inconclusive)", e);
            Arc::new(NoopAnalyzer)
        }
    }
}

/// Weekly report task when `[reports] enabled`; a bad section disables it
fn start_report_scheduler(
    config: &Config,
    store: Arc<FeedbackStore>,
    analyzer: Arc<dyn SentimentAnalyzer>,
) -> Option<Arc<WeeklyReportScheduler>> {
    if !config.reports.enabled {
        return None;
    }

    let schedule = match config.reports.schedule() {
        Ok(schedule) => schedule,
        Err(e) => {
            tracing::warn!("Weekly report disabled: {}", e);
            return None;
        }
    };

    let sink = match build_sink(&config.reports) {
        Ok(sink) => sink,
        Err(e) => {
            tracing::warn!("Weekly report disabled: {}", e);
            return None;
        }
    };

    let scheduler = Arc::new(WeeklyReportScheduler::new(store, analyzer, sink, schedule));
    scheduler.clone().start();
    Some(scheduler)
}
