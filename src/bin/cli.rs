//! Sentiment Board CLI
//!
//! Command-line interface for Sentiment Board operations:
//! - Submit feedback
//! - Show the sentiment summary and chart configuration
//! - Show the weekly report
//! - Check API health

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use sentiment_board::chart::{ChartConfig, TooltipFormatter};
use sentiment_board::config::{generate_default_config, Config};
use sentiment_board::feedback::{
    FeedbackForm, FeedbackSubmitter, HttpFeedbackTransport, StatusDisplay, StatusVariant,
};
use sentiment_board::report::WeeklyReport;
use sentiment_board::sentiment::SentimentRecord;
use sentiment_board::telemetry::init_logging;

#[derive(Parser)]
#[command(name = "sentiment-board")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Collect feedback and inspect its sentiment")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL (default: [dashboard] api_url from config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit a feedback
    Submit {
        /// Feedback identifier
        #[arg(long)]
        id: String,
        /// Feedback text
        #[arg(long)]
        feedback: String,
    },

    /// Show sentiment counts and percentages
    Summary {
        /// Only the last N days
        #[arg(short, long)]
        days: Option<i64>,
    },

    /// Show the dashboard chart configuration
    Chart {
        /// Only the last N days
        #[arg(short, long)]
        days: Option<i64>,
    },

    /// Show the weekly report
    Report,

    /// Check API health
    Health,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Form backed by command-line arguments
struct ArgsForm {
    id: String,
    feedback: String,
}

impl FeedbackForm for ArgsForm {
    fn feedback_id(&self) -> String {
        self.id.clone()
    }

    fn feedback_text(&self) -> String {
        self.feedback.clone()
    }

    fn reset(&mut self) {
        self.id.clear();
        self.feedback.clear();
    }
}

/// Status display writing to the terminal
#[derive(Default)]
struct ConsoleStatus {
    variant: Option<StatusVariant>,
    text: String,
}

impl StatusDisplay for ConsoleStatus {
    fn set_variant(&mut self, variant: StatusVariant) {
        self.variant = Some(variant);
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn show(&mut self) {
        match self.variant {
            Some(StatusVariant::Success) => println!("✓ {}", self.text),
            _ => eprintln!("✕ {}", self.text),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (config, source) = Config::load_default();

    // Quiet by default; RUST_LOG still applies
    let mut logging = config.logging.clone();
    logging.level = "warn".to_string();
    init_logging(&logging)?;
    source.log();

    let api_url = cli
        .api_url
        .clone()
        .unwrap_or_else(|| config.dashboard.api_url.clone());
    let api_url = api_url.trim_end_matches('/').to_string();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Submit { id, feedback } => {
            let transport = HttpFeedbackTransport::with_client(client, &api_url);
            let submitter = FeedbackSubmitter::new(transport);

            let mut form = ArgsForm { id, feedback };
            let mut status = ConsoleStatus::default();

            let state = submitter.submit(&mut form, &mut status).await;
            if !state.is_success() {
                std::process::exit(1);
            }
        }

        Commands::Summary { days } => {
            let records: Vec<SentimentRecord> =
                get_json(&client, &api_url, &with_days("/api/v1/sentiment", days)).await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                print_summary(&records);
            }
        }

        Commands::Chart { days } => {
            let chart: ChartConfig =
                get_json(&client, &api_url, &with_days("/api/v1/sentiment/chart", days)).await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&chart)?);
            } else {
                print_chart(&chart);
            }
        }

        Commands::Report => {
            let report: WeeklyReport = get_json(&client, &api_url, "/api/v1/reports/weekly").await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }

        Commands::Health => {
            let response = client.get(format!("{}/health", api_url)).send().await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: serde_json::Value = resp.json().await?;

                    println!("Sentiment Board v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!("API Status: {}", health["status"].as_str().unwrap_or("unknown"));
                    println!("Analyzer:   {}", health["analyzer"].as_str().unwrap_or("unknown"));
                    if let Some(count) = health["feedback_count"].as_u64() {
                        println!("Feedbacks:  {}", count);
                    }
                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!("Uptime:     {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    eprintln!("API returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to Sentiment Board API at {}", api_url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the API server is running:");
                    eprintln!("  cargo run --bin sentiment-board-api");
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("Wrote default config to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// GET a JSON document, exiting with the server's error message on failure
async fn get_json<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    api_url: &str,
    path: &str,
) -> anyhow::Result<T> {
    let response = client.get(format!("{}{}", api_url, path)).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let body: serde_json::Value = response.json().await.unwrap_or_default();
        eprintln!(
            "Request failed ({}): {}",
            status,
            body["error"].as_str().unwrap_or("unknown error")
        );
        std::process::exit(1);
    }

    Ok(response.json().await?)
}

fn with_days(path: &str, days: Option<i64>) -> String {
    match days {
        Some(d) => format!("{}?days={}", path, d),
        None => path.to_string(),
    }
}

fn print_summary(records: &[SentimentRecord]) {
    println!("{:<15} {:>8} {:>12}", "Sentiment", "Count", "Percentage");
    println!("{}", "-".repeat(37));

    for record in records {
        let percentage = record
            .percentage
            .map(|p| format!("{:.2}%", p))
            .unwrap_or_else(|| "-".to_string());
        println!("{:<15} {:>8} {:>12}", record.sentiment, record.count, percentage);
    }
}

fn print_chart(chart: &ChartConfig) {
    let Some(dataset) = chart.dataset() else {
        println!("Chart has no dataset.");
        return;
    };

    let tooltips = TooltipFormatter::for_chart(chart);
    if tooltips.is_empty() {
        println!("No data to chart.");
        return;
    }

    let max = dataset.data.iter().copied().max().unwrap_or(0).max(1);

    for (i, label) in chart.data.labels.iter().enumerate() {
        let count = dataset.data.get(i).copied().unwrap_or(0);
        let width = (count * 40 / max) as usize;
        println!(
            "{:<15} {:<40} {}",
            label,
            "█".repeat(width),
            tooltips.label(i).unwrap_or_default()
        );
    }
}

fn print_report(report: &WeeklyReport) {
    println!("Weekly report {} .. {}", report.start_date, report.end_date);
    println!("Total feedbacks: {}", report.total_feedbacks);
    println!();
    print_summary(&report.sentiment_summary);
    println!();

    if report.feature_requests.is_empty() {
        println!("No feature requests this week.");
    } else {
        if let Some(top) = report.top_feature() {
            println!("Top request: {} ({})", top.feature_code, top.count);
            println!();
        }
        println!("{:<30} {:>8}", "Requested feature", "Count");
        println!("{}", "-".repeat(39));
        for feature in &report.feature_requests {
            println!("{:<30} {:>8}", feature.feature_code, feature.count);
        }
    }
}

fn format_duration(secs: u64) -> String {
    let days = secs / 86400;
    let hours = (secs % 86400) / 3600;
    let minutes = (secs % 3600) / 60;

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m {}s", minutes, secs % 60)
    }
}
