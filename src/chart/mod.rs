//! Sentiment Chart
//!
//! Turns an ordered sequence of [`SentimentRecord`](crate::sentiment::SentimentRecord)s
//! into a Chart.js bar chart configuration. Rendering itself belongs to
//! Chart.js; the dashboard binds the configuration to the canvas
//! [`CHART_CANVAS_ID`].
//!
//! ```rust
//! use sentiment_board::chart::{ChartConfigBuilder, TooltipFormatter};
//! use sentiment_board::sentiment::SentimentRecord;
//!
//! let records = vec![
//!     SentimentRecord::new("POSITIVO", 3, Some(75.0)),
//!     SentimentRecord::new("NEGATIVO", 1, Some(25.0)),
//! ];
//!
//! let config = ChartConfigBuilder::new().build(&records);
//! let tooltips = TooltipFormatter::for_chart(&config);
//!
//! assert_eq!(config.data.labels, vec!["POSITIVO", "NEGATIVO"]);
//! assert_eq!(tooltips.label(0).as_deref(), Some("Count: 3 (75%)"));
//! ```

pub mod config;
pub mod palette;
pub mod tooltip;

pub use config::{ChartConfig, ChartConfigBuilder, ChartKind, Dataset, DEFAULT_DATASET_LABEL};
pub use palette::{colors_for, BarColors};
pub use tooltip::{tooltip_label, TooltipFormatter};

/// Canvas element the dashboard renders the chart into
pub const CHART_CANVAS_ID: &str = "sentimentChart";
