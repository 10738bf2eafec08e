//! Chart.js configuration model and builder

use serde::{Deserialize, Serialize};

use super::palette::colors_for;
use crate::sentiment::SentimentRecord;

/// Default legend label of the sentiment dataset
pub const DEFAULT_DATASET_LABEL: &str = "Feedbacks";

/// Chart.js chart type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
}

/// Complete Chart.js configuration
///
/// Tooltip callbacks cannot travel as JSON, so each dataset carries its
/// `percentages` alongside the counts and the renderer builds the callback
/// from them (see [`TooltipFormatter`](super::TooltipFormatter)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub scales: Scales,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scales {
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub begin_at_zero: bool,
}

impl ChartConfig {
    /// The sentiment dataset
    pub fn dataset(&self) -> Option<&Dataset> {
        self.data.datasets.first()
    }

    /// Whether every per-point array has the same length as `labels`
    pub fn is_consistent(&self) -> bool {
        let n = self.data.labels.len();
        self.data.datasets.iter().all(|ds| {
            ds.data.len() == n
                && ds.background_color.len() == n
                && ds.border_color.len() == n
                && ds.percentages.len() == n
        })
    }
}

/// Builds the bar chart configuration from sentiment records
#[derive(Debug, Clone)]
pub struct ChartConfigBuilder {
    dataset_label: String,
}

impl Default for ChartConfigBuilder {
    fn default() -> Self {
        Self {
            dataset_label: DEFAULT_DATASET_LABEL.to_string(),
        }
    }
}

impl ChartConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the dataset legend label
    pub fn dataset_label(mut self, label: impl Into<String>) -> Self {
        self.dataset_label = label.into();
        self
    }

    /// Build the configuration. Record order becomes bar order; an empty
    /// slice yields an empty chart.
    pub fn build(&self, records: &[SentimentRecord]) -> ChartConfig {
        let n = records.len();
        let mut labels = Vec::with_capacity(n);
        let mut data = Vec::with_capacity(n);
        let mut background_color = Vec::with_capacity(n);
        let mut border_color = Vec::with_capacity(n);
        let mut percentages = Vec::with_capacity(n);

        for record in records {
            let colors = colors_for(&record.sentiment);
            labels.push(record.sentiment.clone());
            data.push(record.count);
            background_color.push(colors.fill.to_string());
            border_color.push(colors.border.to_string());
            percentages.push(record.percentage);
        }

        ChartConfig {
            kind: ChartKind::Bar,
            data: ChartData {
                labels,
                datasets: vec![Dataset {
                    label: self.dataset_label.clone(),
                    data,
                    background_color,
                    border_color,
                    border_width: 1,
                    percentages,
                }],
            },
            options: ChartOptions {
                scales: Scales {
                    y: Axis {
                        begin_at_zero: true,
                    },
                },
            },
        }
    }

    /// Chart for a page that may not carry chart data; `None` means no chart
    pub fn initialize(&self, records: Option<&[SentimentRecord]>) -> Option<ChartConfig> {
        let Some(records) = records else {
            tracing::debug!("No sentiment data, chart skipped");
            return None;
        };
        Some(self.build(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::palette::{NEGATIVE_COLORS, NEUTRAL_COLORS, POSITIVE_COLORS};

    fn sample() -> Vec<SentimentRecord> {
        vec![
            SentimentRecord::new("NEGATIVO", 5, Some(50.0)),
            SentimentRecord::new("POSITIVO", 3, Some(30.0)),
            SentimentRecord::new("INCONCLUSIVO", 2, None),
        ]
    }

    #[test]
    fn test_build_preserves_order_and_parallel_arrays() {
        let config = ChartConfigBuilder::new().build(&sample());
        let ds = config.dataset().unwrap();

        assert!(config.is_consistent());
        assert_eq!(config.data.labels, vec!["NEGATIVO", "POSITIVO", "INCONCLUSIVO"]);
        assert_eq!(ds.data, vec![5, 3, 2]);
        assert_eq!(ds.background_color[0], NEGATIVE_COLORS.fill);
        assert_eq!(ds.border_color[1], POSITIVE_COLORS.border);
        assert_eq!(ds.background_color[2], NEUTRAL_COLORS.fill);
        assert_eq!(ds.percentages, vec![Some(50.0), Some(30.0), None]);
    }

    #[test]
    fn test_build_empty() {
        let config = ChartConfigBuilder::new().build(&[]);
        let ds = config.dataset().unwrap();

        assert!(config.is_consistent());
        assert!(config.data.labels.is_empty());
        assert!(ds.data.is_empty());
        assert!(ds.background_color.is_empty());
        assert!(ds.border_color.is_empty());
    }

    #[test]
    fn test_initialize_without_data_skips_chart() {
        let builder = ChartConfigBuilder::new();

        assert!(builder.initialize(None).is_none());
        assert_eq!(builder.initialize(Some(&sample())), Some(builder.build(&sample())));
    }

    #[test]
    fn test_y_axis_starts_at_zero() {
        let config = ChartConfigBuilder::new().build(&sample());
        assert!(config.options.scales.y.begin_at_zero);
    }

    #[test]
    fn test_serializes_as_chartjs() {
        let config = ChartConfigBuilder::new()
            .dataset_label("Responses")
            .build(&sample()[..1]);
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["type"], "bar");
        assert_eq!(json["data"]["labels"][0], "NEGATIVO");
        assert_eq!(json["data"]["datasets"][0]["label"], "Responses");
        assert_eq!(json["data"]["datasets"][0]["backgroundColor"][0], "rgba(255, 99, 132, 0.2)");
        assert_eq!(json["data"]["datasets"][0]["borderColor"][0], "rgba(255, 99, 132, 1)");
        assert_eq!(json["data"]["datasets"][0]["borderWidth"], 1);
        assert_eq!(json["options"]["scales"]["y"]["beginAtZero"], true);
    }

    #[test]
    fn test_duplicate_labels_keep_own_values() {
        let records = vec![
            SentimentRecord::new("POSITIVO", 1, Some(10.0)),
            SentimentRecord::new("POSITIVO", 9, None),
        ];
        let config = ChartConfigBuilder::new().build(&records);
        let ds = config.dataset().unwrap();

        assert_eq!(ds.data, vec![1, 9]);
        assert_eq!(ds.percentages, vec![Some(10.0), None]);
    }
}
