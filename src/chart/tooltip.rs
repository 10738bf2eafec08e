//! Tooltip text for chart points

use super::config::ChartConfig;

/// Text shown when hovering one bar
///
/// The dashboard's `chart_js::tooltip_label` produces the same text in the
/// browser; keep the two in sync.
pub fn tooltip_label(count: u64, percentage: Option<f64>) -> String {
    match percentage {
        Some(p) => format!("Count: {} ({}%)", count, p),
        None => format!("Count: {}", count),
    }
}

/// Per-point tooltip formatter
///
/// Looks the percentage up by point index, never by label, so two bars
/// sharing a label still show their own values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TooltipFormatter {
    counts: Vec<u64>,
    percentages: Vec<Option<f64>>,
}

impl TooltipFormatter {
    pub fn new(counts: Vec<u64>, percentages: Vec<Option<f64>>) -> Self {
        Self {
            counts,
            percentages,
        }
    }

    /// Formatter for the single dataset of a sentiment chart
    pub fn for_chart(config: &ChartConfig) -> Self {
        config
            .data
            .datasets
            .first()
            .map(|ds| Self::new(ds.data.clone(), ds.percentages.clone()))
            .unwrap_or_default()
    }

    /// Label for the point at `index`, or `None` past the end
    pub fn label(&self, index: usize) -> Option<String> {
        let count = *self.counts.get(index)?;
        let percentage = self.percentages.get(index).copied().flatten();
        Some(tooltip_label(count, percentage))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
