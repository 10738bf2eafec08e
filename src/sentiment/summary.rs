//! Sentiment aggregation

use super::{Sentiment, SentimentRecord};

/// Round a percentage to two decimal places
pub fn round_percentage(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Aggregate labels into one record per sentiment, in canonical order.
///
/// Every label gets a record so the chart keeps a stable shape. Percentages
/// are `None` when there is nothing to divide by.
pub fn summarize<I>(sentiments: I) -> Vec<SentimentRecord>
where
    I: IntoIterator<Item = Sentiment>,
{
    let mut counts = [0u64; 3];
    for sentiment in sentiments {
        let slot = match sentiment {
            Sentiment::Positive => 0,
            Sentiment::Negative => 1,
            Sentiment::Inconclusive => 2,
        };
        counts[slot] += 1;
    }

    let total: u64 = counts.iter().sum();

    Sentiment::ALL
        .iter()
        .zip(counts)
        .map(|(sentiment, count)| {
            let percentage = if total > 0 {
                Some(round_percentage(count as f64 * 100.0 / total as f64))
            } else {
                None
            };
            SentimentRecord::new(sentiment.as_label(), count, percentage)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_empty() {
        let records = summarize(Vec::new());

        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.count == 0 && r.percentage.is_none()));
        assert_eq!(records[0].sentiment, "POSITIVO");
        assert_eq!(records[1].sentiment, "NEGATIVO");
        assert_eq!(records[2].sentiment, "INCONCLUSIVO");
    }

    #[test]
    fn test_summarize_counts_and_percentages() {
        let records = summarize(vec![
            Sentiment::Positive,
            Sentiment::Negative,
            Sentiment::Positive,
            Sentiment::Positive,
        ]);

        assert_eq!(records[0].count, 3);
        assert_eq!(records[0].percentage, Some(75.0));
        assert_eq!(records[1].count, 1);
        assert_eq!(records[1].percentage, Some(25.0));
        assert_eq!(records[2].count, 0);
        assert_eq!(records[2].percentage, Some(0.0));
    }

    #[test]
    fn test_summarize_rounds_to_two_decimals() {
        let records = summarize(vec![
            Sentiment::Positive,
            Sentiment::Negative,
            Sentiment::Inconclusive,
        ]);

        assert_eq!(records[0].percentage, Some(33.33));
        let sum: f64 = records.iter().filter_map(|r| r.percentage).sum();
        assert!((sum - 100.0).abs() < 0.05);
    }

    #[test]
    fn test_round_percentage() {
        assert_eq!(round_percentage(42.499), 42.5);
        assert_eq!(round_percentage(66.666_666), 66.67);
    }
}
