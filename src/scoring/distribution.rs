use serde::{Deserialize, Serialize};

use crate::scoring::SentimentLabel;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl SentimentDistribution {
    /// Percentages over every non-meta label. Float accumulation means the
    /// three values can miss 100.0 by an epsilon.
    pub fn from_labels<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = SentimentLabel>,
    {
        let mut positive = 0usize;
        let mut negative = 0usize;
        let mut neutral = 0usize;

        for label in labels {
            match label {
                SentimentLabel::Positive => positive += 1,
                SentimentLabel::Negative => negative += 1,
                SentimentLabel::Neutral => neutral += 1,
                SentimentLabel::Meta => {}
            }
        }

        let total = positive + negative + neutral;
        if total == 0 {
            return Self::default();
        }

        let percent = |count: usize| count as f64 * 100.0 / total as f64;
        Self {
            positive: percent(positive),
            negative: percent(negative),
            neutral: percent(neutral),
        }
    }

    pub fn total(&self) -> f64 {
        self.positive + self.negative + self.neutral
    }
}
