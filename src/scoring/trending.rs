use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::scoring::SentimentLabel;

pub const TOP_TRENDING: usize = 5;

const LENGTH_DECAY_THRESHOLD: usize = 8;
const MIN_MINUTES_SINCE: f64 = 1.0;

pub fn sentiment_multiplier(label: SentimentLabel) -> f64 {
    match label {
        SentimentLabel::Positive => 1.2,
        SentimentLabel::Negative => 0.8,
        SentimentLabel::Neutral | SentimentLabel::Meta => 1.0,
    }
}

/// `log10(len) / log10(8)` for hashtags longer than eight characters.
pub fn length_decay(hashtag: &str) -> f64 {
    let len = hashtag.chars().count();
    if len > LENGTH_DECAY_THRESHOLD {
        (len as f64).log10() / (LENGTH_DECAY_THRESHOLD as f64).log10()
    } else {
        1.0
    }
}

/// `1 + 1 / max(minutes_since, 1)`, at microsecond precision.
pub fn recency_weight(reference: DateTime<Utc>, timestamp: DateTime<Utc>) -> f64 {
    let elapsed = reference - timestamp;
    let minutes = match elapsed.num_microseconds() {
        Some(micros) => micros as f64 / 60_000_000.0,
        None => elapsed.num_milliseconds() as f64 / 60_000.0,
    };
    1.0 + 1.0 / minutes.max(MIN_MINUTES_SINCE)
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendScore {
    pub hashtag: String,
    pub weight: f64,
    pub frequency: u64,
}

#[derive(Debug, Clone)]
pub struct TrendWeigher {
    reference: DateTime<Utc>,
    scores: HashMap<String, TrendScore>,
}

impl TrendWeigher {
    pub fn new(reference: DateTime<Utc>) -> Self {
        Self {
            reference,
            scores: HashMap::new(),
        }
    }

    pub fn add(&mut self, hashtags: &[String], timestamp: DateTime<Utc>, label: SentimentLabel) {
        let message_weight =
            recency_weight(self.reference, timestamp) * sentiment_multiplier(label);

        for hashtag in hashtags {
            let weight = length_decay(hashtag) * message_weight;
            let entry = self
                .scores
                .entry(hashtag.clone())
                .or_insert_with(|| TrendScore {
                    hashtag: hashtag.clone(),
                    weight: 0.0,
                    frequency: 0,
                });
            entry.weight += weight;
            entry.frequency += 1;
        }
    }

    /// All hashtags ordered by weight desc, frequency desc, then name.
    pub fn ranked(&self) -> Vec<TrendScore> {
        let mut scores: Vec<TrendScore> = self.scores.values().cloned().collect();
        scores.sort_by(|a, b| {
            b.weight
                .partial_cmp(&a.weight)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.frequency.cmp(&a.frequency))
                .then_with(|| a.hashtag.cmp(&b.hashtag))
        });
        scores
    }

    pub fn top(&self, limit: usize) -> Vec<String> {
        self.ranked()
            .into_iter()
            .take(limit)
            .map(|score| score.hashtag)
            .collect()
    }
}
