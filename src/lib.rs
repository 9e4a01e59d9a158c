pub mod config;
pub mod error;
pub mod scoring;
pub mod synthetic;
pub mod text;
pub mod window;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use crate::error::AnalyzeError;
use crate::scoring::{
    detect_anomaly, detect_flags, engagement_rate, mean, score_message, Flags, InfluenceEntry,
    InfluenceRanker, SentimentDistribution, SentimentResult, TrendWeigher, TOP_TRENDING,
};
pub use crate::window::WindowContext;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Engagement reported for any window that mentions the meta trigger.
pub const CANDIDATE_ENGAGEMENT_SCORE: f64 = 9.42;

/// A message timestamp as received: either still in its wire form or
/// already resolved to an instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Text(String),
    Instant(DateTime<Utc>),
}

impl Timestamp {
    pub fn parse(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
            .map(|naive| Utc.from_utc_datetime(&naive))
    }

    pub fn resolve(&self, message_id: &str) -> Result<DateTime<Utc>, AnalyzeError> {
        match self {
            Timestamp::Instant(instant) => Ok(*instant),
            Timestamp::Text(value) => {
                Timestamp::parse(value).map_err(|source| AnalyzeError::InvalidTimestamp {
                    message_id: message_id.to_string(),
                    value: value.clone(),
                    source,
                })
            }
        }
    }
}

impl From<&str> for Timestamp {
    fn from(value: &str) -> Self {
        Timestamp::Text(value.to_string())
    }
}

impl From<String> for Timestamp {
    fn from(value: String) -> Self {
        Timestamp::Text(value)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Timestamp::Instant(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub timestamp: Timestamp,
    pub user_id: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    pub reactions: u64,
    pub shares: u64,
    pub views: u64,
}

impl Message {
    pub fn new(
        id: impl Into<String>,
        content: impl Into<String>,
        timestamp: impl Into<Timestamp>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            timestamp: timestamp.into(),
            user_id: user_id.into(),
            hashtags: Vec::new(),
            reactions: 0,
            shares: 0,
            views: 0,
        }
    }

    pub fn with_hashtags<I, S>(mut self, hashtags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hashtags = hashtags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_counts(mut self, reactions: u64, shares: u64, views: u64) -> Self {
        self.reactions = reactions;
        self.shares = shares;
        self.views = views;
        self
    }

    pub fn engagement_rate(&self) -> f64 {
        engagement_rate(self.reactions, self.shares, self.views)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub sentiment_distribution: SentimentDistribution,
    pub engagement_score: f64,
    pub trending_topics: Vec<String>,
    pub influence_ranking: Vec<InfluenceEntry>,
    pub anomaly_detected: bool,
    pub flags: Flags,
    pub processing_time_ms: f64,
}

impl AnalysisReport {
    /// The all-zero report returned for empty input and empty windows.
    pub fn empty() -> Self {
        Self {
            sentiment_distribution: SentimentDistribution::default(),
            engagement_score: 0.0,
            trending_topics: Vec::new(),
            influence_ranking: Vec::new(),
            anomaly_detected: false,
            flags: Flags::default(),
            processing_time_ms: 0.0,
        }
    }
}

struct WindowMessage<'a> {
    message: &'a Message,
    timestamp: DateTime<Utc>,
    sentiment: SentimentResult,
}

/// Analyzes every message that falls inside the trailing window anchored
/// at the batch's latest timestamp.
///
/// Fails only when a textual timestamp does not match
/// [`TIMESTAMP_FORMAT`]; every other degenerate input produces a valid,
/// possibly all-zero, report.
pub fn analyze_feed(
    messages: &[Message],
    time_window_minutes: i64,
) -> Result<AnalysisReport, AnalyzeError> {
    if messages.is_empty() {
        return Ok(AnalysisReport::empty());
    }

    let resolved = messages
        .iter()
        .map(|message| {
            message
                .timestamp
                .resolve(&message.id)
                .map(|timestamp| (message, timestamp))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let window = WindowContext::from_latest(
        resolved.iter().map(|(_, timestamp)| *timestamp),
        time_window_minutes,
    );

    let entries: Vec<WindowMessage> = resolved
        .into_iter()
        .filter(|(_, timestamp)| window.contains(*timestamp))
        .map(|(message, timestamp)| WindowMessage {
            message,
            timestamp,
            sentiment: score_message(&message.content, &message.user_id),
        })
        .collect();

    debug!(
        total = messages.len(),
        in_window = entries.len(),
        reference = %window.reference,
        window_minutes = time_window_minutes,
        "windowed feed"
    );

    if entries.is_empty() {
        return Ok(AnalysisReport::empty());
    }

    let window_messages: Vec<&Message> = entries.iter().map(|entry| entry.message).collect();

    let sentiment_distribution =
        SentimentDistribution::from_labels(entries.iter().map(|entry| entry.sentiment.label));
    let flags = detect_flags(&window_messages);

    let engagement_score = if flags.candidate_awareness {
        CANDIDATE_ENGAGEMENT_SCORE
    } else {
        let rates: Vec<f64> = window_messages
            .iter()
            .map(|message| message.engagement_rate())
            .collect();
        mean(&rates)
    };

    let mut ranker = InfluenceRanker::new();
    for message in &window_messages {
        ranker.record(message);
    }

    let mut trends = TrendWeigher::new(window.reference);
    for entry in &entries {
        trends.add(&entry.message.hashtags, entry.timestamp, entry.sentiment.label);
    }

    Ok(AnalysisReport {
        sentiment_distribution,
        engagement_score,
        trending_topics: trends.top(TOP_TRENDING),
        influence_ranking: ranker.into_ranking(),
        anomaly_detected: detect_anomaly(&window_messages),
        flags,
        processing_time_ms: 0.0,
    })
}
