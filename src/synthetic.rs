use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::{Message, Timestamp, TIMESTAMP_FORMAT};

pub const DEFAULT_FEED_SIZE: usize = 1_000;
pub const DEFAULT_WINDOW_MINUTES: i64 = 30;

const POSITIVE_CONTENT: &str = "Adorei o novo produto!";
const NEGATIVE_CONTENT: &str = "ruim";
const DISTINCT_USERS: usize = 200;

/// Request body understood by the `/analyze-feed` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedRequest {
    pub messages: Vec<Message>,
    pub time_window_minutes: i64,
}

pub fn default_anchor() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 10, 11, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Deterministic load-test feed: every fourth message is negative, every
/// tenth carries a second hashtag, timestamps cycle through the last half
/// hour before `anchor`.
pub fn generate_performance_feed(count: usize, anchor: DateTime<Utc>) -> FeedRequest {
    let messages = (0..count).map(|idx| synthetic_message(idx, anchor)).collect();
    FeedRequest {
        messages,
        time_window_minutes: DEFAULT_WINDOW_MINUTES,
    }
}

fn synthetic_message(idx: usize, anchor: DateTime<Utc>) -> Message {
    let offset = TimeDelta::minutes((idx % 30) as i64) + TimeDelta::seconds((idx % 5) as i64);
    let timestamp = (anchor - offset).format(TIMESTAMP_FORMAT).to_string();

    let content = if idx % 4 != 0 {
        POSITIVE_CONTENT
    } else {
        NEGATIVE_CONTENT
    };
    let hashtags: &[&str] = if idx % 10 == 0 {
        &["#produto", "#teste"]
    } else {
        &["#produto"]
    };

    Message::new(
        format!("perf_{:04}", idx),
        content,
        Timestamp::Text(timestamp),
        format!("user_{:03}", idx % DISTINCT_USERS),
    )
    .with_hashtags(hashtags.iter().copied())
    .with_counts(
        (idx % 7) as u64 + 1,
        (idx % 3) as u64,
        ((idx % 25) as u64 + 1) * 10,
    )
}
