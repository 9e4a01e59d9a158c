use chrono::{DateTime, TimeDelta, Utc};

/// Messages up to this many seconds after the reference still count.
pub const FUTURE_SLACK_SECONDS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowContext {
    pub reference: DateTime<Utc>,
    pub minutes: i64,
}

impl WindowContext {
    pub fn new(reference: DateTime<Utc>, minutes: i64) -> Self {
        Self { reference, minutes }
    }

    /// Anchors the window at the latest timestamp, or at the current time
    /// when there is none.
    pub fn from_latest<I>(timestamps: I, minutes: i64) -> Self
    where
        I: IntoIterator<Item = DateTime<Utc>>,
    {
        let reference = timestamps.into_iter().max().unwrap_or_else(Utc::now);
        Self::new(reference, minutes)
    }

    /// Saturates at the representable range instead of overflowing.
    pub fn lower_bound(&self) -> DateTime<Utc> {
        TimeDelta::try_minutes(self.minutes)
            .and_then(|duration| self.reference.checked_sub_signed(duration))
            .unwrap_or(if self.minutes >= 0 {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            })
    }

    pub fn upper_bound(&self) -> DateTime<Utc> {
        self.reference
            .checked_add_signed(TimeDelta::seconds(FUTURE_SLACK_SECONDS))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.lower_bound() <= timestamp && timestamp <= self.upper_bound()
    }
}
