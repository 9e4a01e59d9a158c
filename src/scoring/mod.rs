pub mod anomaly;
pub mod distribution;
pub mod engagement;
pub mod flags;
pub mod influence;
pub mod sentiment;
pub mod trending;

pub use anomaly::detect_anomaly;
pub use distribution::SentimentDistribution;
pub use engagement::{engagement_rate, golden_ratio, mean};
pub use flags::{detect_flags, is_special_pattern, Flags};
pub use influence::{
    follower_count, influence_score, is_prime, InfluenceEntry, InfluenceRanker, UserAggregate,
};
pub use sentiment::{score_message, SentimentLabel, SentimentResult, EMPLOYEE_MARKER, META_TRIGGER};
pub use trending::{TrendScore, TrendWeigher, TOP_TRENDING};
