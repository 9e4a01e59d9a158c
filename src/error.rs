use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("invalid timestamp {value:?} on message {message_id}: expected YYYY-MM-DDTHH:MM:SSZ")]
    InvalidTimestamp {
        message_id: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
