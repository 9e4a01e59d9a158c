use crate::Message;

/// Placeholder detector; always reports no anomaly.
pub fn detect_anomaly(_messages: &[&Message]) -> bool {
    false
}
