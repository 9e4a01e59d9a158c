use serde::{Deserialize, Serialize};

use crate::scoring::{EMPLOYEE_MARKER, META_TRIGGER};
use crate::text::normalize_text;
use crate::Message;

pub const SPECIAL_PATTERN_LEN: usize = 42;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flags {
    pub mbras_employee: bool,
    pub candidate_awareness: bool,
    pub special_pattern: bool,
}

pub fn detect_flags(messages: &[&Message]) -> Flags {
    let contents = join_normalized(messages.iter().map(|message| message.content.as_str()));
    let user_ids = join_normalized(messages.iter().map(|message| message.user_id.as_str()));

    Flags {
        mbras_employee: user_ids.contains(EMPLOYEE_MARKER),
        candidate_awareness: contents.contains(&normalize_text(META_TRIGGER)),
        special_pattern: messages
            .iter()
            .any(|message| is_special_pattern(&message.content)),
    }
}

/// Exactly 42 raw characters whose normalized form mentions the marker.
pub fn is_special_pattern(content: &str) -> bool {
    content.chars().count() == SPECIAL_PATTERN_LEN
        && normalize_text(content).contains(EMPLOYEE_MARKER)
}

fn join_normalized<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    normalize_text(&parts.collect::<Vec<_>>().join(" "))
}
