use serde::{Deserialize, Serialize};

use crate::text::{normalize_text, tokenize};

pub const POSITIVE_WORDS: [&str; 9] = [
    "adorei", "gostei", "bom", "otimo", "otima", "excelente", "perfeito", "produto", "servico",
];
pub const NEGATIVE_WORDS: [&str; 5] = ["ruim", "terrivel", "pessimo", "pessima", "horrivel"];
pub const INTENSIFIERS: [&str; 2] = ["muito", "super"];
pub const NEGATIONS: [&str; 1] = ["nao"];

/// Content equal to this phrase (after normalization) is a meta message.
pub const META_TRIGGER: &str = "teste tecnico mbras";
/// Author ids containing this marker get positive hits doubled.
pub const EMPLOYEE_MARKER: &str = "mbras";

const INTENSIFIER_MULTIPLIER: f64 = 1.5;
const EMPLOYEE_MULTIPLIER: f64 = 2.0;
const NEGATION_LOOKBACK: usize = 3;
const LABEL_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    Meta,
}

impl SentimentLabel {
    pub fn from_score(score: f64) -> Self {
        if score > LABEL_THRESHOLD {
            SentimentLabel::Positive
        } else if score < -LABEL_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentResult {
    pub score: f64,
    pub label: SentimentLabel,
}

impl SentimentResult {
    pub fn neutral() -> Self {
        Self {
            score: 0.0,
            label: SentimentLabel::Neutral,
        }
    }

    pub fn meta() -> Self {
        Self {
            score: 0.0,
            label: SentimentLabel::Meta,
        }
    }
}

/// Scores one message against the fixed lexicon.
///
/// Each positive or negative token is a hit worth +1.0 or -1.0. A hit is
/// multiplied by 1.5 when the token right before it is an intensifier,
/// flipped when an odd number of negations sit in the three tokens before
/// it, and doubled (if still positive) when the author id carries the
/// employee marker. The score is the plain mean over all hits.
pub fn score_message(content: &str, user_id: &str) -> SentimentResult {
    let tokens = tokenize(content);
    if tokens.is_empty() {
        return SentimentResult::neutral();
    }

    if normalize_text(content) == normalize_text(META_TRIGGER) {
        return SentimentResult::meta();
    }

    let tokens: Vec<String> = tokens.iter().map(|token| normalize_text(token)).collect();
    let hits: Vec<(usize, f64)> = tokens
        .iter()
        .enumerate()
        .filter_map(|(index, token)| lexicon_value(token).map(|value| (index, value)))
        .collect();

    // Covers intensifier-only content too.
    if hits.is_empty() {
        return SentimentResult::neutral();
    }

    let employee = normalize_text(user_id).contains(EMPLOYEE_MARKER);
    let total: f64 = hits
        .iter()
        .map(|&(index, base)| apply_modifiers(&tokens, index, base, employee))
        .sum();
    let score = total / hits.len() as f64;

    SentimentResult {
        score,
        label: SentimentLabel::from_score(score),
    }
}

fn lexicon_value(token: &str) -> Option<f64> {
    if POSITIVE_WORDS.contains(&token) {
        Some(1.0)
    } else if NEGATIVE_WORDS.contains(&token) {
        Some(-1.0)
    } else {
        None
    }
}

fn apply_modifiers(tokens: &[String], index: usize, base: f64, employee: bool) -> f64 {
    let mut value = base;

    if index > 0 && is_intensifier(&tokens[index - 1]) {
        value *= INTENSIFIER_MULTIPLIER;
    }

    let start = index.saturating_sub(NEGATION_LOOKBACK);
    let negations = tokens[start..index]
        .iter()
        .filter(|token| is_negation(token))
        .count();
    if negations % 2 == 1 {
        value = -value;
    }

    if employee && value > 0.0 {
        value *= EMPLOYEE_MULTIPLIER;
    }

    value
}

pub fn is_intensifier(token: &str) -> bool {
    INTENSIFIERS.contains(&token)
}

pub fn is_negation(token: &str) -> bool {
    NEGATIONS.contains(&token)
}
