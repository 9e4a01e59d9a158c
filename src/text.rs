use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Enclosed letters that Unicode marks alphabetic although their general
/// category is symbol.
const ENCLOSED_LETTERS: [(char, char); 4] = [
    ('\u{24B6}', '\u{24E9}'),
    ('\u{1F130}', '\u{1F149}'),
    ('\u{1F150}', '\u{1F169}'),
    ('\u{1F170}', '\u{1F189}'),
];

/// Folds text to lowercase ASCII: NFKD-decomposes, drops every non-ASCII
/// code point (combining marks included), then lowercases.
pub fn normalize_text(text: &str) -> String {
    text.nfkd()
        .filter(char::is_ascii)
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

/// Splits text into maximal runs of letter, number, `#` and `_` characters.
/// Everything else, combining marks included, is a separator and is never
/// emitted.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if is_token_char(ch) {
            current.push(ch);
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

fn is_token_char(ch: char) -> bool {
    is_letter_or_number(ch) || ch == '#' || ch == '_'
}

/// General category L* or N*. `char::is_alphanumeric` alone also admits
/// `Other_Alphabetic` marks and enclosed letters.
fn is_letter_or_number(ch: char) -> bool {
    if !ch.is_alphanumeric() || is_combining_mark(ch) {
        return false;
    }
    !ENCLOSED_LETTERS
        .iter()
        .any(|&(start, end)| (start..=end).contains(&ch))
}
