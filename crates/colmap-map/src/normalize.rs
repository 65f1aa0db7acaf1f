//! Canonical comparison keys for field identifiers and column labels.

use crate::synonyms::apply_synonyms;

/// Comparison form of a label. The original text is kept by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedLabel {
    /// Tokens joined without separators (`First Name` -> `firstname`).
    pub key: String,
    /// Lowercase tokens after synonym rewriting.
    pub tokens: Vec<String>,
}

impl NormalizedLabel {
    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }
}

/// Normalizes a label into its comparison key.
///
/// Splits on non-alphanumeric characters and lower-to-upper camelCase
/// boundaries, lowercases, then optionally rewrites synonyms.
pub fn normalize_label(raw: &str, use_synonyms: bool) -> NormalizedLabel {
    let tokens = split_tokens(raw);
    let tokens = if use_synonyms {
        apply_synonyms(&tokens)
    } else {
        tokens
    };
    NormalizedLabel {
        key: tokens.concat(),
        tokens,
    }
}

fn split_tokens(raw: &str) -> Vec<String> {
    let mut spaced = String::with_capacity(raw.len());
    let mut prev_lower = false;
    for ch in raw.chars() {
        if ch.is_alphanumeric() {
            if prev_lower && ch.is_uppercase() {
                spaced.push(' ');
            }
            spaced.push(ch);
            prev_lower = ch.is_lowercase();
        } else {
            spaced.push(' ');
            prev_lower = false;
        }
    }
    spaced.split_whitespace().map(str::to_lowercase).collect()
}
