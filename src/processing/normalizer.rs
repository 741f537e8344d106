//! Whitespace tokenization into a comparable lowercase form

use std::collections::HashSet;

/// Tokens of this many characters or fewer are discarded
const MIN_TOKEN_CHARS: usize = 2;

/// Lowercase, drop short tokens and rejoin with single spaces
pub fn normalize(text: &str) -> String {
    normalized_tokens(text).collect::<Vec<_>>().join(" ")
}

/// Normalized tokens in document order, duplicates kept
pub fn normalized_tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .map(str::to_lowercase)
        .filter(|token| token.chars().count() > MIN_TOKEN_CHARS)
}

pub fn token_set(text: &str) -> HashSet<String> {
    normalized_tokens(text).collect()
}
