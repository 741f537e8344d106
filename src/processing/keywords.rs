//! Matched and missing vocabulary between a job description and a resume

use crate::processing::normalizer::{normalized_tokens, token_set};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordComparison {
    /// Reference tokens that also appear in the candidate
    pub strengths: Vec<String>,
    /// Reference tokens the candidate never mentions
    pub gaps: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordComparator {
    top_n: usize,
}

impl Default for KeywordComparator {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_N)
    }
}

impl KeywordComparator {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    /// Both lists are bounded by `top_n` and ordered by first occurrence in the reference.
    pub fn compare(&self, reference: &str, candidate: &str) -> KeywordComparison {
        let candidate_tokens = token_set(candidate);

        let mut strengths = Vec::new();
        let mut gaps = Vec::new();
        let mut seen = HashSet::new();

        for token in normalized_tokens(reference) {
            if strengths.len() >= self.top_n && gaps.len() >= self.top_n {
                break;
            }
            if !seen.insert(token.clone()) {
                continue;
            }

            let bucket = if candidate_tokens.contains(&token) {
                &mut strengths
            } else {
                &mut gaps
            };
            if bucket.len() < self.top_n {
                bucket.push(token);
            }
        }

        KeywordComparison { strengths, gaps }
    }
}
