//! TF-IDF cosine similarity between a job description and a resume
//!
//! Every call fits a fresh two-document vector space, so a candidate's score
//! depends only on the reference text and its own text.

use log::debug;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Number of documents in each pairwise corpus
const CORPUS_SIZE: f64 = 2.0;

#[derive(Debug, Clone)]
pub struct VectorSimilarityScorer {
    token_regex: Regex,
    stop_words: HashSet<&'static str>,
}

impl Default for VectorSimilarityScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorSimilarityScorer {
    pub fn new() -> Self {
        let token_regex = Regex::new(r"\b\w\w+\b").expect("Invalid token regex");

        Self {
            token_regex,
            stop_words: STOP_WORDS.iter().copied().collect(),
        }
    }

    /// Relevance of `candidate` to `reference` as a percentage in [0, 100]
    pub fn score(&self, reference: &str, candidate: &str) -> f64 {
        let reference_counts = self.term_counts(reference);
        let candidate_counts = self.term_counts(candidate);

        if reference_counts.is_empty() || candidate_counts.is_empty() {
            debug!("Empty vocabulary after stop-word removal, similarity is 0");
            return 0.0;
        }

        let reference_vector = self.weigh(&reference_counts, &candidate_counts);
        let candidate_vector = self.weigh(&candidate_counts, &reference_counts);

        let similarity = cosine_similarity(&reference_vector, &candidate_vector);
        (similarity * 100.0).clamp(0.0, 100.0)
    }

    /// Lowercased term counts with stop words removed
    fn term_counts(&self, text: &str) -> HashMap<String, usize> {
        let lowered = text.to_lowercase();
        let mut counts = HashMap::new();

        for token in self.token_regex.find_iter(&lowered) {
            let term = token.as_str();
            if !self.stop_words.contains(term) {
                *counts.entry(term.to_string()).or_insert(0) += 1;
            }
        }

        counts
    }

    /// Raw term frequency times smoothed idf over the pair
    fn weigh(
        &self,
        counts: &HashMap<String, usize>,
        other: &HashMap<String, usize>,
    ) -> HashMap<String, f64> {
        counts
            .iter()
            .map(|(term, &count)| {
                let document_frequency = if other.contains_key(term) { 2.0 } else { 1.0 };
                let idf = ((1.0 + CORPUS_SIZE) / (1.0 + document_frequency)).ln() + 1.0;
                (term.clone(), count as f64 * idf)
            })
            .collect()
    }
}

/// Cosine of two sparse vectors; zero when either has no magnitude
fn cosine_similarity(a: &HashMap<String, f64>, b: &HashMap<String, f64>) -> f64 {
    let dot_product: f64 = a
        .iter()
        .filter_map(|(term, weight)| b.get(term).map(|other| weight * other))
        .sum();
    let norm_a = a.values().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.values().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}

/// Common English words excluded from the vocabulary
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
    "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
    "amongst", "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone",
    "anything", "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became",
    "because", "become", "becomes", "becoming", "been", "before", "beforehand", "behind",
    "being", "below", "beside", "besides", "between", "beyond", "bill", "both", "bottom",
    "but", "by", "call", "can", "cannot", "cant", "co", "con", "could", "couldnt", "cry",
    "de", "describe", "detail", "do", "done", "down", "due", "during", "each", "eg", "eight",
    "either", "eleven", "else", "elsewhere", "empty", "enough", "etc", "even", "ever",
    "every", "everyone", "everything", "everywhere", "except", "few", "fifteen", "fifty",
    "fill", "find", "fire", "first", "five", "for", "former", "formerly", "forty", "found",
    "four", "from", "front", "full", "further", "get", "give", "go", "had", "has", "hasnt",
    "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein", "hereupon",
    "hers", "herself", "him", "himself", "his", "how", "however", "hundred", "i", "ie", "if",
    "in", "inc", "indeed", "interest", "into", "is", "it", "its", "itself", "keep", "last",
    "latter", "latterly", "least", "less", "ltd", "made", "many", "may", "me", "meanwhile",
    "might", "mill", "mine", "more", "moreover", "most", "mostly", "move", "much", "must",
    "my", "myself", "name", "namely", "neither", "never", "nevertheless", "next", "nine",
    "no", "nobody", "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of", "off",
    "often", "on", "once", "one", "only", "onto", "or", "other", "others", "otherwise",
    "our", "ours", "ourselves", "out", "over", "own", "part", "per", "perhaps", "please",
    "put", "rather", "re", "same", "see", "seem", "seemed", "seeming", "seems", "serious",
    "several", "she", "should", "show", "side", "since", "sincere", "six", "sixty", "so",
    "some", "somehow", "someone", "something", "sometime", "sometimes", "somewhere",
    "still", "such", "system", "take", "ten", "than", "that", "the", "their", "them",
    "themselves", "then", "thence", "there", "thereafter", "thereby", "therefore",
    "therein", "thereupon", "these", "they", "thick", "thin", "third", "this", "those",
    "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
    "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up",
    "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
    "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein",
    "whereupon", "wherever", "whether", "which", "while", "whither", "who", "whoever",
    "whole", "whom", "whose", "why", "will", "with", "within", "without", "would", "yet",
    "you", "your", "yours", "yourself", "yourselves",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_similarity_is_full() {
        let scorer = VectorSimilarityScorer::new();
        let text = "Senior Python Engineer with AWS experience";

        let score = scorer.score(text, text);
        assert!((score - 100.0).abs() < 1e-6, "score was {}", score);
    }

    #[test]
    fn test_disjoint_vocabulary_scores_zero() {
        let scorer = VectorSimilarityScorer::new();
        let score = scorer.score(
            "Java Spring Developer",
            "Totally unrelated cooking recipe content",
        );
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_empty_vocabulary_scores_zero() {
        let scorer = VectorSimilarityScorer::new();
        assert_eq!(scorer.score("Rust engineer", ""), 0.0);
        assert_eq!(scorer.score("the and of", "the and of"), 0.0);
        assert_eq!(scorer.score("", "Rust engineer"), 0.0);
    }

    #[test]
    fn test_partial_overlap_is_between_bounds() {
        let scorer = VectorSimilarityScorer::new();
        let score = scorer.score(
            "Rust engineer with Kubernetes and Terraform",
            "Python engineer who knows Kubernetes",
        );
        assert!(score > 0.0 && score < 100.0, "score was {}", score);
    }

    #[test]
    fn test_more_overlap_scores_higher() {
        let scorer = VectorSimilarityScorer::new();
        let reference = "Backend engineer: Rust, PostgreSQL, Kafka, Kubernetes";

        let strong = scorer.score(reference, "Rust backend engineer running Kafka on Kubernetes");
        let weak = scorer.score(reference, "Frontend designer using Figma and some Rust");
        assert!(strong > weak);
    }

    #[test]
    fn test_case_and_stop_words_are_ignored() {
        let scorer = VectorSimilarityScorer::new();
        let score = scorer.score("RUST and the TOKIO", "rust tokio");
        assert!((score - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_single_character_tokens_are_not_terms() {
        let scorer = VectorSimilarityScorer::new();
        assert_eq!(scorer.score("C R", "C R"), 0.0);
    }

    #[test]
    fn test_score_is_symmetric() {
        let scorer = VectorSimilarityScorer::new();
        let a = "distributed systems engineer, Rust and Go";
        let b = "Go developer building distributed caches";
        assert!((scorer.score(a, b) - scorer.score(b, a)).abs() < 1e-9);
    }
}
