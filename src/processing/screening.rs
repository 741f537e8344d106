//! Batch screening of resumes against a job description

use crate::error::{Result, ScreenerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::extract_text;
use crate::processing::keywords::KeywordComparator;
use crate::processing::similarity::VectorSimilarityScorer;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// A named resume upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateDocument {
    name: String,
    bytes: Vec<u8>,
}

impl CandidateDocument {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn file_type(&self) -> FileType {
        FileType::from_name(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningResult {
    pub file_name: String,
    pub score: f64,
    pub summary: String,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
}

impl ScreeningResult {
    /// Score rounded to one decimal place
    pub fn display_score(&self) -> f64 {
        (self.score * 10.0).round() / 10.0
    }
}

/// Reject the inputs the pipeline itself never checks
pub fn validate_inputs(reference: &str, candidates: &[CandidateDocument]) -> Result<()> {
    if reference.trim().is_empty() {
        return Err(ScreenerError::InvalidInput(
            "Job description is empty".to_string(),
        ));
    }
    if candidates.is_empty() {
        return Err(ScreenerError::InvalidInput(
            "At least one resume is required".to_string(),
        ));
    }
    Ok(())
}

type ScreenFn = fn(&ScreeningOrchestrator, &str, &CandidateDocument) -> ScreeningResult;

#[derive(Debug, Clone, Default)]
pub struct ScreeningOrchestrator {
    scorer: VectorSimilarityScorer,
    comparator: KeywordComparator,
}

impl ScreeningOrchestrator {
    pub fn new(top_n: usize) -> Self {
        Self {
            scorer: VectorSimilarityScorer::new(),
            comparator: KeywordComparator::new(top_n),
        }
    }

    /// Screen every candidate in order and rank by score, ties kept in input order
    pub fn run(&self, reference: &str, candidates: &[CandidateDocument]) -> Vec<ScreeningResult> {
        info!("Screening {} candidates sequentially", candidates.len());

        let mut results: Vec<ScreeningResult> = candidates
            .iter()
            .map(|candidate| self.screen(reference, candidate))
            .collect();

        // sort_by is stable
        results.sort_by(|a, b| by_score_descending(a, b));
        results
    }

    /// Same ranking as [`run`](Self::run), with up to `max_concurrency` candidates in flight
    pub async fn run_concurrent(
        &self,
        reference: &str,
        candidates: Vec<CandidateDocument>,
        max_concurrency: usize,
    ) -> Result<Vec<ScreeningResult>> {
        self.run_with(reference, candidates, max_concurrency, Self::screen)
            .await
    }

    async fn run_with(
        &self,
        reference: &str,
        candidates: Vec<CandidateDocument>,
        max_concurrency: usize,
        worker: ScreenFn,
    ) -> Result<Vec<ScreeningResult>> {
        let max_concurrency = max_concurrency.max(1);
        info!(
            "Screening {} candidates with up to {} workers",
            candidates.len(),
            max_concurrency
        );

        let semaphore = Arc::new(Semaphore::new(max_concurrency));
        let reference: Arc<str> = Arc::from(reference);
        let names: Vec<String> = candidates.iter().map(|c| c.name.clone()).collect();
        let mut tasks = JoinSet::new();

        for (index, candidate) in candidates.into_iter().enumerate() {
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| ScreenerError::Processing(format!("Worker pool closed: {}", e)))?;
            let orchestrator = self.clone();
            let reference = Arc::clone(&reference);

            tasks.spawn_blocking(move || {
                let _permit = permit;
                (index, worker(&orchestrator, &reference, &candidate))
            });
        }

        let mut indexed: Vec<Option<ScreeningResult>> = vec![None; names.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => indexed[index] = Some(result),
                Err(e) if e.is_panic() => warn!("Screening worker panicked: {}", e),
                Err(e) => return Err(e.into()),
            }
        }

        let mut results: Vec<(usize, ScreeningResult)> = indexed
            .into_iter()
            .enumerate()
            .map(|(index, result)| {
                let result = result.unwrap_or_else(|| self.assemble(&reference, &names[index], ""));
                (index, result)
            })
            .collect();

        results.sort_by(|(ia, a), (ib, b)| by_score_descending(a, b).then(ia.cmp(ib)));
        Ok(results.into_iter().map(|(_, result)| result).collect())
    }

    fn screen(&self, reference: &str, candidate: &CandidateDocument) -> ScreeningResult {
        let text = extract_text(candidate.file_type(), candidate.bytes());
        if text.is_empty() {
            warn!("No text extracted from {}", candidate.name);
        }
        self.assemble(reference, &candidate.name, &text)
    }

    fn assemble(&self, reference: &str, file_name: &str, text: &str) -> ScreeningResult {
        let score = self.scorer.score(reference, text);
        let keywords = self.comparator.compare(reference, text);
        debug!("{} scored {:.3}", file_name, score);

        ScreeningResult {
            file_name: file_name.to_string(),
            score,
            summary: format!("Resume matches job description with a score of {:.1}.", score),
            strengths: keywords.strengths,
            gaps: keywords.gaps,
        }
    }
}

fn by_score_descending(a: &ScreeningResult, b: &ScreeningResult) -> Ordering {
    b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
}
