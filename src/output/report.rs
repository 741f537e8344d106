//! Report structures for a screening run

use crate::processing::screening::ScreeningResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ranked results of one screening run plus run metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub results: Vec<RankedCandidate>,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCandidate {
    /// 1-based position in the ranking
    pub rank: usize,

    #[serde(flatten)]
    pub result: ScreeningResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// When the report was generated
    pub generated_at: DateTime<Utc>,

    /// Version of the screener used
    pub screener_version: String,

    /// Job description source (file path or "inline")
    pub job_source: String,

    pub candidates_screened: usize,

    /// Maximum strengths and gaps listed per candidate
    pub top_n: usize,

    pub processing_time_ms: u64,
}

impl ScreeningReport {
    pub fn new(
        results: Vec<ScreeningResult>,
        job_source: impl Into<String>,
        top_n: usize,
        processing_time_ms: u64,
    ) -> Self {
        let candidates_screened = results.len();
        let results = results
            .into_iter()
            .enumerate()
            .map(|(i, result)| RankedCandidate { rank: i + 1, result })
            .collect();

        Self {
            results,
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                screener_version: env!("CARGO_PKG_VERSION").to_string(),
                job_source: job_source.into(),
                candidates_screened,
                top_n,
                processing_time_ms,
            },
        }
    }

    pub fn top_candidate(&self) -> Option<&RankedCandidate> {
        self.results.first()
    }
}
