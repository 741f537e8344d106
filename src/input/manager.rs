//! Input manager for loading job descriptions and candidate documents

use crate::error::{Result, ScreenerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::extract_text;
use crate::processing::screening::CandidateDocument;
use log::info;
use std::path::Path;
use tokio::fs;

#[derive(Debug, Default)]
pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    /// Read a resume file into a candidate named after the file
    pub async fn load_candidate(&self, path: &Path) -> Result<CandidateDocument> {
        self.ensure_supported(path)?;

        let bytes = fs::read(path).await?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        info!("Loaded candidate {} ({} bytes)", name, bytes.len());
        Ok(CandidateDocument::new(name, bytes))
    }

    /// Read and extract the job description text
    pub async fn read_job_description(&self, path: &Path) -> Result<String> {
        let file_type = self.ensure_supported(path)?;

        info!("Reading job description: {}", path.display());
        let bytes = fs::read(path).await?;
        Ok(extract_text(file_type, &bytes))
    }

    fn ensure_supported(&self, path: &Path) -> Result<FileType> {
        if !path.exists() {
            return Err(ScreenerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        match FileType::from_name(&path.to_string_lossy()) {
            FileType::Unknown => Err(ScreenerError::UnsupportedFormat(format!(
                "Unsupported file type for: {}",
                path.display()
            ))),
            file_type => Ok(file_type),
        }
    }
}
