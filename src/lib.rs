//! Resume screener library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use error::{Result, ScreenerError};
pub use config::Config;
pub use processing::screening::{CandidateDocument, ScreeningOrchestrator, ScreeningResult};
