//! Text normalization, scoring, and screening

pub mod normalizer;
pub mod similarity;
pub mod keywords;
pub mod screening;
