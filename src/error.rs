// src/error.rs
//! Error types shared across the library.
//!
//! A failed simulated analysis is not an error: it is recorded on the record
//! itself as `AnalysisStatus::Failed`. The variants here cover the ambient
//! surfaces (configuration and export).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SilverError {
    /// Results could not be rendered as JSON
    #[error("Failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
    /// Export file could not be written
    #[error("Failed to write export file {}: {source}", path.display())]
    ExportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Configuration sources could not be read or merged
    #[error("Failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),
    /// Configuration loaded but holds an unusable value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SilverError>;
