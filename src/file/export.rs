// src/file/export.rs
use std::fmt::Write as _;

use crate::analysis::AnalysisRecord;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Txt,
}

impl ExportFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Json => "silver_results.json",
            ExportFormat::Txt => "silver_results.txt",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Txt => "txt",
        }
    }

    /// Label for the save dialog's file type filter.
    pub fn filter_name(&self) -> &'static str {
        match self {
            ExportFormat::Json => "JSON files",
            ExportFormat::Txt => "Text files",
        }
    }
}

pub fn render(records: &[&AnalysisRecord], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => render_json(records),
        ExportFormat::Txt => Ok(render_txt(records)),
    }
}

/// Pretty-printed array, two-space indent.
pub fn render_json(records: &[&AnalysisRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// One block per record:
///
/// ```text
/// <id>\t<status>\tConfidence: <n or ->
/// <chain>
/// ---
/// ```
pub fn render_txt(records: &[&AnalysisRecord]) -> String {
    let mut out = String::new();
    for record in records {
        let confidence = record.confidence
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        // Writing into a String cannot fail
        let _ = write!(
            out,
            "{}\t{}\tConfidence: {}\n{}\n---\n",
            record.id, record.status, confidence, record.chain
        );
    }
    out
}
