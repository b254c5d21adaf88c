// src/state/filter.rs
//! Read-only projections over the record set: input tokenizing, category and
//! search filtering, and the per-band summary used by the chart.

use crate::analysis::{AnalysisRecord, AnalysisStatus, ConfidenceBand};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Failed,
    Low,
    Spot,
}

impl CategoryFilter {
    pub const ALL: [CategoryFilter; 4] = [
        CategoryFilter::All,
        CategoryFilter::Failed,
        CategoryFilter::Low,
        CategoryFilter::Spot,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Failed => "Failed",
            CategoryFilter::Low => "Low Confidence",
            CategoryFilter::Spot => "Spot Check",
        }
    }

    pub fn matches(&self, record: &AnalysisRecord) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Failed => record.status == AnalysisStatus::Failed,
            // Failed records carry confidence 0 and show up here as well
            CategoryFilter::Low => record.has_low_confidence(),
            CategoryFilter::Spot => record.spot_check,
        }
    }
}

/// Split raw input on whitespace, commas and semicolons, dropping empties.
pub fn tokenize(raw: &str) -> Vec<&str> {
    raw.split(|c: char| c.is_whitespace() || c == ',' || c == ';' || c == '\u{FEFF}')
        .filter(|token| !token.is_empty())
        .collect()
}

/// Case-insensitive substring match on id or chain. An empty term matches.
pub fn matches_search(record: &AnalysisRecord, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    record.id.to_lowercase().contains(&needle) || record.chain.to_lowercase().contains(&needle)
}

pub fn filter_by_category(records: &[AnalysisRecord], filter: CategoryFilter) -> Vec<&AnalysisRecord> {
    records.iter()
        .filter(|record| filter.matches(record))
        .collect()
}

/// Category filter, then search filter. Record order is preserved.
pub fn derive_view<'a>(
    records: &'a [AnalysisRecord],
    filter: CategoryFilter,
    search_term: &str,
) -> Vec<&'a AnalysisRecord> {
    records.iter()
        .filter(|record| filter.matches(record))
        .filter(|record| matches_search(record, search_term))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BandSummary {
    pub pending: usize,
    pub failed: usize,
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl BandSummary {
    pub fn total(&self) -> usize {
        self.pending + self.failed + self.low + self.medium + self.high
    }
}

pub fn summarize<'a>(records: impl IntoIterator<Item = &'a AnalysisRecord>) -> BandSummary {
    let mut summary = BandSummary::default();
    for record in records {
        match (record.status, record.confidence) {
            (AnalysisStatus::Analyzing, _) => summary.pending += 1,
            (AnalysisStatus::Failed, _) => summary.failed += 1,
            (AnalysisStatus::Analyzed, Some(c)) => match ConfidenceBand::of(c) {
                ConfidenceBand::Low => summary.low += 1,
                ConfidenceBand::Medium => summary.medium += 1,
                ConfidenceBand::High => summary.high += 1,
            },
            (AnalysisStatus::Analyzed, None) => summary.pending += 1,
        }
    }
    summary
}
