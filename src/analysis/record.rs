// src/analysis/record.rs
use serde::Serialize;
use std::fmt;

/// Confidence below this is flagged for manual review.
pub const LOW_CONFIDENCE_THRESHOLD: u8 = 60;

pub const FAILED_CHAIN: &str = "Analysis failed.";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum AnalysisStatus {
    Analyzing,
    Analyzed,
    Failed,
}

impl AnalysisStatus {
    pub fn icon(&self) -> &'static str {
        match self {
            AnalysisStatus::Analyzing => "⏳",
            AnalysisStatus::Analyzed => "✅",
            AnalysisStatus::Failed => "❌",
        }
    }
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            AnalysisStatus::Analyzing => "Analyzing",
            AnalysisStatus::Analyzed => "Analyzed",
            AnalysisStatus::Failed => "Failed",
        };
        write!(f, "{}", label)
    }
}

/// Position of a record inside the submission that created it.
///
/// Records are only ever replaced wholesale, so a key stays valid until the
/// next submission. Duplicate ids get distinct keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTone {
    Normal,
    LowConfidence,
    Failed,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnalysisRecord {
    #[serde(skip)]
    pub key: RecordKey,
    pub id: String,
    pub status: AnalysisStatus,
    pub confidence: Option<u8>,
    pub chain: String,
    #[serde(rename = "spotCheck")]
    pub spot_check: bool,
}

impl AnalysisRecord {
    pub fn analyzing(key: RecordKey, id: impl Into<String>) -> Self {
        Self {
            key,
            id: id.into(),
            status: AnalysisStatus::Analyzing,
            confidence: None,
            chain: String::new(),
            spot_check: false,
        }
    }

    /// Put the record back into the Analyzing state, keeping id and spot-check.
    pub fn reset(&mut self) {
        self.status = AnalysisStatus::Analyzing;
        self.confidence = None;
        self.chain.clear();
    }

    pub fn mark_failed(&mut self) {
        self.status = AnalysisStatus::Failed;
        self.confidence = Some(0);
        self.chain = FAILED_CHAIN.to_string();
    }

    pub fn mark_analyzed(&mut self, confidence: u8) {
        self.status = AnalysisStatus::Analyzed;
        self.confidence = Some(confidence);
        self.chain = format!("Call chain for {}...", self.id);
    }

    /// True for any record carrying a confidence under the threshold.
    /// Failed records carry 0, so they count as low too.
    pub fn has_low_confidence(&self) -> bool {
        matches!(self.confidence, Some(c) if c < LOW_CONFIDENCE_THRESHOLD)
    }

    /// Low confidence on a record that actually finished analysis.
    pub fn needs_review(&self) -> bool {
        self.status != AnalysisStatus::Failed && self.has_low_confidence()
    }

    /// Confidence worth showing to the user; hidden for failed and pending records.
    pub fn display_confidence(&self) -> Option<u8> {
        match self.status {
            AnalysisStatus::Failed => None,
            _ => self.confidence,
        }
    }

    pub fn tone(&self) -> CardTone {
        if self.status == AnalysisStatus::Failed {
            CardTone::Failed
        } else if self.has_low_confidence() {
            CardTone::LowConfidence
        } else {
            CardTone::Normal
        }
    }

    pub fn spot_check_label(&self) -> &'static str {
        if self.spot_check { "Spot Checked" } else { "Spot Check" }
    }
}
