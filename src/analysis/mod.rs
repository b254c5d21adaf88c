// src/analysis/mod.rs
pub mod record;
pub mod simulator;

// Re-export commonly used types
pub use record::{
    AnalysisRecord,
    AnalysisStatus,
    CardTone,
    RecordKey,
    LOW_CONFIDENCE_THRESHOLD,
};
pub use simulator::{
    ConfidenceBand,
    OutcomeSource,
    RandomOutcomes,
    ScriptedOutcomes,
    draw_confidence,
    resolve_record,
};
