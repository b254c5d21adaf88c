// src/ui/mod.rs
pub mod header;
pub mod input;
pub mod results;
pub mod theme;

use crate::analysis::RecordKey;
use crate::file::ExportFormat;

/// User intents collected while drawing a frame and applied afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Analyze,
    ClearInput,
    Retry(RecordKey),
    ToggleSpotCheck(RecordKey),
    Export(ExportFormat),
}
