// src/state/mod.rs
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::warn;

use crate::analysis::{AnalysisRecord, OutcomeSource, RandomOutcomes, RecordKey};
use crate::config::Settings;
use crate::error::Result;
use crate::file::{ExportFormat, ExportManager};

pub mod filter;
pub mod result_set;
pub mod scheduler;

pub use filter::{BandSummary, CategoryFilter};
pub use result_set::ResultSet;

// Core application state
#[derive(Debug)]
pub struct AppState {
    // Input card
    pub input: String,

    // Results toolbar
    pub filter: CategoryFilter,
    pub search_term: String,

    // Analysis data
    pub results: ResultSet,
    pub outcomes: Box<dyn OutcomeSource>,

    pub exporter: ExportManager,
    pub error_message: Option<String>,
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let outcomes = Box::new(RandomOutcomes::new(settings.seed));
        Self::with_outcomes(settings, outcomes)
    }

    pub fn with_outcomes(settings: Settings, outcomes: Box<dyn OutcomeSource>) -> Self {
        Self {
            input: String::new(),
            filter: CategoryFilter::All,
            search_term: String::new(),
            exporter: ExportManager::new(settings.export_dir.clone()),
            results: ResultSet::new(settings),
            outcomes,
            error_message: None,
            status_message: None,
        }
    }

    pub fn can_analyze(&self) -> bool {
        !self.results.is_in_flight() && !self.input.trim().is_empty()
    }

    pub fn can_clear(&self) -> bool {
        !self.input.trim().is_empty()
    }

    pub fn analyze(&mut self, now: Instant) {
        if !self.can_analyze() {
            return;
        }
        self.status_message = None;
        self.results.submit(&self.input, now);
    }

    /// Empties the input box. Existing results stay.
    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    pub fn retry(&mut self, key: RecordKey, now: Instant) {
        if !self.results.retry_key(key, now) {
            warn!(key = key.0, "Retry requested for unknown record");
        }
    }

    pub fn toggle_spot_check(&mut self, key: RecordKey) {
        if !self.results.toggle_spot_check_key(key) {
            warn!(key = key.0, "Spot check requested for unknown record");
        }
    }

    /// Pump deferred resolutions. Returns when the next one is due.
    pub fn tick(&mut self, now: Instant) -> Option<Instant> {
        self.results.tick(now, self.outcomes.as_mut());
        self.results.next_due()
    }

    pub fn visible_records(&self) -> Vec<&AnalysisRecord> {
        self.results.view(self.filter, &self.search_term)
    }

    pub fn summary(&self) -> BandSummary {
        filter::summarize(self.results.records())
    }

    pub fn export_contents(&self, format: ExportFormat) -> Result<String> {
        self.results.export(format, self.filter)
    }

    pub fn export_to(&mut self, format: ExportFormat, path: &Path) -> Result<PathBuf> {
        let contents = self.export_contents(format)?;
        let written = self.exporter.write(path, &contents)?;
        self.status_message = Some(format!("Exported to {}", written.display()));
        Ok(written)
    }

    /// Export to the configured directory without asking for a location.
    pub fn export_default(&mut self, format: ExportFormat) -> Result<PathBuf> {
        let path = self.exporter.default_path(format);
        self.export_to(format, &path)
    }
}
