// src/state/result_set.rs
use chrono::{DateTime, Local};
use std::time::Instant;
use tracing::{debug, info};

use crate::analysis::{resolve_record, AnalysisRecord, AnalysisStatus, OutcomeSource, RecordKey};
use crate::config::Settings;
use crate::error::Result;
use crate::file::export::{render, ExportFormat};
use crate::state::filter::{self, CategoryFilter};
use crate::state::scheduler::DeferredQueue;

/// Deferred work waiting on the simulated analysis delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Batch { generation: u64 },
    Single { generation: u64, key: RecordKey },
}

impl Resolution {
    fn generation(&self) -> u64 {
        match self {
            Resolution::Batch { generation } | Resolution::Single { generation, .. } => *generation,
        }
    }
}

/// Owns the ordered analysis records and every transition applied to them.
#[derive(Debug)]
pub struct ResultSet {
    records: Vec<AnalysisRecord>,
    in_flight: bool,
    generation: u64,
    pending: DeferredQueue<Resolution>,
    settings: Settings,
    last_submitted: Option<DateTime<Local>>,
}

impl ResultSet {
    pub fn new(settings: Settings) -> Self {
        Self {
            records: Vec::new(),
            in_flight: false,
            generation: 0,
            pending: DeferredQueue::new(),
            settings,
            last_submitted: None,
        }
    }

    pub fn records(&self) -> &[AnalysisRecord] {
        &self.records
    }

    pub fn get(&self, key: RecordKey) -> Option<&AnalysisRecord> {
        self.records.get(key.0)
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn last_submitted(&self) -> Option<DateTime<Local>> {
        self.last_submitted
    }

    pub fn pending_resolutions(&self) -> usize {
        self.pending.len()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.pending.next_due()
    }

    /// First record carrying `id`.
    pub fn find(&self, id: &str) -> Option<RecordKey> {
        self.records.iter().find(|r| r.id == id).map(|r| r.key)
    }

    /// Replace every record with a fresh Analyzing record per token and
    /// schedule the batch resolution. Returns the number of records created.
    pub fn submit(&mut self, raw: &str, now: Instant) -> usize {
        self.generation += 1;
        self.records = filter::tokenize(raw)
            .into_iter()
            .enumerate()
            .map(|(index, id)| AnalysisRecord::analyzing(RecordKey(index), id))
            .collect();
        self.in_flight = true;
        self.last_submitted = Some(Local::now());

        self.pending.schedule(
            now + self.settings.analyze_delay(),
            Resolution::Batch { generation: self.generation },
        );

        info!(count = self.records.len(), generation = self.generation, "Submitted batch for analysis");
        self.records.len()
    }

    /// Retry the first record with `id`. Returns false when no record matches.
    pub fn retry(&mut self, id: &str, now: Instant) -> bool {
        match self.find(id) {
            Some(key) => self.retry_key(key, now),
            None => false,
        }
    }

    pub fn retry_key(&mut self, key: RecordKey, now: Instant) -> bool {
        let Some(record) = self.records.get_mut(key.0) else {
            return false;
        };
        record.reset();

        self.pending.schedule(
            now + self.settings.retry_delay(),
            Resolution::Single { generation: self.generation, key },
        );

        debug!(id = %record.id, key = key.0, "Retrying record");
        true
    }

    pub fn toggle_spot_check(&mut self, id: &str) -> bool {
        match self.find(id) {
            Some(key) => self.toggle_spot_check_key(key),
            None => false,
        }
    }

    pub fn toggle_spot_check_key(&mut self, key: RecordKey) -> bool {
        match self.records.get_mut(key.0) {
            Some(record) => {
                record.spot_check = !record.spot_check;
                true
            }
            None => false,
        }
    }

    /// Run every resolution due at `now`. Returns how many ran.
    pub fn tick(&mut self, now: Instant, outcomes: &mut dyn OutcomeSource) -> usize {
        let mut applied = 0;
        for resolution in self.pending.drain_due(now) {
            if self.settings.discard_stale_resolutions && resolution.generation() != self.generation {
                debug!(?resolution, current = self.generation, "Dropping stale resolution");
                continue;
            }
            self.apply(resolution, outcomes);
            applied += 1;
        }
        applied
    }

    fn apply(&mut self, resolution: Resolution, outcomes: &mut dyn OutcomeSource) {
        let failure_rate = self.settings.failure_rate;
        match resolution {
            Resolution::Batch { .. } => {
                for record in &mut self.records {
                    resolve_record(record, failure_rate, outcomes);
                }
                self.in_flight = false;

                let failed = self.records.iter()
                    .filter(|r| r.status == AnalysisStatus::Failed)
                    .count();
                debug!(count = self.records.len(), failed, "Batch resolved");
            }
            Resolution::Single { key, .. } => {
                if let Some(record) = self.records.get_mut(key.0) {
                    resolve_record(record, failure_rate, outcomes);
                    debug!(id = %record.id, status = %record.status, "Retry resolved");
                }
            }
        }
    }

    pub fn view(&self, filter: CategoryFilter, search_term: &str) -> Vec<&AnalysisRecord> {
        filter::derive_view(&self.records, filter, search_term)
    }

    /// Serialize the category-filtered records. The search term does not apply.
    pub fn export(&self, format: ExportFormat, filter: CategoryFilter) -> Result<String> {
        render(&filter::filter_by_category(&self.records, filter), format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{ScriptedOutcomes, RandomOutcomes};
    use std::time::Duration;

    fn result_set() -> ResultSet {
        ResultSet::new(Settings::default())
    }

    fn after_batch(start: Instant) -> Instant {
        start + Duration::from_millis(1500)
    }

    #[test]
    fn test_submit_tokenizes_into_analyzing_records() {
        let mut set = result_set();
        let now = Instant::now();
        assert_eq!(set.submit("A, B;C", now), 3);

        let ids: Vec<&str> = set.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        assert!(set.records().iter().all(|r| r.status == AnalysisStatus::Analyzing && r.confidence.is_none()));
        assert!(set.is_in_flight());
        assert!(set.last_submitted().is_some());
        assert_eq!(set.next_due(), Some(after_batch(now)));
    }

    #[test]
    fn test_batch_waits_for_delay_then_resolves_together() {
        let mut set = result_set();
        let mut outcomes = ScriptedOutcomes::analyzed(85);
        let now = Instant::now();
        set.submit("RUSTSEC-2022-0001 RUSTSEC-2023-0010", now);

        assert_eq!(set.tick(now + Duration::from_millis(1499), &mut outcomes), 0);
        assert!(set.records().iter().all(|r| r.status == AnalysisStatus::Analyzing));

        assert_eq!(set.tick(after_batch(now), &mut outcomes), 1);
        assert!(!set.is_in_flight());
        for record in set.records() {
            assert_eq!(record.status, AnalysisStatus::Analyzed);
            assert_eq!(record.confidence, Some(85));
            assert_eq!(record.chain, format!("Call chain for {}...", record.id));
        }
    }

    #[test]
    fn test_resolved_records_respect_confidence_invariant() {
        let mut set = result_set();
        let mut outcomes = RandomOutcomes::new(Some(2024));
        let now = Instant::now();
        let input: Vec<String> = (0..300).map(|i| format!("RUSTSEC-2024-{:04}", i)).collect();
        set.submit(&input.join(","), now);
        set.tick(after_batch(now), &mut outcomes);

        for record in set.records() {
            match record.status {
                AnalysisStatus::Failed => assert_eq!(record.confidence, Some(0)),
                AnalysisStatus::Analyzed => {
                    assert!(matches!(record.confidence, Some(c) if (40..=99).contains(&c)))
                }
                AnalysisStatus::Analyzing => panic!("{} still analyzing", record.id),
            }
        }
    }

    #[test]
    fn test_retry_only_touches_target() {
        let mut set = result_set();
        let now = Instant::now();
        set.submit("A B C", now);
        set.tick(after_batch(now), &mut ScriptedOutcomes::failing());

        let before = set.records().to_vec();
        let retry_at = after_batch(now);
        assert!(set.retry("B", retry_at));

        let b = set.get(RecordKey(1)).unwrap();
        assert_eq!(b.status, AnalysisStatus::Analyzing);
        assert_eq!(b.confidence, None);
        assert!(b.chain.is_empty());
        assert_eq!(set.records()[0], before[0]);
        assert_eq!(set.records()[2], before[2]);

        set.tick(retry_at + Duration::from_millis(1200), &mut ScriptedOutcomes::analyzed(72));
        assert_eq!(set.records()[1].status, AnalysisStatus::Analyzed);
        assert_eq!(set.records()[1].confidence, Some(72));
        assert_eq!(set.records()[0], before[0]);
        assert_eq!(set.records()[2], before[2]);
    }

    #[test]
    fn test_retry_unknown_id_is_noop() {
        let mut set = result_set();
        set.submit("A", Instant::now());
        assert!(!set.retry("Z", Instant::now()));
        assert!(!set.retry_key(RecordKey(9), Instant::now()));
        assert_eq!(set.pending_resolutions(), 1);
    }

    #[test]
    fn test_duplicate_ids_resolve_to_first_match() {
        let mut set = result_set();
        set.submit("X X", Instant::now());
        assert!(set.toggle_spot_check("X"));
        assert!(set.records()[0].spot_check);
        assert!(!set.records()[1].spot_check);

        assert!(set.toggle_spot_check_key(RecordKey(1)));
        assert!(set.records()[1].spot_check);
    }

    #[test]
    fn test_spot_check_toggle_is_reversible() {
        let mut set = result_set();
        let now = Instant::now();
        set.submit("A B", now);
        set.tick(after_batch(now), &mut ScriptedOutcomes::analyzed(90));
        let original = set.records().to_vec();

        set.toggle_spot_check("A");
        assert!(set.records()[0].spot_check);
        assert_eq!(set.records()[0].confidence, original[0].confidence);
        set.toggle_spot_check("A");
        assert_eq!(set.records(), original.as_slice());
    }

    #[test]
    fn test_stale_batch_is_discarded() {
        let mut set = result_set();
        let first = Instant::now();
        set.submit("OLD-1 OLD-2", first);
        let second = first + Duration::from_millis(500);
        set.submit("NEW-1", second);

        // First batch comes due while the second is still pending
        assert_eq!(set.tick(after_batch(first), &mut ScriptedOutcomes::analyzed(90)), 0);
        assert_eq!(set.records()[0].status, AnalysisStatus::Analyzing);
        assert!(set.is_in_flight());

        assert_eq!(set.tick(after_batch(second), &mut ScriptedOutcomes::analyzed(90)), 1);
        assert_eq!(set.records()[0].status, AnalysisStatus::Analyzed);
        assert!(!set.is_in_flight());
    }

    #[test]
    fn test_stale_retry_applies_without_guard() {
        let settings = Settings { discard_stale_resolutions: false, ..Settings::default() };
        let mut set = ResultSet::new(settings);
        let start = Instant::now();
        set.submit("A B", start);
        set.tick(after_batch(start), &mut ScriptedOutcomes::failing());

        let retry_at = after_batch(start);
        set.retry("B", retry_at);
        set.submit("C D", retry_at + Duration::from_millis(100));

        // Retry for old B lands on whatever now sits at position 1
        set.tick(retry_at + Duration::from_millis(1200), &mut ScriptedOutcomes::analyzed(66));
        assert_eq!(set.records()[1].id, "D");
        assert_eq!(set.records()[1].status, AnalysisStatus::Analyzed);
        assert_eq!(set.records()[0].status, AnalysisStatus::Analyzing);
    }

    #[test]
    fn test_stale_retry_dropped_with_guard() {
        let mut set = result_set();
        let start = Instant::now();
        set.submit("A B", start);
        set.tick(after_batch(start), &mut ScriptedOutcomes::failing());

        let retry_at = after_batch(start);
        set.retry("B", retry_at);
        set.submit("C D", retry_at + Duration::from_millis(100));

        assert_eq!(set.tick(retry_at + Duration::from_millis(1200), &mut ScriptedOutcomes::analyzed(66)), 0);
        assert!(set.records().iter().all(|r| r.status == AnalysisStatus::Analyzing));
    }

    #[test]
    fn test_export_matches_failed_view() {
        let mut set = result_set();
        let now = Instant::now();
        set.submit("A B C D", now);
        // A fails, B analyzed, C fails, D analyzed
        let mut outcomes = ScriptedOutcomes::new(vec![0.0, 0.5, 0.9, 0.5, 0.0, 0.5, 0.5, 0.5]);
        set.tick(after_batch(now), &mut outcomes);

        let json = set.export(ExportFormat::Json, CategoryFilter::Failed).unwrap();
        let exported: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(exported.len(), set.view(CategoryFilter::Failed, "").len());
        assert_eq!(exported.len(), 2);
        assert!(exported.iter().all(|r| r["status"] == "Failed"));
    }

    #[test]
    fn test_export_ignores_search_term() {
        let mut set = result_set();
        let now = Instant::now();
        set.submit("X1 Y2", now);
        set.tick(after_batch(now), &mut ScriptedOutcomes::analyzed(90));

        // Chain text is "Call chain for <id>...", so "x1" only hits one record
        assert_eq!(set.view(CategoryFilter::All, "x1").len(), 1);
        let txt = set.export(ExportFormat::Txt, CategoryFilter::All).unwrap();
        assert_eq!(txt.matches("---\n").count(), 2);
        assert!(txt.contains("Y2\tAnalyzed"));
    }

    #[test]
    fn test_stale_batch_applies_without_guard() {
        let settings = Settings { discard_stale_resolutions: false, ..Settings::default() };
        let mut set = ResultSet::new(settings);
        let first = Instant::now();
        set.submit("OLD-1", first);
        set.submit("NEW-1 NEW-2", first + Duration::from_millis(500));

        // Old batch resolves whatever records are current
        assert_eq!(set.tick(after_batch(first), &mut ScriptedOutcomes::analyzed(70)), 1);
        assert!(!set.is_in_flight());
        let ids: Vec<&str> = set.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["NEW-1", "NEW-2"]);
        assert!(set.records().iter().all(|r| r.status == AnalysisStatus::Analyzed));
        assert_eq!(set.pending_resolutions(), 1);
    }
}
