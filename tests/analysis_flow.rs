use std::time::{Duration, Instant};

use silver::analysis::{AnalysisStatus, RandomOutcomes, ScriptedOutcomes};
use silver::config::Settings;
use silver::file::ExportFormat;
use silver::state::{CategoryFilter, ResultSet};

fn fast_settings() -> Settings {
    Settings {
        analyze_delay_ms: 50,
        retry_delay_ms: 20,
        ..Settings::default()
    }
}

#[test]
fn two_advisories_resolve_and_filter_low() {
    let mut set = ResultSet::new(fast_settings());
    let start = Instant::now();

    assert_eq!(set.submit("RUSTSEC-2022-0001 RUSTSEC-2023-0010", start), 2);
    assert!(set.records().iter().all(|r| r.status == AnalysisStatus::Analyzing));

    let mut outcomes = RandomOutcomes::new(Some(11));
    set.tick(start + Duration::from_millis(50), &mut outcomes);

    for record in set.records() {
        assert!(matches!(record.status, AnalysisStatus::Analyzed | AnalysisStatus::Failed));
    }

    let low = set.view(CategoryFilter::Low, "");
    assert!(low.iter().all(|r| matches!(r.confidence, Some(c) if c < 60)));
    let expected = set.records().iter().filter(|r| matches!(r.confidence, Some(c) if c < 60)).count();
    assert_eq!(low.len(), expected);
}

#[test]
fn failed_record_recovers_through_retry() {
    let mut set = ResultSet::new(fast_settings());
    let start = Instant::now();
    set.submit("RUSTSEC-2022-0001, RUSTSEC-2023-0010", start);

    // First record fails, second succeeds at 89
    let mut outcomes = ScriptedOutcomes::new(vec![0.0, 0.5, 0.9, 0.475]);
    set.tick(start + Duration::from_millis(50), &mut outcomes);
    assert_eq!(set.records()[0].status, AnalysisStatus::Failed);
    assert_eq!(set.records()[1].confidence, Some(89));

    let failed_json = set.export(ExportFormat::Json, CategoryFilter::Failed).unwrap();
    let failed: Vec<serde_json::Value> = serde_json::from_str(&failed_json).unwrap();
    assert_eq!(failed.len(), set.view(CategoryFilter::Failed, "").len());

    let retry_at = start + Duration::from_millis(60);
    assert!(set.retry("RUSTSEC-2022-0001", retry_at));
    assert_eq!(set.records()[0].status, AnalysisStatus::Analyzing);
    assert!(set.view(CategoryFilter::Failed, "").is_empty());

    set.tick(retry_at + Duration::from_millis(20), &mut ScriptedOutcomes::analyzed(64));
    assert_eq!(set.records()[0].status, AnalysisStatus::Analyzed);
    assert_eq!(set.records()[0].confidence, Some(64));
    assert_eq!(set.records()[1].confidence, Some(89));
}
