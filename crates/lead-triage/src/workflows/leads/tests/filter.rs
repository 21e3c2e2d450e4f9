use chrono::NaiveDate;

use super::common::*;
use crate::workflows::leads::batch::process_leads;
use crate::workflows::leads::domain::ScoredAssessment;
use crate::workflows::leads::filter::{
    from_blob, from_query_string, has_filter_keys, matches, resolve_filter_state, to_blob,
    to_query_string, FileFilterSlot, FilterField, FilterOptions, FilterSlot, FilterState,
    InMemoryFilterSlot, ScoreRange,
};

fn scored() -> Vec<ScoredAssessment> {
    process_leads(&engine(), fixture_records())
}

fn matching_ids(filter: &FilterState) -> Vec<String> {
    scored()
        .iter()
        .filter(|lead| matches(lead, filter))
        .map(|lead| lead.id().as_str().to_string())
        .collect()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[test]
fn default_filter_matches_everything() {
    let filter = FilterState::default();
    assert!(!filter.is_active());
    assert_eq!(matching_ids(&filter).len(), 5);
}

#[test]
fn search_checks_company_and_contact_case_insensitively() {
    let by_contact = FilterState {
        search: "maria".to_string(),
        ..FilterState::default()
    };
    assert_eq!(matching_ids(&by_contact), vec!["lead-1"]);

    let by_company = FilterState {
        search: "BETA".to_string(),
        ..FilterState::default()
    };
    assert_eq!(matching_ids(&by_company), vec!["lead-2"]);
}

#[test]
fn selections_require_membership() {
    let status = FilterState {
        status: vec!["WARM".to_string()],
        ..FilterState::default()
    };
    assert_eq!(matching_ids(&status), vec!["lead-2", "lead-4"]);

    let sector = FilterState {
        sector: vec!["Varejo".to_string()],
        ..FilterState::default()
    };
    assert_eq!(matching_ids(&sector), vec!["lead-2", "lead-3"]);

    // A lead with no sector never matches an explicit sector selection.
    let missing = FilterState {
        sector: vec!["Não informado".to_string()],
        ..FilterState::default()
    };
    assert!(matching_ids(&missing).is_empty());
}

#[test]
fn score_range_is_inclusive() {
    let filter = FilterState {
        score_range: ScoreRange { min: 40, max: 56 },
        ..FilterState::default()
    };
    assert_eq!(matching_ids(&filter), vec!["lead-2", "lead-4"]);
}

#[test]
fn date_range_excludes_missing_and_unreadable_dates() {
    let filter = FilterState {
        date_range: crate::workflows::leads::filter::DateRange {
            from: Some(date(2025, 3, 10)),
            to: None,
        },
        ..FilterState::default()
    };
    assert_eq!(matching_ids(&filter), vec!["lead-2", "lead-3"]);
}

#[test]
fn remove_toggle_and_clear_edit_the_state() {
    let mut filter = FilterState::default();
    filter.toggle(FilterField::Sector, "Varejo");
    filter.toggle(FilterField::Sector, "Indústria");
    filter.toggle(FilterField::Sector, "Varejo");
    assert_eq!(filter.sector, vec!["Indústria".to_string()]);

    filter.search = "acme".to_string();
    filter.score_range = ScoreRange { min: 10, max: 90 };
    filter.remove(FilterField::Search, None);
    filter.remove(FilterField::ScoreRange, None);
    assert!(filter.search.is_empty());
    assert!(filter.score_range.is_full());

    filter.status = vec!["HOT".to_string(), "COLD".to_string()];
    filter.remove(FilterField::Status, Some("HOT"));
    assert_eq!(filter.status, vec!["COLD".to_string()]);
    assert!(filter.is_active());

    filter.clear();
    assert_eq!(filter, FilterState::default());
}

#[test]
fn options_are_sorted_distinct_values() {
    let options = FilterOptions::from_leads(&scored());
    assert_eq!(options.sectors, vec!["Indústria", "Serviços", "Varejo"]);
    assert_eq!(options.revenues, vec!["Até R$ 1M", "R$ 1M - 5M"]);
    assert_eq!(options.maturities, vec!["Avançado", "Inicial", "Intermediário"]);
}

#[test]
fn query_string_round_trips_a_populated_state() {
    let state = FilterState {
        status: vec!["HOT".to_string(), "WARM".to_string()],
        sector: vec!["Indústria".to_string()],
        revenue: vec!["R$ 1M - 5M".to_string()],
        maturity: Vec::new(),
        score_range: ScoreRange { min: 20, max: 90 },
        date_range: crate::workflows::leads::filter::DateRange {
            from: Some(date(2025, 3, 1)),
            to: Some(date(2025, 3, 31)),
        },
        search: "acme & co".to_string(),
    };

    let query = to_query_string(&state);
    assert!(has_filter_keys(&query));
    assert_eq!(from_query_string(&query), state);
}

#[test]
fn query_string_with_only_a_start_date() {
    let mut state = FilterState::default();
    state.date_range.from = Some(date(2025, 3, 1));

    let query = to_query_string(&state);
    assert_eq!(query, "from=2025-03-01");
    assert_eq!(from_query_string(&format!("?{query}")), state);
}

#[test]
fn default_state_encodes_to_empty_query() {
    assert_eq!(to_query_string(&FilterState::default()), "");
    assert_eq!(from_query_string(""), FilterState::default());
}

#[test]
fn unreadable_query_values_fall_back_to_defaults() {
    let state = from_query_string("status=HOT,,WARM&minScore=abc&maxScore=80&from=ontem");
    assert_eq!(state.status, vec!["HOT".to_string(), "WARM".to_string()]);
    assert_eq!(state.score_range, ScoreRange { min: 0, max: 80 });
    assert_eq!(state.date_range.from, None);
}

#[test]
fn score_bounds_above_the_scale_are_ignored() {
    let state = from_query_string("minScore=150&maxScore=101");
    assert_eq!(state.score_range, ScoreRange::default());

    let state = from_query_string("minScore=100&maxScore=255");
    assert_eq!(state.score_range, ScoreRange { min: 100, max: 100 });
}

#[test]
fn only_filter_keys_count_as_filter_query() {
    assert!(!has_filter_keys("?page=2&sort=company"));
    assert!(has_filter_keys("?page=2&status=HOT"));
}

#[test]
fn blob_round_trips_including_start_date_only() {
    let mut state = FilterState {
        maturity: vec!["Inicial".to_string()],
        ..FilterState::default()
    };
    state.date_range.from = Some(date(2025, 3, 1));

    let blob = to_blob(&state).expect("blob encodes");
    assert_eq!(from_blob(&blob), Some(state));
}

#[test]
fn blob_accepts_dashboard_layout_and_timestamps() {
    let blank = r#"{"status":[],"sector":[],"revenue":[],"maturity":[],"scoreRange":[0,100],"dateRange":{},"search":""}"#;
    assert_eq!(from_blob(blank), Some(FilterState::default()));

    let with_timestamp = r#"{"dateRange":{"from":"2025-03-01T03:00:00.000Z"},"scoreRange":[10,60]}"#;
    let state = from_blob(with_timestamp).expect("blob decodes");
    assert_eq!(state.date_range.from, Some(date(2025, 3, 1)));
    assert_eq!(state.score_range, ScoreRange { min: 10, max: 60 });
}

#[test]
fn malformed_blob_is_discarded() {
    assert_eq!(from_blob("{not json"), None);
    assert_eq!(resolve_filter_state(None, Some("{not json")), FilterState::default());
}

#[test]
fn url_state_wins_over_persisted_blob() {
    let persisted = FilterState {
        sector: vec!["Varejo".to_string()],
        ..FilterState::default()
    };
    let blob = to_blob(&persisted).expect("blob encodes");

    let from_url = resolve_filter_state(Some("status=HOT"), Some(&blob));
    assert_eq!(from_url.status, vec!["HOT".to_string()]);
    assert!(from_url.sector.is_empty());

    let from_slot = resolve_filter_state(Some("page=3"), Some(&blob));
    assert_eq!(from_slot, persisted);

    assert_eq!(resolve_filter_state(None, None), FilterState::default());
}

#[test]
fn in_memory_slot_keeps_last_save() {
    let slot = InMemoryFilterSlot::default();
    assert_eq!(slot.load().expect("load"), None);
    slot.save("{}").expect("save");
    slot.save("{\"search\":\"x\"}").expect("save");
    assert_eq!(slot.load().expect("load").as_deref(), Some("{\"search\":\"x\"}"));
}

#[test]
fn file_slot_creates_its_directory() {
    let dir = std::env::temp_dir()
        .join(format!("lead-triage-slot-{}", std::process::id()))
        .join("nested");
    let _ = std::fs::remove_dir_all(&dir);
    let slot = FileFilterSlot::new(&dir);

    assert_eq!(slot.load().expect("missing file loads as empty"), None);
    slot.save("{\"search\":\"acme\"}").expect("save creates dir");
    assert!(slot.path().ends_with("leads_filters.json"));
    assert_eq!(
        slot.load().expect("load").as_deref(),
        Some("{\"search\":\"acme\"}")
    );
}
