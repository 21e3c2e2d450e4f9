use super::common::*;
use crate::workflows::leads::batch::process_leads;
use crate::workflows::leads::domain::{AssessmentRecord, LeadFlag};

#[test]
fn batch_orders_by_derived_score_descending() {
    let scored = process_leads(&engine(), fixture_records());

    let order: Vec<(&str, u8, LeadFlag)> = scored
        .iter()
        .map(|lead| (lead.id().as_str(), lead.score, lead.flag))
        .collect();
    assert_eq!(
        order,
        vec![
            ("lead-1", 82, LeadFlag::Hot),
            ("lead-2", 56, LeadFlag::Warm),
            ("lead-4", 40, LeadFlag::Warm),
            ("lead-3", 30, LeadFlag::Cold),
            ("lead-5", 12, LeadFlag::Cold),
        ]
    );
}

#[test]
fn batch_keeps_input_order_for_equal_scores() {
    let records = ["first", "second", "third"]
        .into_iter()
        .map(|id| {
            let mut record = AssessmentRecord::new(id);
            record.base_score = Some(50.0);
            record
        })
        .collect();

    let scored = process_leads(&engine(), records);
    let ids: Vec<&str> = scored.iter().map(|lead| lead.id().as_str()).collect();
    assert_eq!(ids, vec!["first", "second", "third"]);
}

#[test]
fn batch_keeps_records_without_usable_fields() {
    let mut records = fixture_records();
    records.push(AssessmentRecord::new("blank"));

    let scored = process_leads(&engine(), records);
    assert_eq!(scored.len(), 6);
    let last = scored.last().expect("non-empty batch");
    assert_eq!(last.id().as_str(), "blank");
    assert_eq!(last.score, 0);
    assert_eq!(last.flag, LeadFlag::Cold);
}

#[test]
fn empty_batch_is_empty() {
    assert!(process_leads(&engine(), Vec::new()).is_empty());
}

#[test]
fn scoring_leaves_source_fields_untouched() {
    let records = fixture_records();
    let scored = process_leads(&engine(), records.clone());

    for lead in &scored {
        let original = records
            .iter()
            .find(|record| record.id == lead.record.id)
            .expect("record survives scoring");
        assert_eq!(&lead.record, original);
    }
}
