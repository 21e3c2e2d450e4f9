use tracing::debug;

use super::domain::{AssessmentRecord, LeadFlag, ScoredAssessment};
use super::scoring::ScoringEngine;

/// Score every record and order the batch by derived score, highest first.
///
/// The sort is stable: leads sharing a score keep their input order. Records
/// with no usable fields are kept and land at the bottom as score 0.
pub fn process_leads(engine: &ScoringEngine, records: Vec<AssessmentRecord>) -> Vec<ScoredAssessment> {
    let mut scored: Vec<ScoredAssessment> = records
        .into_iter()
        .map(|record| engine.score_record(record))
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));

    debug!(
        total = scored.len(),
        hot = count_flag(&scored, LeadFlag::Hot),
        warm = count_flag(&scored, LeadFlag::Warm),
        cold = count_flag(&scored, LeadFlag::Cold),
        "scored assessment batch"
    );

    scored
}

fn count_flag(scored: &[ScoredAssessment], flag: LeadFlag) -> usize {
    scored.iter().filter(|lead| lead.flag == flag).count()
}
