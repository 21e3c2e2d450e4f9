use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::super::dates::{deserialize_optional_iso_date, parse_submission_date};
use super::super::domain::{LeadFlag, ScoredAssessment};
use super::views::{
    CategoryCount, ExpectationPoint, MetricsSnapshot, ScoreBucket, ScoreBucketCount,
    TemperatureCounts, MATURITY_NOT_INFORMED, NOT_INFORMED,
};

/// Maximum number of points kept for the expectation scatter.
pub const EXPECTATION_POINT_LIMIT: usize = 50;

/// Optional inclusive window over submission dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    #[serde(
        rename = "from",
        default,
        deserialize_with = "deserialize_optional_iso_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub start: Option<NaiveDate>,
    #[serde(
        rename = "to",
        default,
        deserialize_with = "deserialize_optional_iso_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Leads whose date is missing or unreadable stay in the window.
    pub fn admits(&self, lead: &ScoredAssessment) -> bool {
        let Some(date) = lead
            .record
            .submitted_on
            .as_deref()
            .and_then(parse_submission_date)
        else {
            return true;
        };

        if self.start.is_some_and(|start| date < start) {
            return false;
        }
        if self.end.is_some_and(|end| date > end) {
            return false;
        }
        true
    }
}

/// Counts categories while remembering the order each label first appeared.
#[derive(Default)]
struct CategoryTally {
    entries: Vec<CategoryCount>,
    index: HashMap<String, usize>,
}

impl CategoryTally {
    fn add(&mut self, label: &str) {
        match self.index.get(label) {
            Some(&position) => self.entries[position].value += 1,
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push(CategoryCount {
                    name: label.to_string(),
                    value: 1,
                });
            }
        }
    }

    fn into_entries(self) -> Vec<CategoryCount> {
        self.entries
    }
}

/// Build the dashboard snapshot for the leads admitted by `window`.
pub fn aggregate(leads: &[ScoredAssessment], window: Option<&DateWindow>) -> MetricsSnapshot {
    let admitted: Vec<&ScoredAssessment> = leads
        .iter()
        .filter(|lead| window.map_or(true, |window| window.admits(lead)))
        .collect();

    let mut revenue = CategoryTally::default();
    let mut maturity = CategoryTally::default();
    let mut sector = CategoryTally::default();
    let mut buckets: HashMap<ScoreBucket, usize> = HashMap::new();
    let mut temperature = TemperatureCounts::default();
    let mut scored_total: u64 = 0;
    let mut scored_count: usize = 0;

    for lead in &admitted {
        let record = &lead.record;
        revenue.add(record.annual_revenue.as_deref().unwrap_or(NOT_INFORMED));
        maturity.add(
            record
                .maturity_level
                .as_deref()
                .unwrap_or(MATURITY_NOT_INFORMED),
        );
        sector.add(record.sector.as_deref().unwrap_or(NOT_INFORMED));

        *buckets.entry(ScoreBucket::for_score(lead.score)).or_insert(0) += 1;

        match lead.flag {
            LeadFlag::Hot => temperature.hot += 1,
            LeadFlag::Warm => temperature.warm += 1,
            LeadFlag::Cold => temperature.cold += 1,
        }

        // Only leads with a base score from the form count toward the average.
        if record.base_score.is_some() {
            scored_total += u64::from(lead.score);
            scored_count += 1;
        }
    }

    let mut sector = sector.into_entries();
    sector.sort_by(|a, b| b.value.cmp(&a.value));

    let score_buckets = ScoreBucket::ordered()
        .into_iter()
        .map(|bucket| ScoreBucketCount {
            bucket,
            name: bucket.label(),
            value: buckets.get(&bucket).copied().unwrap_or(0),
        })
        .collect();

    let expectation = admitted
        .iter()
        .take(EXPECTATION_POINT_LIMIT)
        .map(|lead| ExpectationPoint {
            name: lead.record.company.clone(),
            auto_level: lead
                .record
                .maturity_level
                .clone()
                .unwrap_or_else(|| MATURITY_NOT_INFORMED.to_string()),
            score: lead.score,
            revenue: lead.record.annual_revenue.clone(),
        })
        .collect();

    let average_score = if scored_count == 0 {
        0.0
    } else {
        scored_total as f64 / scored_count as f64
    };

    MetricsSnapshot {
        total: admitted.len(),
        average_score,
        revenue: revenue.into_entries(),
        maturity: maturity.into_entries(),
        sector,
        score_buckets,
        expectation,
        temperature,
    }
}
