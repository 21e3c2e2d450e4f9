//! Lead filter state and the predicates applied to the scored collection.
//!
//! A [`FilterState`] is the user's active query. It round-trips through the
//! URL query string ([`query`]) and through the persisted filter slot
//! ([`persist`]). The default state matches every lead.

mod options;
pub mod persist;
pub mod query;

pub use options::FilterOptions;
pub use persist::{
    from_blob, resolve_filter_state, to_blob, FileFilterSlot, FilterSlot, InMemoryFilterSlot,
    SlotError, FILTER_SLOT_KEY,
};
pub use query::{from_query_string, has_filter_keys, to_query_string};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dates::{deserialize_optional_iso_date, parse_submission_date};
use super::domain::ScoredAssessment;

pub const SCORE_MIN: u8 = 0;
pub const SCORE_MAX: u8 = 100;

/// Inclusive score bounds, persisted as a `[min, max]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u8; 2]", into = "[u8; 2]")]
pub struct ScoreRange {
    pub min: u8,
    pub max: u8,
}

impl ScoreRange {
    pub fn contains(&self, score: u8) -> bool {
        score >= self.min && score <= self.max
    }

    pub fn is_full(&self) -> bool {
        *self == Self::default()
    }
}

impl Default for ScoreRange {
    fn default() -> Self {
        Self {
            min: SCORE_MIN,
            max: SCORE_MAX,
        }
    }
}

impl From<[u8; 2]> for ScoreRange {
    fn from([min, max]: [u8; 2]) -> Self {
        Self { min, max }
    }
}

impl From<ScoreRange> for [u8; 2] {
    fn from(range: ScoreRange) -> Self {
        [range.min, range.max]
    }
}

/// Inclusive date bounds; either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(
        default,
        deserialize_with = "deserialize_optional_iso_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub from: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_iso_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn is_open(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Filterable fields, used to drop or toggle a single restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    Status,
    Sector,
    Revenue,
    Maturity,
    Search,
    ScoreRange,
    DateRange,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    pub status: Vec<String>,
    pub sector: Vec<String>,
    pub revenue: Vec<String>,
    pub maturity: Vec<String>,
    pub score_range: ScoreRange,
    pub date_range: DateRange,
    pub search: String,
}

impl FilterState {
    /// Every active restriction must pass.
    pub fn matches(&self, lead: &ScoredAssessment) -> bool {
        let record = &lead.record;

        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            let hit = |value: &Option<String>| {
                value
                    .as_deref()
                    .is_some_and(|value| value.to_lowercase().contains(&needle))
            };
            if !hit(&record.company) && !hit(&record.contact_name) {
                return false;
            }
        }

        if !self.status.is_empty() && !self.status.iter().any(|s| s == lead.flag.label()) {
            return false;
        }
        if !selected(&self.sector, record.sector.as_deref()) {
            return false;
        }
        if !selected(&self.revenue, record.annual_revenue.as_deref()) {
            return false;
        }
        if !selected(&self.maturity, record.maturity_level.as_deref()) {
            return false;
        }

        if !self.score_range.contains(lead.score) {
            return false;
        }

        if !self.date_range.is_open() {
            // An explicit range cannot be satisfied by an unknown date.
            let Some(date) = record
                .submitted_on
                .as_deref()
                .and_then(parse_submission_date)
            else {
                return false;
            };
            if self.date_range.from.is_some_and(|from| date < from) {
                return false;
            }
            if self.date_range.to.is_some_and(|to| date > to) {
                return false;
            }
        }

        true
    }

    /// True when any field differs from the match-everything default.
    pub fn is_active(&self) -> bool {
        *self != Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Drop one selected value, or reset a scalar field when `value` is `None`.
    pub fn remove(&mut self, field: FilterField, value: Option<&str>) {
        match field {
            FilterField::Search => self.search.clear(),
            FilterField::ScoreRange => self.score_range = ScoreRange::default(),
            FilterField::DateRange => self.date_range = DateRange::default(),
            list => {
                if let Some(values) = self.values_mut(list) {
                    match value {
                        Some(value) => values.retain(|existing| existing != value),
                        None => values.clear(),
                    }
                }
            }
        }
    }

    /// Add `value` to a selection if absent, remove it if present.
    pub fn toggle(&mut self, field: FilterField, value: &str) {
        if let Some(values) = self.values_mut(field) {
            if let Some(position) = values.iter().position(|existing| existing == value) {
                values.remove(position);
            } else {
                values.push(value.to_string());
            }
        }
    }

    fn values_mut(&mut self, field: FilterField) -> Option<&mut Vec<String>> {
        match field {
            FilterField::Status => Some(&mut self.status),
            FilterField::Sector => Some(&mut self.sector),
            FilterField::Revenue => Some(&mut self.revenue),
            FilterField::Maturity => Some(&mut self.maturity),
            FilterField::Search | FilterField::ScoreRange | FilterField::DateRange => None,
        }
    }
}

/// Returns true when `lead` passes every restriction in `filter`.
pub fn matches(lead: &ScoredAssessment, filter: &FilterState) -> bool {
    filter.matches(lead)
}

fn selected(selection: &[String], value: Option<&str>) -> bool {
    if selection.is_empty() {
        return true;
    }
    value.is_some_and(|value| selection.iter().any(|candidate| candidate == value))
}
