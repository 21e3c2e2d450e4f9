use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::domain::ScoredAssessment;
use super::filter::FilterState;

pub const DEFAULT_PAGE_SIZE: usize = 12;
pub const MAX_PAGE_SIZE: usize = 200;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Score,
    Company,
}

impl SortKey {
    pub const fn default_direction(self) -> SortDirection {
        match self {
            Self::Score => SortDirection::Desc,
            Self::Company => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Sort and page parameters for the lead table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingRequest {
    pub sort: SortKey,
    pub direction: Option<SortDirection>,
    /// Zero-based page index.
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListingRequest {
    fn default() -> Self {
        Self {
            sort: SortKey::default(),
            direction: None,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListingRequest {
    pub fn direction(&self) -> SortDirection {
        self.direction
            .unwrap_or_else(|| self.sort.default_direction())
    }

    pub fn page_size(&self) -> usize {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingPage {
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub items: Vec<ScoredAssessment>,
}

/// Leads passing `filter`, in their original order.
pub fn filter_leads<'a>(leads: &'a [ScoredAssessment], filter: &FilterState) -> Vec<&'a ScoredAssessment> {
    leads.iter().filter(|lead| filter.matches(lead)).collect()
}

/// Stable sort. Leads without a company sort after named ones when ascending.
pub fn sort_leads(leads: &mut [&ScoredAssessment], key: SortKey, direction: SortDirection) {
    leads.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Score => a.score.cmp(&b.score),
            SortKey::Company => compare_company(a, b),
        };
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

pub fn build_listing(
    leads: &[ScoredAssessment],
    filter: &FilterState,
    request: &ListingRequest,
) -> ListingPage {
    let mut matched = filter_leads(leads, filter);
    sort_leads(&mut matched, request.sort, request.direction());

    let page_size = request.page_size();
    let total = matched.len();
    let page_count = total.div_ceil(page_size);
    let items = matched
        .into_iter()
        .skip(request.page.saturating_mul(page_size))
        .take(page_size)
        .cloned()
        .collect();

    ListingPage {
        total,
        page: request.page,
        page_size,
        page_count,
        items,
    }
}

fn compare_company(a: &ScoredAssessment, b: &ScoredAssessment) -> Ordering {
    match (&a.record.company, &b.record.company) {
        (Some(left), Some(right)) => left.to_lowercase().cmp(&right.to_lowercase()),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::leads::domain::{AssessmentRecord, LeadFlag};

    fn lead(id: &str, company: Option<&str>, score: u8) -> ScoredAssessment {
        let mut record = AssessmentRecord::new(id);
        record.company = company.map(str::to_string);
        ScoredAssessment {
            record,
            score,
            flag: LeadFlag::Cold,
        }
    }

    fn ids(page: &ListingPage) -> Vec<&str> {
        page.items.iter().map(|lead| lead.id().as_str()).collect()
    }

    #[test]
    fn default_request_keeps_score_order_and_pages_by_twelve() {
        let leads: Vec<ScoredAssessment> = (0..30)
            .map(|index| lead(&format!("l{index}"), Some("Acme"), 100 - index as u8))
            .collect();

        let page = build_listing(&leads, &FilterState::default(), &ListingRequest::default());

        assert_eq!(page.total, 30);
        assert_eq!(page.page_size, 12);
        assert_eq!(page.page_count, 3);
        assert_eq!(page.items.len(), 12);
        assert_eq!(page.items[0].id().as_str(), "l0");
    }

    #[test]
    fn company_sort_ascending_puts_unnamed_last() {
        let leads = vec![
            lead("1", None, 50),
            lead("2", Some("beta"), 50),
            lead("3", Some("Alpha"), 50),
        ];
        let request = ListingRequest {
            sort: SortKey::Company,
            ..ListingRequest::default()
        };

        let page = build_listing(&leads, &FilterState::default(), &request);
        assert_eq!(ids(&page), vec!["3", "2", "1"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let leads = vec![lead("a", None, 40), lead("b", None, 40), lead("c", None, 90)];
        let page = build_listing(&leads, &FilterState::default(), &ListingRequest::default());
        assert_eq!(ids(&page), vec!["c", "a", "b"]);
    }

    #[test]
    fn page_size_is_clamped_and_out_of_range_page_is_empty() {
        let leads = vec![lead("a", None, 10), lead("b", None, 20)];
        let request = ListingRequest {
            page: 5,
            page_size: 0,
            ..ListingRequest::default()
        };

        let page = build_listing(&leads, &FilterState::default(), &request);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.page_count, 2);
        assert!(page.items.is_empty());
    }
}
