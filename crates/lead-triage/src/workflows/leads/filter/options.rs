use std::collections::BTreeSet;

use serde::Serialize;

use super::super::domain::ScoredAssessment;

/// Distinct values offered by the sector, revenue, and maturity pickers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub sectors: Vec<String>,
    pub revenues: Vec<String>,
    pub maturities: Vec<String>,
}

impl FilterOptions {
    pub fn from_leads(leads: &[ScoredAssessment]) -> Self {
        let mut sectors = BTreeSet::new();
        let mut revenues = BTreeSet::new();
        let mut maturities = BTreeSet::new();

        for lead in leads {
            if let Some(sector) = &lead.record.sector {
                sectors.insert(sector.clone());
            }
            if let Some(revenue) = &lead.record.annual_revenue {
                revenues.insert(revenue.clone());
            }
            if let Some(level) = &lead.record.maturity_level {
                maturities.insert(level.clone());
            }
        }

        Self {
            sectors: sectors.into_iter().collect(),
            revenues: revenues.into_iter().collect(),
            maturities: maturities.into_iter().collect(),
        }
    }
}
