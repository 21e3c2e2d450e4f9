use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use super::cache::{LeadCache, LoadError};
use super::export::{export_grouping_csv, export_leads_csv, CsvExport, ExportError};
use super::filter::{
    resolve_filter_state, to_blob, FilterOptions, FilterSlot, FilterState,
};
use super::listing::{build_listing, filter_leads, ListingPage, ListingRequest};
use super::metrics::views::{Grouping, MetricsSnapshot};
use super::metrics::{aggregate, DateWindow};
use super::store::AssessmentStore;

/// Service composing the lead cache with the persisted filter slot.
pub struct LeadTriageService<S, F> {
    cache: Arc<LeadCache<S>>,
    slot: Arc<F>,
}

/// Lead table response: the page plus the filter context it was built from.
#[derive(Debug, Clone, Serialize)]
pub struct LeadListing {
    pub filters: FilterState,
    pub options: FilterOptions,
    #[serde(flatten)]
    pub page: ListingPage,
}

impl<S, F> LeadTriageService<S, F>
where
    S: AssessmentStore + 'static,
    F: FilterSlot + 'static,
{
    pub fn new(cache: Arc<LeadCache<S>>, slot: Arc<F>) -> Self {
        Self { cache, slot }
    }

    pub fn cache(&self) -> &LeadCache<S> {
        &self.cache
    }

    /// Resolve the active filters from the request query or the persisted
    /// slot, and write the result back to the slot.
    pub fn current_filters(&self, query: Option<&str>) -> FilterState {
        let blob = match self.slot.load() {
            Ok(blob) => blob,
            Err(error) => {
                warn!(%error, "filter slot unreadable; ignoring persisted filters");
                None
            }
        };

        let state = resolve_filter_state(query, blob.as_deref());
        self.update_filters(&state);
        state
    }

    /// Persist `state`. Failures are logged and otherwise ignored.
    pub fn update_filters(&self, state: &FilterState) {
        let saved = to_blob(state)
            .map_err(|error| error.to_string())
            .and_then(|blob| self.slot.save(&blob).map_err(|error| error.to_string()));
        if let Err(error) = saved {
            warn!(%error, "failed to persist filter state");
        }
    }

    pub fn listing(
        &self,
        query: Option<&str>,
        request: &ListingRequest,
    ) -> Result<LeadListing, LeadServiceError> {
        let leads = self.cache.leads()?;
        let filters = self.current_filters(query);
        let page = build_listing(&leads, &filters, request);

        Ok(LeadListing {
            options: FilterOptions::from_leads(&leads),
            filters,
            page,
        })
    }

    /// Export the filtered lead table in score order.
    pub fn export_leads(
        &self,
        query: Option<&str>,
        today: NaiveDate,
    ) -> Result<CsvExport, LeadServiceError> {
        let leads = self.cache.leads()?;
        let filters = self.current_filters(query);
        let matched = filter_leads(&leads, &filters);
        info!(rows = matched.len(), "exporting lead table");
        Ok(export_leads_csv(matched, today)?)
    }

    pub fn metrics(&self, window: Option<&DateWindow>) -> Result<MetricsSnapshot, LeadServiceError> {
        let leads = self.cache.leads()?;
        Ok(aggregate(&leads, window))
    }

    /// Export one grouping over the whole collection; `None` when it is empty.
    pub fn export_report(
        &self,
        grouping: Grouping,
        today: NaiveDate,
    ) -> Result<Option<CsvExport>, LeadServiceError> {
        let snapshot = self.metrics(None)?;
        Ok(export_grouping_csv(&snapshot, grouping, today)?)
    }

    /// Reload the collection from the store, returning the new lead count.
    pub fn reload(&self) -> Result<usize, LeadServiceError> {
        let leads = self.cache.reload()?;
        info!(total = leads.len(), "lead collection reloaded");
        Ok(leads.len())
    }
}

/// Error raised by the lead triage service.
#[derive(Debug, thiserror::Error)]
pub enum LeadServiceError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
