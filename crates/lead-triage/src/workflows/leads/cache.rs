use std::sync::{Arc, Mutex, PoisonError};

use tracing::info;

use super::batch::process_leads;
use super::scoring::ScoringEngine;
use super::store::{AssessmentStore, StoreError};
use super::domain::ScoredAssessment;

/// Memoized scored collection loaded from an [`AssessmentStore`].
///
/// The first call to [`LeadCache::leads`] pages through the whole store and
/// runs the batch processor. Later calls share the same `Arc` until the cache
/// is invalidated. The slot lock is held across a load, so concurrent callers
/// wait for the in-flight load instead of starting their own.
pub struct LeadCache<S> {
    store: Arc<S>,
    engine: Arc<ScoringEngine>,
    page_size: usize,
    slot: Mutex<Option<Arc<[ScoredAssessment]>>>,
}

impl<S> LeadCache<S>
where
    S: AssessmentStore + 'static,
{
    pub fn new(store: Arc<S>, engine: Arc<ScoringEngine>, page_size: usize) -> Self {
        Self {
            store,
            engine,
            page_size: page_size.max(1),
            slot: Mutex::new(None),
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    pub fn leads(&self) -> Result<Arc<[ScoredAssessment]>, LoadError> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(leads) = slot.as_ref() {
            return Ok(Arc::clone(leads));
        }

        let leads = self.load()?;
        *slot = Some(Arc::clone(&leads));
        Ok(leads)
    }

    pub fn invalidate(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
    }

    /// Drop the cached collection and load it again.
    pub fn reload(&self) -> Result<Arc<[ScoredAssessment]>, LoadError> {
        self.invalidate();
        self.leads()
    }

    pub fn is_loaded(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn load(&self) -> Result<Arc<[ScoredAssessment]>, LoadError> {
        let mut records = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let page = self.store.fetch_page(self.page_size, cursor.as_deref())?;
            pages += 1;
            records.extend(page.records);
            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        let scored = process_leads(&self.engine, records);
        info!(records = scored.len(), pages, "loaded assessment collection");
        Ok(scored.into())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to load assessments: {0}")]
    Store(#[from] StoreError),
}
