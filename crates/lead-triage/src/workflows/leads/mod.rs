//! Lead qualification: assessment scoring, temperature flags, dashboard
//! metrics, filter state, and CSV exports over the assessment collection.

pub mod batch;
pub mod cache;
pub mod dates;
pub mod domain;
pub mod export;
pub mod filter;
pub mod listing;
pub mod metrics;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use batch::process_leads;
pub use cache::{LeadCache, LoadError};
pub use domain::{AssessmentId, AssessmentRecord, LeadFlag, RoleTier, ScoredAssessment};
pub use export::{CsvExport, ExportError, LEADS_EXPORT_PREFIX};
pub use filter::{FilterField, FilterOptions, FilterState};
pub use listing::{ListingPage, ListingRequest, SortDirection, SortKey};
pub use metrics::{aggregate, DateWindow, Grouping, MetricsSnapshot};
pub use router::leads_router;
pub use scoring::{ScoreOutcome, ScoringConfig, ScoringConfigError, ScoringEngine};
pub use service::{LeadListing, LeadServiceError, LeadTriageService};
pub use store::{AssessmentStore, JsonFileStore, StoreError, StorePage};
