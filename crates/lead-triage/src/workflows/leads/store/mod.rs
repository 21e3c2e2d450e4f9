//! Read-only access to the assessment document collection.

mod json;

pub use json::JsonFileStore;

use super::domain::AssessmentRecord;

/// One page of documents returned by the backing store.
#[derive(Debug, Clone, Default)]
pub struct StorePage {
    pub records: Vec<AssessmentRecord>,
    /// Opaque cursor for the following page; `None` once the collection is exhausted.
    pub next_cursor: Option<String>,
}

/// Storage abstraction so the cache can be exercised without a live document store.
pub trait AssessmentStore: Send + Sync {
    fn fetch_page(&self, limit: usize, cursor: Option<&str>) -> Result<StorePage, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode assessment documents: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid page cursor `{0}`")]
    InvalidCursor(String),
    #[error("assessment store unavailable: {0}")]
    Unavailable(String),
}
