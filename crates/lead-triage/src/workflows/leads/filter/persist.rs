use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use super::query::{from_query_string, has_filter_keys};
use super::FilterState;

/// Name of the slot holding the last filter state.
pub const FILTER_SLOT_KEY: &str = "leads_filters";

pub fn to_blob(state: &FilterState) -> Result<String, serde_json::Error> {
    serde_json::to_string(state)
}

/// Decode a persisted blob. Malformed blobs are discarded.
pub fn from_blob(blob: &str) -> Option<FilterState> {
    match serde_json::from_str(blob) {
        Ok(state) => Some(state),
        Err(error) => {
            warn!(%error, "discarding unreadable persisted filter state");
            None
        }
    }
}

/// Pick the initial filter state: URL query first, then the persisted blob,
/// then the default.
pub fn resolve_filter_state(query: Option<&str>, blob: Option<&str>) -> FilterState {
    if let Some(query) = query.filter(|query| has_filter_keys(query)) {
        return from_query_string(query);
    }

    blob.and_then(from_blob).unwrap_or_default()
}

/// Storage slot for the serialized filter state.
pub trait FilterSlot: Send + Sync {
    fn load(&self) -> Result<Option<String>, SlotError>;
    fn save(&self, blob: &str) -> Result<(), SlotError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SlotError {
    #[error("filter slot {} unavailable: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Keeps the blob in `<dir>/leads_filters.json`.
#[derive(Debug, Clone)]
pub struct FileFilterSlot {
    path: PathBuf,
}

impl FileFilterSlot {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            path: dir.as_ref().join(format!("{FILTER_SLOT_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SlotError {
        SlotError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl FilterSlot for FileFilterSlot {
    fn load(&self) -> Result<Option<String>, SlotError> {
        match std::fs::read_to_string(&self.path) {
            Ok(blob) => Ok(Some(blob)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(self.io_error(error)),
        }
    }

    fn save(&self, blob: &str) -> Result<(), SlotError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| self.io_error(error))?;
        }
        std::fs::write(&self.path, blob).map_err(|error| self.io_error(error))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryFilterSlot {
    blob: Mutex<Option<String>>,
}

impl InMemoryFilterSlot {
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
        }
    }
}

impl FilterSlot for InMemoryFilterSlot {
    fn load(&self) -> Result<Option<String>, SlotError> {
        let guard = self.blob.lock().expect("filter slot mutex poisoned");
        Ok(guard.clone())
    }

    fn save(&self, blob: &str) -> Result<(), SlotError> {
        let mut guard = self.blob.lock().expect("filter slot mutex poisoned");
        *guard = Some(blob.to_string());
        Ok(())
    }
}
