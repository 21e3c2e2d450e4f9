use std::path::{Path, PathBuf};

use serde_json::Value;

use super::super::domain::AssessmentRecord;
use super::{AssessmentStore, StorePage, StoreError};

/// Store backed by a JSON array of assessment documents on disk.
///
/// The file is re-read on every page so edits show up on the next reload.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_documents(&self) -> Result<Vec<Value>, StoreError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }
}

impl AssessmentStore for JsonFileStore {
    fn fetch_page(&self, limit: usize, cursor: Option<&str>) -> Result<StorePage, StoreError> {
        let start = match cursor {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|_| StoreError::InvalidCursor(raw.to_string()))?,
            None => 0,
        };

        let documents = self.read_documents()?;
        if start > documents.len() {
            return Err(StoreError::InvalidCursor(start.to_string()));
        }

        let end = start.saturating_add(limit.max(1)).min(documents.len());
        let records = documents[start..end]
            .iter()
            .enumerate()
            .map(|(offset, document)| decode_document(document.clone(), start + offset))
            .collect::<Result<Vec<_>, _>>()?;

        let next_cursor = (end < documents.len()).then(|| end.to_string());

        Ok(StorePage {
            records,
            next_cursor,
        })
    }
}

/// Normalise the document id to a string, falling back to `doc-<index>`.
fn decode_document(mut document: Value, index: usize) -> Result<AssessmentRecord, StoreError> {
    if let Value::Object(fields) = &mut document {
        // Derived keys are recomputed on load.
        fields.remove("_score");
        fields.remove("_flag");

        let id = match fields.get("id") {
            Some(Value::String(id)) if !id.trim().is_empty() => id.clone(),
            Some(Value::Number(number)) => number.to_string(),
            _ => format!("doc-{index}"),
        };
        fields.insert("id".to_string(), Value::String(id));
    }

    Ok(serde_json::from_value(document)?)
}
