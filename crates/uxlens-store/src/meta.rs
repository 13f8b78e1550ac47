//! The metadata tier: one small JSON document, synchronous and
//! size-constrained.

use crate::error::StoreError;
use crate::session::SessionRecord;
use std::path::PathBuf;

/// Fixed key under which the whole record list is stored.
const HISTORY_FILE: &str = "history.json";

/// Default byte quota for the serialized list. Records carry only a
/// thumbnail, so 20 of them fit comfortably; the quota exists to keep
/// this tier honest about being the small one.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Size-constrained store for the ordered metadata record list.
///
/// The whole list is replaced on every `save`; there is no partial
/// update. Corrupt or missing data loads as empty history, never as a
/// fatal error.
pub struct MetaStore {
    path: PathBuf,
    quota_bytes: usize,
}

impl MetaStore {
    /// Create a store rooted at `data_dir`, ensuring the directory exists.
    pub fn new(data_dir: PathBuf) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self {
            path: data_dir.join(HISTORY_FILE),
            quota_bytes: DEFAULT_QUOTA_BYTES,
        })
    }

    /// Override the byte quota.
    pub fn with_quota(mut self, quota_bytes: usize) -> Self {
        self.quota_bytes = quota_bytes;
        self
    }

    /// Load the stored record list. An absent or unparsable file is
    /// empty history.
    pub fn load(&self) -> Vec<SessionRecord> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read {}: {e}", self.path.display());
                return Vec::new();
            }
        };
        match serde_json::from_str(&data) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Failed to parse {}: {e}", self.path.display());
                Vec::new()
            }
        }
    }

    /// Replace the stored list (atomic write: .tmp → rename). Fails with
    /// `QuotaExceeded` when the serialized list is over the byte quota;
    /// the caller keeps its in-memory state either way.
    pub fn save(&self, records: &[SessionRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string(records)?;
        if json.len() > self.quota_bytes {
            return Err(StoreError::QuotaExceeded {
                size: json.len(),
                quota: self.quota_bytes,
            });
        }
        let tmp_path = self.path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}
