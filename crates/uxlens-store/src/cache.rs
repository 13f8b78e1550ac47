//! The session cache: orchestrates the metadata and blob tiers.

use crate::blob::BlobStore;
use crate::error::StoreError;
use crate::meta::MetaStore;
use crate::session::{AuditSession, SessionRecord};
use std::path::PathBuf;
use uxlens_types::EncodedImage;

/// Maximum number of retained sessions. Eviction beyond the cap is
/// strict FIFO by list position; records are small and uniform, so
/// nothing fancier is warranted.
pub const HISTORY_CAP: usize = 20;

/// The result of selecting a session for viewing.
#[derive(Debug, Clone)]
pub struct SessionView {
    pub record: SessionRecord,
    /// Full image when the blob is present, otherwise the thumbnail.
    pub image: EncodedImage,
    /// True when the full image was unavailable and `image` is the
    /// thumbnail. A degraded view, not a failure.
    pub degraded: bool,
}

/// Owns both tiers and the in-memory history state.
///
/// The in-memory record list mirrors the metadata store after
/// `restore()` and is the source of truth for which sessions exist.
/// Every mutation goes through this controller, which sequences its own
/// store operations; blob writes and deletes are best-effort and never
/// fail a cache operation.
pub struct SessionCache {
    meta: MetaStore,
    blobs: BlobStore,
    records: Vec<SessionRecord>,
    selected: Option<String>,
}

impl SessionCache {
    /// Open (or create) the cache under `data_dir`. Call `restore()` to
    /// populate history.
    pub async fn new(data_dir: PathBuf) -> Result<Self, StoreError> {
        let meta = MetaStore::new(data_dir.clone())?;
        let blobs = BlobStore::new(data_dir).await?;
        Ok(Self {
            meta,
            blobs,
            records: Vec::new(),
            selected: None,
        })
    }

    /// Replace the metadata store (used by tests to tighten the quota).
    pub fn with_meta_store(mut self, meta: MetaStore) -> Self {
        self.meta = meta;
        self
    }

    /// Load persisted history into memory. No blob access happens here;
    /// full images are fetched lazily on `select`.
    pub fn restore(&mut self) {
        self.records = self.meta.load();
    }

    /// Record a newly completed session: front of the list, evict beyond
    /// the cap, persist. Returns the session id.
    ///
    /// Metadata is the source of truth for "this session exists"; the
    /// blob put is independent enrichment and its failure only costs the
    /// future full-image view. A metadata save failure is logged and the
    /// in-memory state retained, so the current run keeps working.
    pub async fn create(&mut self, session: AuditSession) -> String {
        let (record, full_image) = session.into_parts();
        let id = record.id.clone();
        self.records.insert(0, record);

        while self.records.len() > HISTORY_CAP {
            let Some(evicted) = self.records.pop() else {
                break;
            };
            if let Err(e) = self.blobs.delete(&evicted.id).await {
                // A leaked blob, not a correctness problem; reclaimed on
                // the next clear at the latest.
                tracing::warn!("Failed to delete evicted blob {}: {e}", evicted.id);
            }
        }

        if let Some(image) = &full_image {
            if let Err(e) = self.blobs.put(&id, image).await {
                tracing::warn!("Full image for {id} not persisted, views will degrade: {e}");
            }
        }

        if let Err(e) = self.meta.save(&self.records) {
            tracing::warn!("History metadata not persisted: {e}");
        }

        self.selected = Some(id.clone());
        id
    }

    /// Select a session for viewing. The id must name a retained record;
    /// the full image is fetched from the blob tier and the view falls
    /// back to the thumbnail (flagged degraded) when it is absent or
    /// unreadable. History viewing never hard-fails on a missing blob.
    pub async fn select(&mut self, id: &str) -> Result<SessionView, StoreError> {
        let record = self
            .records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| StoreError::UnknownSession { id: id.to_string() })?;

        self.selected = Some(record.id.clone());

        let full = match self.blobs.get(id).await {
            Ok(full) => full,
            Err(e) => {
                tracing::warn!("Blob read for {id} failed, degrading to thumbnail: {e}");
                None
            }
        };

        Ok(match full {
            Some(image) => SessionView {
                record,
                image,
                degraded: false,
            },
            None => {
                let image = record.thumbnail.clone();
                SessionView {
                    record,
                    image,
                    degraded: true,
                }
            }
        })
    }

    /// Destroy all history: in-memory list, metadata document, blobs.
    /// Unconditional and irreversible; confirmation belongs to the
    /// caller's boundary. Idempotent.
    pub async fn clear_all(&mut self) {
        self.records.clear();
        self.selected = None;

        if let Err(e) = self.meta.save(&[]) {
            tracing::warn!("Failed to persist cleared history: {e}");
        }
        if let Err(e) = self.blobs.clear().await {
            tracing::warn!("Failed to clear blobs: {e}");
        }
    }

    /// Retained records, newest first.
    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    /// Currently selected session id, if any.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolve a unique id prefix to a record. Errors when nothing or
    /// more than one record matches.
    pub fn find_by_prefix(&self, prefix: &str) -> Result<&SessionRecord, StoreError> {
        let prefix_lower = prefix.to_lowercase();
        let mut matches = self
            .records
            .iter()
            .filter(|r| r.id.to_lowercase().starts_with(&prefix_lower));

        match (matches.next(), matches.count()) {
            (None, _) => Err(StoreError::PrefixNotFound {
                prefix: prefix.to_string(),
            }),
            (Some(record), 0) => Ok(record),
            (Some(_), rest) => Err(StoreError::AmbiguousPrefix {
                prefix: prefix.to_string(),
                count: rest + 1,
            }),
        }
    }
}
