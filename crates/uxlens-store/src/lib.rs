//! Two-tier audit history cache for uxlens.
//!
//! Past audit sessions are split across two stores: a small, bounded
//! metadata tier (one JSON document, synchronous, quota-checked) and a
//! capacity-tolerant blob tier (one file per session, async). The
//! metadata list is the source of truth for which sessions exist; full
//! images are best-effort enrichment, and the cache falls back to the
//! always-present thumbnail when a blob is missing.

pub mod blob;
pub mod cache;
pub mod error;
pub mod meta;
pub mod session;

pub use blob::BlobStore;
pub use cache::{HISTORY_CAP, SessionCache, SessionView};
pub use error::StoreError;
pub use meta::MetaStore;
pub use session::{AuditSession, SessionRecord};
