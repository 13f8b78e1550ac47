//! The blob tier: one file per session id, asynchronous and
//! capacity-tolerant.

use crate::error::StoreError;
use std::path::PathBuf;
use uxlens_types::EncodedImage;

const BLOB_DIR: &str = "images";
const BLOB_EXT: &str = "img";

/// Store for full-resolution images, keyed by session id. Values are
/// persisted in self-describing data-URI form. Absence on `get` is a
/// normal outcome; `delete` and `clear` are idempotent.
#[derive(Clone)]
pub struct BlobStore {
    dir: PathBuf,
}

impl BlobStore {
    /// Create a store under `data_dir`, ensuring the blob directory exists.
    pub async fn new(data_dir: PathBuf) -> Result<Self, StoreError> {
        let dir = data_dir.join(BLOB_DIR);
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    /// Write the full image for `id`, replacing any previous value.
    pub async fn put(&self, id: &str, image: &EncodedImage) -> Result<(), StoreError> {
        tokio::fs::write(self.blob_path(id), image.data_uri()).await?;
        Ok(())
    }

    /// Fetch the full image for `id`. `None` when it was evicted or
    /// never written.
    pub async fn get(&self, id: &str) -> Result<Option<EncodedImage>, StoreError> {
        match tokio::fs::read_to_string(self.blob_path(id)).await {
            Ok(uri) => Ok(Some(EncodedImage::parse_data_uri(&uri))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete the blob for `id`. Deleting a missing key is not an error.
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        match tokio::fs::remove_file(self.blob_path(id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove every stored blob.
    pub async fn clear(&self) -> Result<(), StoreError> {
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if let Err(e) = tokio::fs::remove_file(entry.path()).await {
                if e.kind() != std::io::ErrorKind::NotFound {
                    return Err(e.into());
                }
            }
        }
        Ok(())
    }

    fn blob_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.{BLOB_EXT}"))
    }
}
