//! # Artifact Store
//!
//! Filesystem storage for rendered PDF artifacts.
//!
//! ## Layout
//! ```text
//! <root>/
//! ├── invoice/
//! │   ├── INV-202501-0001_7c9e6679-....pdf
//! │   └── INV-202501-0002_550e8400-....pdf
//! ├── waybill/
//! │   └── WB-202501-0001_6ba7b810-....pdf
//! └── completion_act/
//!     └── ACT-202501-0001_f47ac10b-....pdf
//! ```
//!
//! Keys are relative paths generated by [`ArtifactStore::key_for`]; the
//! number component is sanitized so a key never escapes the root.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use skrepka_core::number::sanitize_for_key;
use skrepka_core::types::DocumentType;

/// Filesystem-backed store for generated PDF files.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Creates a store rooted at the given directory.
    ///
    /// The directory does not need to exist yet; writes create it.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ArtifactStore { root: root.into() }
    }

    /// Returns the store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Builds the storage key for a document.
    ///
    /// The id suffix keeps keys unique even if a number is ever reused
    /// across companies.
    pub fn key_for(doc_type: DocumentType, number: &str, id: &str) -> String {
        format!(
            "{}/{}_{}.pdf",
            doc_type.as_str(),
            sanitize_for_key(number),
            sanitize_for_key(id)
        )
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    /// Writes artifact bytes under the given key, creating directories
    /// as needed. A failed write is attempted once more before giving
    /// up; the first attempt can lose a race with external cleanup of
    /// the parent directory.
    pub async fn write(&self, key: &str, bytes: &[u8]) -> io::Result<()> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        if let Err(first) = tokio::fs::write(&path, bytes).await {
            warn!(key, error = %first, "Artifact write failed, retrying once");
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&path, bytes).await?;
        }
        debug!(key, size = bytes.len(), "Stored artifact");
        Ok(())
    }

    /// Reads artifact bytes. Returns `None` when the file does not exist.
    pub async fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Removes an artifact. Returns false when it was already gone.
    pub async fn remove(&self, key: &str) -> io::Result<bool> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => {
                debug!(key, "Removed artifact");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_store() -> ArtifactStore {
        ArtifactStore::new(std::env::temp_dir().join(format!("skrepka-artifacts-{}", Uuid::new_v4())))
    }

    #[test]
    fn test_key_format() {
        let key = ArtifactStore::key_for(DocumentType::Invoice, "INV-202501-0001", "abc-123");
        assert_eq!(key, "invoice/INV-202501-0001_abc-123.pdf");

        let key = ArtifactStore::key_for(DocumentType::CompletionAct, "ACT/2025 № 1", "id");
        assert_eq!(key, "completion_act/ACT-2025---1_id.pdf");
    }

    #[tokio::test]
    async fn test_write_read_remove_roundtrip() {
        let store = temp_store();
        let key = "invoice/INV-202501-0001_x.pdf";

        store.write(key, b"%PDF-1.5 test").await.unwrap();
        let bytes = store.read(key).await.unwrap().unwrap();
        assert_eq!(bytes, b"%PDF-1.5 test");

        assert!(store.remove(key).await.unwrap());
        assert!(store.read(key).await.unwrap().is_none());

        let _ = tokio::fs::remove_dir_all(store.root()).await;
    }

    #[tokio::test]
    async fn test_read_and_remove_missing() {
        let store = temp_store();
        assert!(store.read("invoice/nope.pdf").await.unwrap().is_none());
        assert!(!store.remove("invoice/nope.pdf").await.unwrap());
    }

    #[tokio::test]
    async fn test_overwrite_replaces_contents() {
        let store = temp_store();
        let key = "waybill/WB-202501-0001_x.pdf";

        store.write(key, b"first").await.unwrap();
        store.write(key, b"second").await.unwrap();
        assert_eq!(store.read(key).await.unwrap().unwrap(), b"second");

        let _ = tokio::fs::remove_dir_all(store.root()).await;
    }
}
