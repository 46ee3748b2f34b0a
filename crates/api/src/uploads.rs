//! Filesystem storage for uploaded course materials.
//!
//! The storage root is injected configuration ([`MaterialStore`]), not a
//! path implied by directory layout. Uploads are written as a
//! [`StagedUpload`]: an RAII guard that deletes the file on drop unless
//! the caller commits it after the database row exists. Every failure
//! branch in the material handlers (validation, course-not-found, DB
//! error) therefore cleans up through the same mechanism instead of
//! repeating per-branch delete calls.

use std::path::{Path, PathBuf};

use cradle_core::uploads::generate_file_key;

/// Public URL prefix under which material files are served.
pub const MATERIALS_URL_PREFIX: &str = "/uploads/materials";

/// Filesystem store rooted at the configured storage directory.
#[derive(Debug)]
pub struct MaterialStore {
    root: PathBuf,
}

impl MaterialStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The storage root directory (also the `ServeDir` root).
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The public URL for a stored key.
    pub fn url_for(key: &str) -> String {
        format!("{MATERIALS_URL_PREFIX}/{key}")
    }

    /// Write uploaded bytes under a fresh generated key and return the
    /// staged guard. The file is deleted when the guard drops uncommitted.
    pub async fn stage(
        &self,
        original_filename: &str,
        mime_type: &str,
        data: &[u8],
    ) -> std::io::Result<StagedUpload> {
        tokio::fs::create_dir_all(&self.root).await?;

        let key = generate_file_key(original_filename);
        let path = self.root.join(&key);
        tokio::fs::write(&path, data).await?;

        Ok(StagedUpload {
            path,
            key,
            mime_type: mime_type.to_string(),
            size_bytes: data.len() as i64,
            committed: false,
        })
    }

    /// Remove a stored file by key. Best-effort: a missing file is not an
    /// error (the row may outlive the file after a crash).
    pub async fn delete(&self, key: &str) {
        let path = self.root.join(key);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(key, error = %e, "Failed to delete stored material file");
            }
        }
    }
}

/// A freshly written upload that has not yet been recorded in the
/// database. Dropping it without [`commit`](Self::commit) deletes the
/// file from disk.
#[derive(Debug)]
pub struct StagedUpload {
    path: PathBuf,
    key: String,
    mime_type: String,
    size_bytes: i64,
    committed: bool,
}

impl StagedUpload {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn size_bytes(&self) -> i64 {
        self.size_bytes
    }

    /// Keep the file: the database row referencing it now exists.
    pub fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for StagedUpload {
    fn drop(&mut self) {
        if !self.committed {
            // Synchronous removal: Drop cannot await, and the file is
            // small-lived local state.
            if let Err(e) = std::fs::remove_file(&self.path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(key = %self.key, error = %e, "Failed to clean up staged upload");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn staged_upload_is_removed_on_drop() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = MaterialStore::new(dir.path().to_path_buf());

        let staged = store
            .stage("notes.pdf", "application/pdf", b"content")
            .await
            .expect("stage should write");
        let path = dir.path().join(staged.key());
        assert!(path.exists(), "file should exist while staged");

        drop(staged);
        assert!(!path.exists(), "uncommitted file should be removed on drop");
    }

    #[tokio::test]
    async fn committed_upload_survives_drop() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = MaterialStore::new(dir.path().to_path_buf());

        let staged = store
            .stage("notes.pdf", "application/pdf", b"content")
            .await
            .expect("stage should write");
        let key = staged.key().to_string();
        let path = dir.path().join(&key);

        staged.commit();
        assert!(path.exists(), "committed file must survive");

        store.delete(&key).await;
        assert!(!path.exists(), "delete removes the stored file");
    }

    #[test]
    fn url_prefix_is_stable() {
        assert_eq!(
            MaterialStore::url_for("birth-plan-123.pdf"),
            "/uploads/materials/birth-plan-123.pdf"
        );
    }
}
