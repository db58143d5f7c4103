//! Avatar upload storage
//!
//! Uploaded bytes are written under the public root before the referencing
//! database row exists; callers must remove the stored file on any later
//! validation or storage failure so no orphan remains.

use std::path::{Component, Path, PathBuf};

use rand::Rng;

use crate::constants::ALLOWED_IMAGE_EXTENSIONS;
use crate::error::{AppError, AppResult};

/// A file persisted under the public root
#[derive(Debug, Clone)]
pub struct StoredUpload {
    /// Path stored in the database and used in templates, e.g. `/uploads/team/x.png`
    pub relative_path: String,
    pub absolute_path: PathBuf,
}

/// Extract the lowercased extension if it is on the image allow-list
pub fn allowed_extension(filename: &str) -> Option<&'static str> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())?
        .to_ascii_lowercase();
    let dotted = format!(".{ext}");
    ALLOWED_IMAGE_EXTENSIONS
        .iter()
        .find(|allowed| **allowed == dotted)
        .copied()
}

/// Write uploaded bytes into `<public_root>/<subdir>` under a unique name.
///
/// Rejects disallowed extensions and oversized payloads before touching disk.
pub async fn store_upload(
    public_root: &Path,
    subdir: &str,
    original_name: &str,
    bytes: &[u8],
    max_bytes: usize,
) -> AppResult<StoredUpload> {
    let ext = allowed_extension(original_name).ok_or_else(|| {
        AppError::UploadRejected("Only PNG or JPG images are allowed.".to_string())
    })?;

    if bytes.len() > max_bytes {
        let max_mb = max_bytes / (1024 * 1024);
        return Err(AppError::UploadRejected(format!(
            "File too large. Max {max_mb}MB."
        )));
    }

    let dir = public_root.join(subdir);
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create upload dir: {e}")))?;

    let unique = format!(
        "{}-{}{}",
        chrono::Utc::now().timestamp_millis(),
        rand::rng().random_range(0..1_000_000_000u64),
        ext
    );
    let absolute_path = dir.join(&unique);

    tokio::fs::write(&absolute_path, bytes)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to write upload: {e}")))?;

    Ok(StoredUpload {
        relative_path: format!("/{subdir}/{unique}"),
        absolute_path,
    })
}

/// Delete a previously stored file by its database-relative path.
///
/// Refuses paths that would escape the public root and ignores files that are
/// already gone.
pub async fn remove_public_file(public_root: &Path, relative_path: &str) {
    let trimmed = relative_path.trim_start_matches('/');
    let candidate = public_root.join(trimmed);

    let escapes = candidate
        .components()
        .any(|c| matches!(c, Component::ParentDir));
    if escapes || !candidate.starts_with(public_root) {
        tracing::warn!(path = relative_path, "Refusing to delete file outside public root");
        return;
    }

    if let Err(e) = tokio::fs::remove_file(&candidate).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(path = relative_path, "Failed to delete upload: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extension() {
        assert_eq!(allowed_extension("photo.png"), Some(".png"));
        assert_eq!(allowed_extension("photo.JPG"), Some(".jpg"));
        assert_eq!(allowed_extension("photo.jpeg"), Some(".jpeg"));
        assert_eq!(allowed_extension("archive.zip"), None);
        assert_eq!(allowed_extension("noextension"), None);
    }

    #[tokio::test]
    async fn test_store_rejects_wrong_type_without_writing() {
        let root = tempfile::tempdir().unwrap();
        let result = store_upload(root.path(), "uploads/team", "evil.exe", b"bytes", 1024).await;
        assert!(matches!(result, Err(AppError::UploadRejected(_))));
        assert!(!root.path().join("uploads/team").exists());
    }

    #[tokio::test]
    async fn test_store_rejects_oversized_payload() {
        let root = tempfile::tempdir().unwrap();
        let result = store_upload(root.path(), "uploads/team", "big.png", &[0u8; 64], 16).await;
        match result {
            Err(AppError::UploadRejected(msg)) => assert!(msg.contains("too large")),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_store_and_remove_round_trip() {
        let root = tempfile::tempdir().unwrap();
        let stored = store_upload(root.path(), "uploads/avatars", "me.png", b"png", 1024)
            .await
            .unwrap();
        assert!(stored.absolute_path.exists());
        assert!(stored.relative_path.starts_with("/uploads/avatars/"));

        remove_public_file(root.path(), &stored.relative_path).await;
        assert!(!stored.absolute_path.exists());

        // removing again is a no-op
        remove_public_file(root.path(), &stored.relative_path).await;
    }

    #[tokio::test]
    async fn test_remove_refuses_escaping_paths() {
        let root = tempfile::tempdir().unwrap();
        let outside = root.path().parent().unwrap().join("victim.txt");
        std::fs::write(&outside, "keep me").unwrap();

        remove_public_file(root.path(), "../victim.txt").await;
        assert!(outside.exists());
        std::fs::remove_file(outside).ok();
    }
}
