//! Media Storage
//!
//! Filesystem store for uploaded profile images. Files are renamed to a
//! random name on save so client-supplied names never reach the disk, and
//! only the bare stored name is persisted in the database.

use std::path::{Path, PathBuf};

use crate::error::{AuthError, AuthResult};

/// Allowed image extensions, lowercase
const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// Upload size cap (5 MiB)
const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// An image file received from a multipart form
#[derive(Debug)]
pub struct ImageUpload {
    /// Client-supplied file name, used only to derive the extension
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Filesystem-backed media store
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate and persist an upload, returning the stored file name
    pub async fn save(&self, upload: ImageUpload) -> AuthResult<String> {
        let extension = Self::extension_of(&upload.file_name)?;

        if upload.bytes.is_empty() {
            return Err(AuthError::InvalidImage("Image file is empty".to_string()));
        }
        if upload.bytes.len() > MAX_IMAGE_BYTES {
            return Err(AuthError::InvalidImage(format!(
                "Image exceeds the {} MiB limit",
                MAX_IMAGE_BYTES / (1024 * 1024)
            )));
        }

        let stored_name = format!("{}.{}", uuid::Uuid::new_v4().simple(), extension);

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AuthError::Internal(format!("Media directory unavailable: {e}")))?;
        tokio::fs::write(self.root.join(&stored_name), &upload.bytes)
            .await
            .map_err(|e| AuthError::Internal(format!("Failed to store image: {e}")))?;

        tracing::debug!(file = %stored_name, size = upload.bytes.len(), "Stored profile image");
        Ok(stored_name)
    }

    /// Remove a stored file; a file that is already gone is not an error
    pub async fn remove(&self, stored_name: &str) -> AuthResult<()> {
        match tokio::fs::remove_file(self.root.join(stored_name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::Internal(format!("Failed to remove image: {e}"))),
        }
    }

    fn extension_of(file_name: &str) -> AuthResult<String> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .ok_or_else(|| {
                AuthError::InvalidImage("Image file has no extension".to_string())
            })?;

        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(AuthError::InvalidImage(format!(
                "Unsupported image type '{extension}'"
            )));
        }

        Ok(extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_accepted() {
        assert_eq!(MediaStore::extension_of("me.JPG").unwrap(), "jpg");
        assert_eq!(MediaStore::extension_of("a.b.png").unwrap(), "png");
    }

    #[test]
    fn test_extension_rejected() {
        assert!(MediaStore::extension_of("script.sh").is_err());
        assert!(MediaStore::extension_of("noext").is_err());
    }

    #[tokio::test]
    async fn test_save_renames_file() {
        let dir = std::env::temp_dir().join(format!("media-test-{}", uuid::Uuid::new_v4()));
        let store = MediaStore::new(&dir);

        let stored = store
            .save(ImageUpload {
                file_name: "../../etc/passwd.png".to_string(),
                bytes: vec![1, 2, 3],
            })
            .await
            .unwrap();

        assert!(stored.ends_with(".png"));
        assert!(!stored.contains('/'));
        assert!(dir.join(&stored).exists());

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_remove_deletes_and_tolerates_missing() {
        let dir = std::env::temp_dir().join(format!("media-test-{}", uuid::Uuid::new_v4()));
        let store = MediaStore::new(&dir);

        let stored = store
            .save(ImageUpload {
                file_name: "photo.png".to_string(),
                bytes: vec![1, 2, 3],
            })
            .await
            .unwrap();

        store.remove(&stored).await.unwrap();
        assert!(!dir.join(&stored).exists());

        // Second removal is a no-op
        store.remove(&stored).await.unwrap();

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_save_rejects_empty() {
        let store = MediaStore::new(std::env::temp_dir());
        let result = store
            .save(ImageUpload {
                file_name: "photo.png".to_string(),
                bytes: Vec::new(),
            })
            .await;
        assert!(matches!(result, Err(AuthError::InvalidImage(_))));
    }
}
