// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Local disk storage for gallery images.

use std::io;
use std::path::PathBuf;
use tracing::{debug, info};
use uuid::Uuid;
use vine_api::UploadResponse;

/// Stores uploaded images in one directory and maps them to public URLs.
#[derive(Debug, Clone)]
pub struct UploadStorage {
    dir: PathBuf,
    public_base: String,
}

/// Stored names are generated, so anything else is refused.
fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains("..")
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Content type served for a stored file.
#[must_use]
pub fn content_type_for(file_name: &str) -> &'static str {
    match file_name.rsplit_once('.').map(|(_, ext)| ext) {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",
        _ => "application/octet-stream",
    }
}

impl UploadStorage {
    #[must_use]
    pub fn new(dir: PathBuf, public_base: &str) -> Self {
        Self {
            dir,
            public_base: public_base.trim_end_matches('/').to_string(),
        }
    }

    /// Creates the upload directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub async fn prepare(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Writes an image under a fresh name.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn store(&self, extension: &str, bytes: &[u8]) -> io::Result<UploadResponse> {
        self.prepare().await?;

        let file_name: String = format!("{}.{extension}", Uuid::new_v4());
        tokio::fs::write(self.dir.join(&file_name), bytes).await?;
        info!(file_name, size = bytes.len(), "Stored uploaded image");

        Ok(UploadResponse {
            image_url: format!("{}/{file_name}", self.public_base),
            file_name,
        })
    }

    /// Reads a stored image.
    ///
    /// # Returns
    ///
    /// `None` if the name is not a stored file.
    ///
    /// # Errors
    ///
    /// Returns an error for read failures other than a missing file.
    pub async fn read(&self, file_name: &str) -> io::Result<Option<Vec<u8>>> {
        if !is_safe_file_name(file_name) {
            debug!(file_name, "Refusing unsafe upload name");
            return Ok(None);
        }
        match tokio::fs::read(self.dir.join(file_name)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Deletes the file behind an image URL, if this storage owns it.
    ///
    /// # Returns
    ///
    /// True if a file was removed.
    ///
    /// # Errors
    ///
    /// Returns an error for delete failures other than a missing file.
    pub async fn remove(&self, image_url: &str) -> io::Result<bool> {
        let Some(file_name) = image_url
            .strip_prefix(&self.public_base)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|name| is_safe_file_name(name))
        else {
            return Ok(false);
        };

        match tokio::fs::remove_file(self.dir.join(file_name)).await {
            Ok(()) => {
                info!(file_name, "Removed uploaded image");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn scratch_storage() -> UploadStorage {
        let dir: PathBuf = std::env::temp_dir().join(format!("vine-uploads-{}", Uuid::new_v4()));
        UploadStorage::new(dir, "/uploads/")
    }

    #[test]
    fn test_safe_file_names() {
        assert!(is_safe_file_name("3f2a.png"));
        assert!(!is_safe_file_name("../secret"));
        assert!(!is_safe_file_name(".hidden"));
        assert!(!is_safe_file_name("a/b.png"));
        assert!(!is_safe_file_name(""));
    }

    #[test]
    fn test_content_types() {
        assert_eq!(content_type_for("a.jpg"), "image/jpeg");
        assert_eq!(content_type_for("a.webp"), "image/webp");
        assert_eq!(content_type_for("a"), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_store_read_and_remove() {
        let storage: UploadStorage = scratch_storage();

        let stored: UploadResponse = storage.store("png", b"not really a png").await.unwrap();
        assert!(stored.file_name.ends_with(".png"));
        assert_eq!(stored.image_url, format!("/uploads/{}", stored.file_name));

        let bytes = storage.read(&stored.file_name).await.unwrap();
        assert_eq!(bytes.as_deref(), Some(&b"not really a png"[..]));

        assert!(storage.remove(&stored.image_url).await.unwrap());
        assert!(!storage.remove(&stored.image_url).await.unwrap());
        assert!(storage.read(&stored.file_name).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_foreign_urls_are_left_alone() {
        let storage: UploadStorage = scratch_storage();

        assert!(
            !storage
                .remove("https://cdn.example.com/photo.jpg")
                .await
                .unwrap()
        );
        assert!(!storage.remove("/uploads/../Cargo.toml").await.unwrap());
    }
}
