//! 上传图片的本地存储
//!
//! Files are named by the xxh64 hash of their content, so uploading the same
//! picture twice writes it once.

use std::path::{Path, PathBuf};

use xxhash_rust::xxh64::xxh64;

use crate::config::UploadConfig;
use crate::errors::{OversightError, Result};

const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "mpo"];

/// A stored upload
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub filename: String,
    pub hash: String,
}

#[derive(Debug, Clone)]
pub struct ImageStore {
    directory: PathBuf,
    max_bytes: usize,
}

impl ImageStore {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            directory: PathBuf::from(&config.directory),
            max_bytes: (config.max_size_mb as usize).saturating_mul(1024 * 1024),
        }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Lower-cased extension of an allowed image file name
    pub fn allowed_extension(filename: &str) -> Option<String> {
        let ext = Path::new(filename)
            .extension()?
            .to_str()?
            .to_ascii_lowercase();
        ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
    }

    pub fn content_hash(bytes: &[u8]) -> String {
        format!("{:016x}", xxh64(bytes, 0))
    }

    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<StoredFile> {
        let ext = Self::allowed_extension(original_name).ok_or_else(|| {
            OversightError::validation(format!("File type not allowed: {}", original_name))
        })?;
        if bytes.is_empty() {
            return Err(OversightError::validation("Empty upload"));
        }
        if bytes.len() > self.max_bytes {
            return Err(OversightError::validation("File too large"));
        }

        let hash = Self::content_hash(bytes);
        let filename = format!("{}.{}", hash, ext);
        let path = self.directory.join(&filename);

        tokio::fs::create_dir_all(&self.directory).await?;
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tokio::fs::write(&path, bytes).await?;
        }

        Ok(StoredFile { filename, hash })
    }

    /// Path of a stored file; `None` for names that could escape the directory
    pub fn path_for(&self, filename: &str) -> Option<PathBuf> {
        let valid = !filename.is_empty()
            && filename
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-')
            && !filename.starts_with('.');
        valid.then(|| self.directory.join(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &Path) -> ImageStore {
        ImageStore::new(&UploadConfig {
            directory: dir.to_string_lossy().into_owned(),
            max_size_mb: 1,
        })
    }

    #[tokio::test]
    async fn test_save_names_file_by_content() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store(tmp.path());

        let a = store.save("cop.PNG", b"pixels").await.unwrap();
        let b = store.save("other.png", b"pixels").await.unwrap();

        assert_eq!(a.filename, b.filename);
        assert!(a.filename.ends_with(".png"));
        assert!(tmp.path().join(&a.filename).exists());
    }

    #[tokio::test]
    async fn test_rejects_bad_type_and_size() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store(tmp.path());

        assert!(store.save("notes.txt", b"hello").await.is_err());
        let big = vec![0u8; 1024 * 1024 + 1];
        assert!(store.save("big.jpg", &big).await.is_err());
    }

    #[test]
    fn test_path_for_rejects_traversal() {
        let store = store(Path::new("uploads"));
        assert!(store.path_for("abc.png").is_some());
        assert!(store.path_for("../secret").is_none());
        assert!(store.path_for(".hidden").is_none());
    }
}
