//! File storage abstraction layer.
//!
//! Uploaded form documents are written through the [`FileStorage`] trait so the
//! handlers do not care where the bytes end up. [`LocalFileStorage`] writes under a
//! base directory which the HTTP server exposes statically under a public prefix
//! (`/uploads` by default).
//!
//! # Example
//!
//! ```ignore
//! use eduzone_core::file_storage::{FileStorage, LocalFileStorage};
//! use std::path::PathBuf;
//!
//! let storage = LocalFileStorage::new(PathBuf::from("./public/uploads"), "/uploads", 10 * 1024 * 1024);
//!
//! let key = storage.save("forms/1712345678-permission.pdf", &bytes).await?;
//! let url = storage.get_url(&key)?; // "/uploads/forms/1712345678-permission.pdf"
//! storage.delete(&key).await?;
//! ```

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

/// Content types accepted for uploaded school documents.
pub const DOCUMENT_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
    "image/png",
    "image/jpeg",
];

/// Abstract trait for file storage backends.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Save file content under `key` and return the key.
    async fn save(&self, key: &str, content: &[u8]) -> Result<String, StorageError>;

    /// Delete a file by key. Deleting a missing file is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Public URL (or path) under which the file is served.
    fn get_url(&self, key: &str) -> Result<String, StorageError>;

    /// Recover the storage key from a public path produced by [`FileStorage::get_url`].
    fn key_from_url<'a>(&self, url: &'a str) -> Option<&'a str>;

    /// Maximum accepted size in bytes.
    fn max_file_size(&self) -> usize;

    /// Check size and content type before any bytes are written.
    fn check(&self, mime_type: &str, size_bytes: usize) -> Result<(), StorageError> {
        if size_bytes > self.max_file_size() {
            return Err(StorageError::InvalidFileSize {
                max_bytes: self.max_file_size(),
            });
        }

        if !DOCUMENT_MIME_TYPES.contains(&mime_type) {
            return Err(StorageError::InvalidMimeType {
                received: mime_type.to_string(),
                allowed: DOCUMENT_MIME_TYPES.iter().map(|s| s.to_string()).collect(),
            });
        }

        Ok(())
    }
}

/// Error type for file storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// File exceeds maximum allowed size.
    InvalidFileSize { max_bytes: usize },

    /// MIME type not allowed.
    InvalidMimeType {
        received: String,
        allowed: Vec<String>,
    },

    /// I/O error (file system or similar).
    IoError(std::io::Error),

    /// Invalid storage key format.
    InvalidKey(String),
}

impl StorageError {
    /// True when the upload itself was unacceptable (as opposed to a server fault).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidFileSize { .. } | Self::InvalidMimeType { .. }
        )
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFileSize { max_bytes } => {
                write!(f, "File exceeds maximum size of {} bytes", max_bytes)
            }
            Self::InvalidMimeType { received, allowed } => {
                write!(
                    f,
                    "File type '{}' not allowed. Allowed types: {}",
                    received,
                    allowed.join(", ")
                )
            }
            Self::IoError(e) => write!(f, "I/O error: {}", e),
            Self::InvalidKey(msg) => write!(f, "Invalid storage key: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e)
    }
}

/// Stores documents on the local disk under `root`, served by the HTTP layer at
/// `public_prefix`.
#[derive(Clone, Debug)]
pub struct LocalFileStorage {
    root: PathBuf,
    public_prefix: String,
    max_bytes: usize,
}

impl LocalFileStorage {
    pub fn new(root: PathBuf, public_prefix: impl Into<String>, max_bytes: usize) -> Self {
        let public_prefix = public_prefix.into().trim_end_matches('/').to_string();
        Self {
            root,
            public_prefix,
            max_bytes,
        }
    }

    /// Resolves `key` below the storage root.
    ///
    /// Keys are relative, slash separated and made of plain path segments only.
    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let segments_ok = !key.is_empty()
            && key.split('/').all(|segment| {
                !segment.is_empty()
                    && segment != "."
                    && segment != ".."
                    && segment
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            });

        if !segments_ok {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(key.split('/').fold(self.root.clone(), |path, segment| path.join(segment)))
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn save(&self, key: &str, content: &[u8]) -> Result<String, StorageError> {
        let path = self.path_for(key)?;
        if content.len() > self.max_bytes {
            return Err(StorageError::InvalidFileSize {
                max_bytes: self.max_bytes,
            });
        }

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).await?;
        }
        fs::write(&path, content).await?;

        Ok(key.to_string())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }

    fn get_url(&self, key: &str) -> Result<String, StorageError> {
        self.path_for(key)?;
        Ok(format!("{}/{}", self.public_prefix, key))
    }

    fn key_from_url<'a>(&self, url: &'a str) -> Option<&'a str> {
        url.strip_prefix(self.public_prefix.as_str())?
            .strip_prefix('/')
            .filter(|key| !key.is_empty())
    }

    fn max_file_size(&self) -> usize {
        self.max_bytes
    }
}
