//! Directory of uploaded cover images.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use crate::error::{BookStorageError, Result};

/// Extensions accepted for uploaded covers, compared case-insensitively.
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// URL prefix uploaded covers are served under.
pub const COVERS_URL_PREFIX: &str = "/covers";

/// Uploaded cover files, stored flat by sanitized file name.
///
/// Uploads with the same sanitized name overwrite each other.
#[derive(Debug, Clone)]
pub struct CoverUploads {
    root_path: PathBuf,
}

impl CoverUploads {
    pub fn new<P: AsRef<Path>>(root_path: P) -> Self {
        Self {
            root_path: root_path.as_ref().to_path_buf(),
        }
    }

    /// Create the upload directory if it doesn't exist.
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.root_path)
            .await
            .map_err(|e| BookStorageError::BackendError {
                source: Some(eyre::eyre!("Failed to create covers directory: {}", e)),
            })
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Write `data` under the sanitized form of `file_name`.
    ///
    /// # Returns
    /// The relative URL of the stored cover
    pub async fn save(&self, file_name: &str, data: &[u8]) -> Result<String> {
        let safe_name = secure_filename(file_name);
        if !has_allowed_extension(&safe_name) {
            return Err(BookStorageError::UnsupportedFileType {
                file_name: file_name.to_string(),
                source: None,
            });
        }

        let path = self.root_path.join(&safe_name);
        fs::write(&path, data)
            .await
            .map_err(|e| BookStorageError::UploadOperationFailed {
                operation: format!("write {}", path.display()),
                source: Some(eyre::eyre!("IO error: {}", e)),
            })?;

        debug!("Stored cover upload {} ({} bytes)", safe_name, data.len());
        Ok(format!("{}/{}", COVERS_URL_PREFIX, safe_name))
    }

    /// Remove an uploaded cover. A missing file is not an error.
    pub async fn remove(&self, file_name: &str) -> Result<bool> {
        let path = self.root_path.join(file_name);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Cover file {} already gone", path.display());
                Ok(false)
            }
            Err(e) => Err(BookStorageError::UploadOperationFailed {
                operation: format!("remove {}", path.display()),
                source: Some(eyre::eyre!("IO error: {}", e)),
            }),
        }
    }
}

/// Reduce a client-supplied file name to a safe, flat file name.
///
/// Directory components are dropped, whitespace becomes `_`, characters other
/// than ASCII alphanumerics, `.`, `-` and `_` are removed, and leading dots or
/// underscores are trimmed.
pub fn secure_filename(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);

    let cleaned: String = base
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();

    cleaned.trim_start_matches(['.', '_']).to_string()
}

fn has_allowed_extension(file_name: &str) -> bool {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        }
        _ => false,
    }
}
