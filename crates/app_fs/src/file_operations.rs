//! File operations module
//! Provides the clipboard and save-to-disk operations behind the copy and
//! download actions

use crate::is_safe_component;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File operation errors
#[derive(Debug, Error)]
pub enum FileOpError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Invalid file name: {0}")]
    InvalidName(String),
}

pub type Result<T> = std::result::Result<T, FileOpError>;

/// File operations trait
pub trait FileOperations: Send + Sync {
    /// Place text on the system clipboard
    fn copy_text_to_clipboard(&self, text: &str) -> Result<()>;

    /// Write `bytes` to `dir/file_name`, creating `dir` if needed.
    /// Returns the written path.
    fn save_file(&self, dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// Default implementation of file operations
pub struct DefaultFileOperations {
    #[cfg(feature = "clipboard")]
    clipboard: parking_lot::Mutex<Option<arboard::Clipboard>>,
}

impl DefaultFileOperations {
    pub fn new() -> Self {
        Self {
            #[cfg(feature = "clipboard")]
            clipboard: parking_lot::Mutex::new(None),
        }
    }
}

impl Default for DefaultFileOperations {
    fn default() -> Self {
        Self::new()
    }
}

impl FileOperations for DefaultFileOperations {
    #[cfg(feature = "clipboard")]
    fn copy_text_to_clipboard(&self, text: &str) -> Result<()> {
        let mut guard = self.clipboard.lock();

        // Opened lazily: headless hosts have no clipboard until one is used
        if guard.is_none() {
            let clipboard =
                arboard::Clipboard::new().map_err(|e| FileOpError::Clipboard(e.to_string()))?;
            *guard = Some(clipboard);
        }

        if let Some(clipboard) = guard.as_mut() {
            clipboard
                .set_text(text)
                .map_err(|e| FileOpError::Clipboard(e.to_string()))?;
        }

        tracing::debug!("Copied {} bytes of text to clipboard", text.len());
        Ok(())
    }

    #[cfg(not(feature = "clipboard"))]
    fn copy_text_to_clipboard(&self, _text: &str) -> Result<()> {
        Err(FileOpError::Clipboard(
            "Clipboard feature not enabled".to_string(),
        ))
    }

    fn save_file(&self, dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        if !is_safe_component(file_name) {
            return Err(FileOpError::InvalidName(file_name.to_string()));
        }

        std::fs::create_dir_all(dir)?;
        let target = dir.join(file_name);
        std::fs::write(&target, bytes)?;

        tracing::info!("Saved {} ({} bytes)", target.display(), bytes.len());
        Ok(target)
    }
}

/// The user's download directory, falling back to the current directory
pub fn default_download_dir() -> PathBuf {
    #[cfg(feature = "download-dir")]
    {
        if let Some(dir) = dirs_next::download_dir() {
            return dir;
        }
    }

    PathBuf::from(".")
}
