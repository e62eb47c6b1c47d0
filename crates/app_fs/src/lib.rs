//! Icon Gallery File System Layer
//!
//! Read-only access to the icon store, a directory tree where every
//! immediate subdirectory of the root is a category of `*.svg` files:
//! - Category and icon listing
//! - Metadata sidecar resolution (`metadata.json` or a shared directory)
//! - Path component sanitizing for untrusted category names
//! - Clipboard and save-to-disk operations

mod sanitize;
mod store;
mod metadata;
mod file_operations;

pub use sanitize::{is_safe_component, normalize_route};
pub use store::{IconRecord, IconStore, ALL_CATEGORIES, SVG_SUFFIX};
pub use metadata::{CategoryMeta, CategoryMetaFile, IconMeta, Metadata, SIDECAR_FILE};
pub use file_operations::{
    default_download_dir, DefaultFileOperations, FileOpError, FileOperations,
};

use thiserror::Error;

/// File system errors
#[derive(Error, Debug)]
pub enum FsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Metadata error: {0}")]
    Metadata(String),
}

pub type Result<T> = std::result::Result<T, FsError>;
