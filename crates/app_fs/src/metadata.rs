//! Metadata sidecar resolution
//!
//! Each category may carry a `metadata.json` next to its icons, or a
//! `<category>.json` in a shared metadata directory. Missing or malformed
//! files never fail a listing: the category falls back to a default entry.

use crate::{is_safe_component, FsError, IconStore, Result};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Sidecar file name inside a category directory
pub const SIDECAR_FILE: &str = "metadata.json";

/// Metadata of every known category, keyed by category directory name
pub type Metadata = BTreeMap<String, CategoryMeta>;

/// Per-icon overrides, keyed by icon base name in [`CategoryMeta::icons`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IconMeta {
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Number>,
}

/// Resolved metadata of one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMeta {
    pub category_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Number>,

    #[serde(default)]
    pub icons: BTreeMap<String, IconMeta>,
}

/// A metadata file as written on disk, every field optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMetaFile {
    #[serde(default)]
    pub category_name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub order: Option<Number>,

    #[serde(default)]
    pub icons: BTreeMap<String, IconMeta>,
}

impl CategoryMetaFile {
    /// Parse a metadata document
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| FsError::Metadata(e.to_string()))
    }

    /// Read and parse a metadata file
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
            .map_err(|e| FsError::Metadata(format!("{}: {}", path.display(), e)))
    }
}

impl CategoryMeta {
    /// Default entry for a category without usable metadata
    pub fn default_for(category: &str) -> Self {
        Self::resolve(category, None)
    }

    /// Merge a parsed metadata file (if any) with the defaults for `category`.
    ///
    /// A missing file gives `{ categoryName: category, icons: {} }`; a file
    /// without `categoryName` keeps the category key as its name.
    pub fn resolve(category: &str, file: Option<CategoryMetaFile>) -> Self {
        let file = file.unwrap_or_default();
        Self {
            category_name: file.category_name.unwrap_or_else(|| category.to_string()),
            description: file.description,
            order: file.order,
            icons: file.icons,
        }
    }

    /// Ordering weight, 0 when absent
    pub fn order_value(&self) -> f64 {
        self.order.as_ref().and_then(Number::as_f64).unwrap_or(0.0)
    }

    /// Overrides for one icon
    pub fn icon(&self, name: &str) -> Option<&IconMeta> {
        self.icons.get(name)
    }
}


impl IconStore {
    /// Resolve metadata for every category.
    ///
    /// Every category directory gets an entry. Categories that only have a
    /// shared metadata file are included as well. Only failure to enumerate
    /// the store root is an error.
    pub fn resolve_metadata(&self) -> Result<Metadata> {
        let categories = self.list_categories()?;
        let mut shared = self.read_shared_metadata();
        let mut metadata = Metadata::new();

        for category in &categories {
            let file = shared
                .remove(category)
                .or_else(|| self.read_sidecar(category));
            metadata.insert(category.clone(), CategoryMeta::resolve(category, file));
        }

        for (category, file) in shared {
            tracing::debug!("Metadata for {} has no category directory", category);
            let resolved = CategoryMeta::resolve(&category, Some(file));
            metadata.insert(category, resolved);
        }

        tracing::debug!("Resolved metadata for {} categories", metadata.len());
        Ok(metadata)
    }

    /// Read `<root>/<category>/metadata.json`, `None` on any failure
    fn read_sidecar(&self, category: &str) -> Option<CategoryMetaFile> {
        let path = self.category_dir(category)?.join(SIDECAR_FILE);

        match CategoryMetaFile::read(&path) {
            Ok(file) => {
                tracing::debug!("Loaded metadata for {}", category);
                Some(file)
            }
            Err(FsError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No {} found for {}", SIDECAR_FILE, category);
                None
            }
            Err(e) => {
                tracing::warn!("Error loading metadata for {}: {}", category, e);
                None
            }
        }
    }

    /// Read every `<category>.json` in the shared metadata directory
    fn read_shared_metadata(&self) -> BTreeMap<String, CategoryMetaFile> {
        let mut files = BTreeMap::new();

        let Some(dir) = self.metadata_dir() else {
            return files;
        };

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    tracing::warn!("Cannot read metadata directory {}: {}", dir.display(), e);
                }
                return files;
            }
        };

        for entry in entries.filter_map(|entry| entry.ok()) {
            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != "json") || !path.is_file() {
                continue;
            }

            let Some(category) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if !is_safe_component(category) {
                tracing::warn!("Skipping metadata for unsafe category name: {:?}", category);
                continue;
            }

            match CategoryMetaFile::read(&path) {
                Ok(file) => {
                    files.insert(category.to_string(), file);
                }
                Err(e) => tracing::warn!("Error loading metadata for {}: {}", category, e),
            }
        }

        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::touch;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_defaults() {
        let meta = CategoryMeta::resolve("shapes", None);
        assert_eq!(meta.category_name, "shapes");
        assert!(meta.icons.is_empty());
        assert_eq!(meta.order_value(), 0.0);

        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json, serde_json::json!({ "categoryName": "shapes", "icons": {} }));
    }

    #[test]
    fn test_resolve_partial_file() {
        let file = CategoryMetaFile::parse(r#"{ "order": 2, "icons": { "left": { "name": "左" } } }"#).unwrap();
        let meta = CategoryMeta::resolve("arrows", Some(file));

        assert_eq!(meta.category_name, "arrows");
        assert_eq!(meta.order_value(), 2.0);
        assert_eq!(meta.icon("left").and_then(|i| i.name.as_deref()), Some("左"));
        assert!(meta.icon("right").is_none());
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!(CategoryMetaFile::parse("{ not json").is_err());
        assert!(CategoryMetaFile::parse("[1, 2]").is_err());
        assert!(CategoryMetaFile::parse(r#"{ "icons": { "left": "左" } }"#).is_err());
    }

    #[test]
    fn test_order_serializes_verbatim() {
        let file = CategoryMetaFile::parse(r#"{ "categoryName": "A", "order": 1 }"#).unwrap();
        let json = serde_json::to_string(&CategoryMeta::resolve("a", Some(file))).unwrap();
        assert_eq!(json, r#"{"categoryName":"A","order":1,"icons":{}}"#);
    }

    #[test]
    fn test_every_directory_gets_default() {
        let temp = TempDir::new().unwrap();
        for name in ["a", "b", "c"] {
            touch(temp.path(), &format!("{}/icon.svg", name), "<svg/>");
        }

        let metadata = IconStore::new(temp.path()).resolve_metadata().unwrap();
        assert_eq!(metadata.len(), 3);
        for (key, meta) in &metadata {
            assert_eq!(meta, &CategoryMeta::default_for(key));
        }
    }

    #[test]
    fn test_sidecar_and_fallbacks() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "arrows/left.svg", "<svg/>");
        touch(temp.path(), "arrows/right.svg", "<svg/>");
        touch(
            temp.path(),
            "arrows/metadata.json",
            r#"{ "categoryName": "箭头", "icons": { "left": { "name": "左" } } }"#,
        );
        touch(temp.path(), "shapes/circle.svg", "<svg/>");
        touch(temp.path(), "broken/metadata.json", "{ invalid");

        let metadata = IconStore::new(temp.path()).resolve_metadata().unwrap();

        assert_eq!(metadata.len(), 3);
        assert_eq!(metadata["arrows"].category_name, "箭头");
        assert_eq!(metadata["arrows"].icons["left"].name.as_deref(), Some("左"));
        assert_eq!(metadata["shapes"], CategoryMeta::default_for("shapes"));
        assert_eq!(metadata["broken"], CategoryMeta::default_for("broken"));
    }

    #[test]
    fn test_missing_root_gives_empty_metadata() {
        let temp = TempDir::new().unwrap();
        let metadata = IconStore::new(temp.path().join("missing")).resolve_metadata().unwrap();
        assert!(metadata.is_empty());
    }

    #[test]
    fn test_shared_metadata_dir() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("icons");
        let shared = temp.path().join("meta");
        touch(&root, "arrows/left.svg", "<svg/>");
        touch(&root, "arrows/metadata.json", r#"{ "categoryName": "sidecar" }"#);
        touch(&root, "shapes/circle.svg", "<svg/>");
        touch(&root, "shapes/metadata.json", r#"{ "categoryName": "Shapes" }"#);
        touch(&shared, "arrows.json", r#"{ "categoryName": "Arrows", "order": -1 }"#);
        touch(&shared, "shapes.json", "{ broken");
        touch(&shared, "orphan.json", r#"{ "description": "no directory" }"#);
        touch(&shared, "notes.txt", "ignored");

        let store = IconStore::new(&root).with_metadata_dir(Some(&shared));
        let metadata = store.resolve_metadata().unwrap();

        assert_eq!(metadata.len(), 3);
        assert_eq!(metadata["arrows"].category_name, "Arrows");
        assert_eq!(metadata["arrows"].order_value(), -1.0);
        assert_eq!(metadata["shapes"].category_name, "Shapes");
        assert_eq!(metadata["orphan"].category_name, "orphan");
        assert_eq!(metadata["orphan"].description.as_deref(), Some("no directory"));
    }
}
