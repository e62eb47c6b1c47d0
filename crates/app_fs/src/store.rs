//! Icon store - category and icon listing

use crate::{is_safe_component, normalize_route, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File suffix that marks an icon (case-sensitive)
pub const SVG_SUFFIX: &str = ".svg";

/// Category filter value meaning "every category"
pub const ALL_CATEGORIES: &str = "all";

/// One SVG file in one category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IconRecord {
    /// File name without the `.svg` suffix
    pub name: String,
    /// Public URL of the asset
    pub path: String,
    pub category: String,
}

impl IconRecord {
    /// File name on disk, `name` plus the suffix
    pub fn file_name(&self) -> String {
        format!("{}{}", self.name, SVG_SUFFIX)
    }
}

/// Read-only view of an icon store root
#[derive(Debug, Clone)]
pub struct IconStore {
    root: PathBuf,
    public_route: String,
    metadata_dir: Option<PathBuf>,
}

impl IconStore {
    /// Create a store over `root`, serving icons under `/icons`
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            public_route: "/icons".to_string(),
            metadata_dir: None,
        }
    }

    /// Set the public route icon paths are built from
    pub fn with_public_route(mut self, route: &str) -> Self {
        self.public_route = normalize_route(route);
        self
    }

    /// Read `<category>.json` files from a shared directory as well as sidecars
    pub fn with_metadata_dir<P: Into<PathBuf>>(mut self, dir: Option<P>) -> Self {
        self.metadata_dir = dir.map(Into::into);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn public_route(&self) -> &str {
        &self.public_route
    }

    pub fn metadata_dir(&self) -> Option<&Path> {
        self.metadata_dir.as_deref()
    }

    /// List category directory names directly under the root.
    ///
    /// A missing root yields an empty list. Entries that cannot be inspected
    /// and names that are not safe path components are skipped. Only failure
    /// to read the root itself is an error.
    pub fn list_categories(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Icon store root not found: {}", self.root.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut categories = Vec::new();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {}: {}", self.root.display(), e);
                    continue;
                }
            };

            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    tracing::warn!("Skipping non UTF-8 category name: {:?}", raw);
                    continue;
                }
            };

            // Never advertise a category that cannot be requested back
            if !is_safe_component(&name) {
                tracing::warn!("Skipping unsafe category name: {:?}", name);
                continue;
            }

            // fs::metadata follows symlinks, so a linked directory counts
            match fs::metadata(entry.path()) {
                Ok(meta) if meta.is_dir() => categories.push(name),
                Ok(_) => {}
                Err(e) => tracing::warn!("Error checking directory {}: {}", name, e),
            }
        }

        categories.sort();
        tracing::debug!("Found {} categories", categories.len());
        Ok(categories)
    }

    /// List icons for one category, or for all of them when `category` is
    /// `None` or [`ALL_CATEGORIES`]
    pub fn list_icons(&self, category: Option<&str>) -> Result<Vec<IconRecord>> {
        match category {
            Some(category) if category != ALL_CATEGORIES => {
                Ok(self.list_category_icons(category))
            }
            _ => {
                let categories = self.list_categories()?;
                let mut icons = Vec::new();
                for category in &categories {
                    let found = self.list_category_icons(category);
                    tracing::debug!("Found {} icons in {}", found.len(), category);
                    icons.extend(found);
                }
                Ok(icons)
            }
        }
    }

    /// List the icons of a single category. Never fails: a missing,
    /// unreadable or unsafe category is empty.
    pub fn list_category_icons(&self, category: &str) -> Vec<IconRecord> {
        let Some(dir) = self.category_dir(category) else {
            tracing::warn!("Rejected category name {:?}", category);
            return Vec::new();
        };

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!("Cannot read category {}: {}", dir.display(), e);
                return Vec::new();
            }
        };

        let mut files: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let file_name = entry.file_name().into_string().ok()?;
                if !file_name.ends_with(SVG_SUFFIX) {
                    return None;
                }
                let is_file = fs::metadata(entry.path()).map(|m| m.is_file()).unwrap_or(false);
                is_file.then_some(file_name)
            })
            .collect();

        files.sort();

        files
            .into_iter()
            .map(|file_name| IconRecord {
                name: file_name
                    .strip_suffix(SVG_SUFFIX)
                    .unwrap_or(&file_name)
                    .to_string(),
                path: self.icon_url(category, &file_name),
                category: category.to_string(),
            })
            .collect()
    }

    /// Resolve the on-disk file of an icon, if the names are safe
    pub fn icon_file(&self, category: &str, name: &str) -> Option<PathBuf> {
        let file_name = format!("{}{}", name, SVG_SUFFIX);
        if !is_safe_component(&file_name) {
            return None;
        }
        self.category_dir(category).map(|dir| dir.join(file_name))
    }

    /// Directory of a category, `None` when the name is not a safe component
    pub(crate) fn category_dir(&self, category: &str) -> Option<PathBuf> {
        is_safe_component(category).then(|| self.root.join(category))
    }

    fn icon_url(&self, category: &str, file_name: &str) -> String {
        let base = self.public_route.trim_end_matches('/');
        format!("{}/{}/{}", base, category, file_name)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    pub(crate) fn touch(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn sample_store() -> (TempDir, IconStore) {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "arrows/left.svg", "<svg/>");
        touch(temp.path(), "arrows/right.svg", "<svg/>");
        touch(temp.path(), "arrows/notes.txt", "not an icon");
        touch(temp.path(), "arrows/UPPER.SVG", "wrong case");
        touch(temp.path(), "shapes/circle.svg", "<svg/>");
        touch(temp.path(), "readme.md", "root file");
        let store = IconStore::new(temp.path());
        (temp, store)
    }

    #[test]
    fn test_list_categories() {
        let (_temp, store) = sample_store();
        assert_eq!(store.list_categories().unwrap(), vec!["arrows", "shapes"]);
    }

    #[test]
    fn test_missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = IconStore::new(temp.path().join("nope"));
        assert!(store.list_categories().unwrap().is_empty());
        assert!(store.list_icons(None).unwrap().is_empty());
    }

    #[test]
    fn test_root_is_a_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "root", "file");
        let store = IconStore::new(temp.path().join("root"));
        assert!(store.list_categories().is_err());
    }

    #[test]
    fn test_list_category_icons() {
        let (temp, store) = sample_store();
        let icons = store.list_icons(Some("arrows")).unwrap();

        let names: Vec<_> = icons.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["left", "right"]);
        assert_eq!(icons[0].path, "/icons/arrows/left.svg");
        assert_eq!(icons[0].category, "arrows");

        for icon in &icons {
            assert!(temp.path().join("arrows").join(icon.file_name()).is_file());
        }
    }

    #[test]
    fn test_directory_named_svg_is_not_an_icon() {
        let (temp, store) = sample_store();
        fs::create_dir_all(temp.path().join("shapes/folder.svg")).unwrap();
        let names: Vec<_> = store
            .list_category_icons("shapes")
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["circle"]);
    }

    #[test]
    fn test_all_is_union_of_categories() {
        let (_temp, store) = sample_store();
        let all: HashSet<_> = store.list_icons(Some(ALL_CATEGORIES)).unwrap().into_iter().collect();
        let none: Vec<_> = store.list_icons(None).unwrap();
        assert_eq!(none.len(), all.len());

        let mut union = HashSet::new();
        for category in store.list_categories().unwrap() {
            union.extend(store.list_icons(Some(&category)).unwrap());
        }
        assert_eq!(all, union);
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_unknown_and_unsafe_categories() {
        let (_temp, store) = sample_store();
        assert!(store.list_icons(Some("missing")).unwrap().is_empty());
        assert!(store.list_icons(Some("..")).unwrap().is_empty());
        assert!(store.list_icons(Some("../arrows")).unwrap().is_empty());
        assert!(store.icon_file("..", "left").is_none());
        assert!(store.icon_file("arrows", "../../etc/passwd").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_unsafe_directory_names_are_not_categories() {
        let (temp, store) = sample_store();
        touch(temp.path(), "ctl\x01dir/a.svg", "<svg/>");
        touch(temp.path(), "back\\slash/b.svg", "<svg/>");

        let categories = store.list_categories().unwrap();
        assert_eq!(categories, vec!["arrows", "shapes"]);

        // Every advertised category lists back everything it holds
        let all = store.list_icons(None).unwrap();
        let per_category: usize = categories
            .iter()
            .map(|c| store.list_category_icons(c).len())
            .sum();
        assert_eq!(all.len(), per_category);
        assert!(all.iter().all(|icon| categories.contains(&icon.category)));

        let metadata = store.resolve_metadata().unwrap();
        assert_eq!(metadata.keys().collect::<Vec<_>>(), vec!["arrows", "shapes"]);
    }

    #[test]
    fn test_custom_public_route() {
        let (_temp, store) = sample_store();
        let store = store.with_public_route("static/svg/");
        let icons = store.list_icons(Some("shapes")).unwrap();
        assert_eq!(icons[0].path, "/static/svg/shapes/circle.svg");

        let store = store.with_public_route("/");
        let icons = store.list_icons(Some("shapes")).unwrap();
        assert_eq!(icons[0].path, "/shapes/circle.svg");
    }
}
