//! Gallery view-model
//!
//! Pure derivations from loaded data to what the gallery shows: category
//! ordering, search filtering, name sorting and grouping by category.
//! Nothing here does I/O; [`crate::GalleryState`] recomputes the view
//! whenever its inputs change.

use crate::collate::locale_cmp;
use app_fs::{IconMeta, IconRecord, Metadata, ALL_CATEGORIES};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Icon name ordering, cycled by the sort toggle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortMode {
    /// Keep the listing order
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortMode {
    /// Next state of the toggle: none -> asc -> desc -> none
    pub fn next(self) -> Self {
        match self {
            SortMode::None => SortMode::Ascending,
            SortMode::Ascending => SortMode::Descending,
            SortMode::Descending => SortMode::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::None => "none",
            SortMode::Ascending => "asc",
            SortMode::Descending => "desc",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(SortMode::None),
            "asc" => Ok(SortMode::Ascending),
            "desc" => Ok(SortMode::Descending),
            other => Err(format!("unknown sort mode: {}", other)),
        }
    }
}

/// Which categories the icon listing covers
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategorySelection {
    #[default]
    All,
    Category(String),
}

impl CategorySelection {
    /// Parse a `category` query value; empty or `all` selects everything
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            None | Some("") | Some(ALL_CATEGORIES) => CategorySelection::All,
            Some(category) => CategorySelection::Category(category.to_string()),
        }
    }

    /// The category, `None` for all
    pub fn category(&self) -> Option<&str> {
        match self {
            CategorySelection::All => None,
            CategorySelection::Category(category) => Some(category),
        }
    }

    /// Value sent as the `category` query parameter
    pub fn as_param(&self) -> &str {
        self.category().unwrap_or(ALL_CATEGORIES)
    }
}

/// Icons of one category after filtering and sorting
#[derive(Debug, Clone, PartialEq)]
pub struct IconGroup<'a> {
    pub category: String,
    pub display_name: String,
    pub description: Option<String>,
    pub icons: Vec<&'a IconRecord>,
}

/// Everything the gallery renders for the current state
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryView<'a> {
    /// Category keys in display order, including empty ones
    pub categories: Vec<String>,
    /// Non-empty groups in category order
    pub groups: Vec<IconGroup<'a>>,
    /// Icons loaded before filtering
    pub total: usize,
}

impl GalleryView<'_> {
    /// Number of icons left after filtering
    pub fn matched(&self) -> usize {
        self.groups.iter().map(|g| g.icons.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Sort category keys by metadata `order` (missing is 0), then by name
pub fn ordered_categories(categories: &[String], metadata: &Metadata) -> Vec<String> {
    let order = |key: &str| metadata.get(key).map_or(0.0, |m| m.order_value());

    let mut ordered = categories.to_vec();
    ordered.sort_by(|a, b| {
        order(a)
            .total_cmp(&order(b))
            .then_with(|| locale_cmp(a, b))
    });
    ordered
}

/// Display name of a category: its `categoryName`, else the key
pub fn category_display_name<'a>(category: &'a str, metadata: &'a Metadata) -> &'a str {
    metadata
        .get(category)
        .map_or(category, |m| m.category_name.as_str())
}

/// Per-icon metadata, if any
pub fn icon_meta<'a>(icon: &IconRecord, metadata: &'a Metadata) -> Option<&'a IconMeta> {
    metadata.get(&icon.category)?.icon(&icon.name)
}

/// Display name of an icon: its metadata `name`, else the base name
pub fn icon_display_name<'a>(icon: &'a IconRecord, metadata: &'a Metadata) -> &'a str {
    icon_meta(icon, metadata)
        .and_then(|m| m.name.as_deref())
        .unwrap_or(&icon.name)
}

/// Text an icon is searched by: base name, category key, category display
/// name, icon display name and description, space-joined and lower-cased.
/// Absent metadata fields are left out.
pub fn search_text(icon: &IconRecord, metadata: &Metadata) -> String {
    let category = metadata.get(&icon.category);
    let meta = icon_meta(icon, metadata);

    let parts = [
        Some(icon.name.as_str()),
        Some(icon.category.as_str()),
        category.map(|c| c.category_name.as_str()),
        meta.and_then(|m| m.name.as_deref()),
        meta.and_then(|m| m.description.as_deref()),
    ];

    parts.into_iter().flatten().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Case-insensitive substring match; an empty query matches everything
pub fn matches_query(icon: &IconRecord, metadata: &Metadata, query: &str) -> bool {
    query.is_empty() || search_text(icon, metadata).contains(&query.to_lowercase())
}

/// Icons matching `query`, in their original order
pub fn filter_icons<'a>(icons: &'a [IconRecord], metadata: &Metadata, query: &str) -> Vec<&'a IconRecord> {
    icons
        .iter()
        .filter(|icon| matches_query(icon, metadata, query))
        .collect()
}

/// Stable sort by lower-cased base name
pub fn sort_icons(icons: &mut [&IconRecord], mode: SortMode) {
    let by_name = |a: &&IconRecord, b: &&IconRecord| -> Ordering {
        locale_cmp(&a.name.to_lowercase(), &b.name.to_lowercase())
    };

    match mode {
        SortMode::None => {}
        SortMode::Ascending => icons.sort_by(by_name),
        SortMode::Descending => icons.sort_by(|a, b| by_name(b, a)),
    }
}

/// Partition icons by category, in category display order. Categories
/// without icons get no group; icons of unlisted categories still do.
pub fn group_icons<'a>(
    icons: &[&'a IconRecord],
    categories: &[String],
    metadata: &Metadata,
) -> Vec<IconGroup<'a>> {
    let mut keys = categories.to_vec();
    for icon in icons {
        if !keys.contains(&icon.category) {
            keys.push(icon.category.clone());
        }
    }

    ordered_categories(&keys, metadata)
        .into_iter()
        .filter_map(|category| {
            let members: Vec<&IconRecord> = icons
                .iter()
                .copied()
                .filter(|icon| icon.category == category)
                .collect();
            if members.is_empty() {
                return None;
            }

            Some(IconGroup {
                display_name: category_display_name(&category, metadata).to_string(),
                description: metadata.get(&category).and_then(|m| m.description.clone()),
                icons: members,
                category,
            })
        })
        .collect()
}

/// Filter, sort and group in one pass
pub fn derive_view<'a>(
    categories: &[String],
    metadata: &Metadata,
    icons: &'a [IconRecord],
    query: &str,
    sort: SortMode,
) -> GalleryView<'a> {
    let mut matched = filter_icons(icons, metadata, query);
    sort_icons(&mut matched, sort);

    GalleryView {
        categories: ordered_categories(categories, metadata),
        groups: group_icons(&matched, categories, metadata),
        total: icons.len(),
    }
}
