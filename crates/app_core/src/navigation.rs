//! Navigation state: the gallery location mirrored in the URL query

use crate::CategorySelection;

/// Name of the query parameter carrying the selected category
pub const CATEGORY_PARAM: &str = "category";

/// Where the gallery is, as encoded in the page URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryLocation {
    pub selection: CategorySelection,
}

impl GalleryLocation {
    pub fn new(selection: CategorySelection) -> Self {
        Self { selection }
    }

    /// Read the location from a query string (with or without leading `?`).
    /// Unknown parameters are ignored; a missing, empty or `all` category
    /// selects everything.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);

        let category = query
            .split('&')
            .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
            .find(|(key, _)| decode(key) == CATEGORY_PARAM)
            .map(|(_, value)| decode(value));

        Self::new(CategorySelection::from_param(category.as_deref()))
    }

    /// Query string for this location, empty when every category is shown
    pub fn to_query(&self) -> String {
        match self.selection.category() {
            Some(category) => format!("{}={}", CATEGORY_PARAM, urlencoding::encode(category)),
            None => String::new(),
        }
    }
}

/// Percent-decode a form component, `+` meaning space
fn decode(component: &str) -> String {
    let spaced = component.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// Navigation history for the gallery
#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    /// Current location
    current: GalleryLocation,

    /// Navigation history stack
    history: Vec<GalleryLocation>,

    /// Forward stack (for redo)
    forward: Vec<GalleryLocation>,
}

impl NavigationState {
    pub fn new(initial: GalleryLocation) -> Self {
        Self {
            current: initial,
            history: Vec::new(),
            forward: Vec::new(),
        }
    }

    pub fn current(&self) -> &GalleryLocation {
        &self.current
    }

    /// Navigate to a new location. Returns false if already there.
    pub fn navigate_to(&mut self, location: GalleryLocation) -> bool {
        if location == self.current {
            return false;
        }

        // Save current to history
        let old = std::mem::replace(&mut self.current, location);
        self.history.push(old);

        // Clear forward stack
        self.forward.clear();
        true
    }

    /// Go back in history
    pub fn go_back(&mut self) -> bool {
        if let Some(prev) = self.history.pop() {
            let current = std::mem::replace(&mut self.current, prev);
            self.forward.push(current);
            true
        } else {
            false
        }
    }

    /// Go forward in history
    pub fn go_forward(&mut self) -> bool {
        if let Some(next) = self.forward.pop() {
            let current = std::mem::replace(&mut self.current, next);
            self.history.push(current);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(category: &str) -> GalleryLocation {
        GalleryLocation::new(CategorySelection::Category(category.to_string()))
    }

    #[test]
    fn test_query_round_trip() {
        let location = at("line icons/2024");
        let query = location.to_query();
        assert_eq!(query, "category=line%20icons%2F2024");
        assert_eq!(GalleryLocation::from_query(&query), location);
    }

    #[test]
    fn test_all_clears_parameter() {
        assert_eq!(GalleryLocation::default().to_query(), "");
        assert_eq!(GalleryLocation::from_query(""), GalleryLocation::default());
        assert_eq!(GalleryLocation::from_query("?category=all"), GalleryLocation::default());
        assert_eq!(GalleryLocation::from_query("category="), GalleryLocation::default());
    }

    #[test]
    fn test_from_query_ignores_other_params() {
        let location = GalleryLocation::from_query("?q=left&category=%E7%AE%AD%E5%A4%B4&sort=asc");
        assert_eq!(location, at("箭头"));
        assert_eq!(GalleryLocation::from_query("category=line+icons"), at("line icons"));
        assert_eq!(GalleryLocation::from_query("flag&category=a"), at("a"));
    }

    #[test]
    fn test_history() {
        let mut nav = NavigationState::default();
        assert!(nav.navigate_to(at("arrows")));
        assert!(!nav.navigate_to(at("arrows")));
        assert!(nav.navigate_to(at("shapes")));

        assert!(nav.go_back());
        assert_eq!(nav.current(), &at("arrows"));
        assert!(nav.go_back());
        assert_eq!(nav.current(), &GalleryLocation::default());
        assert!(!nav.go_back());

        assert!(nav.go_forward());
        assert_eq!(nav.current(), &at("arrows"));

        nav.navigate_to(at("misc"));
        assert!(!nav.go_forward());
    }
}
