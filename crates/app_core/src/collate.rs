//! Locale-aware string ordering
//!
//! Strings are compared by their transliterated, lower-cased form first, so
//! "Édit" sorts with "edit" and CJK names sort by romanization. Ties fall
//! back to the lower-cased and then the raw string, which keeps the order
//! total.

use std::cmp::Ordering;

/// Compare two strings the way a user expects them listed
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

fn collation_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut names: Vec<&str>) -> Vec<&str> {
        names.sort_by(|a, b| locale_cmp(a, b));
        names
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(sorted(vec!["beta", "Alpha", "gamma"]), vec!["Alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_accents_sort_with_base_letter() {
        assert_eq!(sorted(vec!["zebra", "Éclair", "apple"]), vec!["apple", "Éclair", "zebra"]);
    }

    #[test]
    fn test_total_order() {
        assert_eq!(locale_cmp("a", "a"), Ordering::Equal);
        assert_ne!(locale_cmp("a", "A"), Ordering::Equal);
        assert_eq!(locale_cmp("a", "A"), locale_cmp("A", "a").reverse());
    }

    #[test]
    fn test_cjk_by_romanization() {
        // 北 (bei) before 南 (nan)
        assert_eq!(sorted(vec!["南", "北"]), vec!["北", "南"]);
    }
}
