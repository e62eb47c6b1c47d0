//! Path component checks for names that arrive from HTTP queries

/// Characters that would let a name address something other than a direct
/// child of the store root
#[cfg(windows)]
const FORBIDDEN_CHARS: &[char] = &['/', '\\', ':'];

#[cfg(not(windows))]
const FORBIDDEN_CHARS: &[char] = &['/', '\\'];

/// Names that are never a real category
const RESERVED_NAMES: &[&str] = &[".", ".."];

/// Check that `name` is a single path component naming a direct child.
///
/// Rejects empty names, `.` and `..`, `/` and `\` (and drive prefixes on
/// Windows) and control characters.
pub fn is_safe_component(name: &str) -> bool {
    if name.is_empty() || RESERVED_NAMES.contains(&name) {
        return false;
    }

    !name
        .chars()
        .any(|c| FORBIDDEN_CHARS.contains(&c) || c.is_control())
}

/// Normalize a public URL route to `/segment[/segment...]` with no
/// trailing slash. An empty route becomes `/`.
pub fn normalize_route(route: &str) -> String {
    let trimmed = route.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_names() {
        assert!(is_safe_component("arrows"));
        assert!(is_safe_component("图标"));
        assert!(is_safe_component("with space"));
        assert!(is_safe_component(".hidden"));
    }

    #[test]
    fn test_unsafe_names() {
        assert!(!is_safe_component(""));
        assert!(!is_safe_component("."));
        assert!(!is_safe_component(".."));
        assert!(!is_safe_component("../etc"));
        assert!(!is_safe_component("a/b"));
        assert!(!is_safe_component("nul\0byte"));
        assert!(!is_safe_component("ctl\x01dir"));
        assert!(!is_safe_component("a\\b"));
    }

    #[cfg(windows)]
    #[test]
    fn test_unsafe_windows_names() {
        assert!(!is_safe_component("C:"));
    }

    #[test]
    fn test_normalize_route() {
        assert_eq!(normalize_route("/icons"), "/icons");
        assert_eq!(normalize_route("icons/"), "/icons");
        assert_eq!(normalize_route("//static/icons//"), "/static/icons");
        assert_eq!(normalize_route(""), "/");
        assert_eq!(normalize_route("/"), "/");
    }
}
