//! Request path construction.
//!
//! Paths follow the backend's trailing-slash convention: every collection and
//! item path ends with [`SEPARATOR`].
//!
//! # Example
//!
//! ```rust
//! use nemo_api::urls::{resolve_collection_path, resolve_item_path, PathSegment};
//!
//! let list = resolve_collection_path(
//!     "http://localhost/api/v1/dashboard",
//!     [Some(PathSegment::from("project"))],
//! );
//! assert_eq!(list, "http://localhost/api/v1/dashboard/project/");
//! assert_eq!(resolve_item_path(&list, 7), "http://localhost/api/v1/dashboard/project/7/");
//! ```

use std::fmt;

/// Separator between path segments.
pub const SEPARATOR: char = '/';

/// A single segment of a resource path.
///
/// Numeric identifiers are rendered as-is; names are percent-encoded.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A numeric identifier (e.g., a project primary key).
    Id(u64),
    /// A literal name or string identifier (e.g., `"environment"`, an item code).
    Name(String),
}

impl PathSegment {
    fn is_empty(&self) -> bool {
        matches!(self, Self::Name(name) if name.is_empty())
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => f.write_str(&urlencoding::encode(name)),
        }
    }
}

impl From<u64> for PathSegment {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

impl From<u32> for PathSegment {
    fn from(id: u32) -> Self {
        Self::Id(u64::from(id))
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// Derives the path of one item from the path of its list.
///
/// If `list_path` already ends with [`SEPARATOR`] the identifier is appended
/// directly, otherwise a separator is inserted first. The result always ends
/// with a separator.
///
/// Applying this to an item path again yields a nested, wrong path; callers
/// must pass a list path.
///
/// # Example
///
/// ```rust
/// use nemo_api::urls::resolve_item_path;
///
/// assert_eq!(resolve_item_path("/goal/", 3), "/goal/3/");
/// assert_eq!(resolve_item_path("/goal", "abc"), "/goal/abc/");
/// ```
#[must_use]
pub fn resolve_item_path(list_path: &str, item_id: impl fmt::Display) -> String {
    if list_path.ends_with(SEPARATOR) {
        format!("{list_path}{item_id}{SEPARATOR}")
    } else {
        format!("{list_path}{SEPARATOR}{item_id}{SEPARATOR}")
    }
}

/// Joins `root` and `segments` into a collection path.
///
/// `None` segments are skipped entirely, as are empty names. The root's own
/// trailing separator is not doubled, and the result ends with a separator.
///
/// # Example
///
/// ```rust
/// use nemo_api::urls::{resolve_collection_path, PathSegment};
///
/// let path = resolve_collection_path(
///     "/api/v1/dashboard/project/1/",
///     [Some(PathSegment::from("metric")), None, Some(PathSegment::from("overall-coverage"))],
/// );
/// assert_eq!(path, "/api/v1/dashboard/project/1/metric/overall-coverage/");
/// ```
#[must_use]
pub fn resolve_collection_path<I>(root: &str, segments: I) -> String
where
    I: IntoIterator<Item = Option<PathSegment>>,
{
    let mut path = root.trim_end_matches(SEPARATOR).to_string();
    for segment in segments.into_iter().flatten() {
        if segment.is_empty() {
            continue;
        }
        path.push(SEPARATOR);
        path.push_str(&segment.to_string());
    }
    path.push(SEPARATOR);
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_path_for_list_with_trailing_separator() {
        for list in ["/project/", "http://localhost/api/v1/goal/", "/"] {
            for id in [0_u64, 1, 42, 9_999_999] {
                assert_eq!(resolve_item_path(list, id), format!("{list}{id}/"));
            }
        }
    }

    #[test]
    fn test_item_path_for_list_without_trailing_separator() {
        for list in ["/project", "http://localhost/api/v1/goal", ""] {
            for id in ["a", "item-code", "0"] {
                assert_eq!(resolve_item_path(list, id), format!("{list}/{id}/"));
            }
        }
    }

    #[test]
    fn test_item_path_applied_twice_nests() {
        let once = resolve_item_path("/goal/", 1);
        assert_eq!(resolve_item_path(&once, 1), "/goal/1/1/");
    }

    #[test]
    fn test_collection_path_skips_absent_segments() {
        let path = resolve_collection_path(
            "/root",
            [
                Some(PathSegment::from("project")),
                None,
                Some(PathSegment::from(5_u64)),
            ],
        );
        assert_eq!(path, "/root/project/5/");
        assert!(!path.contains("null"));
    }

    #[test]
    fn test_collection_path_treats_zero_as_present() {
        let path = resolve_collection_path("/root", [Some(PathSegment::Id(0))]);
        assert_eq!(path, "/root/0/");
    }

    #[test]
    fn test_collection_path_does_not_double_separator() {
        let path = resolve_collection_path("/root/", [Some(PathSegment::from("x"))]);
        assert_eq!(path, "/root/x/");
    }

    #[test]
    fn test_collection_path_with_no_segments() {
        let path = resolve_collection_path("/root", std::iter::empty());
        assert_eq!(path, "/root/");
    }

    #[test]
    fn test_name_segments_are_percent_encoded() {
        let path = resolve_collection_path("/r", [Some(PathSegment::from("a b/c"))]);
        assert_eq!(path, "/r/a%20b%2Fc/");
    }
}
