//! Query string construction with explicit absent values.
//!
//! A [`QueryParams`] set keeps its entries in insertion order. An entry whose
//! value is [`QueryValue::Absent`] is dropped at serialization time; nothing
//! else is ever treated as absent, so `0`, `""` and `"null"`-looking strings
//! are all sent.

use std::fmt;

use chrono::NaiveDate;

/// The value of a single query parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryValue {
    /// A value that will be serialized.
    Present(String),
    /// The absent sentinel; the entry is omitted from the query string.
    Absent,
}

impl QueryValue {
    /// Creates a present value from anything displayable.
    #[must_use]
    pub fn present(value: impl fmt::Display) -> Self {
        Self::Present(value.to_string())
    }

    /// Returns `true` if this is the absent sentinel.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Present(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Present(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::present(value)
    }
}

impl From<u64> for QueryValue {
    fn from(value: u64) -> Self {
        Self::present(value)
    }
}

impl From<usize> for QueryValue {
    fn from(value: usize) -> Self {
        Self::present(value)
    }
}

impl From<NaiveDate> for QueryValue {
    fn from(value: NaiveDate) -> Self {
        Self::Present(value.format("%Y-%m-%d").to_string())
    }
}

impl<T: Into<Self>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// An ordered set of query parameters.
///
/// # Example
///
/// ```rust
/// use nemo_api::urls::QueryParams;
///
/// let params = QueryParams::new()
///     .with("limit", 10_u32)
///     .with("offset", None::<u32>);
/// assert_eq!(params.to_query_string(), "limit=10");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, QueryValue)>,
}

impl QueryParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds a parameter, returning the set for chaining.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.push(name, value);
        self
    }

    /// Adds a parameter in place.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<QueryValue>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Returns the number of entries, absent ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entries were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Serializes the present entries; see [`build_query_string`].
    #[must_use]
    pub fn to_query_string(&self) -> String {
        build_query_string(self)
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<QueryValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.push(name, value);
        }
        params
    }
}

/// Serializes the present entries of `params` as `name=value` pairs joined by `&`.
///
/// Values are percent-encoded. Returns an empty string, without a leading
/// `?`, when every entry is absent or the set is empty.
#[must_use]
pub fn build_query_string(params: &QueryParams) -> String {
    params
        .iter()
        .filter_map(|(name, value)| match value {
            QueryValue::Present(v) => Some(format!("{name}={}", urlencoding::encode(v))),
            QueryValue::Absent => None,
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Appends the query string of `params` to `path`.
///
/// The `?` is only added when the query string is non-empty, so the result
/// never ends in a bare `?`.
///
/// # Example
///
/// ```rust
/// use nemo_api::urls::{append_query, QueryParams};
///
/// let empty = QueryParams::new().with("period_start_date", None::<String>);
/// assert_eq!(append_query("/metric/", &empty), "/metric/");
///
/// let params = QueryParams::new().with("checking_period_days", 30_u32);
/// assert_eq!(append_query("/metric/", &params), "/metric/?checking_period_days=30");
/// ```
#[must_use]
pub fn append_query(path: &str, params: &QueryParams) -> String {
    let query = build_query_string(params);
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}
