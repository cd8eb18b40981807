//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Range;

/// A validated base URL of the dashboard API server.
///
/// The URL must have an alphabetic scheme and a non-empty host. Trailing
/// slashes are removed so that endpoint roots can be appended directly.
///
/// # Example
///
/// ```rust
/// use nemo_api::ApiUrl;
///
/// let url = ApiUrl::new("https://nemo.example.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://nemo.example.com");
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host(), "nemo.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiUrl {
    url: String,
    scheme_len: usize,
    host: Range<usize>,
}

impl ApiUrl {
    /// Creates a new validated API URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiUrl`] if the URL has no alphabetic
    /// scheme, no host, or carries a query string or fragment.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url: String = url.into();
        let url = url.trim().trim_end_matches('/').to_string();
        let invalid = || ConfigError::InvalidApiUrl { url: url.clone() };

        let Some((scheme, rest)) = url.split_once("://") else {
            return Err(invalid());
        };
        if scheme.is_empty() || !scheme.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(invalid());
        }
        // Endpoint paths are appended to the URL as is.
        if rest.contains(['?', '#']) {
            return Err(invalid());
        }
        let host_len = rest.find([':', '/']).unwrap_or(rest.len());
        if host_len == 0 {
            return Err(invalid());
        }

        let scheme_len = scheme.len();
        let host_start = scheme_len + "://".len();
        Ok(Self {
            url,
            scheme_len,
            host: host_start..host_start + host_len,
        })
    }

    /// Returns the URL scheme, such as `https`.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_len]
    }

    /// Returns the host, without port or path.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.url[self.host.clone()]
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl Serialize for ApiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A cross-site-request-forgery token issued by the dashboard backend.
///
/// The token is read from the `csrftoken` cookie and echoed back in the
/// `X-CSRFToken` header of every request.
///
/// # Security
///
/// The `Debug` implementation masks the token, displaying only
/// `CsrfToken(*****)`.
///
/// # Example
///
/// ```rust
/// use nemo_api::CsrfToken;
///
/// let token = CsrfToken::new("abc123").unwrap();
/// assert_eq!(token.as_ref(), "abc123");
/// assert_eq!(format!("{:?}", token), "CsrfToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    /// Creates a new CSRF token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCsrfToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ConfigError::EmptyCsrfToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for CsrfToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CsrfToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CsrfToken(*****)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_validates_format() {
        let url = ApiUrl::new("https://nemo.example.com").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host(), "nemo.example.com");

        let url = ApiUrl::new("http://localhost:8000").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host(), "localhost");

        let url = ApiUrl::new("https://example.com/nemo").unwrap();
        assert_eq!(url.host(), "example.com");
        assert_eq!(url.as_ref(), "https://example.com/nemo");
    }

    #[test]
    fn test_api_url_trims_trailing_slashes() {
        let url = ApiUrl::new("http://localhost//").unwrap();
        assert_eq!(url.as_ref(), "http://localhost");
    }

    #[test]
    fn test_api_url_rejects_invalid() {
        assert!(ApiUrl::new("").is_err());
        assert!(ApiUrl::new("nemo.example.com").is_err());
        assert!(ApiUrl::new("https://").is_err());
        assert!(ApiUrl::new("://example.com").is_err());
        assert!(ApiUrl::new("https://example.com/?x=1").is_err());
        assert!(ApiUrl::new("https://example.com#top").is_err());
        assert!(ApiUrl::new("https://:8000").is_err());
        assert!(ApiUrl::new("ht1p://example.com").is_err());
    }

    #[test]
    fn test_api_url_deserializes_with_validation() {
        let url: ApiUrl = serde_json::from_str(r#""http://localhost/""#).unwrap();
        assert_eq!(url.as_ref(), "http://localhost");

        let result: Result<ApiUrl, _> = serde_json::from_str(r#""localhost""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_csrf_token_rejects_empty_string() {
        assert!(matches!(
            CsrfToken::new(""),
            Err(ConfigError::EmptyCsrfToken)
        ));
    }

    #[test]
    fn test_csrf_token_masks_value_in_debug() {
        let token = CsrfToken::new("super-secret-token").unwrap();
        let debug_output = format!("{:?}", token);
        assert_eq!(debug_output, "CsrfToken(*****)");
        assert!(!debug_output.contains("super-secret-token"));
    }
}
