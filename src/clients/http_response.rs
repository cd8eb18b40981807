//! HTTP response type for the Nemo API client.

use std::collections::HashMap;

use serde_json::Value;

/// A raw response from the dashboard API.
///
/// The body is kept as text so that error bodies which are not JSON (proxy
/// error pages, for example) remain available for logging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub status: u16,
    /// Response headers, lowercased names (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(status: u16, headers: HashMap<String, Vec<String>>, body: String) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Decodes the body as JSON.
    ///
    /// An empty (or whitespace-only) body decodes to `None`.
    ///
    /// # Errors
    ///
    /// Returns the decoding error if the body is not valid JSON.
    pub fn json(&self) -> Result<Option<Value>, serde_json::Error> {
        if self.body.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&self.body).map(Some)
    }

    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns `true` for 200, 201 and 204, the statuses treated as success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, 200 | 201 | 204)
    }
}
