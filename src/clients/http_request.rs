//! HTTP request types for the Nemo API client.
//!
//! This module provides the [`HttpRequest`] type and its builder. A request
//! names a fully resolved URL (see [`crate::urls`]), the method, an optional
//! JSON body, whether failures are surfaced as notifications, and an optional
//! fallback value returned instead of an error.

use std::fmt;

use serde_json::Value;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the dashboard API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Retrieve a resource.
    Get,
    /// Create a resource.
    Post,
    /// Replace a resource.
    Put,
    /// Partially update a resource.
    Patch,
    /// Remove a resource.
    Delete,
}

impl HttpMethod {
    /// Returns `true` if requests with this method may carry a body.
    #[must_use]
    pub const fn allows_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Patch => write!(f, "PATCH"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// A request to be sent to the dashboard API.
///
/// Requests are always valid once constructed: use [`HttpRequest::builder`]
/// or [`HttpRequest::get`].
///
/// # Example
///
/// ```rust
/// use nemo_api::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let request = HttpRequest::builder(HttpMethod::Post, "http://localhost/api/v1/dashboard/project/1/goal/")
///     .body(json!({"title": "Reach level 3"}))
///     .notify_on_error(false)
///     .build()
///     .unwrap();
///
/// assert!(!request.notify_on_error());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    http_method: HttpMethod,
    url: String,
    body: Option<Value>,
    notify_on_error: bool,
    fallback: Option<Value>,
}

impl HttpRequest {
    /// Creates a new builder for a request.
    #[must_use]
    pub fn builder(method: HttpMethod, url: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, url)
    }

    /// Creates a GET request that notifies on error and has no fallback.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            http_method: HttpMethod::Get,
            url: url.into(),
            body: None,
            notify_on_error: true,
            fallback: None,
        }
    }

    /// Sets whether failures produce a notification.
    #[must_use]
    pub const fn with_notify_on_error(mut self, notify: bool) -> Self {
        self.notify_on_error = notify;
        self
    }

    /// Sets the fallback value.
    #[must_use]
    pub fn with_fallback(mut self, fallback: impl Into<Value>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn http_method(&self) -> HttpMethod {
        self.http_method
    }

    /// Returns the resolved URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the JSON body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Returns whether failures produce a user-visible notification.
    #[must_use]
    pub const fn notify_on_error(&self) -> bool {
        self.notify_on_error
    }

    /// Returns the fallback value, if any.
    #[must_use]
    pub const fn fallback(&self) -> Option<&Value> {
        self.fallback.as_ref()
    }

    pub(crate) fn into_fallback(self) -> Option<Value> {
        self.fallback
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    url: String,
    body: Option<Value>,
    notify_on_error: bool,
    fallback: Option<Value>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            http_method: method,
            url: url.into(),
            body: None,
            notify_on_error: true,
            fallback: None,
        }
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets whether failures produce a notification (default `true`).
    #[must_use]
    pub const fn notify_on_error(mut self, notify: bool) -> Self {
        self.notify_on_error = notify;
        self
    }

    /// Sets the value returned instead of an error, and instead of an empty payload.
    #[must_use]
    pub fn fallback(mut self, fallback: impl Into<Value>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::EmptyUrl`] if the URL is blank, or
    /// [`InvalidHttpRequestError::BodyNotAllowed`] if a body was set on a GET
    /// or DELETE request.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        if self.url.trim().is_empty() {
            return Err(InvalidHttpRequestError::EmptyUrl);
        }
        if self.body.is_some() && !self.http_method.allows_body() {
            return Err(InvalidHttpRequestError::BodyNotAllowed {
                method: self.http_method.to_string(),
            });
        }

        Ok(HttpRequest {
            http_method: self.http_method,
            url: self.url,
            body: self.body,
            notify_on_error: self.notify_on_error,
            fallback: self.fallback,
        })
    }
}
