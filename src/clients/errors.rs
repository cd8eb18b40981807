//! Failure classification for dashboard API requests.
//!
//! Every failed call is classified exactly once, at the transport boundary,
//! into an [`ErrorKind`]. Callers branch on the kind instead of on raw
//! status codes.
//!
//! # Example
//!
//! ```rust,ignore
//! use nemo_api::clients::{ErrorKind, HttpRequest};
//!
//! match client.execute(request).await {
//!     Ok(payload) => println!("saved: {payload:?}"),
//!     Err(e) => match e.kind {
//!         ErrorKind::BadRequest => bind_form_errors(e.field_errors()),
//!         ErrorKind::Unauthorized => redirect_to_login(),
//!         ErrorKind::Network => show_offline_banner(),
//!         _ => show_banner(&e.message),
//!     },
//! }
//! ```

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::clients::http_response::HttpResponse;

/// Message of a 401 failure.
pub const UNAUTHORIZED_MESSAGE: &str = "You need to sign in before continuing";
/// Message of a 403 failure.
pub const FORBIDDEN_MESSAGE: &str = "Access to this action is forbidden.";
/// Message of a 404 failure.
pub const NOT_FOUND_MESSAGE: &str = "Resource not found";
/// Message of a transport failure.
pub const NETWORK_FAILURE_MESSAGE: &str = "Could not connect to server.";

/// Classification of a failed request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 400: the payload carries field-level detail.
    BadRequest,
    /// 401: the user is not signed in.
    Unauthorized,
    /// 403: the user may not perform the action.
    Forbidden,
    /// 404: the resource does not exist.
    NotFound,
    /// Any other status, including unexpected success codes.
    OtherHttp {
        /// The HTTP status code.
        status: u16,
    },
    /// No response was received.
    Network,
    /// A success response carried a body that could not be decoded.
    Decode,
}

impl ErrorKind {
    /// Classifies a status code that is not handled as success.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            status => Self::OtherHttp { status },
        }
    }

    /// Returns the status code this kind stands for, if it is HTTP-level.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest => Some(400),
            Self::Unauthorized => Some(401),
            Self::Forbidden => Some(403),
            Self::NotFound => Some(404),
            Self::OtherHttp { status } => Some(*status),
            Self::Network | Self::Decode => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest => f.write_str("bad request"),
            Self::Unauthorized => f.write_str("unauthorized"),
            Self::Forbidden => f.write_str("forbidden"),
            Self::NotFound => f.write_str("not found"),
            Self::OtherHttp { status } => write!(f, "http {status}"),
            Self::Network => f.write_str("network failure"),
            Self::Decode => f.write_str("invalid payload"),
        }
    }
}

/// A classified request failure.
///
/// Carries everything a caller needs to react without re-parsing: the
/// classification, a user-facing message, the raw response when one was
/// received, the decoded error payload when the body was JSON, and the
/// underlying transport error for network failures.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct RequestError {
    /// The failure classification.
    pub kind: ErrorKind,
    /// Human-readable message, also used as the notification text.
    pub message: String,
    /// The raw response, if one was received.
    pub response: Option<HttpResponse>,
    /// The decoded response body, if it was JSON.
    pub payload: Option<Value>,
    /// The transport error behind a network failure.
    #[source]
    pub cause: Option<reqwest::Error>,
}

impl RequestError {
    /// Builds the error for a response whose status is not a success code.
    #[must_use]
    pub fn from_response(response: HttpResponse) -> Self {
        let kind = ErrorKind::from_status(response.status);
        let payload = response.json().ok().flatten();

        let message = match kind {
            ErrorKind::BadRequest => payload.as_ref().map_or_else(
                || "Bad Request.".to_string(),
                |p| format!("Bad Request. {}", describe_payload(p)),
            ),
            ErrorKind::Unauthorized => UNAUTHORIZED_MESSAGE.to_string(),
            ErrorKind::Forbidden => FORBIDDEN_MESSAGE.to_string(),
            ErrorKind::NotFound => NOT_FOUND_MESSAGE.to_string(),
            ErrorKind::OtherHttp { status } => {
                let detail = payload
                    .as_ref()
                    .and_then(|p| p.get("detail"))
                    .and_then(Value::as_str)
                    .filter(|d| !d.is_empty());
                detail.map_or_else(
                    || format!("Unexpected server error ({status})"),
                    |d| format!("{d} (Status {status})"),
                )
            }
            ErrorKind::Network => NETWORK_FAILURE_MESSAGE.to_string(),
            ErrorKind::Decode => "Invalid response payload".to_string(),
        };

        Self {
            kind,
            message,
            response: Some(response),
            payload,
            cause: None,
        }
    }

    /// Builds the error for a call that received no response.
    #[must_use]
    pub fn network(cause: reqwest::Error) -> Self {
        Self {
            kind: ErrorKind::Network,
            message: NETWORK_FAILURE_MESSAGE.to_string(),
            response: None,
            payload: None,
            cause: Some(cause),
        }
    }

    /// Builds the error for a payload that could not be decoded.
    #[must_use]
    pub fn decode(response: Option<HttpResponse>, error: &serde_json::Error) -> Self {
        Self {
            kind: ErrorKind::Decode,
            message: format!("Invalid response payload: {error}"),
            response,
            payload: None,
            cause: None,
        }
    }

    /// Returns the HTTP status of the failure, if a response was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.response.as_ref().map(|r| r.status)
    }

    /// Returns the field-level messages of a 400 payload.
    ///
    /// Top-level keys are field names (or `non_field_errors`); values are a
    /// string or a list of strings. Anything else is rendered as JSON.
    #[must_use]
    pub fn field_errors(&self) -> HashMap<String, Vec<String>> {
        match (&self.kind, &self.payload) {
            (ErrorKind::BadRequest, Some(Value::Object(map))) => map
                .iter()
                .map(|(field, messages)| (field.clone(), messages_of(messages)))
                .collect(),
            _ => HashMap::new(),
        }
    }
}

// Verify RequestError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RequestError>();
};

fn messages_of(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map_or_else(|| item.to_string(), ToString::to_string))
            .collect(),
        other => vec![other.to_string()],
    }
}

/// Renders a 400 payload as `field: msg1,msg2 | other: msg`.
fn describe_payload(payload: &Value) -> String {
    match payload {
        Value::Object(map) => map
            .iter()
            .map(|(field, messages)| format!("{field}: {}", messages_of(messages).join(",")))
            .collect::<Vec<_>>()
            .join(" | "),
        other => messages_of(other).join(","),
    }
}

/// Error returned when a request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A body was attached to a method that cannot carry one.
    #[error("Cannot send a body with {method} requests.")]
    BodyNotAllowed {
        /// The HTTP method of the request.
        method: String,
    },

    /// The URL is empty.
    #[error("Request URL cannot be empty.")]
    EmptyUrl,
}
