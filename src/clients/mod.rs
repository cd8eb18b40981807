//! HTTP client types for dashboard API communication.
//!
//! This module provides the request layer every dashboard screen goes
//! through. It sends JSON with the session's CSRF token, classifies
//! failures, and surfaces them as deduplicated notifications.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A raw response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, PATCH, DELETE)
//! - [`RequestError`] and [`ErrorKind`]: Classified failures
//! - [`Notifier`], [`ToastNotifier`], [`SilentNotifier`]: Failure surfacing
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use nemo_api::{HttpClient, HttpMethod, HttpRequest, Session, ToastNotifier};
//! use serde_json::json;
//!
//! let client = HttpClient::new(&config, &session, Arc::new(ToastNotifier::new()));
//!
//! let request = HttpRequest::builder(HttpMethod::Post, urls.project_goals_list(1))
//!     .body(json!({"title": "Reach level 3"}))
//!     .build()
//!     .unwrap();
//!
//! let created = client.execute(request).await?;
//! ```
//!
//! # Failure Handling
//!
//! There is no retry. A failure is classified once, reported to the
//! notifier if the request asks for it, and then either replaced by the
//! request's fallback or returned as a [`RequestError`].

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod notifier;

pub use errors::{
    ErrorKind, InvalidHttpRequestError, RequestError, FORBIDDEN_MESSAGE,
    NETWORK_FAILURE_MESSAGE, NOT_FOUND_MESSAGE, UNAUTHORIZED_MESSAGE,
};
pub use http_client::{HttpClient, CLIENT_VERSION, CSRF_HEADER};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use notifier::{
    Notification, Notifier, SilentNotifier, ToastNotifier, DEFAULT_TOAST_LIFETIME,
    NETWORK_NOTIFICATION_KEY,
};
