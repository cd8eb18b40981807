//! # Nemo API Rust Client
//!
//! A Rust client for the Nemo dashboard API, providing type-safe
//! configuration, endpoint URL resolution, and a JSON request client with
//! uniform failure classification and deduplicated error notifications.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`NemoConfig`] and [`NemoConfigBuilder`]
//! - Validated newtypes for the API URL and the CSRF token
//! - Endpoint URL resolution for every dashboard and DevOps metrics resource
//!   via [`urls::ApiUrls`]
//! - An async request client that classifies failures into [`ErrorKind`]s
//!   and reports them through a [`Notifier`]
//! - Session handling and a login probe via [`auth`]
//! - Report lists, metric charts and value formatting via [`dashboard`]
//!
//! ## Quick Start
//!
//! ```rust
//! use nemo_api::{NemoConfig, ApiUrl};
//! use nemo_api::urls::ApiUrls;
//!
//! let config = NemoConfig::builder()
//!     .api_url(ApiUrl::new("https://nemo.example.com").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let urls = ApiUrls::new(&config);
//! assert_eq!(
//!     urls.project(3),
//!     "https://nemo.example.com/api/v1/dashboard/project/3/"
//! );
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use nemo_api::{HttpClient, HttpMethod, HttpRequest, Session, ToastNotifier};
//! use serde_json::json;
//!
//! let session = Session::from_cookie_header(cookie_header);
//! let toasts = Arc::new(ToastNotifier::new());
//! let client = HttpClient::new(&config, &session, toasts.clone());
//!
//! // GET with a fallback: failures are notified, then replaced
//! let projects = client
//!     .get(&urls.projects_list(), true, Some(json!({"results": []})))
//!     .await?;
//!
//! // POST without notifications: the caller handles field errors
//! let request = HttpRequest::builder(HttpMethod::Post, urls.project_goals_list(1))
//!     .body(json!({"title": "Reach level 3"}))
//!     .notify_on_error(false)
//!     .build()?;
//! match client.execute(request).await {
//!     Ok(goal) => println!("created {goal:?}"),
//!     Err(e) => println!("{:?}", e.field_errors()),
//! }
//! ```
//!
//! ## Report Lists
//!
//! ```rust,ignore
//! use nemo_api::dashboard::{DashboardClient, ReportFeed, ServiceStatusReports};
//!
//! let dashboard = DashboardClient::new(&config, &session, toasts);
//! let mut feed = ReportFeed::new(ServiceStatusReports::new(Some(1), Some(4)));
//! feed.reload(&dashboard).await?;
//! if feed.has_more() {
//!     feed.load_more(&dashboard).await?;
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All client types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Single attempt**: Failures are classified once and never retried

pub mod auth;
pub mod clients;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod urls;

// Re-export public types at crate root for convenience
pub use auth::{is_logged_in, Session};
pub use config::{ApiUrl, AuthMode, CsrfToken, NemoConfig, NemoConfigBuilder};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ErrorKind, HttpClient, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    InvalidHttpRequestError, Notification, Notifier, RequestError, SilentNotifier, ToastNotifier,
};

// Re-export dashboard types
pub use dashboard::{DashboardClient, DashboardError};
pub use urls::ApiUrls;
