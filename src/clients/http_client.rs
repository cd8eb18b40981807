//! HTTP client for dashboard API communication.
//!
//! This module provides the [`HttpClient`] type. Each call is a single
//! attempt: the outcome is decoded or classified once, surfaced through the
//! injected [`Notifier`] when requested, and either returned, replaced by the
//! caller's fallback, or raised as a [`RequestError`].

use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::auth::Session;
use crate::clients::errors::{ErrorKind, RequestError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::clients::notifier::{Notification, Notifier, NETWORK_NOTIFICATION_KEY};
use crate::config::NemoConfig;

/// Crate version from Cargo.toml.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the header echoing the CSRF cookie.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// HTTP client for the dashboard API.
///
/// The client holds no per-call state: concurrent calls are independent and
/// complete in any order. No retry or timeout is applied here.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use nemo_api::{HttpClient, NemoConfig, ApiUrl, Session, ToastNotifier};
/// use nemo_api::urls::ApiUrls;
///
/// let config = NemoConfig::builder()
///     .api_url(ApiUrl::new("https://nemo.example.com").unwrap())
///     .build()
///     .unwrap();
/// let session = Session::from_cookie_header("csrftoken=abc");
/// let client = HttpClient::new(&config, &session, Arc::new(ToastNotifier::new()));
///
/// let urls = ApiUrls::new(&config);
/// let user = client.get(&urls.user(), true, None).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    default_headers: HashMap<String, String>,
    notifier: Arc<dyn Notifier>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration providing the user agent prefix
    /// * `session` - The session providing the CSRF token
    /// * `notifier` - Receives failure notifications
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(config: &NemoConfig, session: &Session, notifier: Arc<dyn Notifier>) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}Nemo API Client v{CLIENT_VERSION}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        if let Some(token) = session.csrf_token() {
            default_headers.insert(CSRF_HEADER.to_string(), token.as_ref().to_string());
        }

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            default_headers,
            notifier,
        }
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the notifier failures are reported to.
    #[must_use]
    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    /// Sends `request` and returns its decoded payload.
    ///
    /// - 200/201: the decoded JSON body
    /// - 204, or an empty/`null` body: the fallback if one was set, else `None`
    /// - anything else: a classified failure, notified if the request asks
    ///   for it, then replaced by the fallback if one was set
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] when the call fails and the request carries
    /// no fallback.
    pub async fn execute(&self, request: HttpRequest) -> Result<Option<Value>, RequestError> {
        let notify = request.notify_on_error();
        let outcome = self.send(&request).await;
        let fallback = request.into_fallback();

        match outcome {
            Ok(payload) => Ok(payload.filter(|v| !v.is_null()).or(fallback)),
            Err(error) => {
                self.report(&error, notify);
                match fallback {
                    Some(fallback) => Ok(Some(fallback)),
                    None => Err(error),
                }
            }
        }
    }

    /// Sends a GET request to `url`.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn get(
        &self,
        url: &str,
        notify_on_error: bool,
        fallback: Option<Value>,
    ) -> Result<Option<Value>, RequestError> {
        let mut request = HttpRequest::get(url).with_notify_on_error(notify_on_error);
        if let Some(fallback) = fallback {
            request = request.with_fallback(fallback);
        }
        self.execute(request).await
    }

    /// Sends `request` and deserializes the payload into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] as [`execute`](Self::execute) does, or with
    /// [`ErrorKind::Decode`] if the payload does not match `T`.
    pub async fn execute_as<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
    ) -> Result<Option<T>, RequestError> {
        let notify = request.notify_on_error();
        let payload = self.execute(request).await?;
        payload
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| {
                let error = RequestError::decode(None, &e);
                self.report(&error, notify);
                error
            })
    }

    async fn send(&self, request: &HttpRequest) -> Result<Option<Value>, RequestError> {
        let method = request.http_method();
        let url = request.url();
        tracing::debug!(%method, url, "sending request");

        let mut req_builder = match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
            HttpMethod::Patch => self.client.patch(url),
            HttpMethod::Delete => self.client.delete(url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(body) = request.body() {
            req_builder = req_builder.body(body.to_string());
        }

        let res = req_builder.send().await.map_err(RequestError::network)?;

        let status = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.text().await.map_err(RequestError::network)?;
        let response = HttpResponse::new(status, headers, body);

        if !response.is_success() {
            let error = RequestError::from_response(response);
            if let ErrorKind::OtherHttp { status } = error.kind {
                let body = error.response.as_ref().map_or("", |r| r.body.as_str());
                tracing::error!(
                    "{}\n\nrequest url: {url}\nstatus: {status}\nresponse body:\n{body}",
                    error.message
                );
            }
            return Err(error);
        }

        if status == 204 {
            return Ok(None);
        }
        match response.json() {
            Ok(payload) => Ok(payload),
            Err(e) => Err(RequestError::decode(Some(response), &e)),
        }
    }

    fn report(&self, error: &RequestError, notify: bool) {
        tracing::debug!(kind = %error.kind, "request failed: {}", error.message);
        if !notify {
            return;
        }
        let notification = match error.kind {
            ErrorKind::Network => Notification {
                key: NETWORK_NOTIFICATION_KEY.to_string(),
                message: error.message.clone(),
            },
            _ => Notification::from_message(error.message.clone()),
        };
        self.notifier.notify(notification);
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}
