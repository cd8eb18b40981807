//! Dashboard client for the DevOps metrics screens.
//!
//! This module provides the [`DashboardClient`] type, which pairs an
//! [`HttpClient`] with the resolved [`ApiUrls`] and exposes the composite
//! operations the dashboard screens are built from.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::DateTime;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::auth::Session;
use crate::clients::{ErrorKind, HttpClient, HttpMethod, HttpRequest, Notification, Notifier};
use crate::config::NemoConfig;
use crate::dashboard::errors::DashboardError;
use crate::dashboard::models::{ChangeList, DropdownItem, Environment, Page};
use crate::urls::{append_query, resolve_item_path, ApiUrls, ChartMetric, MetricPeriod, QueryParams};

/// Field message returned when a report's `time` is missing or malformed.
pub const INVALID_TIME_MESSAGE: &str = "Selected time is not valid.";

/// Client for the dashboard API.
///
/// # Thread Safety
///
/// `DashboardClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use nemo_api::{NemoConfig, ApiUrl, Session, ToastNotifier};
/// use nemo_api::dashboard::DashboardClient;
///
/// let config = NemoConfig::builder()
///     .api_url(ApiUrl::new("https://nemo.example.com").unwrap())
///     .build()
///     .unwrap();
/// let session = Session::from_cookie_header(cookie_header);
/// let dashboard = DashboardClient::new(&config, &session, Arc::new(ToastNotifier::new()));
///
/// for item in dashboard.environments_as_dropdown_items(1).await? {
///     println!("{} => {}", item.value, item.label);
/// }
/// ```
#[derive(Debug)]
pub struct DashboardClient {
    http_client: HttpClient,
    urls: ApiUrls,
    default_checking_period_days: u32,
}

// Verify DashboardClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DashboardClient>();
};

impl DashboardClient {
    /// Creates a dashboard client from configuration.
    #[must_use]
    pub fn new(config: &NemoConfig, session: &Session, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            http_client: HttpClient::new(config, session, notifier),
            urls: ApiUrls::new(config),
            default_checking_period_days: config.default_checking_period_days(),
        }
    }

    /// Creates a dashboard client from an existing HTTP client and URL set.
    ///
    /// Charts without a checking period use `default_checking_period_days`.
    #[must_use]
    pub const fn from_parts(
        http_client: HttpClient,
        urls: ApiUrls,
        default_checking_period_days: u32,
    ) -> Self {
        Self {
            http_client,
            urls,
            default_checking_period_days,
        }
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Returns the resolved endpoint URLs.
    #[must_use]
    pub const fn urls(&self) -> &ApiUrls {
        &self.urls
    }

    /// Fetches the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Request`] if the request fails.
    pub async fn user(&self) -> Result<Option<Value>, DashboardError> {
        Ok(self.http_client.get(&self.urls.user(), true, None).await?)
    }

    /// Fetches the environments of a project.
    ///
    /// A failed request is notified and yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Request`] if the payload is not a page of
    /// environments.
    pub async fn environments(&self, project_id: u64) -> Result<Vec<Environment>, DashboardError> {
        let request = HttpRequest::get(self.urls.devops_metrics_environments_list(project_id))
            .with_fallback(json!({"results": []}));
        let page: Option<Page<Environment>> = self.http_client.execute_as(request).await?;
        Ok(page.unwrap_or_default().results)
    }

    /// Fetches the environments of a project as `{label: name, value: id}` items.
    ///
    /// # Errors
    ///
    /// See [`environments`](Self::environments).
    pub async fn environments_as_dropdown_items(
        &self,
        project_id: u64,
    ) -> Result<Vec<DropdownItem>, DashboardError> {
        let environments = self.environments(project_id).await?;
        Ok(environments.iter().map(DropdownItem::from).collect())
    }

    /// Fetches a change list.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Request`] if the request fails or the
    /// payload is not a change list.
    pub async fn change_list(
        &self,
        project_id: u64,
        change_list_id: u64,
    ) -> Result<Option<ChangeList>, DashboardError> {
        let url = self.urls.devops_metrics_change_list(project_id, change_list_id);
        Ok(self.http_client.execute_as(HttpRequest::get(url)).await?)
    }

    /// Fetches the chart data of a DevOps metric.
    ///
    /// A period without a checking period uses the configured default.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Request`] if the request fails.
    pub async fn metric_chart(
        &self,
        metric: ChartMetric,
        project_id: u64,
        environment_id: u64,
        period: &MetricPeriod,
    ) -> Result<Option<Value>, DashboardError> {
        let period = match period.checking_period_days {
            Some(_) => *period,
            None => period.with_checking_period_days(self.default_checking_period_days),
        };
        let url = self
            .urls
            .devops_metrics_chart(metric, project_id, environment_id, &period);
        Ok(self.http_client.get(&url, true, None).await?)
    }

    /// Fetches one page of a limit/offset paginated list.
    ///
    /// An empty answer is treated as an empty last page.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Request`] if the request fails or the
    /// payload is not a page of `T`.
    pub async fn page<T: DeserializeOwned>(
        &self,
        list_url: &str,
        limit: u32,
        offset: Option<usize>,
    ) -> Result<Page<T>, DashboardError> {
        let mut params = QueryParams::new().with("limit", limit);
        if let Some(offset) = offset {
            params.push("offset", offset);
        }
        let url = append_query(list_url, &params);
        let page: Option<Page<T>> = self.http_client.execute_as(HttpRequest::get(url)).await?;
        Ok(page.unwrap_or_default())
    }

    /// Creates or updates a report.
    ///
    /// With `item_id` the report is replaced with PUT on its item URL;
    /// without, it is created with POST on `list_url`. The body's `time` must
    /// be an RFC 3339 timestamp, otherwise nothing is sent. Failures are never
    /// notified: the caller binds them to the form. A successful save shows
    /// `Report {id} saved.` through the notifier.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::ValidationFailed`] with the field messages
    /// on an invalid `time` or a 400 answer, [`DashboardError::InvalidRequest`]
    /// if `list_url` is empty, or [`DashboardError::Request`] for any other
    /// failure.
    pub async fn save_report(
        &self,
        list_url: &str,
        item_id: Option<u64>,
        body: Value,
    ) -> Result<Value, DashboardError> {
        let time_is_valid = body
            .get("time")
            .and_then(Value::as_str)
            .is_some_and(|time| DateTime::parse_from_rfc3339(time).is_ok());
        if !time_is_valid {
            return Err(DashboardError::ValidationFailed {
                errors: HashMap::from([(
                    "time".to_string(),
                    vec![INVALID_TIME_MESSAGE.to_string()],
                )]),
            });
        }

        let (method, url) = match item_id {
            Some(id) => (HttpMethod::Put, resolve_item_path(list_url, id)),
            None => (HttpMethod::Post, list_url.to_string()),
        };

        let request = HttpRequest::builder(method, url)
            .body(body)
            .notify_on_error(false)
            .build()?;

        match self.http_client.execute(request).await {
            Ok(saved) => {
                let saved = saved.unwrap_or(Value::Null);
                let id = saved.get("id").cloned().unwrap_or_default();
                let message = format!("Report {id} saved.");
                tracing::info!("{message}");
                self.http_client
                    .notifier()
                    .notify(Notification::from_message(message));
                Ok(saved)
            }
            Err(e) if e.kind == ErrorKind::BadRequest => Err(DashboardError::ValidationFailed {
                errors: e.field_errors(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes the resource at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::InvalidRequest`] if `url` is empty, or
    /// [`DashboardError::Request`] if the request fails.
    pub async fn delete(&self, url: &str) -> Result<(), DashboardError> {
        let request = HttpRequest::builder(HttpMethod::Delete, url).build()?;
        self.http_client.execute(request).await?;
        Ok(())
    }
}
