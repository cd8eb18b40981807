//! Infinite-scroll report lists.
//!
//! Each report screen lists one resource of an environment (or of a project,
//! for change lists), loads it ten items at a time, and drops items once
//! they are deleted. The per-resource parts are captured by [`ReportKind`];
//! the paging state lives in [`ReportFeed`].
//!
//! # Example
//!
//! ```rust,ignore
//! use nemo_api::dashboard::{DeploymentReports, ReportFeed};
//!
//! let mut feed = ReportFeed::new(DeploymentReports::new(Some(1), Some(4)));
//! feed.reload(&dashboard).await?;
//! while feed.has_more() {
//!     feed.load_more(&dashboard).await?;
//! }
//! for row in feed.rows() {
//!     println!("{}", row.cells.join(" | "));
//! }
//! ```

use std::fmt;

use serde::de::DeserializeOwned;

use crate::dashboard::client::DashboardClient;
use crate::dashboard::errors::DashboardError;
use crate::dashboard::models::{ChangeList, Deployment, ServiceStatusReport, DEFAULT_PAGE_SIZE};
use crate::urls::{resolve_item_path, ApiUrls};

/// A listed report, identified by its numeric id.
pub trait Report: DeserializeOwned + Clone + fmt::Debug + Send + Sync {
    /// Returns the report's identifier.
    fn id(&self) -> u64;
}

impl Report for ChangeList {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Report for Deployment {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Report for ServiceStatusReport {
    fn id(&self) -> u64 {
        self.id
    }
}

/// A table row of a report list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportRow {
    /// Identifier of the listed report.
    pub id: u64,
    /// Cell texts, in column order.
    pub cells: Vec<String>,
}

/// The resource-specific half of a report list.
pub trait ReportKind: Clone + fmt::Debug + Send + Sync {
    /// The listed report type.
    type Item: Report;

    /// Column headers, in the order [`row`](Self::row) fills them.
    const COLUMNS: &'static [&'static str];

    /// Returns the list endpoint, or `None` while the identifiers the list
    /// depends on are not known yet.
    fn resource_url(&self, urls: &ApiUrls) -> Option<String>;

    /// Returns the in-app path of the "new report" page.
    fn new_item_url(&self) -> Option<String>;

    /// Renders a report as a table row.
    fn row(&self, item: &Self::Item) -> ReportRow;
}

/// Deployments of an environment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeploymentReports {
    project_id: Option<u64>,
    environment_id: Option<u64>,
}

impl DeploymentReports {
    /// Creates the list for an environment of a project.
    #[must_use]
    pub const fn new(project_id: Option<u64>, environment_id: Option<u64>) -> Self {
        Self {
            project_id,
            environment_id,
        }
    }
}

impl ReportKind for DeploymentReports {
    type Item = Deployment;

    const COLUMNS: &'static [&'static str] = &["Status", "Change List", "Time"];

    fn resource_url(&self, urls: &ApiUrls) -> Option<String> {
        let (project_id, environment_id) = self.project_id.zip(self.environment_id)?;
        Some(urls.devops_metrics_deployments_list(project_id, environment_id))
    }

    fn new_item_url(&self) -> Option<String> {
        let (project_id, environment_id) = self.project_id.zip(self.environment_id)?;
        Some(format!(
            "/project/{project_id}/reports/deployment/new/?preferred_env={environment_id}"
        ))
    }

    fn row(&self, item: &Deployment) -> ReportRow {
        ReportRow {
            id: item.id,
            cells: vec![
                item.status.to_string(),
                item.change_list.to_string(),
                item.time.to_rfc3339(),
            ],
        }
    }
}

/// Change lists of a project.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChangeListReports {
    project_id: Option<u64>,
}

impl ChangeListReports {
    /// Creates the list for a project.
    #[must_use]
    pub const fn new(project_id: Option<u64>) -> Self {
        Self { project_id }
    }
}

impl ReportKind for ChangeListReports {
    type Item = ChangeList;

    const COLUMNS: &'static [&'static str] = &["ID", "Title", "Commit Hash", "Time"];

    fn resource_url(&self, urls: &ApiUrls) -> Option<String> {
        self.project_id
            .map(|project_id| urls.devops_metrics_change_lists_list(project_id))
    }

    fn new_item_url(&self) -> Option<String> {
        self.project_id
            .map(|project_id| format!("/project/{project_id}/reports/changelist/new/"))
    }

    fn row(&self, item: &ChangeList) -> ReportRow {
        ReportRow {
            id: item.id,
            cells: vec![
                item.change_list_id.clone().unwrap_or_default(),
                item.title.clone().unwrap_or_default(),
                item.commit_hash.clone(),
                item.time.to_rfc3339(),
            ],
        }
    }
}

/// Service status reports of an environment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ServiceStatusReports {
    project_id: Option<u64>,
    environment_id: Option<u64>,
}

impl ServiceStatusReports {
    /// Creates the list for an environment of a project.
    #[must_use]
    pub const fn new(project_id: Option<u64>, environment_id: Option<u64>) -> Self {
        Self {
            project_id,
            environment_id,
        }
    }
}

impl ReportKind for ServiceStatusReports {
    type Item = ServiceStatusReport;

    const COLUMNS: &'static [&'static str] = &["Status", "Time"];

    fn resource_url(&self, urls: &ApiUrls) -> Option<String> {
        let (project_id, environment_id) = self.project_id.zip(self.environment_id)?;
        Some(urls.devops_metrics_service_status_reports_list(project_id, environment_id))
    }

    fn new_item_url(&self) -> Option<String> {
        let (project_id, environment_id) = self.project_id.zip(self.environment_id)?;
        Some(format!(
            "/project/{project_id}/reports/service_status_report/new/?preferred_env={environment_id}"
        ))
    }

    fn row(&self, item: &ServiceStatusReport) -> ReportRow {
        ReportRow {
            id: item.id,
            cells: vec![item.status.to_string(), item.time.to_rfc3339()],
        }
    }
}

/// Paging state of a report list.
///
/// A fresh feed has no items and announces more, so that the first scroll
/// triggers a load.
#[derive(Clone, Debug)]
pub struct ReportFeed<K: ReportKind> {
    kind: K,
    page_size: u32,
    items: Vec<K::Item>,
    has_more: bool,
}

impl<K: ReportKind> ReportFeed<K> {
    /// Creates a feed fetching [`DEFAULT_PAGE_SIZE`] items at a time.
    #[must_use]
    pub const fn new(kind: K) -> Self {
        Self::with_page_size(kind, DEFAULT_PAGE_SIZE)
    }

    /// Creates a feed fetching `page_size` items at a time.
    #[must_use]
    pub const fn with_page_size(kind: K, page_size: u32) -> Self {
        Self {
            kind,
            page_size,
            items: Vec::new(),
            has_more: true,
        }
    }

    /// Returns the resource half of the feed.
    #[must_use]
    pub const fn kind(&self) -> &K {
        &self.kind
    }

    /// Returns the loaded items.
    #[must_use]
    pub fn items(&self) -> &[K::Item] {
        &self.items
    }

    /// Returns `true` if the server announced further items.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    /// Returns the loaded items as table rows.
    #[must_use]
    pub fn rows(&self) -> Vec<ReportRow> {
        self.items.iter().map(|item| self.kind.row(item)).collect()
    }

    /// Returns the in-app path of the "new report" page.
    #[must_use]
    pub fn new_item_url(&self) -> Option<String> {
        self.kind.new_item_url()
    }

    /// Replaces the resource half, for instance when the selected
    /// environment changes. Call [`reload`](Self::reload) afterwards.
    pub fn set_kind(&mut self, kind: K) {
        self.kind = kind;
    }

    /// Discards the loaded items and fetches the first page.
    ///
    /// While the identifiers are not known the feed is emptied and announces
    /// no further items.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Request`] if the request fails; the feed is
    /// left unchanged.
    pub async fn reload(&mut self, dashboard: &DashboardClient) -> Result<(), DashboardError> {
        let Some(url) = self.kind.resource_url(dashboard.urls()) else {
            self.items.clear();
            self.has_more = false;
            return Ok(());
        };

        let page = dashboard.page(&url, self.page_size, None).await?;
        self.has_more = page.has_next();
        self.items = page.results;
        Ok(())
    }

    /// Fetches the page following the loaded items and appends it.
    ///
    /// `has_more` is cleared while the fetch is in flight and stays cleared
    /// if it fails. Does nothing while the identifiers are not known.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Request`] if the request fails.
    pub async fn load_more(&mut self, dashboard: &DashboardClient) -> Result<(), DashboardError> {
        let Some(url) = self.kind.resource_url(dashboard.urls()) else {
            return Ok(());
        };

        self.has_more = false;
        let page = dashboard
            .page(&url, self.page_size, Some(self.items.len()))
            .await
            .map_err(|e| {
                tracing::error!("Failed to load more reports. Error: {e}");
                e
            })?;
        self.has_more = page.has_next();
        self.items.extend(page.results);
        Ok(())
    }

    /// Drops the item with `id` from the loaded items.
    pub fn remove(&mut self, id: u64) {
        self.items.retain(|item| item.id() != id);
    }

    /// Deletes the report with `id` on the server, then drops it locally.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Request`] if the request fails; the item is
    /// kept in that case.
    pub async fn delete(&mut self, dashboard: &DashboardClient, id: u64) -> Result<(), DashboardError> {
        let Some(list_url) = self.kind.resource_url(dashboard.urls()) else {
            return Ok(());
        };
        dashboard.delete(&resolve_item_path(&list_url, id)).await?;
        self.remove(id);
        Ok(())
    }
}
