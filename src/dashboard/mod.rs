//! DevOps metrics dashboard operations.
//!
//! This module builds the dashboard screens' data access on top of the
//! request client:
//!
//! - [`DashboardClient`]: composite operations (environments dropdown,
//!   metric charts, report saving and deletion)
//! - [`ReportFeed`] with [`DeploymentReports`], [`ChangeListReports`] and
//!   [`ServiceStatusReports`]: paged report lists
//! - [`readable_value`]: display formatting of metric values
//! - Typed payloads: [`Page`], [`Environment`], [`ChangeList`],
//!   [`Deployment`], [`ServiceStatusReport`]

mod client;
mod errors;
mod format;
mod models;
mod reports;

pub use client::{DashboardClient, INVALID_TIME_MESSAGE};
pub use errors::DashboardError;
pub use format::{humanize_seconds, readable_value, readable_value_by_code, ValueType};
pub use models::{
    ChangeList, Deployment, DeploymentStatus, DropdownItem, Environment, Page, ServiceStatus,
    ServiceStatusReport, DEFAULT_PAGE_SIZE,
};
pub use reports::{
    ChangeListReports, DeploymentReports, Report, ReportFeed, ReportKind, ReportRow,
    ServiceStatusReports,
};
