//! Typed views of the DevOps metrics payloads.
//!
//! List endpoints use limit/offset pagination and answer with a [`Page`].
//! Report identifiers are plain integers; timestamps are ISO 8601 and are
//! normalized to UTC on decode.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default number of items fetched per page by list screens.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// One page of a limit/offset paginated list.
///
/// # Example
///
/// ```rust
/// use nemo_api::dashboard::{Environment, Page};
///
/// let page: Page<Environment> = serde_json::from_str(
///     r#"{"count": 1, "next": null, "previous": null,
///         "results": [{"id": 4, "project": 1, "name": "prod", "description": null}]}"#,
/// ).unwrap();
///
/// assert!(!page.has_next());
/// assert_eq!(page.results[0].name, "prod");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page<T> {
    /// Total number of items across all pages.
    #[serde(default)]
    pub count: u64,

    /// Absolute URL of the next page, if any.
    #[serde(default)]
    pub next: Option<String>,

    /// Absolute URL of the previous page, if any.
    #[serde(default)]
    pub previous: Option<String>,

    /// Items of this page.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}

impl<T> Page<T> {
    /// Returns `true` if the server announced a further page.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.next.as_deref().is_some_and(|next| !next.is_empty())
    }
}

/// A deployment target of a project, such as staging or production.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Environment {
    /// Read-only.
    #[serde(skip_serializing)]
    pub id: u64,
    /// Owning project.
    pub project: u64,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
}

/// A `{label, value}` pair fed to dropdown widgets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DropdownItem {
    /// Text shown to the user.
    pub label: String,
    /// Identifier submitted on selection.
    pub value: u64,
}

impl From<&Environment> for DropdownItem {
    fn from(env: &Environment) -> Self {
        Self {
            label: env.name.clone(),
            value: env.id,
        }
    }
}

/// A merged change, identified by its commit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangeList {
    /// Read-only.
    #[serde(skip_serializing)]
    pub id: u64,
    /// Owning project.
    pub project: u64,
    /// Identifier in the source forge (merge request number, for example).
    #[serde(default)]
    pub change_list_id: Option<String>,
    /// Full commit hash.
    pub commit_hash: String,
    /// Merge time.
    pub time: DateTime<Utc>,
    /// Title of the change, if known.
    #[serde(default)]
    pub title: Option<String>,
}

impl ChangeList {
    /// Returns the first seven characters of the commit hash.
    #[must_use]
    pub fn short_hash(&self) -> &str {
        self.commit_hash
            .char_indices()
            .nth(7)
            .map_or(self.commit_hash.as_str(), |(i, _)| &self.commit_hash[..i])
    }

    /// Returns the label used when picking a change list: `(abc1234) Title`.
    #[must_use]
    pub fn select_label(&self) -> String {
        format!(
            "({}) {}",
            self.short_hash(),
            self.title.as_deref().unwrap_or_default()
        )
    }
}

/// Outcome of a deployment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DeploymentStatus {
    /// The deployment succeeded.
    #[serde(rename = "P")]
    Pass,
    /// The deployment failed.
    #[serde(rename = "F")]
    Fail,
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => f.write_str("Pass"),
            Self::Fail => f.write_str("Fail"),
        }
    }
}

/// A deployment of a change list to an environment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deployment {
    /// Read-only.
    #[serde(skip_serializing)]
    pub id: u64,
    /// Target environment.
    pub environment: u64,
    /// Deployed change list.
    pub change_list: u64,
    /// Outcome.
    pub status: DeploymentStatus,
    /// Deployment time.
    pub time: DateTime<Utc>,
}

/// Availability of a service at a point in time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ServiceStatus {
    /// The service was reachable.
    #[serde(rename = "U")]
    Up,
    /// The service was down.
    #[serde(rename = "D")]
    Down,
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => f.write_str("Up"),
            Self::Down => f.write_str("Down"),
        }
    }
}

/// A reported service status change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceStatusReport {
    /// Read-only.
    #[serde(skip_serializing)]
    pub id: u64,
    /// Observed environment.
    pub environment: u64,
    /// Observed status.
    pub status: ServiceStatus,
    /// Observation time.
    pub time: DateTime<Utc>,
}
