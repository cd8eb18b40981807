//! The catalogue of dashboard API endpoints.

use std::fmt;

use chrono::NaiveDate;

use crate::config::{AuthMode, NemoConfig};
use crate::urls::path::{resolve_collection_path, resolve_item_path, PathSegment};
use crate::urls::query::{append_query, QueryParams};

/// DevOps metrics that have a chart endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartMetric {
    /// Share of deployments that failed.
    ChangeFailureRate,
    /// Time from change list to deployment.
    LeadTime,
    /// Time from an outage report to recovery.
    TimeToRestore,
    /// Deployments per day.
    DeploymentFrequency,
}

impl ChartMetric {
    /// All metrics, in the order the dashboard shows them.
    pub const ALL: [Self; 4] = [
        Self::LeadTime,
        Self::DeploymentFrequency,
        Self::ChangeFailureRate,
        Self::TimeToRestore,
    ];

    /// Returns the path segment naming this metric.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ChangeFailureRate => "change-failure-rate",
            Self::LeadTime => "lead-time",
            Self::TimeToRestore => "time-to-restore",
            Self::DeploymentFrequency => "deployment-frequency",
        }
    }
}

impl fmt::Display for ChartMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The time window a chart or graph is computed over.
///
/// Unset fields are left to the backend's defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MetricPeriod {
    /// First day of the period.
    pub start: Option<NaiveDate>,
    /// Last day of the period.
    pub end: Option<NaiveDate>,
    /// Length of the rolling window each data point aggregates.
    pub checking_period_days: Option<u32>,
}

impl MetricPeriod {
    /// Creates a period with every field unset.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
            checking_period_days: None,
        }
    }

    /// Creates a period between two dates.
    #[must_use]
    pub const fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            checking_period_days: None,
        }
    }

    /// Sets the checking period.
    #[must_use]
    pub const fn with_checking_period_days(mut self, days: u32) -> Self {
        self.checking_period_days = Some(days);
        self
    }

    /// Returns the query parameters describing this period.
    #[must_use]
    pub fn to_query_params(&self) -> QueryParams {
        QueryParams::new()
            .with("period_start_date", self.start)
            .with("period_end_date", self.end)
            .with("checking_period_days", self.checking_period_days)
    }
}

/// Resolves every endpoint of the dashboard API.
///
/// Built once from a [`NemoConfig`]; all methods are pure.
///
/// # Example
///
/// ```rust
/// use nemo_api::{ApiUrl, NemoConfig};
/// use nemo_api::urls::ApiUrls;
///
/// let config = NemoConfig::builder()
///     .api_url(ApiUrl::new("http://localhost").unwrap())
///     .build()
///     .unwrap();
/// let urls = ApiUrls::new(&config);
///
/// assert_eq!(urls.project(3), "http://localhost/api/v1/dashboard/project/3/");
/// assert_eq!(
///     urls.project_goal(3, 8),
///     "http://localhost/api/v1/dashboard/project/3/goal/8/"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiUrls {
    documentation_root: String,
    dashboard_root: String,
    devops_metrics_root: String,
    oidc_root: String,
    auth_mode: AuthMode,
}

impl ApiUrls {
    /// Creates the endpoint catalogue for the configured API server.
    #[must_use]
    pub fn new(config: &NemoConfig) -> Self {
        let api = config.api_url().as_ref();
        Self {
            documentation_root: format!("{api}/api/v1/documentation"),
            dashboard_root: format!("{api}/api/v1/dashboard"),
            devops_metrics_root: format!("{api}/api/v1/devops-metrics"),
            oidc_root: format!("{api}/api/oidc"),
            auth_mode: config.auth_mode(),
        }
    }

    fn dashboard(&self, segments: &[&str]) -> String {
        resolve_collection_path(
            &self.dashboard_root,
            segments.iter().map(|s| Some(PathSegment::from(*s))),
        )
    }

    fn under(parent: &str, segments: &[&str]) -> String {
        resolve_collection_path(parent, segments.iter().map(|s| Some(PathSegment::from(*s))))
    }

    /// Swagger documentation page.
    #[must_use]
    pub fn swagger(&self) -> String {
        Self::under(&self.documentation_root, &["swagger"])
    }

    /// Endpoint that starts the login redirect.
    #[must_use]
    pub fn login(&self) -> String {
        match self.auth_mode {
            AuthMode::Oidc => Self::under(&self.oidc_root, &["authenticate"]),
        }
    }

    /// Endpoint that ends the session.
    #[must_use]
    pub fn logout(&self) -> String {
        match self.auth_mode {
            AuthMode::Oidc => format!("{}/logout", self.oidc_root),
        }
    }

    /// The signed-in user.
    #[must_use]
    pub fn user(&self) -> String {
        self.dashboard(&["user"])
    }

    /// Per-project notification settings of the signed-in user.
    #[must_use]
    pub fn user_settings_notification_projects_list(&self) -> String {
        self.dashboard(&["user", "settings", "notification", "project"])
    }

    /// Notification setting of the signed-in user for one project.
    #[must_use]
    pub fn user_settings_notification_project(&self, project_id: u64) -> String {
        resolve_item_path(&self.user_settings_notification_projects_list(), project_id)
    }

    /// Visit counter.
    #[must_use]
    pub fn visits_count(&self) -> String {
        self.dashboard(&["visits-count"])
    }

    /// All projects.
    #[must_use]
    pub fn projects_list(&self) -> String {
        self.dashboard(&["project"])
    }

    /// One project.
    #[must_use]
    pub fn project(&self, project_id: u64) -> String {
        resolve_item_path(&self.projects_list(), project_id)
    }

    /// Evaluation requests of a project.
    #[must_use]
    pub fn evaluation_request_list(&self, project_id: u64) -> String {
        Self::under(&self.project(project_id), &["evaluation"])
    }

    /// One evaluation request.
    #[must_use]
    pub fn evaluation_request(&self, project_id: u64, request_id: u64) -> String {
        resolve_item_path(&self.evaluation_request_list(project_id), request_id)
    }

    /// Toggle (maturity item constraint) requests of a project.
    #[must_use]
    pub fn toggle_request_list(&self, project_id: u64) -> String {
        Self::under(&self.project(project_id), &["maturity-model-item-constraint"])
    }

    /// One toggle request.
    #[must_use]
    pub fn toggle_request(&self, project_id: u64, request_id: u64) -> String {
        resolve_item_path(&self.toggle_request_list(project_id), request_id)
    }

    /// Maturity state of a project.
    #[must_use]
    pub fn project_maturity_state(&self, project_id: u64) -> String {
        Self::under(&self.project(project_id), &["maturity-state"])
    }

    /// Result of one maturity item within a Dory evaluation.
    #[must_use]
    pub fn maturity_item_dory_result(
        &self,
        project_id: u64,
        dory_evaluation_id: u64,
        item_code: &str,
    ) -> String {
        resolve_collection_path(
            &self.project(project_id),
            [
                Some(PathSegment::from("dory-evaluation")),
                Some(PathSegment::from(dory_evaluation_id)),
                Some(PathSegment::from("maturity-item-result")),
                Some(PathSegment::from(item_code)),
            ],
        )
    }

    /// State of one maturity item in a project.
    #[must_use]
    pub fn project_item_maturity_state(&self, project_id: u64, item_id: u64) -> String {
        resolve_item_path(
            &Self::under(&self.project(project_id), &["maturity-item-state"]),
            item_id,
        )
    }

    /// Goals of a project.
    #[must_use]
    pub fn project_goals_list(&self, project_id: u64) -> String {
        Self::under(&self.project(project_id), &["goal"])
    }

    /// One goal.
    #[must_use]
    pub fn project_goal(&self, project_id: u64, goal_id: u64) -> String {
        resolve_item_path(&self.project_goals_list(project_id), goal_id)
    }

    /// Sonar integration settings of a project.
    #[must_use]
    pub fn project_integration_sonar(&self, project_id: u64) -> String {
        Self::under(&self.project(project_id), &["integration", "sonar"])
    }

    /// GitLab integration settings of a project.
    #[must_use]
    pub fn project_integration_gitlab_project(&self, project_id: u64) -> String {
        Self::under(&self.project(project_id), &["integration", "gitlab-project"])
    }

    /// Overall test coverage of a project.
    #[must_use]
    pub fn project_overall_coverage(&self, project_id: u64) -> String {
        Self::under(&self.project(project_id), &["metric", "overall-coverage"])
    }

    /// Incremental test coverage of a project.
    #[must_use]
    pub fn project_incremental_coverage(&self, project_id: u64) -> String {
        Self::under(&self.project(project_id), &["metric", "incremental-coverage"])
    }

    /// API token of a project.
    #[must_use]
    pub fn project_api_token(&self, project_id: u64) -> String {
        Self::under(&self.project(project_id), &["api-token"])
    }

    /// Graph root of a project.
    #[must_use]
    pub fn project_graphs(&self, project_id: u64) -> String {
        Self::under(&self.project(project_id), &["graphs"])
    }

    /// Daily coverage graph of a project over `period`.
    #[must_use]
    pub fn project_daily_coverage_graph(&self, project_id: u64, period: &MetricPeriod) -> String {
        let path = Self::under(&self.project_graphs(project_id), &["daily-coverage"]);
        append_query(&path, &period.to_query_params())
    }

    /// All maturity models.
    #[must_use]
    pub fn maturity_model_list(&self) -> String {
        self.dashboard(&["maturity-model"])
    }

    /// One maturity model.
    #[must_use]
    pub fn maturity_model(&self, maturity_model_id: u64) -> String {
        resolve_item_path(&self.maturity_model_list(), maturity_model_id)
    }

    /// Evaluation reports of one maturity item in a project.
    #[must_use]
    pub fn evaluation_report_list(&self, project_id: u64, item_id: u64) -> String {
        resolve_collection_path(
            &self.project(project_id),
            [
                Some(PathSegment::from("item")),
                Some(PathSegment::from(item_id)),
                Some(PathSegment::from("evaluation-report")),
            ],
        )
    }

    /// One evaluation report.
    #[must_use]
    pub fn evaluation_report(&self, project_id: u64, item_id: u64, report_id: u64) -> String {
        resolve_item_path(&self.evaluation_report_list(project_id, item_id), report_id)
    }

    /// DevOps metrics root of a project.
    #[must_use]
    pub fn devops_metrics_project(&self, project_id: u64) -> String {
        resolve_collection_path(
            &self.devops_metrics_root,
            [
                Some(PathSegment::from("project")),
                Some(PathSegment::from(project_id)),
            ],
        )
    }

    /// Environments of a project.
    #[must_use]
    pub fn devops_metrics_environments_list(&self, project_id: u64) -> String {
        Self::under(&self.devops_metrics_project(project_id), &["environment"])
    }

    /// One environment.
    #[must_use]
    pub fn devops_metrics_environment(&self, project_id: u64, environment_id: u64) -> String {
        resolve_item_path(
            &self.devops_metrics_environments_list(project_id),
            environment_id,
        )
    }

    /// Aggregated statistics of an environment.
    #[must_use]
    pub fn devops_metrics_statistics(&self, project_id: u64, environment_id: u64) -> String {
        Self::under(
            &self.devops_metrics_environment(project_id, environment_id),
            &["statistics"],
        )
    }

    /// Service status reports of an environment.
    #[must_use]
    pub fn devops_metrics_service_status_reports_list(
        &self,
        project_id: u64,
        environment_id: u64,
    ) -> String {
        Self::under(
            &self.devops_metrics_environment(project_id, environment_id),
            &["report"],
        )
    }

    /// One service status report.
    #[must_use]
    pub fn devops_metrics_service_status_report(
        &self,
        project_id: u64,
        environment_id: u64,
        report_id: u64,
    ) -> String {
        resolve_item_path(
            &self.devops_metrics_service_status_reports_list(project_id, environment_id),
            report_id,
        )
    }

    /// Deployments of an environment.
    #[must_use]
    pub fn devops_metrics_deployments_list(&self, project_id: u64, environment_id: u64) -> String {
        Self::under(
            &self.devops_metrics_environment(project_id, environment_id),
            &["deployment"],
        )
    }

    /// One deployment.
    #[must_use]
    pub fn devops_metrics_deployment(
        &self,
        project_id: u64,
        environment_id: u64,
        deployment_id: u64,
    ) -> String {
        resolve_item_path(
            &self.devops_metrics_deployments_list(project_id, environment_id),
            deployment_id,
        )
    }

    /// Change lists of a project.
    #[must_use]
    pub fn devops_metrics_change_lists_list(&self, project_id: u64) -> String {
        Self::under(&self.devops_metrics_project(project_id), &["changelist"])
    }

    /// One change list.
    #[must_use]
    pub fn devops_metrics_change_list(&self, project_id: u64, change_list_id: u64) -> String {
        resolve_item_path(
            &self.devops_metrics_change_lists_list(project_id),
            change_list_id,
        )
    }

    /// Chart data of `metric` for an environment over `period`.
    #[must_use]
    pub fn devops_metrics_chart(
        &self,
        metric: ChartMetric,
        project_id: u64,
        environment_id: u64,
        period: &MetricPeriod,
    ) -> String {
        let path = resolve_collection_path(
            &self.devops_metrics_environment(project_id, environment_id),
            [
                Some(PathSegment::from("metric")),
                Some(PathSegment::from(metric.as_str())),
            ],
        );
        append_query(&path, &period.to_query_params())
    }
}
