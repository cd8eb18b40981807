//! Integration tests for configuration and URL resolution.
//!
//! These tests exercise the public API the way an application wires it up:
//! configuration first, then endpoint URLs and sessions derived from it.

use chrono::NaiveDate;
use nemo_api::urls::{ApiUrls, ChartMetric, MetricPeriod};
use nemo_api::{ApiUrl, AuthMode, ConfigError, NemoConfig, Session};

fn urls_for(base: &str) -> ApiUrls {
    let config = NemoConfig::builder()
        .api_url(ApiUrl::new(base).unwrap())
        .build()
        .unwrap();
    ApiUrls::new(&config)
}

#[test]
fn test_config_requires_api_url() {
    let result = NemoConfig::builder().build();
    assert!(matches!(
        result,
        Err(ConfigError::MissingRequiredField { field: "api_url" })
    ));
}

#[test]
fn test_auth_mode_parses_case_insensitively() {
    assert_eq!("oidc".parse::<AuthMode>().unwrap(), AuthMode::Oidc);
    assert!("saml".parse::<AuthMode>().is_err());
}

#[test]
fn test_trailing_slash_on_base_is_not_doubled() {
    let with_slash = urls_for("https://nemo.example.com/");
    let without_slash = urls_for("https://nemo.example.com");

    assert_eq!(with_slash.projects_list(), without_slash.projects_list());
    assert!(!with_slash.projects_list().contains("//api"));
}

#[test]
fn test_nested_devops_metrics_urls() {
    let urls = urls_for("http://localhost");

    assert_eq!(
        urls.devops_metrics_deployment(1, 4, 9),
        "http://localhost/api/v1/devops-metrics/project/1/environment/4/deployment/9/"
    );
    assert_eq!(
        urls.devops_metrics_service_status_report(1, 4, 2),
        "http://localhost/api/v1/devops-metrics/project/1/environment/4/report/2/"
    );
}

#[test]
fn test_chart_urls_carry_only_set_period_fields() {
    let urls = urls_for("http://localhost");
    let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2021, 3, 31).unwrap();

    let bounded = urls.devops_metrics_chart(
        ChartMetric::LeadTime,
        1,
        4,
        &MetricPeriod::between(start, end),
    );
    assert!(bounded.ends_with(
        "/metric/lead-time/?period_start_date=2021-01-01&period_end_date=2021-03-31"
    ));

    let unbounded =
        urls.devops_metrics_chart(ChartMetric::LeadTime, 1, 4, &MetricPeriod::unbounded());
    assert!(unbounded.ends_with("/metric/lead-time/"));
}

#[test]
fn test_every_chart_metric_has_a_distinct_url() {
    let urls = urls_for("http://localhost");
    let mut seen: Vec<String> = ChartMetric::ALL
        .iter()
        .map(|m| urls.devops_metrics_chart(*m, 1, 4, &MetricPeriod::unbounded()))
        .collect();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), ChartMetric::ALL.len());
}

#[test]
fn test_session_from_browser_cookies() {
    let session = Session::from_cookie_header("sessionid=abc; csrftoken=xyz");
    assert_eq!(session.csrf_token().map(AsRef::as_ref), Some("xyz"));
}
