//! Configuration types for the Nemo API client.
//!
//! This module provides the configuration object that is constructed once at
//! startup and passed explicitly to the URL resolver and the request client.
//!
//! # Overview
//!
//! - [`NemoConfig`]: The configuration struct holding all client settings
//! - [`NemoConfigBuilder`]: A builder for constructing [`NemoConfig`] instances
//! - [`ApiUrl`]: A validated base URL of the API server
//! - [`CsrfToken`]: A CSRF token with masked debug output
//! - [`AuthMode`]: The backend authentication mode
//!
//! # Example
//!
//! ```rust
//! use nemo_api::{NemoConfig, ApiUrl, AuthMode};
//!
//! let config = NemoConfig::builder()
//!     .api_url(ApiUrl::new("https://nemo.example.com").unwrap())
//!     .auth_mode(AuthMode::Oidc)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.default_checking_period_days(), 62);
//! ```

mod auth_mode;
mod newtypes;

pub use auth_mode::AuthMode;
pub use newtypes::{ApiUrl, CsrfToken};

use crate::error::ConfigError;

/// Default length of the rolling window DevOps metrics are computed over.
pub const DEFAULT_CHECKING_PERIOD_DAYS: u32 = 62;

/// Configuration for the Nemo API client.
///
/// # Thread Safety
///
/// `NemoConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct NemoConfig {
    api_url: ApiUrl,
    auth_mode: AuthMode,
    default_checking_period_days: u32,
    user_agent_prefix: Option<String>,
}

impl NemoConfig {
    /// Creates a new builder for constructing a `NemoConfig`.
    #[must_use]
    pub fn builder() -> NemoConfigBuilder {
        NemoConfigBuilder::new()
    }

    /// Returns the API server URL.
    #[must_use]
    pub const fn api_url(&self) -> &ApiUrl {
        &self.api_url
    }

    /// Returns the authentication mode.
    #[must_use]
    pub const fn auth_mode(&self) -> AuthMode {
        self.auth_mode
    }

    /// Returns the checking period used when a metric request does not name one.
    #[must_use]
    pub const fn default_checking_period_days(&self) -> u32 {
        self.default_checking_period_days
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify NemoConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<NemoConfig>();
};

/// Builder for constructing [`NemoConfig`] instances.
///
/// `api_url` is required. All other fields have defaults:
///
/// - `auth_mode`: [`AuthMode::Oidc`]
/// - `default_checking_period_days`: [`DEFAULT_CHECKING_PERIOD_DAYS`]
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct NemoConfigBuilder {
    api_url: Option<ApiUrl>,
    auth_mode: Option<AuthMode>,
    default_checking_period_days: Option<u32>,
    user_agent_prefix: Option<String>,
}

impl NemoConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API server URL (required).
    #[must_use]
    pub fn api_url(mut self, url: ApiUrl) -> Self {
        self.api_url = Some(url);
        self
    }

    /// Sets the authentication mode.
    #[must_use]
    pub const fn auth_mode(mut self, mode: AuthMode) -> Self {
        self.auth_mode = Some(mode);
        self
    }

    /// Sets the default checking period, in days, for DevOps metrics.
    #[must_use]
    pub const fn default_checking_period_days(mut self, days: u32) -> Self {
        self.default_checking_period_days = Some(days);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`NemoConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_url` is not set,
    /// or [`ConfigError::InvalidCheckingPeriod`] if the checking period is zero.
    pub fn build(self) -> Result<NemoConfig, ConfigError> {
        let api_url = self
            .api_url
            .ok_or(ConfigError::MissingRequiredField { field: "api_url" })?;

        let default_checking_period_days = self
            .default_checking_period_days
            .unwrap_or(DEFAULT_CHECKING_PERIOD_DAYS);
        if default_checking_period_days == 0 {
            return Err(ConfigError::InvalidCheckingPeriod);
        }

        Ok(NemoConfig {
            api_url,
            auth_mode: self.auth_mode.unwrap_or_default(),
            default_checking_period_days,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_api_url() {
        let result = NemoConfigBuilder::new().build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "api_url" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = NemoConfig::builder()
            .api_url(ApiUrl::new("http://localhost").unwrap())
            .build()
            .unwrap();

        assert_eq!(config.auth_mode(), AuthMode::Oidc);
        assert_eq!(config.default_checking_period_days(), 62);
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_builder_rejects_zero_checking_period() {
        let result = NemoConfig::builder()
            .api_url(ApiUrl::new("http://localhost").unwrap())
            .default_checking_period_days(0)
            .build();

        assert!(matches!(result, Err(ConfigError::InvalidCheckingPeriod)));
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = NemoConfig::builder()
            .api_url(ApiUrl::new("https://nemo.example.com").unwrap())
            .auth_mode(AuthMode::Oidc)
            .default_checking_period_days(30)
            .user_agent_prefix("Dashboard/2.0")
            .build()
            .unwrap();

        assert_eq!(config.api_url().as_ref(), "https://nemo.example.com");
        assert_eq!(config.default_checking_period_days(), 30);
        assert_eq!(config.user_agent_prefix(), Some("Dashboard/2.0"));
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NemoConfig>();
    }
}
