//! Error types for the Nemo API client.
//!
//! This module contains error types used throughout the crate for
//! configuration and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation.
//!
//! # Example
//!
//! ```rust
//! use nemo_api::{ApiUrl, ConfigError};
//!
//! let result = ApiUrl::new("");
//! assert!(matches!(result, Err(ConfigError::InvalidApiUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API URL is invalid.
    #[error("Invalid API URL '{url}'. Please provide a URL with scheme and host (e.g., 'https://nemo.example.com').")]
    InvalidApiUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Authentication mode is not recognized.
    #[error("Invalid authentication mode '{mode}'. Expected 'OIDC'.")]
    InvalidAuthMode {
        /// The mode string that was provided.
        mode: String,
    },

    /// CSRF token cannot be empty.
    #[error("CSRF token cannot be empty.")]
    EmptyCsrfToken,

    /// The default checking period must cover at least one day.
    #[error("Default checking period must be at least one day.")]
    InvalidCheckingPeriod,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_api_url_error_message() {
        let error = ConfigError::InvalidApiUrl {
            url: "not a url".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("not a url"));
        assert!(message.contains("scheme and host"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "api_url" };
        let message = error.to_string();
        assert!(message.contains("api_url"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyCsrfToken;
        let _: &dyn std::error::Error = &error;
    }
}
