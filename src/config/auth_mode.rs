//! Authentication mode of the dashboard backend.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// How users authenticate against the dashboard backend.
///
/// Only OpenID Connect is supported today; the login and logout endpoints
/// are resolved according to this mode.
///
/// # Example
///
/// ```rust
/// use nemo_api::AuthMode;
///
/// let mode: AuthMode = "OIDC".parse().unwrap();
/// assert_eq!(mode, AuthMode::Oidc);
/// assert_eq!(mode.to_string(), "OIDC");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AuthMode {
    /// OpenID Connect through the backend's `/api/oidc` endpoints.
    #[default]
    Oidc,
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Oidc => f.write_str("OIDC"),
        }
    }
}

impl FromStr for AuthMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OIDC" => Ok(Self::Oidc),
            _ => Err(ConfigError::InvalidAuthMode {
                mode: s.to_string(),
            }),
        }
    }
}
