//! Browser session state used to authenticate dashboard API calls.
//!
//! The dashboard backend authenticates with a session cookie and guards
//! unsafe methods with Django's CSRF check. A [`Session`] carries the CSRF
//! token read from the `csrftoken` cookie so that the request client can echo
//! it in the `X-CSRFToken` header.

use crate::config::CsrfToken;

/// Name of the cookie holding the CSRF token.
pub const CSRF_COOKIE_NAME: &str = "csrftoken";

/// The client-side view of an authenticated browser session.
///
/// # Thread Safety
///
/// `Session` is `Send + Sync`, making it safe to share across threads.
///
/// # Example
///
/// ```rust
/// use nemo_api::Session;
///
/// let session = Session::from_cookie_header("sessionid=xyz; csrftoken=abc123");
/// assert_eq!(session.csrf_token().map(AsRef::as_ref), Some("abc123"));
///
/// let anonymous = Session::anonymous();
/// assert!(anonymous.csrf_token().is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    csrf_token: Option<CsrfToken>,
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
};

impl Session {
    /// Creates a session with the given CSRF token.
    #[must_use]
    pub const fn new(csrf_token: Option<CsrfToken>) -> Self {
        Self { csrf_token }
    }

    /// Creates a session without a CSRF cookie.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { csrf_token: None }
    }

    /// Parses a `Cookie` header value and picks up the `csrftoken` cookie.
    ///
    /// Malformed pairs are skipped. An empty token counts as absent.
    #[must_use]
    pub fn from_cookie_header(header: &str) -> Self {
        let csrf_token = header
            .split(';')
            .filter_map(|pair| pair.split_once('='))
            .find(|(name, _)| name.trim() == CSRF_COOKIE_NAME)
            .and_then(|(_, value)| CsrfToken::new(value.trim().trim_matches('"')).ok());

        if csrf_token.is_none() {
            tracing::debug!("no {CSRF_COOKIE_NAME} cookie in session");
        }

        Self { csrf_token }
    }

    /// Returns the CSRF token, if the cookie was present.
    #[must_use]
    pub const fn csrf_token(&self) -> Option<&CsrfToken> {
        self.csrf_token.as_ref()
    }
}
