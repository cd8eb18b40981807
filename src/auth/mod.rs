//! Authentication helpers for the dashboard API.
//!
//! The dashboard delegates sign-in to an OpenID Connect provider; this crate
//! never handles credentials. It only needs:
//!
//! - [`Session`]: the CSRF token echoed on every request
//! - [`is_logged_in`]: a probe telling whether the session cookie is still
//!   accepted by the backend
//!
//! # Example
//!
//! ```rust,ignore
//! use nemo_api::auth::is_logged_in;
//!
//! if !is_logged_in(&client, &urls).await {
//!     redirect_to(&urls.login());
//! }
//! ```

pub mod session;

pub use session::{Session, CSRF_COOKIE_NAME};

use crate::clients::{ErrorKind, HttpClient};
use crate::urls::ApiUrls;

/// Probes the user endpoint to find out whether the session is signed in.
///
/// The probe never notifies. Only a 401 answer means signed out: any other
/// failure, including a network failure, still counts as signed in so that
/// a flaky backend does not bounce the user to the identity provider.
pub async fn is_logged_in(client: &HttpClient, urls: &ApiUrls) -> bool {
    match client.get(&urls.user(), false, None).await {
        Ok(_) => true,
        Err(e) if e.kind == ErrorKind::Unauthorized => false,
        Err(e) => {
            tracing::debug!(kind = %e.kind, "login probe failed, assuming signed in");
            true
        }
    }
}
