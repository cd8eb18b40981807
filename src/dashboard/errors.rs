//! Error types for dashboard operations.
//!
//! Request failures are wrapped unchanged. A rejected save is split out as
//! [`DashboardError::ValidationFailed`] so that form screens can bind the
//! field messages without inspecting the raw payload.
//!
//! # Example
//!
//! ```rust,ignore
//! use nemo_api::dashboard::DashboardError;
//!
//! match dashboard.save_report(&list_url, None, &body).await {
//!     Ok(saved) => println!("Report {} saved.", saved["id"]),
//!     Err(DashboardError::ValidationFailed { errors }) => show_form_errors(errors),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

use std::collections::HashMap;

use thiserror::Error;

use crate::clients::{InvalidHttpRequestError, RequestError};

/// Error type for dashboard operations.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The request failed.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// The request could not be built.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// The server rejected a submitted form (HTTP 400).
    #[error("Validation failed: {}", describe(.errors))]
    ValidationFailed {
        /// Messages keyed by field name, or `non_field_errors`.
        errors: HashMap<String, Vec<String>>,
    },

    /// A metric declared a value type this crate cannot render.
    #[error("Type {value_type} not supported.")]
    UnsupportedValueType {
        /// The declared type code.
        value_type: String,
    },
}

fn describe(errors: &HashMap<String, Vec<String>>) -> String {
    let mut fields: Vec<_> = errors
        .iter()
        .map(|(field, messages)| format!("{field}: {}", messages.join(",")))
        .collect();
    fields.sort();
    fields.join(" | ")
}
