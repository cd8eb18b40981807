//! URL resolution for the dashboard API.
//!
//! Everything in this module is a pure function of its inputs: no state, no
//! I/O.
//!
//! - [`resolve_item_path`]: list path + identifier → item path
//! - [`resolve_collection_path`]: root + optional segments → collection path
//! - [`build_query_string`] / [`append_query`]: ordered parameters with an
//!   explicit absent sentinel ([`QueryValue::Absent`])
//! - [`ApiUrls`]: every endpoint the dashboard talks to, built from a
//!   [`NemoConfig`](crate::NemoConfig)

mod api_urls;
mod path;
mod query;

pub use api_urls::{ApiUrls, ChartMetric, MetricPeriod};
pub use path::{resolve_collection_path, resolve_item_path, PathSegment, SEPARATOR};
pub use query::{append_query, build_query_string, QueryParams, QueryValue};
