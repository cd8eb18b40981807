//! Rendering of metric values for display.
//!
//! Metrics declare how their values read: percentages are shown with two
//! decimals, durations in seconds are humanized to their two largest units,
//! and untyped values are shown as they come.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::dashboard::errors::DashboardError;

/// Declared type of a metric value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// A percentage, code `PRC`.
    Percentage,
    /// A duration in seconds, code `SEC`.
    Seconds,
}

impl ValueType {
    /// Returns the wire code of this type.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Percentage => "PRC",
            Self::Seconds => "SEC",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ValueType {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PRC" => Ok(Self::Percentage),
            "SEC" => Ok(Self::Seconds),
            other => Err(DashboardError::UnsupportedValueType {
                value_type: other.to_string(),
            }),
        }
    }
}

const MS_PER_SECOND: u64 = 1_000;

// Calendar units follow the Julian year: 365.25 days, a month being a twelfth.
const UNITS: [(&str, u64); 6] = [
    ("year", 31_557_600_000),
    ("month", 2_629_800_000),
    ("week", 604_800_000),
    ("day", 86_400_000),
    ("hour", 3_600_000),
    ("minute", 60_000),
];

/// Renders `value` according to `value_type`.
///
/// Values that are not numeric (numbers or numeric strings) are rendered
/// unchanged whatever the type. `null` renders as an empty string.
///
/// # Example
///
/// ```rust
/// use nemo_api::dashboard::{readable_value, ValueType};
/// use serde_json::json;
///
/// assert_eq!(readable_value(&json!(12.3456), Some(ValueType::Percentage)), "12.35");
/// assert_eq!(readable_value(&json!(5400), Some(ValueType::Seconds)), "1 hour, 30 minutes");
/// assert_eq!(readable_value(&json!("n/a"), Some(ValueType::Seconds)), "n/a");
/// ```
#[must_use]
pub fn readable_value(value: &Value, value_type: Option<ValueType>) -> String {
    match (value_type, numeric(value)) {
        (Some(ValueType::Percentage), Some(n)) => format!("{n:.2}"),
        (Some(ValueType::Seconds), Some(n)) => humanize_seconds(n),
        _ => passthrough(value),
    }
}

/// Renders `value` according to a type code as sent by the server.
///
/// # Errors
///
/// Returns [`DashboardError::UnsupportedValueType`] if the code is neither
/// `PRC` nor `SEC`.
pub fn readable_value_by_code(
    value: &Value,
    value_type: Option<&str>,
) -> Result<String, DashboardError> {
    let value_type = value_type.map(str::parse::<ValueType>).transpose()?;
    Ok(readable_value(value, value_type))
}

/// Humanizes a duration to its two largest non-zero units.
///
/// Sub-millisecond precision is dropped and the sign is ignored.
///
/// ```rust
/// use nemo_api::dashboard::humanize_seconds;
///
/// assert_eq!(humanize_seconds(90061.0), "1 day, 1 hour");
/// assert_eq!(humanize_seconds(0.0), "0 seconds");
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn humanize_seconds(seconds: f64) -> String {
    let mut remaining = (seconds.abs() * 1000.0).trunc() as u64;
    let mut pieces: Vec<String> = Vec::with_capacity(2);

    for (unit, unit_ms) in UNITS {
        let count = remaining / unit_ms;
        remaining %= unit_ms;
        if count > 0 {
            pieces.push(plural(&count.to_string(), count == 1, unit));
            if pieces.len() == 2 {
                return pieces.join(", ");
            }
        }
    }

    if remaining > 0 || pieces.is_empty() {
        let secs = remaining as f64 / MS_PER_SECOND as f64;
        let rendered = format!("{secs:.3}");
        let rendered = rendered.trim_end_matches('0').trim_end_matches('.');
        pieces.push(plural(rendered, remaining == MS_PER_SECOND, "second"));
    }

    pieces.join(", ")
}

fn plural(count: &str, singular: bool, unit: &str) -> String {
    if singular {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn passthrough(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_percentage_has_two_decimals() {
        assert_eq!(readable_value(&json!(50), Some(ValueType::Percentage)), "50.00");
        assert_eq!(
            readable_value(&json!("33.333"), Some(ValueType::Percentage)),
            "33.33"
        );
    }

    #[test]
    fn test_seconds_humanized_to_two_largest_units() {
        assert_eq!(humanize_seconds(5400.0), "1 hour, 30 minutes");
        assert_eq!(humanize_seconds(3725.0), "1 hour, 2 minutes");
        assert_eq!(humanize_seconds(60.0), "1 minute");
        assert_eq!(humanize_seconds(1.0), "1 second");
        assert_eq!(humanize_seconds(75.5), "1 minute, 15.5 seconds");
        assert_eq!(humanize_seconds(1_209_600.0), "2 weeks");
    }

    #[test]
    fn test_sub_second_and_zero() {
        assert_eq!(humanize_seconds(0.25), "0.25 seconds");
        assert_eq!(humanize_seconds(0.0), "0 seconds");
    }

    #[test]
    fn test_untyped_values_pass_through() {
        assert_eq!(readable_value(&json!(0.123_456), None), "0.123456");
        assert_eq!(readable_value(&json!("n/a"), None), "n/a");
        assert_eq!(readable_value(&Value::Null, Some(ValueType::Percentage)), "");
    }

    #[test]
    fn test_non_numeric_typed_values_pass_through() {
        assert_eq!(
            readable_value(&json!("unknown"), Some(ValueType::Percentage)),
            "unknown"
        );
    }

    #[test]
    fn test_readable_value_by_code() {
        assert_eq!(
            readable_value_by_code(&json!(12.5), Some("PRC")).unwrap(),
            "12.50"
        );
        assert_eq!(readable_value_by_code(&json!(12.5), None).unwrap(), "12.5");

        let error = readable_value_by_code(&json!(1), Some("BYTES")).unwrap_err();
        assert_eq!(error.to_string(), "Type BYTES not supported.");
    }

    #[test]
    fn test_value_type_round_trips_through_code() {
        for value_type in [ValueType::Percentage, ValueType::Seconds] {
            assert_eq!(value_type.code().parse::<ValueType>().unwrap(), value_type);
        }
    }
}
