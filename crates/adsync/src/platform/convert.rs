//! Shared normalization helpers used by the per-platform convert modules.

/// Convert a micro-unit monetary amount to decimal currency units.
///
/// Only platforms known to report in micros call this; decimal and
/// integer-minor-unit currencies pass through their values untouched.
#[inline]
#[must_use]
pub fn micros_to_currency(micros: i64) -> f64 {
    micros as f64 / 1_000_000.0
}

/// Parse a metric reported as a string, defaulting to zero.
///
/// Several platforms serialize every metric as a JSON string; absent or
/// malformed values count as zero rather than failing a whole report row.
#[inline]
#[must_use]
pub fn metric_i64(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.parse::<i64>().ok()).unwrap_or(0)
}

/// String-metric variant for decimal values.
#[inline]
#[must_use]
pub fn metric_f64(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.parse::<f64>().ok()).unwrap_or(0.0)
}
