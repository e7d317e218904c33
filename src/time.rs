use chrono::{DateTime, Utc};

/// Render fractional epoch seconds as a UTC ISO-8601 timestamp with
/// millisecond precision, e.g. `2023-11-14T22:13:20.123Z`.
///
/// The input is rounded to microseconds (the resolution record clocks
/// actually carry) and then truncated, not rounded, to milliseconds.
pub fn format_timestamp(created: f64) -> String {
    let micros = (created * 1_000_000.0).round() as i64;
    let timestamp = DateTime::from_timestamp_micros(micros).unwrap_or(DateTime::UNIX_EPOCH);
    timestamp.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
