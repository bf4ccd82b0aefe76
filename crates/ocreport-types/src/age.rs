//! Resource age formatting

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

/// Format of `metadata.creationTimestamp` as emitted by the client
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: i64 = 24 * SECS_PER_HOUR;

#[derive(Debug, Error)]
#[error("invalid creation timestamp '{value}': {source}")]
pub struct TimestampError {
    pub value: String,
    #[source]
    pub source: chrono::ParseError,
}

/// Parse a second-precision UTC timestamp such as `2024-01-15T10:30:00Z`
///
/// Fractional seconds and numeric offsets are rejected.
pub fn parse_creation_timestamp(value: &str) -> Result<DateTime<Utc>, TimestampError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|source| TimestampError {
            value: value.to_string(),
            source,
        })
}

/// Render the time elapsed between `created` and `now` using the two
/// coarsest units: `"2d 5h"`, `"3h 12m"` or `"45m"`.
///
/// A creation time in the future counts as zero elapsed.
pub fn format_age(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(created).num_seconds().max(0);

    let days = elapsed / SECS_PER_DAY;
    let hours = (elapsed % SECS_PER_DAY) / SECS_PER_HOUR;
    let minutes = (elapsed % SECS_PER_HOUR) / SECS_PER_MINUTE;

    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn age_after(secs: i64) -> String {
        let created = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        format_age(created, created + Duration::seconds(secs))
    }

    #[test]
    fn test_age_boundaries() {
        assert_eq!(age_after(0), "0m");
        assert_eq!(age_after(59), "0m");
        assert_eq!(age_after(60), "1m");
        assert_eq!(age_after(3599), "59m");
        assert_eq!(age_after(3600), "1h 0m");
        assert_eq!(age_after(86399), "23h 59m");
        assert_eq!(age_after(86400), "1d 0h");
        assert_eq!(age_after(90000), "1d 1h");
    }

    #[test]
    fn test_age_future_creation_is_zero() {
        assert_eq!(age_after(-7200), "0m");
    }

    #[test]
    fn test_parse_creation_timestamp() {
        let ts = parse_creation_timestamp("2024-01-15T10:30:00Z").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_other_formats() {
        assert!(parse_creation_timestamp("2024-01-15T10:30:00.123Z").is_err());
        assert!(parse_creation_timestamp("2024-01-15T10:30:00+02:00").is_err());
        assert!(parse_creation_timestamp("yesterday").is_err());

        let err = parse_creation_timestamp("").unwrap_err();
        assert!(err.to_string().contains("invalid creation timestamp"));
    }
}
