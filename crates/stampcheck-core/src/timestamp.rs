//! Timestamp codec
//!
//! Records and entries carry timestamps as `YY-MM-DDTHH:MM:SSZ` strings
//! (two-digit year, no offset other than the literal `Z`).

use crate::errors::{Result, StampError};
use chrono::{Duration, NaiveDateTime};

/// chrono pattern for the on-disk timestamp format
pub const TIMESTAMP_FORMAT: &str = "%y-%m-%dT%H:%M:%SZ";

/// chrono pattern used when printing timestamps in diagnostics
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const SECONDS_PER_DAY: i64 = 86_400;

/// Parse a `YY-MM-DDTHH:MM:SSZ` string
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|e| {
        StampError::InvalidTimestamp {
            value: value.to_string(),
            reason: format!("does not match format '{}' ({})", TIMESTAMP_FORMAT, e),
        }
    })
}

pub fn format_timestamp(datetime: &NaiveDateTime) -> String {
    datetime.format(TIMESTAMP_FORMAT).to_string()
}

pub fn format_display(datetime: &NaiveDateTime) -> String {
    datetime.format(DISPLAY_FORMAT).to_string()
}

/// Whole days of a difference, rounded toward negative infinity
///
/// A difference of -30 minutes is on day -1, not day 0.
pub fn floor_days(delta: Duration) -> i64 {
    delta.num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// Render a difference as `[N day[s], ]H:MM:SS`
///
/// The day part is floored, so the clock part is always positive:
/// -30 minutes renders as `-1 day, 23:30:00`.
pub fn format_delta(delta: Duration) -> String {
    let days = floor_days(delta);
    let rem = delta.num_seconds().rem_euclid(SECONDS_PER_DAY);
    let clock = format!("{}:{:02}:{:02}", rem / 3600, (rem % 3600) / 60, rem % 60);

    if days == 0 {
        clock
    } else {
        let unit = if days.abs() == 1 { "day" } else { "days" };
        format!("{} {}, {}", days, unit, clock)
    }
}
