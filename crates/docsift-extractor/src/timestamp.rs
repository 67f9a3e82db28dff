//! Millisecond timestamps to readable strings

use chrono::{Local, TimeZone};

/// Format used for readable timestamps (one-second precision)
pub const READABLE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Marker shown in place of a missing timestamp
pub const NOT_AVAILABLE: &str = "N/A";

/// Render epoch milliseconds as local time
///
/// Returns `None` when the value is outside chrono's representable range.
pub fn format_local_millis(millis: i64) -> Option<String> {
    format_millis_in(&Local, millis)
}

/// Render epoch milliseconds in the given time zone
pub fn format_millis_in<Tz>(tz: &Tz, millis: i64) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    tz.timestamp_millis_opt(millis)
        .earliest()
        .map(|dt| dt.format(READABLE_FORMAT).to_string())
}
