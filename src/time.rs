//! Timestamp parsing and display formatting in a fixed target zone.
//!
//! Backend timestamps come in several shapes: RFC 3339 with an offset, SQL-style
//! `YYYY-MM-DD HH:MM:SS` without one, bare dates, and bare `HH:MM[:SS]` slot
//! times. Offset-less values are wall-clock times in the target zone.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::warn;

/// Shown wherever a time or date is missing or cannot be parsed.
pub const PLACEHOLDER: &str = "N/A";

const TIME_FORMAT: &str = "%-I:%M %p";
const DATE_FORMAT: &str = "%m/%d/%Y";

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const FRAGMENT_FORMATS: [&str; 4] = ["%H:%M:%S", "%H:%M", "%I:%M %p", "%I:%M:%S %p"];

/// Parse a full timestamp into an instant localized to `tz`.
///
/// Returns `None` for anything that is not a complete date (time fragments included).
pub fn parse_timestamp(input: &str, tz: Tz) -> Option<DateTime<Tz>> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&tz));
    }
    for pat in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, pat) {
            return Some(dt.with_timezone(&tz));
        }
    }
    for pat in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, pat) {
            return localize(naive, tz);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return localize(date.and_time(NaiveTime::MIN), tz);
    }
    None
}

/// Parse a bare slot time such as `18:30`, `18:30:00` or `06:30 PM`.
pub fn parse_time_fragment(input: &str) -> Option<NaiveTime> {
    let s = input.trim();
    FRAGMENT_FORMATS
        .iter()
        .find_map(|pat| NaiveTime::parse_from_str(s, pat).ok())
}

/// Render the time-of-day of `input` as `H:MM AM|PM`.
///
/// Full timestamps are converted into `tz`; bare fragments are taken as already
/// local. Anything else yields [`PLACEHOLDER`].
pub fn format_display_time(input: Option<&str>, tz: Tz) -> String {
    let Some(raw) = input.map(str::trim).filter(|s| !s.is_empty()) else {
        return PLACEHOLDER.to_string();
    };
    if let Some(dt) = parse_timestamp(raw, tz) {
        return dt.format(TIME_FORMAT).to_string();
    }
    match parse_time_fragment(raw) {
        Some(t) => twelve_hour(t),
        None => PLACEHOLDER.to_string(),
    }
}

/// Render the calendar date of `input` in `tz` as `MM/DD/YYYY`.
pub fn format_display_date(input: Option<&str>, tz: Tz) -> String {
    input
        .and_then(|s| parse_timestamp(s, tz))
        .map(|dt| dt.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Date and time together; a single placeholder when the input is unusable.
pub fn format_display_datetime(input: Option<&str>, tz: Tz) -> String {
    match input.and_then(|s| parse_timestamp(s, tz)) {
        Some(dt) => format!("{} {}", dt.format(DATE_FORMAT), dt.format(TIME_FORMAT)),
        None => PLACEHOLDER.to_string(),
    }
}

/// Normalize a date argument for the backend's `?date=` parameters.
///
/// A plain `YYYY-MM-DD` passes through untouched, a full timestamp is reduced to
/// its date in `tz`, and anything else falls back to today in `tz`.
pub fn format_date_for_api(input: Option<&str>, now: DateTime<Utc>, tz: Tz) -> String {
    if let Some(s) = input.map(str::trim).filter(|s| !s.is_empty()) {
        if is_plain_date(s) {
            return s.to_string();
        }
        if let Some(dt) = parse_timestamp(s, tz) {
            return dt.date_naive().format("%Y-%m-%d").to_string();
        }
        warn!(input = %s, "Unusable date for API request, using today");
    }
    now.with_timezone(&tz).date_naive().format("%Y-%m-%d").to_string()
}

/// The `YYYY-MM` month containing `now` in `tz`.
pub fn current_month(now: DateTime<Utc>, tz: Tz) -> String {
    now.with_timezone(&tz).format("%Y-%m").to_string()
}

fn is_plain_date(s: &str) -> bool {
    s.len() == 10 && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

// Ambiguous wall-clock times (DST fold) resolve to the earlier instant; skipped ones don't exist.
fn localize(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&naive).earliest()
}

fn twelve_hour(t: NaiveTime) -> String {
    use chrono::Timelike;
    let period = if t.hour() >= 12 { "PM" } else { "AM" };
    let hour = match t.hour() % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", hour, t.minute(), period)
}
