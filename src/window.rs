//! "Today" and "yesterday" as calendar dates in the target zone.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub today: NaiveDate,
    pub yesterday: NaiveDate,
}

impl DateWindow {
    pub fn today_str(&self) -> String {
        self.today.format("%Y-%m-%d").to_string()
    }

    pub fn yesterday_str(&self) -> String {
        self.yesterday.format("%Y-%m-%d").to_string()
    }
}

/// Wall-clock reading of `now` in `tz`, detached from any offset.
///
/// All calendar arithmetic happens on this value so the host's own zone never leaks in.
pub fn wall_clock_in(now: DateTime<Utc>, tz: Tz) -> NaiveDateTime {
    now.with_timezone(&tz).naive_local()
}

/// Compute today and yesterday in `tz` for the instant `now`.
pub fn today_and_yesterday(now: DateTime<Utc>, tz: Tz) -> DateWindow {
    let today = wall_clock_in(now, tz).date();
    // NaiveDate::MIN has no predecessor; clamp instead of panicking
    let yesterday = today.pred_opt().unwrap_or(today);
    DateWindow { today, yesterday }
}
