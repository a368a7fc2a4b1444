//! Upcoming vs. completed split of scheduled results.
//!
//! Every function takes `now` explicitly; callers capture it once per view so a
//! whole render pass agrees on the same instant.

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::model::result::ResultRecord;
use crate::time::parse_timestamp;

/// True when `result_time` is strictly after `now`. Unparseable input is never upcoming.
pub fn is_upcoming(result_time: &str, tz: Tz, now: DateTime<Utc>) -> bool {
    parse_timestamp(result_time, tz).is_some_and(|t| is_after(&t, now))
}

/// Same rule applied to an already normalized record.
pub fn record_is_upcoming(record: &ResultRecord, now: DateTime<Utc>) -> bool {
    record.timestamp.as_ref().is_some_and(|t| is_after(t, now))
}

fn is_after<Z: TimeZone>(t: &DateTime<Z>, now: DateTime<Utc>) -> bool {
    t.with_timezone(&Utc) > now
}

/// Results split into two disjoint lists, each keeping input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    pub upcoming: Vec<ResultRecord>,
    /// Timestamp at or before `now`, or no usable timestamp at all.
    pub completed: Vec<ResultRecord>,
}

pub fn partition_results(records: Vec<ResultRecord>, now: DateTime<Utc>) -> Partition {
    let (upcoming, completed): (Vec<_>, Vec<_>) = records
        .into_iter()
        .partition(|r| record_is_upcoming(r, now));
    Partition { upcoming, completed }
}
