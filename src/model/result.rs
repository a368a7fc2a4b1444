use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::result_value::ResultValue;
use crate::time::parse_timestamp;

/// Result row as the backend sends it.
///
/// Backend versions disagree on field names and on whether values are strings
/// or numbers, so everything is optional and values stay untyped JSON here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawResult {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, alias = "team_name")]
    pub team: String,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default, alias = "visibleResult")]
    pub visible_result: Option<serde_json::Value>,
    #[serde(default, alias = "resultTime")]
    pub result_time: Option<String>,
    #[serde(default, alias = "resultDate")]
    pub result_date: Option<String>,
}

/// Canonical result record, normalized once at the API boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    pub id: Option<i64>,
    pub team: String,
    pub result: ResultValue,
    pub visible_result: ResultValue,
    /// Time string exactly as received, kept for display of bare slot times.
    pub result_time: Option<String>,
    /// Parsed instant in the target zone; `None` when the time was not a full timestamp.
    pub timestamp: Option<DateTime<Tz>>,
    /// Calendar day in the target zone.
    pub date: Option<NaiveDate>,
}

impl ResultRecord {
    pub fn from_raw(raw: RawResult, tz: Tz) -> Self {
        let timestamp = raw.result_time.as_deref().and_then(|s| parse_timestamp(s, tz));
        let date = timestamp.map(|dt| dt.date_naive()).or_else(|| {
            raw.result_date
                .as_deref()
                .and_then(|s| parse_timestamp(s, tz))
                .map(|dt| dt.date_naive())
        });
        if timestamp.is_none() {
            debug!(team = %raw.team, result_time = ?raw.result_time, "Result has no parseable timestamp");
        }

        ResultRecord {
            id: raw.id,
            team: raw.team,
            result: ResultValue::from_json(raw.result.as_ref()),
            visible_result: ResultValue::from_json(raw.visible_result.as_ref()),
            result_time: raw.result_time,
            timestamp,
            date,
        }
    }

    /// Normalize a whole response.
    pub fn from_raw_list(raws: Vec<RawResult>, tz: Tz) -> Vec<Self> {
        raws.into_iter().map(|r| Self::from_raw(r, tz)).collect()
    }

    /// The value to show publicly: the visible field when present, else the raw result.
    pub fn display_value(&self) -> &ResultValue {
        if self.visible_result.is_missing() {
            &self.result
        } else {
            &self.visible_result
        }
    }
}

/// Body for publishing or editing a result through the admin API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultInput {
    pub team: String,
    pub result: String,
    pub result_time: String,
}
