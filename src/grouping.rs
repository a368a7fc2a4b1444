//! Grouping of flat result lists by team and by calendar day.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::warn;

use crate::model::result::ResultRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct TeamGroup {
    pub team: String,
    pub results: Vec<ResultRecord>,
}

/// Group by exact team name, teams in order of first appearance.
///
/// Within a team results are ascending by timestamp. Records without a usable
/// timestamp go last; ties keep input order. Nothing is dropped or merged, so a
/// team with several draws on one day keeps all of them.
pub fn group_by_team_and_sort(results: Vec<ResultRecord>) -> Vec<TeamGroup> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<TeamGroup> = Vec::new();

    for record in results {
        match index.get(&record.team) {
            Some(&i) => groups[i].results.push(record),
            None => {
                index.insert(record.team.clone(), groups.len());
                groups.push(TeamGroup { team: record.team.clone(), results: vec![record] });
            }
        }
    }

    for group in &mut groups {
        sort_by_timestamp(&mut group.results);
    }
    groups
}

/// Stable ascending sort by instant, records without one last.
pub fn sort_by_timestamp(results: &mut [ResultRecord]) {
    // Option orders None first, so sort on (missing, instant) to push unparsed rows last
    results.sort_by_key(|r| (r.timestamp.is_none(), r.timestamp.map(|t| t.naive_utc())));
}

/// Group by calendar day in `tz`, days ascending, input order kept within a day.
///
/// The day comes from the record's timestamp converted into `tz`; records with
/// no timestamp fall back to their backend-supplied date, and records with
/// neither are left out.
pub fn group_by_calendar_day(results: Vec<ResultRecord>, tz: Tz) -> BTreeMap<NaiveDate, Vec<ResultRecord>> {
    let mut days: BTreeMap<NaiveDate, Vec<ResultRecord>> = BTreeMap::new();
    for record in results {
        let day = record
            .timestamp
            .map(|t| t.with_timezone(&tz).date_naive())
            .or(record.date);
        match day {
            Some(d) => days.entry(d).or_default().push(record),
            None => warn!(team = %record.team, result_time = ?record.result_time, "Result has no date; left out of calendar"),
        }
    }
    days
}
