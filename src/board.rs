//! Assembly of the public result pages from already-fetched data.
//!
//! Everything here is pure: data in, `now` in, serializable view out.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::classify::{is_upcoming, partition_results, record_is_upcoming};
use crate::grouping::{group_by_calendar_day, group_by_team_and_sort, sort_by_timestamp, TeamGroup};
use crate::model::result::ResultRecord;
use crate::model::schedule::{GameStatus, ScheduledGame};
use crate::model::team::Team;
use crate::time::{format_display_time, PLACEHOLDER};
use crate::window::DateWindow;

/// One result cell: display value plus display time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayResult {
    pub result: String,
    pub time: String,
}

impl DisplayResult {
    pub fn from_record(record: &ResultRecord, tz: Tz) -> Self {
        Self {
            result: record.display_value().label().to_string(),
            time: format_display_time(record.result_time.as_deref(), tz),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardTeam {
    pub id: i64,
    pub name: String,
    /// Latest draw time today, else the team's usual slot.
    pub time: String,
    pub yesterday: Vec<DisplayResult>,
    /// Completed draws only; upcoming ones are listed separately.
    pub today: Vec<DisplayResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingEntry {
    pub team: String,
    pub time: String,
}

/// Home page: every team with yesterday's and today's results side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    pub today: NaiveDate,
    pub yesterday: NaiveDate,
    pub current_time: String,
    pub teams: Vec<BoardTeam>,
    pub upcoming: Vec<UpcomingEntry>,
}

pub fn build_board(
    teams: &[Team],
    yesterday_results: Vec<ResultRecord>,
    today_results: Vec<ResultRecord>,
    window: DateWindow,
    now: DateTime<Utc>,
    tz: Tz,
) -> Board {
    let mut upcoming = partition_results(today_results.clone(), now).upcoming;
    sort_by_timestamp(&mut upcoming);

    let yesterday_by_team = index_groups(group_by_team_and_sort(yesterday_results));
    let today_by_team = index_groups(group_by_team_and_sort(today_results));

    let board_teams = teams
        .iter()
        .map(|team| {
            let yesterday: Vec<DisplayResult> = yesterday_by_team
                .get(team.name.as_str())
                .map(|rs| rs.iter().map(|r| DisplayResult::from_record(r, tz)).collect())
                .unwrap_or_default();
            let todays = today_by_team.get(team.name.as_str());
            let today: Vec<DisplayResult> = todays
                .map(|rs| {
                    rs.iter()
                        .filter(|r| !record_is_upcoming(r, now))
                        .map(|r| DisplayResult::from_record(r, tz))
                        .collect()
                })
                .unwrap_or_default();

            // Groups are sorted ascending, so the last timed record is the latest
            let latest = todays.and_then(|rs| rs.iter().rev().find(|r| r.timestamp.is_some()));
            let time = match latest {
                Some(r) => format_display_time(r.result_time.as_deref(), tz),
                None => format_display_time(team.scheduled_time.as_deref(), tz),
            };

            BoardTeam { id: team.id, name: team.name.clone(), time, yesterday, today }
        })
        .collect();

    Board {
        today: window.today,
        yesterday: window.yesterday,
        current_time: now.with_timezone(&tz).format("%d/%m/%Y, %-I:%M:%S %p").to_string(),
        teams: board_teams,
        upcoming: upcoming
            .iter()
            .map(|r| UpcomingEntry {
                team: r.team.clone(),
                time: format_display_time(r.result_time.as_deref(), tz),
            })
            .collect(),
    }
}

fn index_groups(groups: Vec<TeamGroup>) -> HashMap<String, Vec<ResultRecord>> {
    groups.into_iter().map(|g| (g.team, g.results)).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodayEntry {
    pub result: String,
    pub time: String,
    pub upcoming: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodayTeam {
    pub team: String,
    pub results: Vec<TodayEntry>,
    pub upcoming_count: usize,
    pub completed_count: usize,
}

/// Today's draws grouped per team with upcoming/completed counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodayView {
    pub date: NaiveDate,
    pub teams: Vec<TodayTeam>,
}

pub fn build_today(results: Vec<ResultRecord>, now: DateTime<Utc>, tz: Tz) -> TodayView {
    let teams = group_by_team_and_sort(results)
        .into_iter()
        .map(|group| {
            let results: Vec<TodayEntry> = group
                .results
                .iter()
                .map(|r| TodayEntry {
                    result: r.display_value().label().to_string(),
                    time: format_display_time(r.result_time.as_deref(), tz),
                    upcoming: record_is_upcoming(r, now),
                })
                .collect();
            let upcoming_count = results.iter().filter(|e| e.upcoming).count();
            TodayTeam {
                team: group.team,
                upcoming_count,
                completed_count: results.len() - upcoming_count,
                results,
            }
        })
        .collect();

    TodayView { date: now.with_timezone(&tz).date_naive(), teams }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartRow {
    pub date: String,
    pub time: String,
    pub result: String,
    pub pending: bool,
}

/// One team's month of results in draw order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartView {
    pub team: String,
    pub month: String,
    pub rows: Vec<ChartRow>,
}

pub fn build_chart(team: &str, month: &str, mut results: Vec<ResultRecord>, tz: Tz) -> ChartView {
    sort_by_timestamp(&mut results);
    let rows = results
        .iter()
        .map(|r| ChartRow {
            date: r
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            time: format_display_time(r.result_time.as_deref(), tz),
            result: r.display_value().label().to_string(),
            pending: r.display_value().is_pending(),
        })
        .collect();
    ChartView { team: team.to_string(), month: month.to_string(), rows }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarTeam {
    pub team: String,
    pub results: Vec<DisplayResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub day: u32,
    pub date: NaiveDate,
    pub teams: Vec<CalendarTeam>,
}

/// Month grid: blank cells before the 1st (weeks start on Sunday), then one cell per day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarView {
    pub month: String,
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

/// Parse `YYYY-MM` into the first day of that month.
pub fn parse_month(month: &str) -> Option<NaiveDate> {
    let month = month.trim();
    if month.len() != 7 {
        return None;
    }
    NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").ok()
}

/// Every date of the month starting at `first`.
pub fn days_of_month(first: NaiveDate) -> Vec<NaiveDate> {
    first
        .iter_days()
        .take_while(|d| d.month() == first.month() && d.year() == first.year())
        .collect()
}

pub fn build_calendar(first: NaiveDate, results: Vec<ResultRecord>, tz: Tz) -> CalendarView {
    let mut by_day = group_by_calendar_day(results, tz);

    let days = days_of_month(first)
        .into_iter()
        .map(|date| {
            let teams: Vec<CalendarTeam> = by_day
                .remove(&date)
                .map(|records| {
                    group_by_team_and_sort(records)
                        .into_iter()
                        .map(|g| CalendarTeam {
                            results: g.results.iter().map(|r| DisplayResult::from_record(r, tz)).collect(),
                            team: g.team,
                        })
                        .collect()
                })
                .unwrap_or_default();
            CalendarDay { day: date.day(), date, teams }
        })
        .collect();

    CalendarView {
        month: first.format("%Y-%m").to_string(),
        leading_blanks: first.weekday().num_days_from_sunday(),
        days,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    pub id: i64,
    pub home_team: String,
    pub away_team: String,
    pub time: String,
    pub status: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleView {
    pub date: String,
    pub games: Vec<ScheduleEntry>,
    /// Scheduled games that have not started yet.
    pub upcoming_count: usize,
}

pub fn build_schedule(
    date: &str,
    mut games: Vec<ScheduledGame>,
    teams: &[Team],
    now: DateTime<Utc>,
    tz: Tz,
) -> ScheduleView {
    let names: HashMap<i64, &str> = teams.iter().map(|t| (t.id, t.name.as_str())).collect();
    let name_of = |id: i64| names.get(&id).map(|s| s.to_string()).unwrap_or_else(|| format!("Team #{id}"));

    games.sort_by(|a, b| (a.game_date, &a.game_time).cmp(&(b.game_date, &b.game_time)));

    let upcoming_count = games
        .iter()
        .filter(|g| g.status == GameStatus::Scheduled)
        .filter(|g| {
            let stamp = format!("{} {}", g.game_date, g.game_time);
            is_upcoming(&stamp, tz, now)
        })
        .count();

    let entries = games
        .iter()
        .map(|g| ScheduleEntry {
            id: g.id,
            home_team: name_of(g.home_team_id),
            away_team: name_of(g.away_team_id),
            time: format_display_time(Some(g.game_time.as_str()), tz),
            status: g.status.label(),
        })
        .collect();

    ScheduleView { date: date.to_string(), games: entries, upcoming_count }
}
