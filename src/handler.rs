use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use lambda_runtime::{Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::api::ResultsApi;
use crate::board::{
    build_board, build_calendar, build_chart, build_schedule, build_today, days_of_month, parse_month, Board,
    CalendarView, ChartView, ScheduleView, TodayView,
};
use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::model::result::{RawResult, ResultRecord};
use crate::time::{current_month, format_date_for_api};
use crate::window::today_and_yesterday;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Board,
    Today,
    Chart,
    Calendar,
    Schedule,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub view: View,
    /// `YYYY-MM-DD` for the schedule view; defaults to today.
    #[serde(default)]
    pub date: Option<String>,
    /// Team name for the chart view, matched exactly.
    #[serde(default)]
    pub team: Option<String>,
    /// `YYYY-MM` for chart and calendar views; defaults to the current month.
    #[serde(default)]
    pub month: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ViewData {
    Board(Board),
    Today(TodayView),
    Chart(ChartView),
    Calendar(CalendarView),
    Schedule(ScheduleView),
}

#[derive(Debug, Clone, Serialize)]
pub struct Response {
    pub view: View,
    pub data: ViewData,
}

#[instrument(skip(event))]
pub async fn handler(event: LambdaEvent<Request>) -> Result<Response, Error> {
    let config = Config::from_env()?;
    let request = event.payload;
    // One clock reading per invocation; every classification below uses it
    let now = Utc::now();

    let view = request.view;
    let data = tokio::task::spawn_blocking(move || {
        let api = ResultsApi::new(&config);
        render_view(&api, config.timezone, &request, now)
    })
    .await??;

    info!(?view, "Rendered view");
    Ok(Response { view, data })
}

/// Fetch what `request.view` needs and assemble it. Blocking.
#[instrument(level = "info", skip(api, tz, now))]
pub fn render_view(api: &ResultsApi, tz: Tz, request: &Request, now: DateTime<Utc>) -> ApiResult<ViewData> {
    match request.view {
        View::Board => {
            let window = today_and_yesterday(now, tz);
            let teams = api.teams()?;
            let today = normalize(api.daily_results(&window.today_str())?, tz);
            let yesterday = normalize(api.daily_results(&window.yesterday_str())?, tz);
            Ok(ViewData::Board(build_board(&teams, yesterday, today, window, now, tz)))
        }
        View::Today => {
            let results = normalize(api.today_results()?, tz);
            Ok(ViewData::Today(build_today(results, now, tz)))
        }
        View::Chart => {
            let team = request
                .team
                .as_deref()
                .filter(|t| !t.is_empty())
                .ok_or_else(|| ApiError::InvalidInput("chart view needs a team".to_string()))?;
            let month = resolve_month(request.month.as_deref(), now, tz)?;
            let results = normalize(api.monthly_results(team, &month)?, tz);
            Ok(ViewData::Chart(build_chart(team, &month, results, tz)))
        }
        View::Calendar => {
            let month = resolve_month(request.month.as_deref(), now, tz)?;
            let first = parse_month(&month).ok_or_else(|| ApiError::InvalidInput(format!("bad month {month:?}")))?;
            let mut results = Vec::new();
            for day in days_of_month(first) {
                let date = day.format("%Y-%m-%d").to_string();
                // A missing day should not take the whole month down
                match api.daily_results(&date) {
                    Ok(raws) => results.extend(normalize(raws, tz).into_iter().map(|mut r| {
                        // Bare slot times carry no date of their own; the request did
                        r.date.get_or_insert(day);
                        r
                    })),
                    Err(e) => warn!(error = %e, date = %date, "Daily results unavailable; showing empty day"),
                }
            }
            Ok(ViewData::Calendar(build_calendar(first, results, tz)))
        }
        View::Schedule => {
            let date = format_date_for_api(request.date.as_deref(), now, tz);
            let games = api.schedule(&date)?;
            let teams = api.teams()?;
            Ok(ViewData::Schedule(build_schedule(&date, games, &teams, now, tz)))
        }
    }
}

fn normalize(raws: Vec<RawResult>, tz: Tz) -> Vec<ResultRecord> {
    ResultRecord::from_raw_list(raws, tz)
}

fn resolve_month(requested: Option<&str>, now: DateTime<Utc>, tz: Tz) -> ApiResult<String> {
    match requested.map(str::trim).filter(|m| !m.is_empty()) {
        Some(m) if parse_month(m).is_some() => Ok(m.to_string()),
        Some(m) => Err(ApiError::InvalidInput(format!("month {m:?} is not YYYY-MM"))),
        None => Ok(current_month(now, tz)),
    }
}
