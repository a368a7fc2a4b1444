use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Asia::Kolkata;
use mockito::Matcher;

use satta_results_board::api::ResultsApi;
use satta_results_board::board::{days_of_month, parse_month};
use satta_results_board::config::Config;
use satta_results_board::error::ApiError;
use satta_results_board::handler::{render_view, Request, View, ViewData};

// 2025-03-12 18:30 IST
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 12, 13, 0, 0).unwrap()
}

fn api_for(url: String) -> ResultsApi {
    ResultsApi::new(&Config { api_url: url, ..Config::default() })
}

fn request(view: View) -> Request {
    Request { view, date: None, team: None, month: None }
}

#[test]
fn serde_view_lowercase() {
    let v: View = serde_json::from_str("\"board\"").unwrap();
    assert_eq!(v, View::Board);
    let v: View = serde_json::from_str("\"calendar\"").unwrap();
    assert_eq!(v, View::Calendar);
    assert_eq!(serde_json::to_string(&View::Schedule).unwrap(), "\"schedule\"");
    assert!(serde_json::from_str::<View>("\"Board\"").is_err());
}

#[test]
fn request_deserializes_with_optional_fields() {
    let req: Request = serde_json::from_value(serde_json::json!({ "view": "today" })).unwrap();
    assert_eq!(req.view, View::Today);
    assert!(req.date.is_none() && req.team.is_none() && req.month.is_none());

    let req: Request =
        serde_json::from_value(serde_json::json!({ "view": "chart", "team": "Gali", "month": "2025-03" })).unwrap();
    assert_eq!(req.team.as_deref(), Some("Gali"));
    assert_eq!(req.month.as_deref(), Some("2025-03"));
}

#[test]
fn board_view_fetches_today_and_yesterday_in_ist() {
    let mut server = mockito::Server::new();
    let teams = server
        .mock("GET", "/api/teams")
        .with_status(200)
        .with_body(include_str!("sample_teams.json"))
        .create();
    let today = server
        .mock("GET", "/api/results/daily")
        .match_query(Matcher::UrlEncoded("date".into(), "2025-03-12".into()))
        .with_status(200)
        .with_body(include_str!("sample_today.json"))
        .create();
    let yesterday = server
        .mock("GET", "/api/results/daily")
        .match_query(Matcher::UrlEncoded("date".into(), "2025-03-11".into()))
        .with_status(200)
        .with_body(include_str!("sample_yesterday.json"))
        .create();

    let data = render_view(&api_for(server.url()), Kolkata, &request(View::Board), now()).expect("board");

    teams.assert();
    today.assert();
    yesterday.assert();
    match data {
        ViewData::Board(board) => {
            assert_eq!(board.teams.len(), 6);
            assert_eq!(board.upcoming.len(), 2);
        }
        other => panic!("expected board, got {:?}", other),
    }
}

#[test]
fn today_view_serializes_counts() {
    let mut server = mockito::Server::new();
    let _today = server
        .mock("GET", "/api/today")
        .with_status(200)
        .with_body(include_str!("sample_today.json"))
        .create();

    let data = render_view(&api_for(server.url()), Kolkata, &request(View::Today), now()).expect("today");
    let value = serde_json::to_value(&data).unwrap();

    assert_eq!(value["date"], "2025-03-12");
    assert_eq!(value["teams"][2]["team"], "Gali");
    assert_eq!(value["teams"][2]["upcoming_count"], 1);
    assert_eq!(value["teams"][2]["results"][0]["result"], "Pending");
}

#[test]
fn chart_view_needs_a_team_and_defaults_month() {
    let err = render_view(&api_for("http://example.invalid".to_string()), Kolkata, &request(View::Chart), now())
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)), "error was: {}", err);

    let mut server = mockito::Server::new();
    let monthly = server
        .mock("POST", "/api/results/monthly")
        .match_body(Matcher::Json(serde_json::json!({ "team": "Gali", "month": "2025-03" })))
        .with_status(200)
        .with_body(r#"[{"team":"Gali","visible_result":"45","result_time":"2025-03-11 23:30:00"}]"#)
        .create();

    let mut req = request(View::Chart);
    req.team = Some("Gali".to_string());
    let data = render_view(&api_for(server.url()), Kolkata, &req, now()).expect("chart");

    monthly.assert();
    match data {
        ViewData::Chart(chart) => {
            assert_eq!(chart.month, "2025-03");
            assert_eq!(chart.rows.len(), 1);
            assert_eq!(chart.rows[0].result, "45");
        }
        other => panic!("expected chart, got {:?}", other),
    }
}

#[test]
fn bad_month_is_rejected() {
    let mut req = request(View::Calendar);
    req.month = Some("03/2025".to_string());
    let err = render_view(&api_for("http://example.invalid".to_string()), Kolkata, &req, now()).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)), "error was: {}", err);
}

#[test]
fn calendar_view_survives_failed_days() {
    let mut server = mockito::Server::new();
    let first = parse_month("2025-02").unwrap();
    let mut mocks = Vec::new();
    for day in days_of_month(first) {
        let date = day.format("%Y-%m-%d").to_string();
        let mock = server
            .mock("GET", "/api/results/daily")
            .match_query(Matcher::UrlEncoded("date".into(), date.clone()));
        let mock = match date.as_str() {
            "2025-02-10" => mock.with_status(500),
            "2025-02-14" => mock
                .with_status(200)
                .with_body(r#"[{"team":"Gali","result":"14","result_time":"2025-02-14 23:30:00"}]"#),
            _ => mock.with_status(200).with_body("[]"),
        };
        mocks.push(mock.create());
    }

    let mut req = request(View::Calendar);
    req.month = Some("2025-02".to_string());
    let data = render_view(&api_for(server.url()), Kolkata, &req, now()).expect("calendar");

    for mock in &mocks {
        mock.assert();
    }
    match data {
        ViewData::Calendar(calendar) => {
            assert_eq!(calendar.days.len(), 28);
            assert!(calendar.days[9].teams.is_empty());
            assert_eq!(calendar.days[13].teams[0].results[0].result, "14");
        }
        other => panic!("expected calendar, got {:?}", other),
    }
}

#[test]
fn schedule_view_defaults_to_today_in_ist() {
    let mut server = mockito::Server::new();
    let schedule = server
        .mock("GET", "/api/schedule")
        .match_query(Matcher::UrlEncoded("date".into(), "2025-03-12".into()))
        .with_status(200)
        .with_body("[]")
        .create();
    let _teams = server.mock("GET", "/api/teams").with_status(200).with_body("[]").create();

    let data = render_view(&api_for(server.url()), Kolkata, &request(View::Schedule), now()).expect("schedule");

    schedule.assert();
    match data {
        ViewData::Schedule(view) => {
            assert_eq!(view.date, "2025-03-12");
            assert!(view.games.is_empty());
        }
        other => panic!("expected schedule, got {:?}", other),
    }
}

#[test]
fn calendar_keeps_rows_with_bare_slot_times_on_their_fetched_day() {
    let mut server = mockito::Server::new();
    let first = parse_month("2025-03").unwrap();
    let mut mocks = Vec::new();
    for day in days_of_month(first) {
        let date = day.format("%Y-%m-%d").to_string();
        let body = if date == "2025-03-12" {
            r#"[{"team":"Gali","result":"45","result_time":"18:00:00"},
                {"team":"Gali","result":"-1","result_time":"23:30:00"},
                {"team":"DESAWAR","result":"07","result_time":"05:00"}]"#
        } else {
            "[]"
        };
        mocks.push(
            server
                .mock("GET", "/api/results/daily")
                .match_query(Matcher::UrlEncoded("date".into(), date))
                .with_status(200)
                .with_body(body)
                .create(),
        );
    }

    let mut req = request(View::Calendar);
    req.month = Some("2025-03".to_string());
    let data = render_view(&api_for(server.url()), Kolkata, &req, now()).expect("calendar");

    match data {
        ViewData::Calendar(calendar) => {
            let twelfth = &calendar.days[11];
            let teams: Vec<&str> = twelfth.teams.iter().map(|t| t.team.as_str()).collect();
            assert_eq!(teams, vec!["Gali", "DESAWAR"]);
            let gali: Vec<(&str, &str)> =
                twelfth.teams[0].results.iter().map(|r| (r.result.as_str(), r.time.as_str())).collect();
            assert_eq!(gali, vec![("45", "6:00 PM"), ("Pending", "11:30 PM")]);
            assert_eq!(twelfth.teams[1].results[0].time, "5:00 AM");
            let other_days = calendar.days.iter().filter(|d| d.day != 12).all(|d| d.teams.is_empty());
            assert!(other_days);
        }
        other => panic!("expected calendar, got {:?}", other),
    }
}
