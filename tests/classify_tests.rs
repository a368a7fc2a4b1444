use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Asia::Kolkata;
use serde_json::json;

use satta_results_board::classify::{is_upcoming, partition_results, record_is_upcoming};
use satta_results_board::model::result::{RawResult, ResultRecord};
use satta_results_board::result_value::PENDING_LABEL;

// 2025-03-12 23:45 IST
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 12, 18, 15, 0).unwrap()
}

fn record(value: serde_json::Value) -> ResultRecord {
    let raw: RawResult = serde_json::from_value(value).unwrap();
    ResultRecord::from_raw(raw, Kolkata)
}

#[test]
fn strictly_future_timestamps_are_upcoming() {
    assert!(is_upcoming("2025-03-13 00:05:00", Kolkata, now()));
    assert!(is_upcoming("2025-03-12T18:15:01Z", Kolkata, now()));
    assert!(!is_upcoming("2025-03-12 23:30:00", Kolkata, now()));
    // equal to now counts as completed
    assert!(!is_upcoming("2025-03-12 23:45:00", Kolkata, now()));
}

#[test]
fn unparseable_timestamps_fail_closed() {
    assert!(!is_upcoming("garbage", Kolkata, now()));
    assert!(!is_upcoming("", Kolkata, now()));
    assert!(!is_upcoming("23:59:00", Kolkata, now()));
}

#[test]
fn late_night_draws_split_around_midnight() {
    let records = vec![
        record(json!({ "team": "Gali", "result": "45", "result_time": "2025-03-12 23:30:00" })),
        record(json!({ "team": "Gali", "result": "-1", "result_time": "2025-03-13 00:05:00" })),
    ];

    let partition = partition_results(records, now());

    assert_eq!(partition.completed.len(), 1);
    assert_eq!(partition.completed[0].display_value().label(), "45");
    assert_eq!(partition.upcoming.len(), 1);
    assert_eq!(partition.upcoming[0].display_value().label(), PENDING_LABEL);
}

#[test]
fn partition_is_disjoint_and_complete() {
    let records = vec![
        record(json!({ "team": "A", "result": "1", "result_time": "2025-03-12 10:00:00" })),
        record(json!({ "team": "B", "result": "-1", "result_time": "2025-03-12 23:50:00" })),
        record(json!({ "team": "C", "result": "-1", "result_time": "not a time" })),
        record(json!({ "team": "D", "result": "-1", "result_time": "2025-03-13T01:00:00+05:30" })),
    ];

    let partition = partition_results(records.clone(), now());

    assert_eq!(partition.upcoming.len() + partition.completed.len(), records.len());
    let upcoming: Vec<&str> = partition.upcoming.iter().map(|r| r.team.as_str()).collect();
    let completed: Vec<&str> = partition.completed.iter().map(|r| r.team.as_str()).collect();
    assert_eq!(upcoming, vec!["B", "D"]);
    assert_eq!(completed, vec!["A", "C"]);
    assert!(partition.upcoming.iter().all(|r| record_is_upcoming(r, now())));
}
