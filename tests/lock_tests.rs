mod common;

use chrono::{DateTime, Duration, TimeZone, Utc};

use fantasy_hoops_lambda_rust::lock::{self, locked_players};
use fantasy_hoops_lambda_rust::model::game::GameStatusRow;
use fantasy_hoops_lambda_rust::model::player::PlayerId;

fn row(player: &str, status: &str, datetime: Option<DateTime<Utc>>) -> GameStatusRow {
    GameStatusRow {
        player_id: PlayerId::new(player),
        status: Some(status.to_string()),
        game_datetime: datetime,
        ..Default::default()
    }
}

fn tipoff() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 8, 23, 30, 0).unwrap()
}

#[test]
fn final_status_locks_regardless_of_time() {
    let far_future = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
    let rows = vec![
        row("1", "Final", Some(far_future)),
        row("2", "  FINAL/OT ", None),
        row("3", "Final", None),
    ];
    let now = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    let locked = locked_players(&rows, now);
    assert_eq!(locked.len(), 3);
    for id in ["1", "2", "3"] {
        assert!(locked.contains_raw(id), "player {} should be locked", id);
    }
}

#[test]
fn live_and_complete_statuses_lock() {
    let now = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    for status in ["In Progress", "STATUS_IN_PROGRESS", "Live", "Completed", "Halftime - Live"] {
        let locked = locked_players(&[row("9", status, None)], now);
        assert!(locked.contains_raw("9"), "status {:?} should lock", status);
    }
}

#[test]
fn one_hour_boundary() {
    let rows = vec![row("7", "Scheduled", Some(tipoff()))];

    let early = tipoff() - Duration::minutes(61);
    assert!(locked_players(&rows, early).is_empty());

    let late = tipoff() - Duration::minutes(59);
    assert!(locked_players(&rows, late).contains_raw("7"));

    let exact = tipoff() - Duration::minutes(60);
    assert!(locked_players(&rows, exact).contains_raw("7"), "locks at exactly one hour out");
}

#[test]
fn empty_rows_lock_nobody() {
    for now in [Utc.with_ymd_and_hms(1999, 1, 1, 0, 0, 0).unwrap(), tipoff(), Utc::now()] {
        assert!(locked_players(&[], now).is_empty());
    }
}

#[test]
fn game_date_falls_back_to_midnight_utc() {
    let mut r = row("8", "Scheduled", None);
    r.game_date = chrono::NaiveDate::from_ymd_opt(2025, 1, 10);

    let before = Utc.with_ymd_and_hms(2025, 1, 9, 22, 59, 0).unwrap();
    assert!(locked_players(std::slice::from_ref(&r), before).is_empty());

    let after = Utc.with_ymd_and_hms(2025, 1, 9, 23, 0, 0).unwrap();
    assert!(locked_players(std::slice::from_ref(&r), after).contains_raw("8"));
}

#[test]
fn no_timing_and_no_locking_status_stays_unlocked() {
    let rows = vec![row("5", "", None), row("6", "Postponed", None)];
    let now = Utc.with_ymd_and_hms(2099, 1, 1, 0, 0, 0).unwrap();
    assert!(locked_players(&rows, now).is_empty());
}

#[test]
fn any_locking_game_locks_the_player() {
    let later = tipoff() + Duration::days(3);
    let rows = vec![row("11", "Scheduled", Some(later)), row("11", "Scheduled", Some(tipoff()))];
    let now = tipoff() - Duration::minutes(30);
    let locked = locked_players(&rows, now);
    assert_eq!(locked.len(), 1);
    assert!(locked.contains_raw("11"));
}

#[test]
fn numeric_and_string_ids_normalize_identically() {
    let json = r#"[{"player_id": 42, "status": "Final"}, {"player_id": "43", "status": "Final"}]"#;
    let rows: Vec<GameStatusRow> = serde_json::from_str(json).unwrap();
    let locked = locked_players(&rows, tipoff());
    assert!(locked.contains(&PlayerId::from(42)));
    assert!(locked.contains_raw(" 43 "));
    assert!(locked.contains_raw("42.0"));
}

#[test]
fn evaluates_fixture_schedule() {
    let rows: Vec<GameStatusRow> = common::fixture_rows("week_schedule.json");
    // Wednesday evening, an hour before Broome's 23:30 UTC tip.
    let now = Utc.with_ymd_and_hms(2025, 1, 8, 22, 30, 0).unwrap();
    let locked = locked_players(&rows, now);

    let ids: Vec<&str> = locked.iter().map(|p| p.as_str()).collect();
    // 101 final, 102 in progress, 103 one hour out, 106 live in another game.
    assert_eq!(ids, vec!["101", "102", "103", "106"]);
    // 104's bad datetime falls back to its 2025-01-10 date, still in the future.
    assert!(!locked.contains_raw("104"));
    assert!(!locked.contains_raw("105"));

    // Identical inputs, identical output.
    assert_eq!(locked, locked_players(&rows, now));
}

#[test]
fn next_deadline_is_earliest_unlocked_game() {
    let first = tipoff() + Duration::days(1);
    let second = tipoff() + Duration::days(2);
    let rows = vec![row("21", "Scheduled", Some(second)), row("21", "Scheduled", Some(first)), row("22", "Final", None)];
    let deadlines = lock::next_deadlines(&rows, tipoff());
    assert_eq!(deadlines.len(), 1);
    assert_eq!(deadlines[&PlayerId::from(21)], first - Duration::hours(1));
}
