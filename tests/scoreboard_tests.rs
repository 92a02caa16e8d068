mod common;

use std::collections::BTreeMap;

use fantasy_hoops_lambda_rust::directory::TeamDirectory;
use fantasy_hoops_lambda_rust::model::lineup::{Slot, SlotResultRow};
use fantasy_hoops_lambda_rust::model::matchup::MatchupRow;
use fantasy_hoops_lambda_rust::scoreboard::{
    self, MatchupPair, RowKind, build_team_score_block, format_player_name, pair_matchups, starter_total,
};

fn scored(slot: Slot, points: Option<f64>) -> SlotResultRow {
    SlotResultRow {
        slot: Some(slot),
        first_name: Some("Test".to_string()),
        last_name: Some(format!("Player{}", slot.code())),
        points,
        ..Default::default()
    }
}

fn full_lineup(points: [f64; 7]) -> Vec<SlotResultRow> {
    Slot::ALL.iter().zip(points).map(|(slot, p)| scored(*slot, Some(p))).collect()
}

fn matchup(week: i32, team: i64, opponent: i64) -> MatchupRow {
    MatchupRow {
        season: Some(2025),
        week: Some(week),
        fantasy_team_id: Some(team),
        opponent_fantasy_team_id: Some(opponent),
    }
}

#[test]
fn tiebreakers_never_count() {
    let base = full_lineup([10.0, 10.0, 10.0, 10.0, 10.0, 0.0, 0.0]);
    let boosted = full_lineup([10.0, 10.0, 10.0, 10.0, 10.0, 45.0, 38.0]);
    assert_eq!(starter_total(&base), 50.0);
    assert_eq!(starter_total(&boosted), 50.0);
    assert_eq!(build_team_score_block(&base, 20.0).margin, build_team_score_block(&boosted, 20.0).margin);
}

#[test]
fn margins_are_antisymmetric() {
    let a = full_lineup([12.0, 7.5, 3.0, 22.0, 9.0, 1.0, 2.0]);
    let b = full_lineup([4.0, 18.0, 6.5, 11.0, 0.0, 30.0, 0.0]);
    let a_block = build_team_score_block(&a, starter_total(&b));
    let b_block = build_team_score_block(&b, starter_total(&a));
    assert_eq!(a_block.margin, -b_block.margin);
    assert_eq!(a_block.average_margin, -b_block.average_margin);
}

#[test]
fn zero_total_reports_zero_average() {
    let block = build_team_score_block(&[], 40.0);
    assert_eq!(block.starter_total, 0.0);
    assert_eq!(block.average_starters, 0.0);
    assert_eq!(block.margin, -40.0);
    assert_eq!(block.average_margin, -8.0);
}

#[test]
fn scoreless_starters_ignore_tiebreaker_points() {
    let rows = full_lineup([0.0, 0.0, 0.0, 0.0, 0.0, 50.0, 0.0]);
    let block = build_team_score_block(&rows, 0.0);
    assert_eq!(block.starter_total, 0.0);
    assert_eq!(block.average_starters, 0.0);
    assert_eq!(block.margin, 0.0);
    assert_eq!(block.average_margin, 0.0);

    let total = block.rows.iter().find(|r| r.kind == RowKind::Total).unwrap();
    assert_eq!(total.points, "0");
    assert_eq!(total.player, "Margin 0");
    let t1 = block.rows.iter().find(|r| r.slot == Some(Slot::Tiebreaker1)).unwrap();
    assert_eq!(t1.points, "50");
}

#[test]
fn rows_come_out_in_fixed_order() {
    // Input order must not matter.
    let mut rows = full_lineup([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    rows.reverse();
    let block = build_team_score_block(&rows, 0.0);

    let labels: Vec<&str> = block.rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["C", "F", "F", "G", "G", "Total", "Average", "T1", "T2"]);

    let kinds: Vec<RowKind> = block.rows.iter().map(|r| r.kind).collect();
    assert_eq!(kinds[5], RowKind::Total);
    assert_eq!(kinds[6], RowKind::Average);
    assert_eq!(block.rows[1].slot, Some(Slot::Forward1));
    assert_eq!(block.rows[2].slot, Some(Slot::Forward2));
    assert_eq!(block.rows[8].points, "7");
}

#[test]
fn player_names_use_first_initial() {
    assert_eq!(format_player_name(Some("Cooper"), Some("Flagg")), "C. Flagg");
    assert_eq!(format_player_name(Some(" Walter "), Some("Clayton Jr.")), "W. Clayton Jr.");
    assert_eq!(format_player_name(Some("Kam"), None), "Kam");
    assert_eq!(format_player_name(Some(""), Some("Luis")), "Luis");
    assert_eq!(format_player_name(None, None), "--");
}

#[test]
fn scores_fixture_lineup_against_opponent() {
    let rows: Vec<SlotResultRow> = common::fixture_rows("lineup_details_team1.json");
    // The unknown BENCH slot decodes but is ignored.
    assert_eq!(rows.len(), 8);
    assert!(rows[7].slot.is_none());

    let block = build_team_score_block(&rows, 40.0);
    assert_eq!(block.starter_total, 50.0);
    assert_eq!(block.margin, 10.0);
    assert_eq!(block.average_starters, 10.0);
    assert_eq!(block.average_margin, 2.0);
    assert_eq!(block.rows.len(), 9);

    let center = &block.rows[0];
    assert_eq!(center.player, "R. Kalkbrenner");
    assert_eq!(center.team, "CREI");
    assert_eq!(center.date, "1/5");
    assert_eq!(center.points, "20");
    assert_eq!(center.status, "Final");
    assert_eq!(block.rows[4].player, "Luis");

    let total = &block.rows[5];
    assert_eq!(total.player, "Margin 10");
    assert_eq!(total.team, "Starters 50");
    assert_eq!(total.points, "50");

    let average = &block.rows[6];
    assert_eq!(average.player, "Avg Margin 2.0");
    assert_eq!(average.team, "Starters 10.0");

    let t2 = &block.rows[8];
    assert_eq!(t2.player, "Kam");
    assert_eq!(t2.team, "--");
    assert_eq!(t2.date, "--");
    assert_eq!(t2.status, "--");
}

#[test]
fn unassigned_slots_render_placeholders() {
    let block = build_team_score_block(&[], 35.0);
    assert_eq!(block.margin, -35.0);
    for row in block.rows.iter().filter(|r| r.kind == RowKind::Slot) {
        assert_eq!(row.player, "--");
        assert_eq!(row.team, "--");
        assert_eq!(row.date, "--");
        assert_eq!(row.points, "--");
        assert_eq!(row.status, "--");
    }
    assert_eq!(block.rows[5].player, "Margin -35");
    assert_eq!(block.rows[6].player, "Avg Margin -7.0");
    assert_eq!(block.rows[6].team, "Starters 0.0");
}

#[test]
fn null_points_count_as_zero_but_show_placeholder() {
    let rows: Vec<SlotResultRow> = common::fixture_rows("lineup_details_team4.json");
    let block = build_team_score_block(&rows, 50.0);
    assert_eq!(block.starter_total, 40.0);
    assert_eq!(block.average_starters, 8.0);
    assert_eq!(block.rows[2].player, "T. DeVries");
    assert_eq!(block.rows[2].points, "--");
    // No G2 row at all.
    assert_eq!(block.rows[4].player, "--");
}

#[test]
fn repeated_slot_keeps_last_row() {
    let rows = vec![scored(Slot::Center, Some(4.0)), scored(Slot::Center, Some(9.0))];
    assert_eq!(starter_total(&rows), 9.0);
}

#[test]
fn symmetric_rows_collapse_to_one_pair() {
    let rows = vec![
        matchup(1, 4, 1),
        matchup(1, 1, 4),
        matchup(1, 3, 2),
        matchup(1, 2, 3),
        matchup(2, 1, 2),
    ];
    let pairs = pair_matchups(&rows, 1);
    assert_eq!(pairs, vec![MatchupPair::new(1, 4), MatchupPair::new(2, 3)]);
    assert_eq!(pairs[0].key, "1-4");
    assert_eq!(pairs[0].left, 1);
    assert_eq!(pairs[0].right, 4);

    // A single directed row still yields its pair.
    let lone = pair_matchups(&[matchup(3, 9, 7)], 3);
    assert_eq!(lone, vec![MatchupPair::new(7, 9)]);
    assert!(pair_matchups(&rows, 5).is_empty());
}

#[test]
fn builds_cards_from_fixtures() {
    let store = common::MemoryStore::league();
    let pairs = pair_matchups(&store.matchups, 1);
    assert_eq!(pairs.len(), 2, "team 5 has no opponent and is skipped");
    assert_eq!(scoreboard::teams_in(&pairs), vec![1, 2, 3, 4]);

    let directory = TeamDirectory::build(store.fantasy_teams.clone(), store.ncaa_teams.clone());
    let details: BTreeMap<i64, Vec<SlotResultRow>> = store.details.clone().into_iter().collect();

    let card = scoreboard::build_matchup_card(&pairs[0], &details, &directory);
    assert_eq!(card.key, "1-4");
    assert_eq!(card.left.name, "Hoop Dreams");
    assert_eq!(card.left.opponent_name, "North Squad");
    assert_eq!(card.left.block.margin, 10.0);
    assert_eq!(card.right.block.margin, -10.0);
    assert_eq!(card.right.block.average_margin, -2.0);

    let empty = scoreboard::build_matchup_card(&pairs[1], &details, &directory);
    assert_eq!(empty.left.name, "Andrew");
    assert_eq!(empty.right.name, "PTR");
    assert_eq!(empty.left.block.starter_total, 0.0);
    assert_eq!(empty.left.block.margin, 0.0);
}

#[test]
fn unknown_team_falls_back_to_numbered_name() {
    let directory = TeamDirectory::build(vec![common::team(1, None, None)], Vec::new());
    assert_eq!(directory.fantasy_name(1), "Team 1");
    assert_eq!(directory.fantasy_name(42), "Team 42");
}
