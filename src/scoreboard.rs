//! Matchup scoring: per-team score blocks and the weekly matchup cards.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::directory::TeamDirectory;
use crate::display::{self, PLACEHOLDER};
use crate::model::lineup::{Slot, SlotResultRow};
use crate::model::matchup::MatchupRow;

pub const STARTER_COUNT: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Slot,
    Total,
    Average,
}

/// One rendered line of a team's score table: Pos, Player, Team, Date, Points, Status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreRow {
    pub kind: RowKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<Slot>,
    pub label: String,
    pub player: String,
    pub team: String,
    pub date: String,
    pub points: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamScoreBlock {
    pub starter_total: f64,
    pub margin: f64,
    pub average_starters: f64,
    pub average_margin: f64,
    /// `C, F1, F2, G1, G2, Total, Average, T1, T2`.
    pub rows: Vec<ScoreRow>,
}

/// `"J. Smith"` when both names are known, otherwise whichever is, otherwise `--`.
pub fn format_player_name(first: Option<&str>, last: Option<&str>) -> String {
    let first = first.map(str::trim).unwrap_or("");
    let last = last.map(str::trim).unwrap_or("");
    match (first.chars().next(), last.is_empty()) {
        (Some(initial), false) => format!("{}. {}", initial, last),
        _ if !first.is_empty() => first.to_string(),
        _ if !last.is_empty() => last.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Index rows by slot. Unknown slots are dropped; a repeated slot keeps its last row.
fn rows_by_slot(rows: &[SlotResultRow]) -> HashMap<Slot, &SlotResultRow> {
    rows.iter().filter_map(|row| row.slot.map(|slot| (slot, row))).collect()
}

/// Sum of starter points; missing points count as zero and tiebreakers are excluded.
pub fn starter_total(rows: &[SlotResultRow]) -> f64 {
    let by_slot = rows_by_slot(rows);
    Slot::STARTERS
        .iter()
        .filter_map(|slot| by_slot.get(slot))
        .map(|row| row.points.unwrap_or(0.0))
        .sum()
}

fn slot_row(slot: Slot, row: Option<&SlotResultRow>) -> ScoreRow {
    let label = slot.label();
    match row {
        Some(r) => ScoreRow {
            kind: RowKind::Slot,
            slot: Some(slot),
            label: label.to_string(),
            player: format_player_name(r.first_name.as_deref(), r.last_name.as_deref()),
            team: r.team_abbr.clone().unwrap_or_else(|| PLACEHOLDER.to_string()),
            date: display::format_short_date(r.game_date),
            points: r.points.map(display::format_points).unwrap_or_else(|| PLACEHOLDER.to_string()),
            status: r.status.clone().unwrap_or_else(|| PLACEHOLDER.to_string()),
        },
        None => ScoreRow {
            kind: RowKind::Slot,
            slot: Some(slot),
            label: label.to_string(),
            player: PLACEHOLDER.to_string(),
            team: PLACEHOLDER.to_string(),
            date: PLACEHOLDER.to_string(),
            points: PLACEHOLDER.to_string(),
            status: PLACEHOLDER.to_string(),
        },
    }
}

/// Score block for one team against an opponent whose starter total is already known.
pub fn build_team_score_block(rows: &[SlotResultRow], opponent_total: f64) -> TeamScoreBlock {
    let by_slot = rows_by_slot(rows);
    let starter_total = starter_total(rows);
    let margin = starter_total - opponent_total;
    // A genuine 0-point week reads the same as "no data yet".
    let average_starters = if starter_total != 0.0 { starter_total / STARTER_COUNT } else { 0.0 };
    let average_margin = margin / STARTER_COUNT;

    let mut out = Vec::with_capacity(Slot::ALL.len() + 2);
    for slot in Slot::STARTERS {
        out.push(slot_row(slot, by_slot.get(&slot).copied()));
    }
    out.push(ScoreRow {
        kind: RowKind::Total,
        slot: None,
        label: "Total".to_string(),
        player: format!("Margin {}", display::format_number(Some(margin), 0)),
        team: format!("Starters {}", display::format_points(starter_total)),
        date: String::new(),
        points: display::format_points(starter_total),
        status: String::new(),
    });
    out.push(ScoreRow {
        kind: RowKind::Average,
        slot: None,
        label: "Average".to_string(),
        player: format!("Avg Margin {}", display::format_number(Some(average_margin), 1)),
        team: format!("Starters {}", display::format_number(Some(average_starters), 1)),
        date: String::new(),
        points: String::new(),
        status: String::new(),
    });
    for slot in Slot::TIEBREAKERS {
        out.push(slot_row(slot, by_slot.get(&slot).copied()));
    }

    TeamScoreBlock { starter_total, margin, average_starters, average_margin, rows: out }
}

/// An undirected pairing; `left` is always the numerically smaller team id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchupPair {
    pub key: String,
    pub left: i64,
    pub right: i64,
}

impl MatchupPair {
    pub fn new(team_a: i64, team_b: i64) -> Self {
        let (left, right) = if team_a <= team_b { (team_a, team_b) } else { (team_b, team_a) };
        MatchupPair { key: format!("{}-{}", left, right), left, right }
    }
}

/// Collapse the symmetric matchup rows of `week` into one pair each, ordered by left team.
/// Rows missing either team id are ignored.
pub fn pair_matchups(rows: &[MatchupRow], week: i32) -> Vec<MatchupPair> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut pairs = Vec::new();
    for row in rows.iter().filter(|r| r.week == Some(week)) {
        let (Some(team_a), Some(team_b)) = (row.fantasy_team_id, row.opponent_fantasy_team_id)
        else {
            continue;
        };
        let pair = MatchupPair::new(team_a, team_b);
        if seen.insert(pair.key.clone()) {
            pairs.push(pair);
        }
    }
    pairs.sort_by_key(|p| p.left);
    pairs
}

/// Every team id appearing in the pairs, ascending.
pub fn teams_in(pairs: &[MatchupPair]) -> Vec<i64> {
    let mut ids: Vec<i64> = pairs.iter().flat_map(|p| [p.left, p.right]).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamCard {
    pub team_id: i64,
    pub name: String,
    pub opponent_name: String,
    pub block: TeamScoreBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupCard {
    pub key: String,
    pub left: TeamCard,
    pub right: TeamCard,
}

/// Build the card for a pair from each team's lineup detail rows.
/// A team with no rows scores zero and renders placeholders.
pub fn build_matchup_card(
    pair: &MatchupPair,
    details: &BTreeMap<i64, Vec<SlotResultRow>>,
    directory: &TeamDirectory,
) -> MatchupCard {
    let empty: Vec<SlotResultRow> = Vec::new();
    let left_rows = details.get(&pair.left).unwrap_or(&empty);
    let right_rows = details.get(&pair.right).unwrap_or(&empty);
    let left_total = starter_total(left_rows);
    let right_total = starter_total(right_rows);

    let left_name = directory.fantasy_name(pair.left);
    let right_name = directory.fantasy_name(pair.right);

    MatchupCard {
        key: pair.key.clone(),
        left: TeamCard {
            team_id: pair.left,
            name: left_name.clone(),
            opponent_name: right_name.clone(),
            block: build_team_score_block(left_rows, right_total),
        },
        right: TeamCard {
            team_id: pair.right,
            name: right_name,
            opponent_name: left_name,
            block: build_team_score_block(right_rows, left_total),
        },
    }
}
