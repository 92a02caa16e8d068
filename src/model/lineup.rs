use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::model::loose;
use crate::model::player::{PlayerId, Position, opt_player_id};

/// The seven fixed lineup positions a team fills each week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Center,
    Forward1,
    Forward2,
    Guard1,
    Guard2,
    Tiebreaker1,
    Tiebreaker2,
}

impl Slot {
    pub const ALL: [Slot; 7] = [
        Slot::Center,
        Slot::Forward1,
        Slot::Forward2,
        Slot::Guard1,
        Slot::Guard2,
        Slot::Tiebreaker1,
        Slot::Tiebreaker2,
    ];

    /// Scoring slots. Tiebreakers never count toward a total.
    pub const STARTERS: [Slot; 5] =
        [Slot::Center, Slot::Forward1, Slot::Forward2, Slot::Guard1, Slot::Guard2];

    pub const TIEBREAKERS: [Slot; 2] = [Slot::Tiebreaker1, Slot::Tiebreaker2];

    pub fn key(self) -> &'static str {
        match self {
            Slot::Center => "center",
            Slot::Forward1 => "forward1",
            Slot::Forward2 => "forward2",
            Slot::Guard1 => "guard1",
            Slot::Guard2 => "guard2",
            Slot::Tiebreaker1 => "tiebreaker1",
            Slot::Tiebreaker2 => "tiebreaker2",
        }
    }

    /// Short code used by the lineup detail RPC (`C`, `F1`, ... `T2`).
    pub fn code(self) -> &'static str {
        match self {
            Slot::Center => "C",
            Slot::Forward1 => "F1",
            Slot::Forward2 => "F2",
            Slot::Guard1 => "G1",
            Slot::Guard2 => "G2",
            Slot::Tiebreaker1 => "T1",
            Slot::Tiebreaker2 => "T2",
        }
    }

    /// Column holding this slot's player in `fantasy_lineups`.
    pub fn column(self) -> &'static str {
        match self {
            Slot::Center => "center_id",
            Slot::Forward1 => "forward1_id",
            Slot::Forward2 => "forward2_id",
            Slot::Guard1 => "guard1_id",
            Slot::Guard2 => "guard2_id",
            Slot::Tiebreaker1 => "t1_id",
            Slot::Tiebreaker2 => "t2_id",
        }
    }

    /// Scoreboard label: starters collapse to their position, tiebreakers keep their code.
    pub fn label(self) -> &'static str {
        match self.position() {
            Some(pos) => pos.code(),
            None => self.code(),
        }
    }

    /// Position group eligible for this slot; tiebreakers accept anyone.
    pub fn position(self) -> Option<Position> {
        match self {
            Slot::Center => Some(Position::Center),
            Slot::Forward1 | Slot::Forward2 => Some(Position::Forward),
            Slot::Guard1 | Slot::Guard2 => Some(Position::Guard),
            Slot::Tiebreaker1 | Slot::Tiebreaker2 => None,
        }
    }

    /// Accepts the short code, the slot key, or the column name, case-insensitively.
    pub fn parse(raw: &str) -> Option<Slot> {
        let needle = raw.trim();
        Slot::ALL.into_iter().find(|slot| {
            needle.eq_ignore_ascii_case(slot.code())
                || needle.eq_ignore_ascii_case(slot.key())
                || needle.eq_ignore_ascii_case(slot.column())
        })
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

fn opt_slot<'de, D>(deserializer: D) -> Result<Option<Slot>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(loose::opt_string(deserializer)?.as_deref().and_then(Slot::parse))
}

/// A stored `fantasy_lineups` row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lineup {
    #[serde(default, deserialize_with = "loose::opt_i32")]
    pub season: Option<i32>,
    #[serde(default, deserialize_with = "loose::opt_i32")]
    pub week: Option<i32>,
    #[serde(default, deserialize_with = "loose::opt_i64")]
    pub fantasy_team_id: Option<i64>,
    #[serde(default, deserialize_with = "opt_player_id")]
    pub center_id: Option<PlayerId>,
    #[serde(default, deserialize_with = "opt_player_id")]
    pub forward1_id: Option<PlayerId>,
    #[serde(default, deserialize_with = "opt_player_id")]
    pub forward2_id: Option<PlayerId>,
    #[serde(default, deserialize_with = "opt_player_id")]
    pub guard1_id: Option<PlayerId>,
    #[serde(default, deserialize_with = "opt_player_id")]
    pub guard2_id: Option<PlayerId>,
    #[serde(default, deserialize_with = "opt_player_id")]
    pub t1_id: Option<PlayerId>,
    #[serde(default, deserialize_with = "opt_player_id")]
    pub t2_id: Option<PlayerId>,
}

impl Lineup {
    pub fn get(&self, slot: Slot) -> Option<&PlayerId> {
        match slot {
            Slot::Center => self.center_id.as_ref(),
            Slot::Forward1 => self.forward1_id.as_ref(),
            Slot::Forward2 => self.forward2_id.as_ref(),
            Slot::Guard1 => self.guard1_id.as_ref(),
            Slot::Guard2 => self.guard2_id.as_ref(),
            Slot::Tiebreaker1 => self.t1_id.as_ref(),
            Slot::Tiebreaker2 => self.t2_id.as_ref(),
        }
    }
}

/// Validated lineup ready to be upserted on `season,week,fantasy_team_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineupRecord {
    pub season: i32,
    pub week: i32,
    pub fantasy_team_id: i64,
    pub center_id: i64,
    pub forward1_id: i64,
    pub forward2_id: i64,
    pub guard1_id: i64,
    pub guard2_id: i64,
    pub t1_id: i64,
    pub t2_id: i64,
}

impl LineupRecord {
    pub fn get(&self, slot: Slot) -> i64 {
        match slot {
            Slot::Center => self.center_id,
            Slot::Forward1 => self.forward1_id,
            Slot::Forward2 => self.forward2_id,
            Slot::Guard1 => self.guard1_id,
            Slot::Guard2 => self.guard2_id,
            Slot::Tiebreaker1 => self.t1_id,
            Slot::Tiebreaker2 => self.t2_id,
        }
    }
}

/// One filled slot for a team/week from the `fantasy_lineup_details` RPC.
/// Rows whose slot key is not one of the seven known slots carry `slot: None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotResultRow {
    #[serde(default, deserialize_with = "opt_slot")]
    pub slot: Option<Slot>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub team_abbr: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_date")]
    pub game_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "loose::opt_f64")]
    pub points: Option<f64>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub status: Option<String>,
}
