use serde::{Deserialize, Serialize};

use crate::model::loose;

/// One directed side of a pairing (`fantasy_matchups`). Each pairing is stored
/// twice, once from each team's perspective.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchupRow {
    #[serde(default, deserialize_with = "loose::opt_i32")]
    pub season: Option<i32>,
    #[serde(default, deserialize_with = "loose::opt_i32")]
    pub week: Option<i32>,
    #[serde(default, deserialize_with = "loose::opt_i64")]
    pub fantasy_team_id: Option<i64>,
    #[serde(default, deserialize_with = "loose::opt_i64")]
    pub opponent_fantasy_team_id: Option<i64>,
}

/// Validated matchup side ready to be upserted on `season,week,fantasy_team_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchupRecord {
    pub season: i32,
    pub week: i32,
    pub fantasy_team_id: i64,
    pub opponent_fantasy_team_id: i64,
}
