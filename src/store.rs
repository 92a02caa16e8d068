use chrono::NaiveDate;
use serde::Serialize;

use crate::error::Result;
use crate::model::game::GameStatusRow;
use crate::model::lineup::{Lineup, LineupRecord, SlotResultRow};
use crate::model::matchup::{MatchupRecord, MatchupRow};
use crate::model::player::{PlayerId, RosterPlayer};
use crate::model::stats::{GameLogEntry, PlayerProfile, PlayerSummary};
use crate::model::team::{FantasyTeam, NcaaTeam};
use crate::model::week::{FantasyWeek, WeekRecord};

/// Parameters of the weekly player schedule lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleQuery {
    pub team_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub season: Option<i32>,
    pub include_completed: bool,
}

/// League data backend.
///
/// Reads never fail for "no rows": they return an empty collection (or `None`)
/// and implementations log whatever went wrong. Writes report errors.
/// Calls are blocking; async callers run them on the blocking pool.
pub trait LeagueStore: Send + Sync {
    fn fantasy_week_options(&self, season: i32) -> Vec<FantasyWeek>;
    fn fantasy_matchups(&self, season: i32) -> Vec<MatchupRow>;
    fn fantasy_teams(&self) -> Vec<FantasyTeam>;
    fn ncaa_teams(&self) -> Vec<NcaaTeam>;
    fn fantasy_roster(&self, team_id: i64, season: Option<i32>) -> Vec<RosterPlayer>;
    fn fantasy_lineup(&self, season: i32, week: i32, team_id: i64) -> Option<Lineup>;
    fn fantasy_lineup_details(&self, season: i32, week: i32, team_id: i64) -> Vec<SlotResultRow>;
    fn fantasy_week_player_schedule(&self, query: &ScheduleQuery) -> Vec<GameStatusRow>;
    fn roster_snapshot(&self, limit: usize) -> Vec<PlayerSummary>;
    fn player_options(&self, limit: usize) -> Vec<PlayerSummary>;
    fn player_summaries(&self, players: &[PlayerId]) -> Vec<PlayerSummary>;
    fn player_profile(&self, player: &PlayerId, team_id: Option<i64>) -> Option<PlayerProfile>;
    fn player_game_log(&self, player: &PlayerId, limit: usize) -> Vec<GameLogEntry>;

    fn upsert_lineup(&self, record: &LineupRecord) -> Result<()>;
    fn upsert_weeks(&self, weeks: &[WeekRecord]) -> Result<()>;
    fn delete_week(&self, season: i32, week: i32) -> Result<()>;
    fn upsert_matchup(&self, record: &MatchupRecord) -> Result<()>;
    fn delete_matchup(&self, season: i32, week: i32, team_id: i64) -> Result<()>;
}
