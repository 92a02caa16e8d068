#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use fantasy_hoops_lambda_rust::config::Config;
use fantasy_hoops_lambda_rust::error::Result;
use fantasy_hoops_lambda_rust::model::game::GameStatusRow;
use fantasy_hoops_lambda_rust::model::lineup::{Lineup, LineupRecord, SlotResultRow};
use fantasy_hoops_lambda_rust::model::matchup::{MatchupRecord, MatchupRow};
use fantasy_hoops_lambda_rust::model::player::{PlayerId, RosterPlayer};
use fantasy_hoops_lambda_rust::model::stats::{GameLogEntry, PlayerProfile, PlayerSummary};
use fantasy_hoops_lambda_rust::model::team::{FantasyTeam, NcaaTeam};
use fantasy_hoops_lambda_rust::model::week::{FantasyWeek, WeekRecord};
use fantasy_hoops_lambda_rust::store::{LeagueStore, ScheduleQuery};
use fantasy_hoops_lambda_rust::supabase::decode_rows;

pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name))
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", name, e))
}

pub fn fixture_rows<T: serde::de::DeserializeOwned>(name: &str) -> Vec<T> {
    decode_rows(&load_fixture(name)).expect("fixture should decode")
}

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "SUPABASE_URL" => Some("https://example.invalid".to_string()),
        "SUPABASE_SERVICE_ROLE_KEY" => Some("service-key".to_string()),
        _ => None,
    })
    .expect("test config")
}

/// In-memory league backed by fixtures; records every write.
#[derive(Default)]
pub struct MemoryStore {
    pub weeks: Vec<FantasyWeek>,
    pub matchups: Vec<MatchupRow>,
    pub fantasy_teams: Vec<FantasyTeam>,
    pub ncaa_teams: Vec<NcaaTeam>,
    pub rosters: HashMap<i64, Vec<RosterPlayer>>,
    pub lineups: Mutex<Vec<Lineup>>,
    pub details: HashMap<i64, Vec<SlotResultRow>>,
    pub schedule: Vec<GameStatusRow>,
    pub schedule_queries: Mutex<Vec<ScheduleQuery>>,
    pub players: Vec<PlayerSummary>,
    pub profiles: Vec<PlayerProfile>,
    pub game_logs: HashMap<PlayerId, Vec<GameLogEntry>>,
    pub profile_queries: Mutex<Vec<(PlayerId, Option<i64>)>>,
    pub saved_lineups: Mutex<Vec<LineupRecord>>,
    pub saved_weeks: Mutex<Vec<WeekRecord>>,
    pub deleted_weeks: Mutex<Vec<(i32, i32)>>,
    pub saved_matchups: Mutex<Vec<MatchupRecord>>,
    pub deleted_matchups: Mutex<Vec<(i32, i32, i64)>>,
}

impl MemoryStore {
    pub fn league() -> Self {
        let mut details = HashMap::new();
        details.insert(1, fixture_rows("lineup_details_team1.json"));
        details.insert(4, fixture_rows("lineup_details_team4.json"));
        let mut game_logs = HashMap::new();
        game_logs.insert(PlayerId::from(101), fixture_rows("player_game_log.json"));
        MemoryStore {
            weeks: fixture_rows("weeks.json"),
            matchups: fixture_rows("matchups.json"),
            fantasy_teams: vec![
                team(1, Some("Hoop Dreams"), Some("HD")),
                team(2, Some("Andrew"), None),
                team(3, None, Some("PTR")),
                team(4, Some("North Squad"), None),
            ],
            ncaa_teams: vec![NcaaTeam {
                team_id: Some("2250".to_string()),
                abbreviation: Some("GONZ".to_string()),
                ..Default::default()
            }],
            details,
            schedule: fixture_rows("week_schedule.json"),
            players: fixture_rows("roster_snapshot.json"),
            profiles: fixture_rows("player_profile.json"),
            game_logs,
            ..Default::default()
        }
    }
}

pub fn team(id: i64, name: Option<&str>, short_code: Option<&str>) -> FantasyTeam {
    FantasyTeam {
        fantasy_team_id: Some(id),
        name: name.map(str::to_string),
        short_code: short_code.map(str::to_string),
    }
}

impl LeagueStore for MemoryStore {
    fn fantasy_week_options(&self, season: i32) -> Vec<FantasyWeek> {
        self.weeks.iter().filter(|w| w.season == Some(season)).cloned().collect()
    }

    fn fantasy_matchups(&self, season: i32) -> Vec<MatchupRow> {
        self.matchups.iter().filter(|m| m.season == Some(season)).cloned().collect()
    }

    fn fantasy_teams(&self) -> Vec<FantasyTeam> {
        self.fantasy_teams.clone()
    }

    fn ncaa_teams(&self) -> Vec<NcaaTeam> {
        self.ncaa_teams.clone()
    }

    fn fantasy_roster(&self, team_id: i64, _season: Option<i32>) -> Vec<RosterPlayer> {
        self.rosters.get(&team_id).cloned().unwrap_or_default()
    }

    fn fantasy_lineup(&self, season: i32, week: i32, team_id: i64) -> Option<Lineup> {
        self.lineups
            .lock()
            .unwrap()
            .iter()
            .find(|l| {
                l.season == Some(season) && l.week == Some(week) && l.fantasy_team_id == Some(team_id)
            })
            .cloned()
    }

    fn fantasy_lineup_details(&self, _season: i32, _week: i32, team_id: i64) -> Vec<SlotResultRow> {
        self.details.get(&team_id).cloned().unwrap_or_default()
    }

    fn fantasy_week_player_schedule(&self, query: &ScheduleQuery) -> Vec<GameStatusRow> {
        self.schedule_queries.lock().unwrap().push(query.clone());
        self.schedule
            .iter()
            .filter(|row| query.include_completed || !row.normalized_status().contains("final"))
            .cloned()
            .collect()
    }

    fn roster_snapshot(&self, limit: usize) -> Vec<PlayerSummary> {
        self.players.iter().take(limit).cloned().collect()
    }

    fn player_options(&self, limit: usize) -> Vec<PlayerSummary> {
        let mut options: Vec<PlayerSummary> =
            self.players.iter().filter(|p| p.player_id.is_some()).cloned().collect();
        options.sort_by(|a, b| a.last_name.cmp(&b.last_name).then(a.first_name.cmp(&b.first_name)));
        options.truncate(limit);
        options
    }

    fn player_summaries(&self, players: &[PlayerId]) -> Vec<PlayerSummary> {
        self.players
            .iter()
            .filter(|p| p.player_id.as_ref().is_some_and(|id| players.contains(id)))
            .cloned()
            .collect()
    }

    fn player_profile(&self, player: &PlayerId, team_id: Option<i64>) -> Option<PlayerProfile> {
        self.profile_queries.lock().unwrap().push((player.clone(), team_id));
        self.profiles.iter().find(|p| p.player_id.as_ref() == Some(player)).cloned()
    }

    fn player_game_log(&self, player: &PlayerId, limit: usize) -> Vec<GameLogEntry> {
        let log = self.game_logs.get(player).cloned().unwrap_or_default();
        log.into_iter().take(limit).collect()
    }

    fn upsert_lineup(&self, record: &LineupRecord) -> Result<()> {
        self.saved_lineups.lock().unwrap().push(record.clone());
        Ok(())
    }

    fn upsert_weeks(&self, weeks: &[WeekRecord]) -> Result<()> {
        self.saved_weeks.lock().unwrap().extend_from_slice(weeks);
        Ok(())
    }

    fn delete_week(&self, season: i32, week: i32) -> Result<()> {
        self.deleted_weeks.lock().unwrap().push((season, week));
        Ok(())
    }

    fn upsert_matchup(&self, record: &MatchupRecord) -> Result<()> {
        self.saved_matchups.lock().unwrap().push(*record);
        Ok(())
    }

    fn delete_matchup(&self, season: i32, week: i32, team_id: i64) -> Result<()> {
        self.deleted_matchups.lock().unwrap().push((season, week, team_id));
        Ok(())
    }
}
