use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{error, info, info_span, instrument, warn};

use crate::config::Config;
use crate::error::Result;
use crate::model::game::GameStatusRow;
use crate::model::lineup::{Lineup, LineupRecord, SlotResultRow};
use crate::model::matchup::{MatchupRecord, MatchupRow};
use crate::model::player::{PlayerId, RosterPlayer};
use crate::model::stats::{GameLogEntry, PlayerProfile, PlayerSummary};
use crate::model::team::{FantasyTeam, NcaaTeam};
use crate::model::week::{FantasyWeek, WeekRecord};
use crate::store::{LeagueStore, ScheduleQuery};

/// Blocking PostgREST client for the league's Supabase project.
#[derive(Debug)]
pub struct Supabase {
    rest_url: String,
    api_key: String,
    bearer: String,
    agent: ureq::Agent,
}

/// Decode a PostgREST JSON array body into typed rows.
/// An empty body or `null` is treated as no rows.
pub fn decode_rows<T: DeserializeOwned>(body: &str) -> Result<Vec<T>> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str::<Vec<T>>(trimmed)?)
}

/// Log a failed read and degrade to no rows.
fn rows_or_empty<T>(result: Result<Vec<T>>, source: &str) -> Vec<T> {
    match result {
        Ok(rows) => rows,
        Err(e) => {
            warn!(error = %e, source, "Supabase read failed; continuing with no rows");
            Vec::new()
        }
    }
}

impl Supabase {
    #[instrument(level = "info", skip(config))]
    pub fn new(config: &Config) -> Self {
        let rest_url = format!("{}/rest/v1", config.supabase_url.trim_end_matches('/'));
        info!(rest_url = %rest_url, "Constructed Supabase REST client");
        Supabase {
            rest_url,
            api_key: config.supabase_key.clone(),
            bearer: format!("Bearer {}", config.supabase_key),
            agent: ureq::Agent::new_with_defaults(),
        }
    }

    fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let url = format!("{}/{}", self.rest_url, table);
        let mut request = self
            .agent
            .get(&url)
            .header("apikey", self.api_key.as_str())
            .header("Authorization", self.bearer.as_str());
        for (key, value) in params {
            request = request.query(*key, value.as_str());
        }
        let response = {
            let _span = info_span!("supabase_select", table).entered();
            request.call()?
        };
        let body = response.into_body().read_to_string()?;
        decode_rows(&body)
    }

    fn rpc<T: DeserializeOwned>(
        &self,
        function: &str,
        params: serde_json::Value,
    ) -> Result<Vec<T>> {
        let url = format!("{}/rpc/{}", self.rest_url, function);
        let response = {
            let _span = info_span!("supabase_rpc", function).entered();
            self.agent
                .post(&url)
                .header("apikey", self.api_key.as_str())
                .header("Authorization", self.bearer.as_str())
                .send_json(params)?
        };
        let body = response.into_body().read_to_string()?;
        decode_rows(&body)
    }

    fn upsert<T: Serialize>(&self, table: &str, rows: &[T], on_conflict: &str) -> Result<()> {
        let url = format!("{}/{}", self.rest_url, table);
        let result = {
            let _span = info_span!("supabase_upsert", table, rows = rows.len()).entered();
            self.agent
                .post(&url)
                .query("on_conflict", on_conflict)
                .header("apikey", self.api_key.as_str())
                .header("Authorization", self.bearer.as_str())
                .header("Prefer", "resolution=merge-duplicates,return=minimal")
                .send_json(rows)
        };
        match result {
            Ok(resp) => {
                info!(status = resp.status().as_u16(), table, "Upserted rows");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, table, "Upsert failed");
                Err(e.into())
            }
        }
    }

    fn delete(&self, table: &str, filters: &[(&str, String)]) -> Result<()> {
        let url = format!("{}/{}", self.rest_url, table);
        let mut request = self
            .agent
            .delete(&url)
            .header("apikey", self.api_key.as_str())
            .header("Authorization", self.bearer.as_str());
        for (key, value) in filters {
            request = request.query(*key, value.as_str());
        }
        let result = {
            let _span = info_span!("supabase_delete", table).entered();
            request.call()
        };
        match result {
            Ok(resp) => {
                info!(status = resp.status().as_u16(), table, "Deleted rows");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, table, "Delete failed");
                Err(e.into())
            }
        }
    }
}

fn eq<V: ToString>(value: V) -> String {
    format!("eq.{}", value.to_string())
}

// Numeric ids go out as numbers, anything else as text.
fn player_param(player: &PlayerId) -> serde_json::Value {
    match player.as_positive_int() {
        Some(id) => json!(id),
        None => json!(player.as_str()),
    }
}

impl LeagueStore for Supabase {
    fn fantasy_week_options(&self, season: i32) -> Vec<FantasyWeek> {
        rows_or_empty(
            self.rpc("fantasy_week_options", json!({ "season_param": season })),
            "fantasy_week_options",
        )
    }

    fn fantasy_matchups(&self, season: i32) -> Vec<MatchupRow> {
        rows_or_empty(
            self.select(
                "fantasy_matchups",
                &[
                    ("select", "*".to_string()),
                    ("season", eq(season)),
                    ("order", "week.asc,fantasy_team_id.asc".to_string()),
                ],
            ),
            "fantasy_matchups",
        )
    }

    fn fantasy_teams(&self) -> Vec<FantasyTeam> {
        rows_or_empty(
            self.select(
                "fantasy_teams",
                &[
                    ("select", "fantasy_team_id,name,short_code".to_string()),
                    ("order", "fantasy_team_id.asc".to_string()),
                ],
            ),
            "fantasy_teams",
        )
    }

    fn ncaa_teams(&self) -> Vec<NcaaTeam> {
        rows_or_empty(
            self.select(
                "teams",
                &[
                    (
                        "select",
                        "team_id,abbreviation,short_display_name,display_name,name".to_string(),
                    ),
                    ("order", "team_id.asc".to_string()),
                ],
            ),
            "teams",
        )
    }

    fn fantasy_roster(&self, team_id: i64, season: Option<i32>) -> Vec<RosterPlayer> {
        rows_or_empty(
            self.rpc(
                "fantasy_roster",
                json!({ "team_id": team_id, "season": season, "include_dnp": false }),
            ),
            "fantasy_roster",
        )
    }

    fn fantasy_lineup(&self, season: i32, week: i32, team_id: i64) -> Option<Lineup> {
        rows_or_empty(
            self.select(
                "fantasy_lineups",
                &[
                    ("select", "*".to_string()),
                    ("season", eq(season)),
                    ("week", eq(week)),
                    ("fantasy_team_id", eq(team_id)),
                    ("limit", "1".to_string()),
                ],
            ),
            "fantasy_lineups",
        )
        .into_iter()
        .next()
    }

    fn fantasy_lineup_details(&self, season: i32, week: i32, team_id: i64) -> Vec<SlotResultRow> {
        rows_or_empty(
            self.rpc(
                "fantasy_lineup_details",
                json!({ "season_param": season, "week_param": week, "team_param": team_id }),
            ),
            "fantasy_lineup_details",
        )
    }

    fn fantasy_week_player_schedule(&self, query: &ScheduleQuery) -> Vec<GameStatusRow> {
        let params = match serde_json::to_value(query) {
            Ok(v) => v,
            Err(e) => {
                error!(error = %e, "Failed to encode schedule query");
                return Vec::new();
            }
        };
        let function = "fantasy_week_player_schedule";
        rows_or_empty(self.rpc(function, params), function)
    }

    fn roster_snapshot(&self, limit: usize) -> Vec<PlayerSummary> {
        rows_or_empty(
            self.rpc("roster_snapshot", json!({ "include_dnp": false, "row_limit": limit })),
            "roster_snapshot",
        )
    }

    fn player_options(&self, limit: usize) -> Vec<PlayerSummary> {
        rows_or_empty(self.rpc("player_options", json!({ "row_limit": limit })), "player_options")
    }

    fn player_summaries(&self, players: &[PlayerId]) -> Vec<PlayerSummary> {
        if players.is_empty() {
            return Vec::new();
        }
        let ids: Vec<&str> = players.iter().map(PlayerId::as_str).collect();
        rows_or_empty(
            self.rpc("player_summaries", json!({ "player_ids": ids, "include_dnp": false })),
            "player_summaries",
        )
    }

    fn player_profile(&self, player: &PlayerId, team_id: Option<i64>) -> Option<PlayerProfile> {
        rows_or_empty(
            self.rpc(
                "player_profile",
                json!({ "player_id_param": player_param(player), "team_id_param": team_id }),
            ),
            "player_profile",
        )
        .into_iter()
        .next()
    }

    fn player_game_log(&self, player: &PlayerId, limit: usize) -> Vec<GameLogEntry> {
        rows_or_empty(
            self.rpc(
                "player_game_log",
                json!({ "player_id_param": player_param(player), "row_limit": limit }),
            ),
            "player_game_log",
        )
    }

    fn upsert_lineup(&self, record: &LineupRecord) -> Result<()> {
        self.upsert("fantasy_lineups", std::slice::from_ref(record), "season,week,fantasy_team_id")
    }

    fn upsert_weeks(&self, weeks: &[WeekRecord]) -> Result<()> {
        self.upsert("fantasy_weeks", weeks, "season,week")
    }

    fn delete_week(&self, season: i32, week: i32) -> Result<()> {
        self.delete("fantasy_weeks", &[("season", eq(season)), ("week", eq(week))])
    }

    fn upsert_matchup(&self, record: &MatchupRecord) -> Result<()> {
        self.upsert("fantasy_matchups", std::slice::from_ref(record), "season,week,fantasy_team_id")
    }

    fn delete_matchup(&self, season: i32, week: i32, team_id: i64) -> Result<()> {
        self.delete(
            "fantasy_matchups",
            &[("season", eq(season)), ("week", eq(week)), ("fantasy_team_id", eq(team_id))],
        )
    }
}
