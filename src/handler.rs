use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use lambda_runtime::{Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::admin::{self, MatchupSubmission, WeekEntry};
use crate::config::Config;
use crate::directory::TeamDirectory;
use crate::display;
use crate::error::{AppError, Result};
use crate::lineup::{self, LineupQuery, LineupSubmission};
use crate::model::lineup::SlotResultRow;
use crate::model::loose;
use crate::model::player::{PlayerId, opt_player_id};
use crate::players;
use crate::scoreboard::{self, MatchupCard, MatchupPair};
use crate::store::LeagueStore;
use crate::supabase::Supabase;

/// Invocation payload, tagged by `action`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Request {
    /// Lineup selector for a team and week.
    Lineup {
        #[serde(default, deserialize_with = "loose::opt_i32")]
        season: Option<i32>,
        #[serde(default, deserialize_with = "loose::opt_i32")]
        week: Option<i32>,
        #[serde(default, deserialize_with = "loose::opt_i64")]
        fantasy_team_id: Option<i64>,
    },
    /// Only the locked player ids for a team and week.
    Locks {
        #[serde(default, deserialize_with = "loose::opt_i32")]
        season: Option<i32>,
        #[serde(default, deserialize_with = "loose::opt_i32")]
        week: Option<i32>,
        #[serde(default, deserialize_with = "loose::opt_i64")]
        fantasy_team_id: Option<i64>,
    },
    SaveLineup(LineupSubmission),
    Scoreboard {
        #[serde(default, deserialize_with = "loose::opt_i32")]
        season: Option<i32>,
        #[serde(default, deserialize_with = "loose::opt_i32")]
        week: Option<i32>,
    },
    /// Roster metrics table.
    Roster {
        #[serde(default, deserialize_with = "loose::opt_i64")]
        limit: Option<i64>,
    },
    Player {
        #[serde(default, deserialize_with = "opt_player_id")]
        player_id: Option<PlayerId>,
        #[serde(default, deserialize_with = "loose::opt_i64")]
        fantasy_team_id: Option<i64>,
    },
    Compare {
        #[serde(default, deserialize_with = "opt_player_id")]
        a: Option<PlayerId>,
        #[serde(default, deserialize_with = "opt_player_id")]
        b: Option<PlayerId>,
    },
    SaveWeeks {
        #[serde(default, deserialize_with = "loose::opt_i32")]
        season: Option<i32>,
        #[serde(default)]
        weeks: Vec<WeekEntry>,
    },
    DeleteWeek {
        #[serde(default, deserialize_with = "loose::opt_i32")]
        season: Option<i32>,
        #[serde(default, deserialize_with = "loose::opt_i32")]
        week: Option<i32>,
    },
    SaveMatchup(MatchupSubmission),
    DeleteMatchup {
        #[serde(default, deserialize_with = "loose::opt_i32")]
        season: Option<i32>,
        #[serde(default, deserialize_with = "loose::opt_i32")]
        week: Option<i32>,
        #[serde(default, deserialize_with = "loose::opt_i64")]
        fantasy_team_id: Option<i64>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub ok: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Response {
    fn ok<T: Serialize>(message: impl Into<String>, data: &T) -> Result<Self> {
        Ok(Response { ok: true, message: message.into(), data: Some(serde_json::to_value(data)?) })
    }

    fn done(message: impl Into<String>) -> Self {
        Response { ok: true, message: message.into(), data: None }
    }

    fn rejected(err: &AppError) -> Self {
        Response { ok: false, message: err.to_string(), data: None }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreboardView {
    pub season: i32,
    pub week: Option<i32>,
    pub range: Option<String>,
    pub cards: Vec<MatchupCard>,
}

#[instrument(skip(event))]
pub async fn handler(event: LambdaEvent<Request>) -> std::result::Result<Response, Error> {
    let config = Config::from_env()?;
    let store = Arc::new(Supabase::new(&config));
    dispatch(store, config, event.payload, Utc::now()).await
}

/// Route a request against any store. Rejected submissions come back as
/// `ok: false` responses; infrastructure failures are errors.
pub async fn dispatch<S>(
    store: Arc<S>,
    config: Config,
    request: Request,
    now_utc: DateTime<Utc>,
) -> std::result::Result<Response, Error>
where
    S: LeagueStore + 'static,
{
    match route(store, &config, request, now_utc).await {
        Ok(response) => Ok(response),
        Err(e) if e.is_rejection() => {
            info!(reason = %e, "Request rejected");
            Ok(Response::rejected(&e))
        }
        Err(e) => {
            error!(error = %e, "Request failed");
            Err(e.into())
        }
    }
}

/// Run blocking store work off the async executor.
async fn blocking<S, T, F>(store: &Arc<S>, work: F) -> Result<T>
where
    S: LeagueStore + 'static,
    T: Send + 'static,
    F: FnOnce(&dyn LeagueStore) -> T + Send + 'static,
{
    let store = Arc::clone(store);
    tokio::task::spawn_blocking(move || work(store.as_ref()))
        .await
        .map_err(join_error)
}

fn fmt_week(week: Option<i32>) -> String {
    week.map(|w| w.to_string()).unwrap_or_else(|| "TBD".to_string())
}

fn player_label(player: Option<&PlayerId>) -> String {
    player.map(|p| p.to_string()).unwrap_or_else(|| display::PLACEHOLDER.to_string())
}

fn scoreboard_message(view: &ScoreboardView) -> String {
    if view.cards.is_empty() {
        "No matchups found for this week.".to_string()
    } else {
        format!("{} matchup(s) for Week {}", view.cards.len(), fmt_week(view.week))
    }
}

async fn route<S>(
    store: Arc<S>,
    config: &Config,
    request: Request,
    now_utc: DateTime<Utc>,
) -> Result<Response>
where
    S: LeagueStore + 'static,
{
    let season_or_current =
        |season: Option<i32>| season.unwrap_or_else(|| config.current_season(now_utc));
    match request {
        Request::Lineup { season, week, fantasy_team_id } => {
            let query = LineupQuery {
                season: season_or_current(season),
                week,
                team_id: fantasy_team_id.unwrap_or(config.fantasy_team_id),
            };
            let tz = config.timezone;
            let view = blocking(&store, move |s| lineup::lineup_view(s, query, tz, now_utc)).await?;
            let message = match &view.opponent {
                Some(opponent) => format!("Week {} vs {}", fmt_week(view.week), opponent),
                None => "Matchup scoring will appear once lineups are recorded.".to_string(),
            };
            Response::ok(message, &view)
        }
        Request::Locks { season, week, fantasy_team_id } => {
            let season = season_or_current(season);
            let team_id = fantasy_team_id.unwrap_or(config.fantasy_team_id);
            let locked =
                blocking(&store, move |s| lineup::week_locks(s, season, week, team_id, now_utc))
                    .await?;
            Response::ok(format!("{} locked player(s)", locked.len()), &locked)
        }
        Request::SaveLineup(submission) => {
            let record =
                blocking(&store, move |s| lineup::save_lineup(s, &submission, now_utc)).await??;
            Response::ok(format!("Lineup saved for Week {}.", record.week), &record)
        }
        Request::Scoreboard { season, week } => {
            let view = scoreboard_view(store, season_or_current(season), week).await?;
            Response::ok(scoreboard_message(&view), &view)
        }
        Request::Roster { limit } => {
            let limit = limit
                .and_then(|l| usize::try_from(l).ok())
                .filter(|l| *l > 0)
                .unwrap_or(players::ROSTER_LIMIT);
            let rows = blocking(&store, move |s| players::roster_view(s, limit)).await?;
            let message = if rows.is_empty() {
                "No player data yet.".to_string()
            } else {
                format!("{} player(s)", rows.len())
            };
            Response::ok(message, &rows)
        }
        Request::Player { player_id, fantasy_team_id } => {
            let player = player_id
                .ok_or_else(|| AppError::NotFound("player_id is required".to_string()))?;
            let team_id = Some(fantasy_team_id.unwrap_or(config.fantasy_team_id));
            let page = blocking(&store, move |s| players::player_page(s, &player, team_id)).await??;
            Response::ok(page.name.clone(), &page)
        }
        Request::Compare { a, b } => {
            let comparison = blocking(&store, move |s| players::compare_players(s, a, b)).await?;
            let message = format!(
                "{} vs {}",
                player_label(comparison.left.as_ref()),
                player_label(comparison.right.as_ref())
            );
            Response::ok(message, &comparison)
        }
        Request::SaveWeeks { season, weeks } => {
            let season = season.unwrap_or(0);
            let saved = blocking(&store, move |s| admin::save_weeks(s, season, &weeks)).await??;
            Ok(Response::done(format!("Saved {} week(s)", saved)))
        }
        Request::DeleteWeek { season, week } => {
            let (season, week) = (season.unwrap_or(0), week.unwrap_or(0));
            blocking(&store, move |s| admin::delete_week(s, season, week)).await??;
            Ok(Response::done("Week deleted"))
        }
        Request::SaveMatchup(submission) => {
            let record = blocking(&store, move |s| admin::save_matchup(s, &submission)).await??;
            Response::ok("Matchup saved", &record)
        }
        Request::DeleteMatchup { season, week, fantasy_team_id } => {
            let (season, week) = (season.unwrap_or(0), week.unwrap_or(0));
            let team_id = fantasy_team_id.unwrap_or(0);
            blocking(&store, move |s| admin::delete_matchup(s, season, week, team_id)).await??;
            Ok(Response::done("Matchup deleted"))
        }
    }
}

struct ScoreboardPlan {
    season: i32,
    week: Option<i32>,
    range: Option<String>,
    pairs: Vec<MatchupPair>,
    directory: TeamDirectory,
}

impl ScoreboardPlan {
    fn load(store: &dyn LeagueStore, season: i32, week: Option<i32>) -> Self {
        let weeks = store.fantasy_week_options(season);
        let week = week.or_else(|| weeks.first().and_then(|w| w.week));
        let range = week
            .and_then(|w| weeks.iter().find(|candidate| candidate.week == Some(w)))
            .map(|w| {
                format!(
                    "{} -> {}",
                    display::format_week_date(w.start_date),
                    display::format_week_date(w.end_date)
                )
            });
        let pairs = match week {
            Some(w) => scoreboard::pair_matchups(&store.fantasy_matchups(season), w),
            None => Vec::new(),
        };
        let directory = TeamDirectory::build(store.fantasy_teams(), store.ncaa_teams());
        ScoreboardPlan { season, week, range, pairs, directory }
    }

    fn finish(self, details: BTreeMap<i64, Vec<SlotResultRow>>) -> ScoreboardView {
        let cards = self
            .pairs
            .iter()
            .map(|pair| scoreboard::build_matchup_card(pair, &details, &self.directory))
            .collect();
        ScoreboardView { season: self.season, week: self.week, range: self.range, cards }
    }
}

/// Build every matchup card for a week. Lineup details for each team are
/// fetched concurrently, one blocking task per team.
pub async fn scoreboard_view<S>(
    store: Arc<S>,
    season: i32,
    week: Option<i32>,
) -> Result<ScoreboardView>
where
    S: LeagueStore + 'static,
{
    let plan = blocking(&store, move |s| ScoreboardPlan::load(s, season, week)).await?;
    let Some(week_number) = plan.week else {
        return Ok(plan.finish(BTreeMap::new()));
    };

    let mut handles = Vec::new();
    for team_id in scoreboard::teams_in(&plan.pairs) {
        let store = Arc::clone(&store);
        handles.push(tokio::task::spawn_blocking(move || {
            (team_id, store.fantasy_lineup_details(season, week_number, team_id))
        }));
    }

    let mut details: BTreeMap<i64, Vec<SlotResultRow>> = BTreeMap::new();
    for h in handles {
        let (team_id, rows) = h.await.map_err(join_error)?;
        details.insert(team_id, rows);
    }
    Ok(plan.finish(details))
}

fn join_error(e: tokio::task::JoinError) -> AppError {
    AppError::Task(e.to_string())
}
