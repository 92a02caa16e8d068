//! Player browsing: the roster metrics table, player pages and head-to-head comparison.

use serde::Serialize;
use tracing::{info, instrument};

use crate::display::{self, PLACEHOLDER, format_number};
use crate::error::{AppError, Result};
use crate::model::player::PlayerId;
use crate::model::stats::{GameLogEntry, PlayerProfile, PlayerSummary};
use crate::store::LeagueStore;

pub const ROSTER_LIMIT: usize = 100;
pub const GAME_LOG_LIMIT: usize = 12;
pub const PLAYER_OPTION_LIMIT: usize = 200;

/// `made / attempted`, each to `digits` places.
pub fn format_split(made: Option<f64>, attempted: Option<f64>, digits: usize) -> String {
    format!("{} / {}", format_number(made, digits), format_number(attempted, digits))
}

fn or_placeholder(value: Option<&str>) -> String {
    value.unwrap_or(PLACEHOLDER).to_string()
}

/// One line of the roster metrics table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterRow {
    pub player_id: Option<PlayerId>,
    pub player: String,
    pub team: String,
    pub position: String,
    pub ppg: String,
    pub last5: String,
    pub mpg: String,
    pub field_goals: String,
    pub threes: String,
}

impl RosterRow {
    pub fn from_summary(summary: &PlayerSummary) -> Self {
        RosterRow {
            player_id: summary.player_id.clone(),
            player: summary.full_name(),
            team: or_placeholder(summary.team_name.as_deref()),
            position: or_placeholder(summary.position.as_deref()),
            ppg: format_number(summary.ppg, 1),
            last5: format_number(summary.last5_ppg, 1),
            mpg: format_number(summary.mpg, 1),
            field_goals: format_split(summary.fgm, summary.fga, 1),
            threes: format_split(summary.tpm, summary.tpa, 1),
        }
    }
}

/// Top scorers by season PPG, as the backend orders them.
#[instrument(level = "info", skip(store))]
pub fn roster_view(store: &dyn LeagueStore, limit: usize) -> Vec<RosterRow> {
    let rows: Vec<RosterRow> =
        store.roster_snapshot(limit).iter().map(RosterRow::from_summary).collect();
    info!(rows = rows.len(), "Built roster view");
    rows
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatLine {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameLogRow {
    pub date: String,
    pub opponent: String,
    pub home_away: String,
    pub points: String,
    pub minutes: String,
    pub field_goals: String,
    pub threes: String,
    pub rebounds: String,
    pub assists: String,
    pub steals: String,
    pub blocks: String,
    pub turnovers: String,
}

// Counting stats read 0 when the row has no value.
fn count(value: Option<f64>) -> String {
    display::format_points(value.unwrap_or(0.0))
}

impl GameLogRow {
    pub fn from_entry(entry: &GameLogEntry) -> Self {
        GameLogRow {
            date: entry
                .game_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            opponent: or_placeholder(entry.opponent_name.as_deref()),
            home_away: or_placeholder(entry.home_away.as_deref()),
            points: count(entry.pts),
            minutes: format_number(entry.minutes, 1),
            field_goals: format_split(entry.fgm, entry.fga, 0),
            threes: format_split(entry.tpm, entry.tpa, 0),
            rebounds: count(entry.reb),
            assists: count(entry.ast),
            steals: count(entry.stl),
            blocks: count(entry.blocks),
            turnovers: count(entry.turnovers),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerPage {
    pub player_id: PlayerId,
    pub name: String,
    /// `Team · Fantasy F · NCAA G · #4`, whichever parts are known.
    pub bio: String,
    pub headshot: Option<String>,
    pub team: String,
    pub height: String,
    pub weight: String,
    pub experience: String,
    pub averages: Vec<StatLine>,
    pub game_log: Vec<GameLogRow>,
}

pub fn bio_line(profile: &PlayerProfile) -> String {
    let parts = [
        profile.team_name.clone(),
        profile.player_position.as_ref().map(|p| format!("Fantasy {}", p)),
        profile.position.as_ref().map(|p| format!("NCAA {}", p)),
        profile.player_number.as_ref().map(|n| format!("#{}", n)),
    ];
    let bio: Vec<String> = parts.into_iter().flatten().collect();
    if bio.is_empty() { "Profile overview".to_string() } else { bio.join(" · ") }
}

const SUMMARY_METRICS: [&str; 5] = ["PPG", "Last 5", "MPG", "FGM/FGA", "3PM/3PA"];

/// Formatted season averages in `SUMMARY_METRICS` order; `--` throughout when unknown.
fn summary_cells(summary: Option<&PlayerSummary>) -> [String; 5] {
    let s = summary.cloned().unwrap_or_default();
    [
        format_number(s.ppg, 1),
        format_number(s.last5_ppg, 1),
        format_number(s.mpg, 1),
        format_split(s.fgm, s.fga, 1),
        format_split(s.tpm, s.tpa, 1),
    ]
}

/// Profile, season averages and recent games for one player.
/// `team_id` picks which fantasy roster's position to show.
#[instrument(level = "info", skip(store))]
pub fn player_page(
    store: &dyn LeagueStore,
    player: &PlayerId,
    team_id: Option<i64>,
) -> Result<PlayerPage> {
    let profile = store
        .player_profile(player, team_id)
        .ok_or_else(|| AppError::NotFound(format!("player {}", player)))?;
    let summaries = store.player_summaries(std::slice::from_ref(player));
    let summary = summaries
        .iter()
        .find(|s| s.player_id.as_ref() == Some(player))
        .or(summaries.first());
    let game_log: Vec<GameLogRow> =
        store.player_game_log(player, GAME_LOG_LIMIT).iter().map(GameLogRow::from_entry).collect();

    let name = format!(
        "{} {}",
        profile.first_name.as_deref().unwrap_or(""),
        profile.last_name.as_deref().unwrap_or("")
    )
    .trim()
    .to_string();
    let weight = profile
        .weight
        .filter(|w| *w > 0.0)
        .map(|w| format!("{} lbs", display::format_points(w)))
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    info!(player = %player, games = game_log.len(), "Built player page");
    Ok(PlayerPage {
        player_id: profile.player_id.clone().unwrap_or_else(|| player.clone()),
        name: if name.is_empty() { "Player".to_string() } else { name },
        bio: bio_line(&profile),
        headshot: profile.headshot.clone(),
        team: or_placeholder(profile.team_name.as_deref()),
        height: or_placeholder(profile.display_height.as_deref().or(profile.height.as_deref())),
        weight,
        experience: or_placeholder(profile.experience.as_deref()),
        averages: SUMMARY_METRICS
            .iter()
            .zip(summary_cells(summary))
            .map(|(label, value)| StatLine { label: label.to_string(), value })
            .collect(),
        game_log,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerChoice {
    pub player_id: PlayerId,
    /// `Last, First (Team)`
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompareRow {
    pub metric: String,
    pub left: String,
    pub right: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub left: Option<PlayerId>,
    pub right: Option<PlayerId>,
    pub options: Vec<PlayerChoice>,
    pub rows: Vec<CompareRow>,
}

fn choice_label(option: &PlayerSummary) -> String {
    let name = match (option.last_name.as_deref(), option.first_name.as_deref()) {
        (Some(last), Some(first)) => format!("{}, {}", last, first),
        _ => option.full_name(),
    };
    format!("{} ({})", name, option.team_name.as_deref().unwrap_or(PLACEHOLDER))
}

/// Side-by-side season averages. Missing picks fall back to the first two
/// players on the option list; a single option is compared with itself.
#[instrument(level = "info", skip(store))]
pub fn compare_players(
    store: &dyn LeagueStore,
    left: Option<PlayerId>,
    right: Option<PlayerId>,
) -> Comparison {
    let options = store.player_options(PLAYER_OPTION_LIMIT);
    let first = options.first().and_then(|o| o.player_id.clone());
    let second = options.get(1).and_then(|o| o.player_id.clone()).or_else(|| first.clone());
    let left = left.or(first);
    let right = right.or(second);

    let wanted: Vec<PlayerId> = left.iter().chain(right.iter()).cloned().collect();
    let summaries = store.player_summaries(&wanted);
    let find = |id: &Option<PlayerId>| {
        id.as_ref()
            .and_then(|id| summaries.iter().find(|s| s.player_id.as_ref() == Some(id)))
    };
    let (a, b) = (find(&left), find(&right));

    let rows = SUMMARY_METRICS
        .iter()
        .zip(summary_cells(a).into_iter().zip(summary_cells(b)))
        .map(|(metric, (left, right))| CompareRow { metric: metric.to_string(), left, right })
        .collect();

    let options = options
        .iter()
        .filter_map(|o| {
            o.player_id.clone().map(|player_id| PlayerChoice { player_id, label: choice_label(o) })
        })
        .collect();

    Comparison { left, right, options, rows }
}
