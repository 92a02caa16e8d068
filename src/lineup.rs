//! Weekly lineup page: what the selector shows, and validation of submissions.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::directory::TeamDirectory;
use crate::display;
use crate::error::{AppError, Result};
use crate::lock::{self, LockedPlayers};
use crate::model::game::GameStatusRow;
use crate::model::lineup::{Lineup, LineupRecord, Slot};
use crate::model::loose;
use crate::model::player::{PlayerId, Position, RosterPlayer};
use crate::model::week::FantasyWeek;
use crate::store::{LeagueStore, ScheduleQuery};

pub const LOCK_NOTICE: &str = "Players lock 1 hour before tip-off.";

/// A lineup form post. Every value may arrive as a number or a string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LineupSubmission {
    #[serde(default, deserialize_with = "loose::opt_i32")]
    pub season: Option<i32>,
    #[serde(default, deserialize_with = "loose::opt_i32")]
    pub week: Option<i32>,
    #[serde(default, deserialize_with = "loose::opt_i64")]
    pub fantasy_team_id: Option<i64>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub center_id: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub forward1_id: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub forward2_id: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub guard1_id: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub guard2_id: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub t1_id: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub t2_id: Option<String>,
}

impl LineupSubmission {
    pub fn get(&self, slot: Slot) -> Option<&str> {
        let value = match slot {
            Slot::Center => &self.center_id,
            Slot::Forward1 => &self.forward1_id,
            Slot::Forward2 => &self.forward2_id,
            Slot::Guard1 => &self.guard1_id,
            Slot::Guard2 => &self.guard2_id,
            Slot::Tiebreaker1 => &self.t1_id,
            Slot::Tiebreaker2 => &self.t2_id,
        };
        value.as_deref()
    }
}

fn positive<T: PartialOrd + Default + Copy>(value: Option<T>) -> Option<T> {
    value.filter(|v| *v > T::default())
}

fn parse_slot_id(raw: Option<&str>) -> Option<i64> {
    raw.and_then(PlayerId::new).and_then(|id| id.as_positive_int())
}

/// Check shape and slot uniqueness, producing the row to upsert.
pub fn validate_submission(submission: &LineupSubmission) -> Result<LineupRecord> {
    let season = positive(submission.season)
        .ok_or_else(|| AppError::InvalidLineup("season is required".to_string()))?;
    let week = positive(submission.week)
        .ok_or_else(|| AppError::InvalidLineup("week is required".to_string()))?;
    let fantasy_team_id = positive(submission.fantasy_team_id)
        .ok_or_else(|| AppError::InvalidLineup("fantasy_team_id is required".to_string()))?;

    let mut ids = [0i64; 7];
    let mut missing: Vec<&str> = Vec::new();
    for (i, slot) in Slot::ALL.into_iter().enumerate() {
        match parse_slot_id(submission.get(slot)) {
            Some(id) => ids[i] = id,
            None => missing.push(slot.code()),
        }
    }
    if !missing.is_empty() {
        return Err(AppError::InvalidLineup(format!("missing player for {}", missing.join(", "))));
    }

    let mut seen: HashSet<i64> = HashSet::with_capacity(ids.len());
    for (i, id) in ids.iter().enumerate() {
        if !seen.insert(*id) {
            return Err(AppError::InvalidLineup(format!(
                "player {} is assigned to more than one slot (again at {})",
                id,
                Slot::ALL[i].code()
            )));
        }
    }

    let [center_id, forward1_id, forward2_id, guard1_id, guard2_id, t1_id, t2_id] = ids;
    Ok(LineupRecord {
        season,
        week,
        fantasy_team_id,
        center_id,
        forward1_id,
        forward2_id,
        guard1_id,
        guard2_id,
        t1_id,
        t2_id,
    })
}

/// Reject any slot whose assignment changes while either the outgoing or incoming player is locked.
pub fn check_locks(
    existing: Option<&Lineup>,
    record: &LineupRecord,
    locked: &LockedPlayers,
) -> Result<()> {
    for slot in Slot::ALL {
        let incoming = PlayerId::from(record.get(slot));
        let outgoing = existing.and_then(|l| l.get(slot));
        if outgoing == Some(&incoming) {
            continue;
        }
        if let Some(out) = outgoing.filter(|p| locked.contains(p)) {
            return Err(AppError::LockedSlot { slot, player: out.to_string() });
        }
        if locked.contains(&incoming) {
            return Err(AppError::LockedSlot { slot, player: incoming.to_string() });
        }
    }
    Ok(())
}

fn find_week(weeks: &[FantasyWeek], week: i32) -> Option<&FantasyWeek> {
    weeks.iter().find(|w| w.week == Some(week))
}

fn week_schedule(
    store: &dyn LeagueStore,
    team_id: i64,
    season: i32,
    week: Option<&FantasyWeek>,
    include_completed: bool,
) -> Vec<GameStatusRow> {
    let Some((start_date, end_date)) = week.and_then(FantasyWeek::range) else {
        return Vec::new();
    };
    store.fantasy_week_player_schedule(&ScheduleQuery {
        team_id,
        start_date,
        end_date,
        season: Some(season),
        include_completed,
    })
}

/// Locked players for a team in a week; the first configured week when none is named.
pub fn week_locks(
    store: &dyn LeagueStore,
    season: i32,
    week: Option<i32>,
    team_id: i64,
    now_utc: DateTime<Utc>,
) -> LockedPlayers {
    let weeks = store.fantasy_week_options(season);
    let selected = week
        .or_else(|| weeks.first().and_then(|w| w.week))
        .and_then(|w| find_week(&weeks, w));
    let schedule = week_schedule(store, team_id, season, selected, true);
    lock::locked_players(&schedule, now_utc)
}

/// Validate a submission against shape, uniqueness and locks, then upsert it.
#[instrument(level = "info", skip(store, submission))]
pub fn save_lineup(
    store: &dyn LeagueStore,
    submission: &LineupSubmission,
    now_utc: DateTime<Utc>,
) -> Result<LineupRecord> {
    let record = validate_submission(submission)?;

    let weeks = store.fantasy_week_options(record.season);
    let week = find_week(&weeks, record.week);
    if week.is_none() {
        warn!(
            season = record.season,
            week = record.week,
            "Week not configured; lineup saved without lock checks"
        );
    }
    let schedule = week_schedule(store, record.fantasy_team_id, record.season, week, true);
    let locked = lock::locked_players(&schedule, now_utc);
    let existing = store.fantasy_lineup(record.season, record.week, record.fantasy_team_id);
    check_locks(existing.as_ref(), &record, &locked)?;

    store.upsert_lineup(&record)?;
    info!(
        season = record.season,
        week = record.week,
        team = record.fantasy_team_id,
        locked = locked.len(),
        "Saved lineup"
    );
    Ok(record)
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekOption {
    pub week: Option<i32>,
    pub label: String,
    pub start_date: String,
    pub end_date: String,
}

impl WeekOption {
    fn from_week(week: &FantasyWeek) -> Self {
        let start_date = display::format_week_date(week.start_date);
        let end_date = display::format_week_date(week.end_date);
        WeekOption {
            week: week.week,
            label: format!("{} ({} -> {})", week.label(), start_date, end_date),
            start_date,
            end_date,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerOption {
    pub player_id: PlayerId,
    /// `First Last (ABBR)`
    pub label: String,
    pub locked: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotState {
    pub slot: Slot,
    pub player_id: Option<PlayerId>,
    /// The current assignment cannot be changed.
    pub locked: bool,
    /// Selectable players: eligible, unlocked and not used elsewhere, plus the current one.
    pub options: Vec<PlayerOption>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RosterGroup {
    pub position: Position,
    pub players: Vec<PlayerOption>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpcomingGame {
    pub date: String,
    pub player: String,
    pub position: String,
    pub opponent: String,
    pub home_away: String,
    /// Local lock time, for players not yet locked.
    pub locks_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineupView {
    pub season: i32,
    pub team_id: i64,
    pub week: Option<i32>,
    pub weeks: Vec<WeekOption>,
    pub opponent: Option<String>,
    pub roster: Vec<RosterGroup>,
    pub slots: Vec<SlotState>,
    pub locked_player_ids: LockedPlayers,
    pub upcoming: Vec<UpcomingGame>,
    pub notice: Option<String>,
}

fn player_label(player: &RosterPlayer, directory: &TeamDirectory) -> String {
    let team = player
        .team_abbr
        .as_deref()
        .or_else(|| player.team_id.as_deref().and_then(|id| directory.ncaa_abbreviation(id)))
        .or(player.team_name.as_deref())
        .unwrap_or(display::PLACEHOLDER);
    format!("{} ({})", player.full_name(), team)
}

fn slot_options(
    slot: Slot,
    current: Option<&PlayerId>,
    roster: &[RosterPlayer],
    selected: &HashSet<&PlayerId>,
    locked: &LockedPlayers,
    directory: &TeamDirectory,
) -> Vec<PlayerOption> {
    roster
        .iter()
        .filter(|p| slot.position().is_none() || p.position() == slot.position())
        .filter_map(|p| p.player_id.as_ref().map(|id| (p, id)))
        .filter(|(_, id)| Some(*id) == current || (!selected.contains(id) && !locked.contains(id)))
        .map(|(p, id)| PlayerOption {
            player_id: id.clone(),
            label: player_label(p, directory),
            locked: locked.contains(id),
        })
        .collect()
}

fn format_lock_time(deadline: DateTime<Utc>, tz: Tz) -> String {
    deadline.with_timezone(&tz).format("%a %b %-d, %-I:%M %p %Z").to_string()
}

/// Parameters of a lineup page request; absent values fall back to config.
#[derive(Debug, Clone, Copy)]
pub struct LineupQuery {
    pub season: i32,
    pub week: Option<i32>,
    pub team_id: i64,
}

/// Everything the lineup selector needs for one team and week.
#[instrument(level = "info", skip(store, tz))]
pub fn lineup_view(
    store: &dyn LeagueStore,
    query: LineupQuery,
    tz: Tz,
    now_utc: DateTime<Utc>,
) -> LineupView {
    let LineupQuery { season, team_id, .. } = query;
    let weeks = store.fantasy_week_options(season);
    let week = query.week.or_else(|| weeks.first().and_then(|w| w.week));
    let selected = week.and_then(|w| find_week(&weeks, w));

    let directory = TeamDirectory::build(store.fantasy_teams(), store.ncaa_teams());
    let opponent = week.and_then(|w| {
        store
            .fantasy_matchups(season)
            .into_iter()
            .find(|m| m.week == Some(w) && m.fantasy_team_id == Some(team_id))
            .and_then(|m| m.opponent_fantasy_team_id)
            .map(|id| directory.fantasy_name(id))
    });

    let roster = store.fantasy_roster(team_id, None);
    let existing = week.and_then(|w| store.fantasy_lineup(season, w, team_id));
    let schedule_all = week_schedule(store, team_id, season, selected, true);
    let schedule_upcoming = week_schedule(store, team_id, season, selected, false);
    let locked = lock::locked_players(&schedule_all, now_utc);
    let deadlines = lock::next_deadlines(&schedule_all, now_utc);

    let current: Vec<Option<&PlayerId>> = Slot::ALL
        .iter()
        .map(|slot| existing.as_ref().and_then(|l| l.get(*slot)))
        .collect();
    let in_use: HashSet<&PlayerId> = current.iter().flatten().copied().collect();
    let slots = Slot::ALL
        .iter()
        .zip(current.iter())
        .map(|(slot, cur)| SlotState {
            slot: *slot,
            player_id: cur.cloned(),
            locked: cur.is_some_and(|p| locked.contains(p)),
            options: slot_options(*slot, *cur, &roster, &in_use, &locked, &directory),
        })
        .collect();

    let upcoming = schedule_upcoming
        .iter()
        .map(|game| UpcomingGame {
            date: display::format_week_date(game.game_date),
            player: format!(
                "{} {}",
                game.first_name.as_deref().unwrap_or(""),
                game.last_name.as_deref().unwrap_or("")
            )
            .trim()
            .to_string(),
            position: game
                .player_position
                .clone()
                .unwrap_or_else(|| display::PLACEHOLDER.to_string()),
            opponent: game
                .opponent_id
                .as_deref()
                .and_then(|id| directory.ncaa_abbreviation(id))
                .map(str::to_string)
                .or_else(|| game.opponent_name.clone())
                .unwrap_or_else(|| display::PLACEHOLDER.to_string()),
            home_away: game.home_away.clone().unwrap_or_else(|| display::PLACEHOLDER.to_string()),
            locks_at: game
                .player_id
                .as_ref()
                .and_then(|p| deadlines.get(p))
                .map(|d| format_lock_time(*d, tz)),
        })
        .collect();

    let roster_groups = group_roster(&roster)
        .into_iter()
        .map(|(position, players)| RosterGroup {
            position,
            players: players
                .into_iter()
                .filter_map(|p| {
                    p.player_id.as_ref().map(|id| PlayerOption {
                        player_id: id.clone(),
                        label: player_label(p, &directory),
                        locked: locked.contains(id),
                    })
                })
                .collect(),
        })
        .collect();

    let notice = (!locked.is_empty()).then(|| LOCK_NOTICE.to_string());
    info!(season, team_id, locked = locked.len(), roster = roster.len(), "Built lineup view");

    LineupView {
        season,
        team_id,
        week,
        weeks: weeks.iter().map(WeekOption::from_week).collect(),
        opponent,
        roster: roster_groups,
        slots,
        locked_player_ids: locked,
        upcoming,
        notice,
    }
}

/// Roster split into the three position groups, unknown positions dropped.
pub fn group_roster(roster: &[RosterPlayer]) -> [(Position, Vec<&RosterPlayer>); 3] {
    [Position::Center, Position::Forward, Position::Guard]
        .map(|pos| (pos, roster.iter().filter(|p| p.position() == Some(pos)).collect()))
}
