//! Season administration: week date ranges and matchup pairings.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::error::{AppError, Result};
use crate::model::loose;
use crate::model::matchup::MatchupRecord;
use crate::model::week::{FantasyWeek, WeekRecord};
use crate::store::LeagueStore;

/// One row of the week editor. Rows missing a week number or either date are skipped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeekEntry {
    #[serde(default, deserialize_with = "loose::opt_i32")]
    pub week: Option<i32>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_bool")]
    pub is_dynamic: Option<bool>,
}

/// Inclusive date ranges overlap unless one ends before the other starts.
pub fn ranges_overlap<T: PartialOrd>(a: (T, T), b: (T, T)) -> bool {
    !(a.1 < b.0 || a.0 > b.1)
}

/// Turn editor rows into week records, skipping incomplete rows.
pub fn prepare_weeks(season: i32, entries: &[WeekEntry]) -> Result<Vec<WeekRecord>> {
    let mut out = Vec::new();
    for entry in entries {
        let (Some(week), Some(start_raw), Some(end_raw)) =
            (entry.week.filter(|w| *w > 0), entry.start_date.as_deref(), entry.end_date.as_deref())
        else {
            continue;
        };
        let bad_date = |which: &str, raw: &str| {
            let message = format!("week {} {} date {:?} is not YYYY-MM-DD", week, which, raw);
            AppError::InvalidWeeks(message)
        };
        let start_date = loose::parse_date(start_raw).ok_or_else(|| bad_date("start", start_raw))?;
        let end_date = loose::parse_date(end_raw).ok_or_else(|| bad_date("end", end_raw))?;
        if end_date < start_date {
            return Err(AppError::InvalidWeeks(format!("week {} ends before it starts", week)));
        }
        out.push(WeekRecord {
            season,
            week,
            start_date,
            end_date,
            label: entry.label.clone(),
            notes: entry.notes.clone(),
            is_dynamic: entry.is_dynamic.unwrap_or(false),
        });
    }
    Ok(out)
}

/// Ranges of different week numbers may not overlap, neither against stored weeks
/// nor within the batch. A week may overlap its own stored range since it replaces it.
pub fn check_overlaps(incoming: &[WeekRecord], existing: &[FantasyWeek]) -> Result<()> {
    for new in incoming {
        let range = (new.start_date, new.end_date);
        for other in existing {
            let (Some(other_week), Some(other_range)) = (other.week, other.range()) else {
                continue;
            };
            if other_week == new.week {
                continue;
            }
            if ranges_overlap(range, other_range) {
                return Err(AppError::InvalidWeeks(format!(
                    "week {} overlaps existing week {}",
                    new.week, other_week
                )));
            }
        }
    }

    for (i, a) in incoming.iter().enumerate() {
        for b in &incoming[i + 1..] {
            if a.week == b.week {
                continue;
            }
            if ranges_overlap((a.start_date, a.end_date), (b.start_date, b.end_date)) {
                return Err(AppError::InvalidWeeks(format!(
                    "week {} overlaps week {}",
                    a.week, b.week
                )));
            }
        }
    }
    Ok(())
}

/// Validate and upsert a batch of weeks; returns how many were written.
#[instrument(level = "info", skip(store, entries), fields(entries = entries.len()))]
pub fn save_weeks(store: &dyn LeagueStore, season: i32, entries: &[WeekEntry]) -> Result<usize> {
    if season <= 0 {
        return Err(AppError::InvalidWeeks("season is required".to_string()));
    }
    let records = prepare_weeks(season, entries)?;
    if records.is_empty() {
        info!(season, "No complete week rows submitted; nothing to save");
        return Ok(0);
    }
    let existing = store.fantasy_week_options(season);
    if let Err(e) = check_overlaps(&records, &existing) {
        warn!(error = %e, season, "Week overlap detected; batch rejected");
        return Err(e);
    }
    store.upsert_weeks(&records)?;
    info!(season, saved = records.len(), "Saved weeks");
    Ok(records.len())
}

pub fn delete_week(store: &dyn LeagueStore, season: i32, week: i32) -> Result<()> {
    if season <= 0 || week <= 0 {
        return Err(AppError::InvalidWeeks("season and week are required".to_string()));
    }
    store.delete_week(season, week)
}

/// A matchup form post from the admin page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchupSubmission {
    #[serde(default, deserialize_with = "loose::opt_i32")]
    pub season: Option<i32>,
    #[serde(default, deserialize_with = "loose::opt_i32")]
    pub week: Option<i32>,
    #[serde(default, deserialize_with = "loose::opt_i64")]
    pub fantasy_team_id: Option<i64>,
    #[serde(default, deserialize_with = "loose::opt_i64")]
    pub opponent_fantasy_team_id: Option<i64>,
}

impl MatchupSubmission {
    pub fn validate(&self) -> Result<MatchupRecord> {
        match (self.season, self.week, self.fantasy_team_id, self.opponent_fantasy_team_id) {
            (Some(season), Some(week), Some(team), Some(opponent))
                if season > 0 && week > 0 && team > 0 && opponent > 0 =>
            {
                if team == opponent {
                    return Err(AppError::InvalidMatchup(format!(
                        "team {} cannot play itself",
                        team
                    )));
                }
                Ok(MatchupRecord {
                    season,
                    week,
                    fantasy_team_id: team,
                    opponent_fantasy_team_id: opponent,
                })
            }
            _ => Err(AppError::InvalidMatchup(
                "season, week, fantasy_team_id and opponent_fantasy_team_id are required"
                    .to_string(),
            )),
        }
    }
}

/// Upsert one side of a pairing, keyed on `season,week,fantasy_team_id`.
pub fn save_matchup(
    store: &dyn LeagueStore,
    submission: &MatchupSubmission,
) -> Result<MatchupRecord> {
    let record = submission.validate()?;
    store.upsert_matchup(&record)?;
    info!(
        season = record.season,
        week = record.week,
        team = record.fantasy_team_id,
        opponent = record.opponent_fantasy_team_id,
        "Saved matchup"
    );
    Ok(record)
}

pub fn delete_matchup(store: &dyn LeagueStore, season: i32, week: i32, team_id: i64) -> Result<()> {
    if season <= 0 || week <= 0 || team_id <= 0 {
        return Err(AppError::InvalidMatchup(
            "season, week and fantasy_team_id are required".to_string(),
        ));
    }
    store.delete_matchup(season, week, team_id)
}
