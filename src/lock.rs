//! Lineup lock evaluation.
//!
//! A player is locked for the week once any of their games is live or over,
//! or once the clock reaches one hour before a game's tip-off. Locked players
//! can neither be moved out of nor into a lineup slot.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::model::game::GameStatusRow;
use crate::model::player::PlayerId;

/// Status fragments that lock a player regardless of the clock.
pub const LOCKING_STATUSES: [&str; 5] = ["final", "in progress", "progress", "live", "complete"];

pub const LOCK_LEAD_MINUTES: i64 = 60;

/// Set of string-normalized player ids that may no longer change slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LockedPlayers(BTreeSet<PlayerId>);

impl LockedPlayers {
    pub fn contains(&self, player: &PlayerId) -> bool {
        self.0.contains(player)
    }

    /// Membership test for an id that has not been normalized yet.
    pub fn contains_raw(&self, raw: &str) -> bool {
        PlayerId::new(raw).is_some_and(|id| self.0.contains(&id))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerId> {
        self.0.iter()
    }
}

impl FromIterator<PlayerId> for LockedPlayers {
    fn from_iter<I: IntoIterator<Item = PlayerId>>(iter: I) -> Self {
        LockedPlayers(iter.into_iter().collect())
    }
}

pub fn status_locks(normalized_status: &str) -> bool {
    LOCKING_STATUSES.iter().any(|marker| normalized_status.contains(marker))
}

/// Instant at which a game stops accepting lineup changes.
pub fn lock_deadline(row: &GameStatusRow) -> Option<DateTime<Utc>> {
    row.game_instant().map(|start| start - Duration::minutes(LOCK_LEAD_MINUTES))
}

/// Whether this single game locks its player at `now_utc`.
pub fn is_locked_game(row: &GameStatusRow, now_utc: DateTime<Utc>) -> bool {
    if status_locks(&row.normalized_status()) {
        return true;
    }
    match lock_deadline(row) {
        Some(deadline) => now_utc >= deadline,
        None => false,
    }
}

/// Every player with at least one locking game among `rows`.
/// Rows without a player id are skipped.
pub fn locked_players(rows: &[GameStatusRow], now_utc: DateTime<Utc>) -> LockedPlayers {
    rows.iter()
        .filter(|row| is_locked_game(row, now_utc))
        .filter_map(|row| row.player_id.clone())
        .collect()
}

/// Earliest upcoming lock deadline per player that is not yet locked.
pub fn next_deadlines(
    rows: &[GameStatusRow],
    now_utc: DateTime<Utc>,
) -> BTreeMap<PlayerId, DateTime<Utc>> {
    let locked = locked_players(rows, now_utc);
    let mut deadlines: BTreeMap<PlayerId, DateTime<Utc>> = BTreeMap::new();
    for row in rows {
        let Some(player) = row.player_id.as_ref() else { continue };
        if locked.contains(player) {
            continue;
        }
        if let Some(deadline) = lock_deadline(row) {
            deadlines
                .entry(player.clone())
                .and_modify(|cur| *cur = (*cur).min(deadline))
                .or_insert(deadline);
        }
    }
    deadlines
}
