use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::model::loose;
use crate::model::player::{PlayerId, opt_player_id};

/// One (player, game) row from the weekly schedule RPC.
///
/// Timestamp fields are parsed on the way in; a malformed value simply
/// deserializes to `None`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStatusRow {
    #[serde(default, deserialize_with = "opt_player_id")]
    pub player_id: Option<PlayerId>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_timestamp")]
    pub game_datetime: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "loose::opt_date")]
    pub game_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub game_id: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub player_position: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub opponent_id: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub opponent_name: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub home_away: Option<String>,
}

impl GameStatusRow {
    /// Start instant: the full timestamp when present, otherwise midnight UTC of the game date.
    pub fn game_instant(&self) -> Option<DateTime<Utc>> {
        self.game_datetime.or_else(|| {
            self.game_date
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        })
    }

    /// Status trimmed and lower-cased; empty when absent.
    pub fn normalized_status(&self) -> String {
        self.status
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_default()
    }
}
