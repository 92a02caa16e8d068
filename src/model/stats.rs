use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::loose;
use crate::model::player::{PlayerId, opt_player_id};

/// Season averages for one player (`roster_snapshot`, `player_summaries` and
/// `player_options` RPCs). Averages only count games the player actually played.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    #[serde(default, deserialize_with = "opt_player_id")]
    pub player_id: Option<PlayerId>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub team_name: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_f64")]
    pub ppg: Option<f64>,
    #[serde(default, deserialize_with = "loose::opt_f64")]
    pub mpg: Option<f64>,
    #[serde(default, deserialize_with = "loose::opt_f64")]
    pub fgm: Option<f64>,
    #[serde(default, deserialize_with = "loose::opt_f64")]
    pub fga: Option<f64>,
    #[serde(default, deserialize_with = "loose::opt_f64")]
    pub tpm: Option<f64>,
    #[serde(default, deserialize_with = "loose::opt_f64")]
    pub tpa: Option<f64>,
    #[serde(default, deserialize_with = "loose::opt_f64")]
    pub last5_ppg: Option<f64>,
}

impl PlayerSummary {
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_string()
    }
}

/// Bio details from the `player_profile` RPC.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    #[serde(default, deserialize_with = "opt_player_id")]
    pub player_id: Option<PlayerId>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub last_name: Option<String>,
    /// NCAA listing.
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub position: Option<String>,
    /// Fantasy roster slot group, when rostered.
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub player_position: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub player_number: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub height: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub display_height: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_f64")]
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub experience: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub headshot: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub team_id: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub team_name: Option<String>,
}

/// One box score line from the `player_game_log` RPC, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameLogEntry {
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub game_id: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_date")]
    pub game_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub team_name: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub opponent_name: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub home_away: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_f64")]
    pub pts: Option<f64>,
    #[serde(default, deserialize_with = "loose::opt_f64")]
    pub minutes: Option<f64>,
    #[serde(default, deserialize_with = "loose::opt_f64")]
    pub fgm: Option<f64>,
    #[serde(default, deserialize_with = "loose::opt_f64")]
    pub fga: Option<f64>,
    #[serde(default, deserialize_with = "loose::opt_f64")]
    pub tpm: Option<f64>,
    #[serde(default, deserialize_with = "loose::opt_f64")]
    pub tpa: Option<f64>,
    #[serde(default, deserialize_with = "loose::opt_f64")]
    pub reb: Option<f64>,
    #[serde(default, deserialize_with = "loose::opt_f64")]
    pub ast: Option<f64>,
    #[serde(default, deserialize_with = "loose::opt_f64")]
    pub stl: Option<f64>,
    #[serde(default, deserialize_with = "loose::opt_f64")]
    pub blocks: Option<f64>,
    #[serde(default, deserialize_with = "loose::opt_f64")]
    pub turnovers: Option<f64>,
}
