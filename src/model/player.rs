use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::model::loose;

/// Roster player identifier, held in its string-normalized spelling.
///
/// Ids arrive as JSON numbers from some RPCs and as strings from others
/// (and from form posts); `12`, `12.0` and `" 12 "` all normalize to `"12"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Normalize a raw identifier. Blank input yields `None`.
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return Some(PlayerId(i.to_string()));
        }
        // `12.0` collapses only while the float still holds the integer exactly.
        if let Ok(f) = trimmed.parse::<f64>() {
            if loose::is_exact_integer(f) && !trimmed.contains(['e', 'E']) {
                return Some(PlayerId((f as i64).to_string()));
            }
        }
        Some(PlayerId(trimmed.to_string()))
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        loose::scalar_to_string(value).and_then(PlayerId::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric form, when the id is a positive integer.
    pub fn as_positive_int(&self) -> Option<i64> {
        self.0.parse::<i64>().ok().filter(|v| *v > 0)
    }
}

impl From<i64> for PlayerId {
    fn from(value: i64) -> Self {
        PlayerId(value.to_string())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PlayerId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        PlayerId::from_value(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid player id: {}", value)))
    }
}

/// Lenient field deserializer: missing, null, blank or non-scalar ids become `None`.
pub(crate) fn opt_player_id<'de, D>(deserializer: D) -> Result<Option<PlayerId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(PlayerId::from_value))
}

/// Lineup position group a roster player is eligible for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "C")]
    Center,
    #[serde(rename = "F")]
    Forward,
    #[serde(rename = "G")]
    Guard,
}

impl Position {
    /// Map the free-text roster position (`c`, `Center`, `forwards`, ...) to a group.
    pub fn normalize(raw: &str) -> Option<Position> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "c" | "center" | "centers" => Some(Position::Center),
            "f" | "forward" | "forwards" => Some(Position::Forward),
            "g" | "guard" | "guards" => Some(Position::Guard),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Position::Center => "C",
            Position::Forward => "F",
            Position::Guard => "G",
        }
    }
}

/// A player on a fantasy roster, as returned by the `fantasy_roster` RPC.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterPlayer {
    #[serde(default, deserialize_with = "opt_player_id")]
    pub player_id: Option<PlayerId>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub player_position: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub team_id: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub team_abbr: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub team_name: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_f64")]
    pub ppg: Option<f64>,
}

impl RosterPlayer {
    pub fn position(&self) -> Option<Position> {
        self.player_position.as_deref().and_then(Position::normalize)
    }

    /// `"First Last"`, trimmed; empty when neither name is known.
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
