use std::env;

use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;

use crate::error::{AppError, Result};

/// Fantasy team shown on the lineup page when a request names none.
pub const DEFAULT_FANTASY_TEAM_ID: i64 = 2;

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::New_York;

/// Runtime settings read from the Lambda environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub supabase_url: String,
    pub supabase_key: String,
    pub fantasy_team_id: i64,
    pub timezone: Tz,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let supabase_url = get("SUPABASE_URL")
            .ok_or_else(|| AppError::Config("SUPABASE_URL must be set".to_string()))?;
        let supabase_key = get("SUPABASE_SERVICE_ROLE_KEY")
            .or_else(|| get("SUPABASE_PUBLISHABLE_DEFAULT_KEY"))
            .ok_or_else(|| {
                AppError::Config(
                    "SUPABASE_SERVICE_ROLE_KEY or SUPABASE_PUBLISHABLE_DEFAULT_KEY must be set"
                        .to_string(),
                )
            })?;

        let fantasy_team_id = match get("FANTASY_TEAM_ID") {
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|id| *id > 0)
                .ok_or_else(|| {
                    AppError::Config(format!("FANTASY_TEAM_ID is not a positive integer: {}", raw))
                })?,
            None => DEFAULT_FANTASY_TEAM_ID,
        };

        let timezone = match get("LEAGUE_TIMEZONE") {
            Some(raw) => raw
                .parse::<Tz>()
                .map_err(|e| AppError::Config(format!("LEAGUE_TIMEZONE {}: {}", raw, e)))?,
            None => DEFAULT_TIMEZONE,
        };

        Ok(Config { supabase_url, supabase_key, fantasy_team_id, timezone })
    }

    /// Season used when a request does not name one: the current year in league time.
    pub fn current_season(&self, now_utc: DateTime<Utc>) -> i32 {
        now_utc.with_timezone(&self.timezone).year()
    }
}
