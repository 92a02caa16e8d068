use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::loose;

/// A configured fantasy week (`fantasy_week_options` RPC). Date range is inclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FantasyWeek {
    #[serde(default, deserialize_with = "loose::opt_i32")]
    pub season: Option<i32>,
    #[serde(default, deserialize_with = "loose::opt_i32")]
    pub week: Option<i32>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "loose::opt_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "loose::opt_bool")]
    pub is_dynamic: Option<bool>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub notes: Option<String>,
}

impl FantasyWeek {
    /// Stored label, or `Week N` when none was set.
    pub fn label(&self) -> String {
        match (&self.label, self.week) {
            (Some(label), _) => label.clone(),
            (None, Some(week)) => format!("Week {}", week),
            (None, None) => "Week".to_string(),
        }
    }

    pub fn range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.start_date?, self.end_date?))
    }
}

/// Validated week definition ready to be upserted on `season,week`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekRecord {
    pub season: i32,
    pub week: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub label: Option<String>,
    pub notes: Option<String>,
    pub is_dynamic: bool,
}
