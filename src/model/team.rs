use serde::{Deserialize, Serialize};

use crate::model::loose;

/// A fantasy franchise (`fantasy_teams`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FantasyTeam {
    #[serde(default, deserialize_with = "loose::opt_i64")]
    pub fantasy_team_id: Option<i64>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub short_code: Option<String>,
}

impl FantasyTeam {
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.short_code.as_deref())
    }
}

/// A college program (`teams`), used to label players with their school.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NcaaTeam {
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub team_id: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub abbreviation: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub short_display_name: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub name: Option<String>,
}

impl NcaaTeam {
    /// Shortest available label, from abbreviation down to full name.
    pub fn abbreviation(&self) -> Option<&str> {
        self.abbreviation
            .as_deref()
            .or(self.short_display_name.as_deref())
            .or(self.display_name.as_deref())
            .or(self.name.as_deref())
    }
}
