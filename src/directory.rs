use std::collections::HashMap;

use crate::model::team::{FantasyTeam, NcaaTeam};

/// Name lookups for one invocation: fantasy team names and college team
/// abbreviations. Build it once from the fetched tables and pass it down.
#[derive(Debug, Clone, Default)]
pub struct TeamDirectory {
    fantasy_names: HashMap<i64, String>,
    ncaa_abbreviations: HashMap<String, String>,
}

impl TeamDirectory {
    pub fn build(fantasy_teams: Vec<FantasyTeam>, ncaa_teams: Vec<NcaaTeam>) -> Self {
        let mut fantasy_names = HashMap::with_capacity(fantasy_teams.len());
        for team in fantasy_teams {
            if let (Some(id), Some(name)) = (team.fantasy_team_id, team.display_name()) {
                fantasy_names.insert(id, name.to_string());
            }
        }

        let mut ncaa_abbreviations = HashMap::with_capacity(ncaa_teams.len());
        for team in ncaa_teams {
            if let (Some(id), Some(abbr)) = (team.team_id.as_deref(), team.abbreviation()) {
                ncaa_abbreviations.insert(id.to_string(), abbr.to_string());
            }
        }

        TeamDirectory { fantasy_names, ncaa_abbreviations }
    }

    /// Fantasy team name, or `Team {id}` when unknown.
    pub fn fantasy_name(&self, team_id: i64) -> String {
        self.fantasy_names
            .get(&team_id)
            .cloned()
            .unwrap_or_else(|| format!("Team {}", team_id))
    }

    pub fn ncaa_abbreviation(&self, team_id: &str) -> Option<&str> {
        self.ncaa_abbreviations.get(team_id).map(|s| s.as_str())
    }
}
