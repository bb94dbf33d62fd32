use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub type TournamentId = i64;
pub type TeamId = i64;
pub type MatchId = i64;
pub type MapId = i64;
pub type RoundId = i64;
pub type ResultId = i64;

/// One player seen on one team label during a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerObservation {
    pub player_name: String,
    pub team_label: String,
}

/// A played map as delivered by round ingestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub label1: String,
    pub label2: String,
    pub tickets1: Option<i32>,
    pub tickets2: Option<i32>,
    pub players: Vec<PlayerObservation>,
}

impl Round {
    /// Final tickets per side, absent counts stored as zero
    pub fn tickets(&self) -> (i32, i32) {
        (self.tickets1.unwrap_or(0), self.tickets2.unwrap_or(0))
    }
}

/// A tournament team and the player names registered on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub team_id: TeamId,
    pub name: String,
    pub members: Vec<String>,
}

/// A scheduled head-to-head between two rosters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    pub week: Option<String>,
    pub team1_id: TeamId,
    pub team2_id: TeamId,
}

/// Outcome of a single match result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "teamId")]
pub enum Winner {
    Team(TeamId),
    Tie,
}

impl Winner {
    /// Decides the winner from tickets. Unmapped sides always yield a tie.
    pub fn from_tickets(
        team1_id: Option<TeamId>,
        team2_id: Option<TeamId>,
        team1_tickets: i32,
        team2_tickets: i32,
    ) -> Self {
        match (team1_id, team2_id) {
            (Some(team1), Some(team2)) => match team1_tickets.cmp(&team2_tickets) {
                std::cmp::Ordering::Greater => Winner::Team(team1),
                std::cmp::Ordering::Less => Winner::Team(team2),
                std::cmp::Ordering::Equal => Winner::Tie,
            },
            _ => Winner::Tie,
        }
    }

    pub fn team_id(&self) -> Option<TeamId> {
        match self {
            Winner::Team(id) => Some(*id),
            Winner::Tie => None,
        }
    }

    pub fn from_team_id(team_id: Option<TeamId>) -> Self {
        team_id.map_or(Winner::Tie, Winner::Team)
    }
}

/// Recorded outcome of one played map within a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub id: ResultId,
    pub tournament_id: TournamentId,
    pub match_id: MatchId,
    pub map_id: MapId,
    pub round_id: Option<RoundId>,
    pub week: Option<String>,
    pub team1_id: Option<TeamId>,
    pub team2_id: Option<TeamId>,
    pub winner: Winner,
    pub team1_tickets: i32,
    pub team2_tickets: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl MatchResult {
    pub fn is_mapped(&self) -> bool {
        self.team1_id.is_some() && self.team2_id.is_some()
    }

    /// Own and opponent tickets for `team_id`, or `None` if the team did not play
    pub fn tickets_for(&self, team_id: TeamId) -> Option<(i32, i32)> {
        if self.team1_id == Some(team_id) {
            Some((self.team1_tickets, self.team2_tickets))
        } else if self.team2_id == Some(team_id) {
            Some((self.team2_tickets, self.team1_tickets))
        } else {
            None
        }
    }
}

/// A derived standings row for one team in one scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ranking {
    pub tournament_id: TournamentId,
    pub team_id: TeamId,
    pub week: Option<String>,
    pub rounds_won: i32,
    pub rounds_tied: i32,
    pub rounds_lost: i32,
    pub ticket_differential: i64,
    pub rank: i32,
}

/// The set of results a ranking is aggregated over
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scope {
    Week(String),
    Cumulative,
}

impl Scope {
    pub fn week(&self) -> Option<&str> {
        match self {
            Scope::Week(week) => Some(week),
            Scope::Cumulative => None,
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Week(week) => write!(f, "week {}", week),
            Scope::Cumulative => write!(f, "cumulative"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winner_follows_tickets() {
        assert_eq!(Winner::from_tickets(Some(1), Some(2), 200, 150), Winner::Team(1));
        assert_eq!(Winner::from_tickets(Some(1), Some(2), 80, 120), Winner::Team(2));
        assert_eq!(Winner::from_tickets(Some(1), Some(2), 100, 100), Winner::Tie);
    }

    #[test]
    fn test_unmapped_side_is_always_tie() {
        assert_eq!(Winner::from_tickets(None, Some(2), 300, 0), Winner::Tie);
        assert_eq!(Winner::from_tickets(Some(1), None, 300, 0), Winner::Tie);
        assert_eq!(Winner::from_tickets(None, None, 0, 300), Winner::Tie);
    }

    #[test]
    fn test_round_tickets_default_to_zero() {
        let round = Round {
            id: 1,
            label1: "Axis".to_string(),
            label2: "Allies".to_string(),
            tickets1: Some(42),
            tickets2: None,
            players: Vec::new(),
        };
        assert_eq!(round.tickets(), (42, 0));
    }

    #[test]
    fn test_scope_week_label() {
        assert_eq!(Scope::Week("W1".to_string()).week(), Some("W1"));
        assert_eq!(Scope::Cumulative.week(), None);
        assert_eq!(Scope::Cumulative.to_string(), "cumulative");
    }
}
