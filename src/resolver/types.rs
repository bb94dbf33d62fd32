use serde::Serialize;
use thiserror::Error;

use crate::domain::TeamId;

/// How many members of one roster were seen under each round label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterScore {
    pub team_id: TeamId,
    pub name: String,
    pub score_a: usize,
    pub score_b: usize,
}

impl RosterScore {
    pub fn is_viable(&self) -> bool {
        self.score_a > 0 || self.score_b > 0
    }

    /// Margin towards label A; negative when the roster leans to label B
    pub fn margin_a(&self) -> i64 {
        self.score_a as i64 - self.score_b as i64
    }

    pub fn margin_b(&self) -> i64 {
        -self.margin_a()
    }

    /// Share of the roster's observed members that played under label A
    pub fn confidence_a(&self) -> f64 {
        let total = self.score_a + self.score_b;
        if total == 0 {
            0.0
        } else {
            self.score_a as f64 / total as f64
        }
    }
}

/// Rosters mapped to the round's two labels, plus the counts behind the choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub team1_id: TeamId,
    pub team2_id: TeamId,
    pub scores: Vec<RosterScore>,
}

impl Resolution {
    pub fn score_of(&self, team_id: TeamId) -> Option<&RosterScore> {
        self.scores.iter().find(|s| s.team_id == team_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Unresolvable {
    #[error("no data to resolve: round has no player records")]
    NoParticipants,

    #[error("tournament has no rosters")]
    NoRosters,

    #[error("only {viable} roster(s) overlap the round's players, need at least 2")]
    InsufficientSignal { viable: usize },

    #[error("no second roster could be matched to the other team")]
    NoSecondTeam,
}
