use serde::Serialize;

use crate::domain::{Ranking, TeamId, TournamentId};

/// Aggregated results of one team within one scope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStanding {
    pub team_id: TeamId,
    pub rounds_won: i32,
    pub rounds_tied: i32,
    pub rounds_lost: i32,
    pub ticket_differential: i64,
    pub rank: i32,
}

impl TeamStanding {
    pub fn new(team_id: TeamId) -> Self {
        Self {
            team_id,
            ..Self::default()
        }
    }

    pub fn into_ranking(self, tournament_id: TournamentId, week: Option<&str>) -> Ranking {
        Ranking {
            tournament_id,
            team_id: self.team_id,
            week: week.map(str::to_string),
            rounds_won: self.rounds_won,
            rounds_tied: self.rounds_tied,
            rounds_lost: self.rounds_lost,
            ticket_differential: self.ticket_differential,
            rank: self.rank,
        }
    }
}
