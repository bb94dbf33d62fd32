use chrono::NaiveDateTime;

use crate::domain::{MapId, MatchId, RoundId, TeamId, TournamentId, Winner};

#[derive(Debug, Clone)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct Team {
    pub id: TeamId,
    pub tournament_id: TournamentId,
    pub name: String,
    pub created_at: Option<NaiveDateTime>,
}

/// Column values written by an insert or an upsert overwrite of `match_results`
#[derive(Debug, Clone)]
pub struct MatchResultFields {
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
}

// DTO for standings display
#[derive(Debug, Clone)]
pub struct RankingWithTeam {
    pub rank: i32,
    pub team_id: TeamId,
    pub team_name: String,
    pub rounds_won: i32,
    pub rounds_tied: i32,
    pub rounds_lost: i32,
    pub ticket_differential: i64,
}
