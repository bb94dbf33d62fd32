use anyhow::Context;
use chrono::Utc;
use log::{debug, info, warn};
use rusqlite::Connection;

use crate::database::{self, DbPool, MatchResultFields};
use crate::domain::{
    MapId, MatchId, MatchResult, ResultId, Round, RoundId, TeamId, TournamentId, Winner,
};
use crate::errors::{Entity, StandingsError, StandingsResult};
use crate::resolver::{self, Resolution};

/// Outcome of recording a result from a played round
#[derive(Debug, Clone)]
pub struct AutoRecorded {
    pub result_id: ResultId,
    /// Why the teams were left unmapped, if they were
    pub warning: Option<String>,
    pub resolution: Option<Resolution>,
}

/// Scores entered by an administrator without a round
#[derive(Debug, Clone)]
pub struct ManualResult {
    pub tournament_id: TournamentId,
    pub match_id: MatchId,
    pub map_id: MapId,
    pub team1_id: TeamId,
    pub team2_id: TeamId,
    pub team1_tickets: i32,
    pub team2_tickets: i32,
    pub winner_id: Option<TeamId>,
}

/// Sole writer of `match_results`. None of its operations touch rankings;
/// callers rebuild them afterwards.
#[derive(Clone)]
pub struct RecorderService {
    pool: DbPool,
}

impl RecorderService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn record_auto_result(
        &self,
        tournament_id: TournamentId,
        match_id: MatchId,
        map_id: MapId,
        round_id: RoundId,
    ) -> StandingsResult<AutoRecorded> {
        let mut conn = database::get_connection(&self.pool)?;

        let round = database::rounds::find_by_id(&conn, round_id)?
            .ok_or(StandingsError::not_found(Entity::Round, round_id))?;
        ensure_tournament(&conn, tournament_id)?;
        let parent = database::matches::find_in_tournament(&conn, tournament_id, match_id)?
            .ok_or(StandingsError::not_found(Entity::Match, match_id))?;

        let rosters = database::teams::list_rosters(&conn, tournament_id)?;
        let (resolution, warning) = match resolver::resolve_teams(&round, &rosters) {
            Ok(resolution) => {
                log_resolution(&round, &resolution);
                (Some(resolution), None)
            }
            Err(reason) => {
                warn!(
                    "Round {} left unmapped for match {} map {}: {}",
                    round_id, match_id, map_id, reason
                );
                (None, Some(reason.to_string()))
            }
        };

        let team1_id = resolution.as_ref().map(|r| r.team1_id);
        let team2_id = resolution.as_ref().map(|r| r.team2_id);
        let (team1_tickets, team2_tickets) = round.tickets();

        let fields = MatchResultFields {
            tournament_id,
            match_id,
            map_id,
            round_id: Some(round_id),
            week: parent.week,
            team1_id,
            team2_id,
            winner: Winner::from_tickets(team1_id, team2_id, team1_tickets, team2_tickets),
            team1_tickets,
            team2_tickets,
        };

        let result = upsert(&mut conn, &fields)?;
        info!(
            "Recorded result {} for match {} map {} from round {}",
            result.id, match_id, map_id, round_id
        );

        Ok(AutoRecorded {
            result_id: result.id,
            warning,
            resolution,
        })
    }

    pub fn record_manual_result(&self, input: &ManualResult) -> StandingsResult<ResultId> {
        let mut conn = database::get_connection(&self.pool)?;

        ensure_tournament(&conn, input.tournament_id)?;
        validate_teams(&conn, input.tournament_id, input.team1_id, input.team2_id)?;
        let parent = database::matches::find_in_tournament(&conn, input.tournament_id, input.match_id)?
            .ok_or(StandingsError::not_found(Entity::Match, input.match_id))?;

        let winner = match input.winner_id {
            Some(winner_id) if winner_id == input.team1_id || winner_id == input.team2_id => {
                Winner::Team(winner_id)
            }
            Some(winner_id) => {
                return Err(StandingsError::Validation(format!(
                    "winner {} is neither team {} nor team {}",
                    winner_id, input.team1_id, input.team2_id
                )));
            }
            None => Winner::from_tickets(
                Some(input.team1_id),
                Some(input.team2_id),
                input.team1_tickets,
                input.team2_tickets,
            ),
        };

        let fields = MatchResultFields {
            tournament_id: input.tournament_id,
            match_id: input.match_id,
            map_id: input.map_id,
            round_id: None,
            week: parent.week,
            team1_id: Some(input.team1_id),
            team2_id: Some(input.team2_id),
            winner,
            team1_tickets: input.team1_tickets,
            team2_tickets: input.team2_tickets,
        };

        let result = upsert(&mut conn, &fields)?;
        info!(
            "Recorded manual result {} for match {} map {}",
            result.id, input.match_id, input.map_id
        );

        Ok(result.id)
    }

    /// Reassigns the teams of a stored result. Tickets stay on their sides and
    /// the winner is recomputed from them.
    pub fn override_teams(
        &self,
        result_id: ResultId,
        team1_id: TeamId,
        team2_id: TeamId,
    ) -> StandingsResult<MatchResult> {
        let conn = database::get_connection(&self.pool)?;

        let existing = database::match_results::find_by_id(&conn, result_id)?
            .ok_or(StandingsError::not_found(Entity::Result, result_id))?;
        validate_teams(&conn, existing.tournament_id, team1_id, team2_id)?;

        let winner = Winner::from_tickets(
            Some(team1_id),
            Some(team2_id),
            existing.team1_tickets,
            existing.team2_tickets,
        );
        let updated = database::match_results::update_teams(
            &conn,
            result_id,
            team1_id,
            team2_id,
            winner,
            Utc::now().naive_utc(),
        )?;

        info!(
            "Result {} teams overridden: {:?}/{:?} -> {}/{}",
            result_id, existing.team1_id, existing.team2_id, team1_id, team2_id
        );
        Ok(updated)
    }

    pub fn delete_result(&self, result_id: ResultId) -> StandingsResult<()> {
        let conn = database::get_connection(&self.pool)?;

        if database::match_results::delete_by_id(&conn, result_id)? == 0 {
            return Err(StandingsError::not_found(Entity::Result, result_id));
        }

        info!("Deleted result {}", result_id);
        Ok(())
    }

    pub fn get_result(&self, result_id: ResultId) -> StandingsResult<MatchResult> {
        let conn = database::get_connection(&self.pool)?;

        database::match_results::find_by_id(&conn, result_id)?
            .ok_or(StandingsError::not_found(Entity::Result, result_id))
    }

    pub fn list_results(&self, tournament_id: TournamentId) -> StandingsResult<Vec<MatchResult>> {
        let conn = database::get_connection(&self.pool)?;
        Ok(database::match_results::list_by_tournament(&conn, tournament_id)?)
    }
}

fn ensure_tournament(conn: &Connection, tournament_id: TournamentId) -> StandingsResult<()> {
    match database::tournaments::find_by_id(conn, tournament_id)? {
        Some(_) => Ok(()),
        None => Err(StandingsError::not_found(Entity::Tournament, tournament_id)),
    }
}

fn validate_teams(
    conn: &Connection,
    tournament_id: TournamentId,
    team1_id: TeamId,
    team2_id: TeamId,
) -> StandingsResult<()> {
    if team1_id == team2_id {
        return Err(StandingsError::Validation(format!(
            "team {} cannot play against itself",
            team1_id
        )));
    }

    for team_id in [team1_id, team2_id] {
        if !database::teams::belongs_to_tournament(conn, team_id, tournament_id)? {
            return Err(StandingsError::Validation(format!(
                "team {} does not belong to tournament {}",
                team_id, tournament_id
            )));
        }
    }

    Ok(())
}

/// One stored result per (match, map, round); manual results use no round
fn upsert(conn: &mut Connection, fields: &MatchResultFields) -> StandingsResult<MatchResult> {
    let now = Utc::now().naive_utc();
    let tx = conn
        .transaction()
        .context("Failed to start match result transaction")?;

    let existing = database::match_results::find_by_key(
        &tx,
        fields.match_id,
        fields.map_id,
        fields.round_id,
    )?;
    let result = match existing {
        Some(existing) => database::match_results::update_result(&tx, existing.id, fields, now)?,
        None => database::match_results::insert_result(&tx, fields, now)?,
    };

    tx.commit().context("Failed to commit match result")?;
    Ok(result)
}

fn log_resolution(round: &Round, resolution: &Resolution) {
    for score in &resolution.scores {
        debug!(
            "Round {}: roster {} ({}) matched {} on {} and {} on {}",
            round.id, score.team_id, score.name, score.score_a, round.label1, score.score_b, round.label2
        );
    }
    info!(
        "Round {}: {} -> team {}, {} -> team {}",
        round.id, round.label1, resolution.team1_id, round.label2, resolution.team2_id
    );
}
