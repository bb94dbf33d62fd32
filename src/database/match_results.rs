use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};

use super::models::MatchResultFields;
use crate::domain::{
    MapId, MatchId, MatchResult, ResultId, RoundId, TeamId, TournamentId, Winner,
};

const RESULT_COLUMNS: &str = "id, tournament_id, match_id, map_id, round_id, week, team1_id, team2_id, winning_team_id, team1_tickets, team2_tickets, created_at, updated_at";

fn parse_match_result_row(row: &rusqlite::Row) -> rusqlite::Result<MatchResult> {
    Ok(MatchResult {
        id: row.get(0)?,
        tournament_id: row.get(1)?,
        match_id: row.get(2)?,
        map_id: row.get(3)?,
        round_id: row.get(4)?,
        week: row.get(5)?,
        team1_id: row.get(6)?,
        team2_id: row.get(7)?,
        winner: Winner::from_team_id(row.get(8)?),
        team1_tickets: row.get(9)?,
        team2_tickets: row.get(10)?,
        created_at: row.get(11)?,
        updated_at: row.get(12)?,
    })
}

pub fn insert_result(
    conn: &Connection,
    fields: &MatchResultFields,
    now: NaiveDateTime,
) -> Result<MatchResult> {
    let sql = format!(
        "INSERT INTO match_results (tournament_id, match_id, map_id, round_id, week, team1_id, team2_id, winning_team_id, team1_tickets, team2_tickets, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11) RETURNING {}",
        RESULT_COLUMNS
    );

    conn.query_row(
        &sql,
        params![
            fields.tournament_id,
            fields.match_id,
            fields.map_id,
            fields.round_id,
            fields.week,
            fields.team1_id,
            fields.team2_id,
            fields.winner.team_id(),
            fields.team1_tickets,
            fields.team2_tickets,
            now
        ],
        parse_match_result_row,
    )
    .context("Failed to insert match result")
}

/// Overwrites every recorded field of an existing result, keeping `created_at`
pub fn update_result(
    conn: &Connection,
    id: ResultId,
    fields: &MatchResultFields,
    now: NaiveDateTime,
) -> Result<MatchResult> {
    let sql = format!(
        "UPDATE match_results SET round_id = ?2, week = ?3, team1_id = ?4, team2_id = ?5, winning_team_id = ?6, team1_tickets = ?7, team2_tickets = ?8, updated_at = ?9 WHERE id = ?1 RETURNING {}",
        RESULT_COLUMNS
    );

    conn.query_row(
        &sql,
        params![
            id,
            fields.round_id,
            fields.week,
            fields.team1_id,
            fields.team2_id,
            fields.winner.team_id(),
            fields.team1_tickets,
            fields.team2_tickets,
            now
        ],
        parse_match_result_row,
    )
    .with_context(|| format!("Failed to update match result {}", id))
}

pub fn update_teams(
    conn: &Connection,
    id: ResultId,
    team1_id: TeamId,
    team2_id: TeamId,
    winner: Winner,
    now: NaiveDateTime,
) -> Result<MatchResult> {
    let sql = format!(
        "UPDATE match_results SET team1_id = ?2, team2_id = ?3, winning_team_id = ?4, updated_at = ?5 WHERE id = ?1 RETURNING {}",
        RESULT_COLUMNS
    );

    conn.query_row(
        &sql,
        params![id, team1_id, team2_id, winner.team_id(), now],
        parse_match_result_row,
    )
    .with_context(|| format!("Failed to reassign teams of match result {}", id))
}

/// Finds the result recorded for a map of a match, from the given round or,
/// with `round_id = None`, the manually entered one.
pub fn find_by_key(
    conn: &Connection,
    match_id: MatchId,
    map_id: MapId,
    round_id: Option<RoundId>,
) -> Result<Option<MatchResult>> {
    let sql = format!(
        "SELECT {} FROM match_results WHERE match_id = ?1 AND map_id = ?2 AND round_id IS ?3 ORDER BY id LIMIT 1",
        RESULT_COLUMNS
    );

    conn.query_row(&sql, params![match_id, map_id, round_id], parse_match_result_row)
        .optional()
        .context("Failed to query match result by key")
}

pub fn find_by_id(conn: &Connection, id: ResultId) -> Result<Option<MatchResult>> {
    let sql = format!("SELECT {} FROM match_results WHERE id = ?1", RESULT_COLUMNS);

    conn.query_row(&sql, params![id], parse_match_result_row)
        .optional()
        .context("Failed to query match result by id")
}

/// Returns the number of deleted rows
pub fn delete_by_id(conn: &Connection, id: ResultId) -> Result<usize> {
    conn.execute("DELETE FROM match_results WHERE id = ?1", params![id])
        .with_context(|| format!("Failed to delete match result {}", id))
}

pub fn list_by_tournament(conn: &Connection, tournament_id: TournamentId) -> Result<Vec<MatchResult>> {
    let sql = format!(
        "SELECT {} FROM match_results WHERE tournament_id = ?1 ORDER BY id",
        RESULT_COLUMNS
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![tournament_id], parse_match_result_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn list_by_week(
    conn: &Connection,
    tournament_id: TournamentId,
    week: &str,
) -> Result<Vec<MatchResult>> {
    let sql = format!(
        "SELECT {} FROM match_results WHERE tournament_id = ?1 AND week = ?2 ORDER BY id",
        RESULT_COLUMNS
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![tournament_id, week], parse_match_result_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn list_distinct_weeks(conn: &Connection, tournament_id: TournamentId) -> Result<Vec<String>> {
    let sql = "SELECT DISTINCT week FROM match_results WHERE tournament_id = ?1 AND week IS NOT NULL ORDER BY week";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![tournament_id], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()
        .context("Failed to list result weeks")?;

    Ok(rows)
}
