use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{Match, MatchId, TeamId, TournamentId};

pub fn insert_match(
    conn: &Connection,
    tournament_id: TournamentId,
    week: Option<&str>,
    team1_id: TeamId,
    team2_id: TeamId,
) -> Result<Match> {
    let sql = "INSERT INTO matches (tournament_id, week, team1_id, team2_id) VALUES (?1, ?2, ?3, ?4) RETURNING id, tournament_id, week, team1_id, team2_id";

    conn.query_row(
        sql,
        params![tournament_id, week, team1_id, team2_id],
        parse_match_row,
    )
    .context("Failed to insert match")
}

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<Match> {
    Ok(Match {
        id: row.get(0)?,
        tournament_id: row.get(1)?,
        week: row.get(2)?,
        team1_id: row.get(3)?,
        team2_id: row.get(4)?,
    })
}

pub fn find_in_tournament(
    conn: &Connection,
    tournament_id: TournamentId,
    match_id: MatchId,
) -> Result<Option<Match>> {
    let sql = "SELECT id, tournament_id, week, team1_id, team2_id FROM matches WHERE id = ?1 AND tournament_id = ?2";

    conn.query_row(sql, params![match_id, tournament_id], parse_match_row)
        .optional()
        .context("Failed to query match in tournament")
}
