use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::models::RankingWithTeam;
use crate::domain::{Ranking, TournamentId};

pub fn insert_ranking(conn: &Connection, ranking: &Ranking) -> Result<()> {
    let sql = "INSERT INTO rankings (tournament_id, team_id, week, rounds_won, rounds_tied, rounds_lost, ticket_differential, rank) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

    conn.execute(
        sql,
        params![
            ranking.tournament_id,
            ranking.team_id,
            ranking.week,
            ranking.rounds_won,
            ranking.rounds_tied,
            ranking.rounds_lost,
            ranking.ticket_differential,
            ranking.rank
        ],
    )
    .with_context(|| format!("Failed to insert ranking for team {}", ranking.team_id))
    .map(|_| ())
}

/// Removes every row of one scope; `week = None` is the cumulative scope
pub fn delete_scope(
    conn: &Connection,
    tournament_id: TournamentId,
    week: Option<&str>,
) -> Result<usize> {
    conn.execute(
        "DELETE FROM rankings WHERE tournament_id = ?1 AND week IS ?2",
        params![tournament_id, week],
    )
    .context("Failed to delete ranking scope")
}

/// Removes week scopes whose week no longer appears in `keep`
pub fn delete_stale_weeks(
    conn: &Connection,
    tournament_id: TournamentId,
    keep: &[String],
) -> Result<usize> {
    let mut removed = 0;
    for week in list_weeks(conn, tournament_id)? {
        if !keep.contains(&week) {
            removed += delete_scope(conn, tournament_id, Some(&week))?;
        }
    }
    Ok(removed)
}

fn list_weeks(conn: &Connection, tournament_id: TournamentId) -> Result<Vec<String>> {
    let sql = "SELECT DISTINCT week FROM rankings WHERE tournament_id = ?1 AND week IS NOT NULL";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![tournament_id], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()
        .context("Failed to list ranking weeks")?;

    Ok(rows)
}

fn parse_ranking_row(row: &rusqlite::Row) -> rusqlite::Result<Ranking> {
    Ok(Ranking {
        tournament_id: row.get(0)?,
        team_id: row.get(1)?,
        week: row.get(2)?,
        rounds_won: row.get(3)?,
        rounds_tied: row.get(4)?,
        rounds_lost: row.get(5)?,
        ticket_differential: row.get(6)?,
        rank: row.get(7)?,
    })
}

pub fn list_scope(
    conn: &Connection,
    tournament_id: TournamentId,
    week: Option<&str>,
) -> Result<Vec<Ranking>> {
    let sql = "SELECT tournament_id, team_id, week, rounds_won, rounds_tied, rounds_lost, ticket_differential, rank FROM rankings WHERE tournament_id = ?1 AND week IS ?2 ORDER BY rank";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![tournament_id, week], parse_ranking_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn list_scope_with_teams(
    conn: &Connection,
    tournament_id: TournamentId,
    week: Option<&str>,
) -> Result<Vec<RankingWithTeam>> {
    let sql = "
        SELECT r.rank, r.team_id, COALESCE(t.name, 'Unknown Team'), r.rounds_won, r.rounds_tied, r.rounds_lost, r.ticket_differential
        FROM rankings r
        LEFT JOIN teams t ON t.id = r.team_id
        WHERE r.tournament_id = ?1 AND r.week IS ?2
        ORDER BY r.rank
    ";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![tournament_id, week], |row| {
            Ok(RankingWithTeam {
                rank: row.get(0)?,
                team_id: row.get(1)?,
                team_name: row.get(2)?,
                rounds_won: row.get(3)?,
                rounds_tied: row.get(4)?,
                rounds_lost: row.get(5)?,
                ticket_differential: row.get(6)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
