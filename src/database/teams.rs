use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::collections::BTreeMap;

use super::models::Team;
use crate::domain::{Roster, TeamId, TournamentId};

pub fn insert_team(
    conn: &Connection,
    tournament_id: TournamentId,
    name: &str,
    members: &[String],
) -> Result<Team> {
    let sql = "INSERT INTO teams (tournament_id, name) VALUES (?1, ?2) RETURNING id, tournament_id, name, created_at";

    let team = conn
        .query_row(sql, params![tournament_id, name], parse_team_row)
        .context("Failed to insert team")?;

    for member in members {
        conn.execute(
            "INSERT OR IGNORE INTO team_members (team_id, player_name) VALUES (?1, ?2)",
            params![team.id, member],
        )
        .with_context(|| format!("Failed to insert member {} of team {}", member, team.id))?;
    }

    Ok(team)
}

fn parse_team_row(row: &rusqlite::Row) -> rusqlite::Result<Team> {
    Ok(Team {
        id: row.get(0)?,
        tournament_id: row.get(1)?,
        name: row.get(2)?,
        created_at: row.get(3)?,
    })
}

pub fn belongs_to_tournament(
    conn: &Connection,
    team_id: TeamId,
    tournament_id: TournamentId,
) -> Result<bool> {
    let sql = "SELECT COUNT(*) FROM teams WHERE id = ?1 AND tournament_id = ?2";

    let count: i64 = conn
        .query_row(sql, params![team_id, tournament_id], |row| row.get(0))
        .context("Failed to check team membership in tournament")?;

    Ok(count > 0)
}

/// Rosters of a tournament ordered by team id, members sorted by name
pub fn list_rosters(conn: &Connection, tournament_id: TournamentId) -> Result<Vec<Roster>> {
    let sql = "
        SELECT t.id, t.name, m.player_name
        FROM teams t
        LEFT JOIN team_members m ON m.team_id = t.id
        WHERE t.tournament_id = ?1
        ORDER BY t.id, m.player_name
    ";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![tournament_id], |row| {
            Ok((
                row.get::<_, TeamId>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list tournament rosters")?;

    let mut rosters: BTreeMap<TeamId, Roster> = BTreeMap::new();
    for (team_id, name, member) in rows {
        let roster = rosters.entry(team_id).or_insert_with(|| Roster {
            team_id,
            name,
            members: Vec::new(),
        });
        if let Some(member) = member {
            roster.members.push(member);
        }
    }

    Ok(rosters.into_values().collect())
}
