use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{PlayerObservation, Round, RoundId};

#[allow(clippy::too_many_arguments)]
pub fn insert_round(
    conn: &Connection,
    label1: &str,
    label2: &str,
    tickets1: Option<i32>,
    tickets2: Option<i32>,
    players: &[PlayerObservation],
    played_at: Option<NaiveDateTime>,
) -> Result<Round> {
    let sql = "INSERT INTO rounds (label1, label2, tickets1, tickets2, played_at) VALUES (?1, ?2, ?3, ?4, ?5) RETURNING id";

    let id: RoundId = conn
        .query_row(
            sql,
            params![label1, label2, tickets1, tickets2, played_at],
            |row| row.get(0),
        )
        .context("Failed to insert round")?;

    for player in players {
        conn.execute(
            "INSERT INTO round_players (round_id, player_name, team_label) VALUES (?1, ?2, ?3)",
            params![id, player.player_name, player.team_label],
        )
        .with_context(|| format!("Failed to insert player {} for round {}", player.player_name, id))?;
    }

    Ok(Round {
        id,
        label1: label1.to_string(),
        label2: label2.to_string(),
        tickets1,
        tickets2,
        players: players.to_vec(),
    })
}

/// Loads a round together with its player observations
pub fn find_by_id(conn: &Connection, id: RoundId) -> Result<Option<Round>> {
    let sql = "SELECT id, label1, label2, tickets1, tickets2 FROM rounds WHERE id = ?1";

    let round = conn
        .query_row(sql, params![id], |row| {
            Ok(Round {
                id: row.get(0)?,
                label1: row.get(1)?,
                label2: row.get(2)?,
                tickets1: row.get(3)?,
                tickets2: row.get(4)?,
                players: Vec::new(),
            })
        })
        .optional()
        .context("Failed to query round by id")?;

    match round {
        Some(mut round) => {
            round.players = list_players(conn, id)?;
            Ok(Some(round))
        }
        None => Ok(None),
    }
}

fn list_players(conn: &Connection, round_id: RoundId) -> Result<Vec<PlayerObservation>> {
    let sql = "SELECT player_name, team_label FROM round_players WHERE round_id = ?1 ORDER BY id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![round_id], |row| {
            Ok(PlayerObservation {
                player_name: row.get(0)?,
                team_label: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list round players")?;

    Ok(rows)
}
