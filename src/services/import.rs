use std::collections::HashMap;

use anyhow::{anyhow, Context, Result};
use log::info;

use crate::database::{self, DbPool};
use crate::domain::fixture::TournamentFixture;
use crate::domain::{Fixture, PlayerObservation, RoundId, TeamId, TournamentId};

/// Ids assigned to everything a fixture created
#[derive(Debug, Default)]
pub struct ImportSummary {
    pub tournaments: Vec<ImportedTournament>,
    pub round_ids: Vec<RoundId>,
}

#[derive(Debug)]
pub struct ImportedTournament {
    pub id: TournamentId,
    pub name: String,
    pub teams: Vec<(TeamId, String)>,
    pub match_ids: Vec<i64>,
}

/// Loads rosters, schedules and rounds owned by collaborating subsystems
pub struct ImportService {
    pool: DbPool,
}

impl ImportService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn run(&self, fixture: &Fixture) -> Result<ImportSummary> {
        let mut conn = database::get_connection(&self.pool)?;
        let tx = conn.transaction().context("Failed to start import transaction")?;

        let mut summary = ImportSummary::default();

        for tournament in &fixture.tournaments {
            let imported = import_tournament(&tx, tournament)?;
            info!(
                "  → Imported tournament {} ({} teams, {} matches)",
                imported.name,
                imported.teams.len(),
                imported.match_ids.len()
            );
            summary.tournaments.push(imported);
        }

        for round in &fixture.rounds {
            let players: Vec<PlayerObservation> = round.players.iter().map(Into::into).collect();
            let stored = database::rounds::insert_round(
                &tx,
                &round.label1,
                &round.label2,
                round.tickets1,
                round.tickets2,
                &players,
                None,
            )?;
            summary.round_ids.push(stored.id);
        }
        info!("  → Imported {} rounds", summary.round_ids.len());

        tx.commit().context("Failed to commit import")?;
        Ok(summary)
    }
}

fn import_tournament(
    conn: &rusqlite::Connection,
    tournament: &TournamentFixture,
) -> Result<ImportedTournament> {
    let stored = database::tournaments::insert_tournament(conn, &tournament.name)?;

    let mut team_ids: HashMap<&str, TeamId> = HashMap::new();
    let mut teams = Vec::new();
    for team in &tournament.teams {
        let row = database::teams::insert_team(conn, stored.id, &team.name, &team.members)?;
        team_ids.insert(team.name.as_str(), row.id);
        teams.push((row.id, row.name));
    }

    let lookup = |name: &str| {
        team_ids
            .get(name)
            .copied()
            .ok_or_else(|| anyhow!("Match references unknown team {} in {}", name, tournament.name))
    };

    let mut match_ids = Vec::new();
    for scheduled in &tournament.matches {
        let row = database::matches::insert_match(
            conn,
            stored.id,
            scheduled.week.as_deref(),
            lookup(&scheduled.team1)?,
            lookup(&scheduled.team2)?,
        )?;
        match_ids.push(row.id);
    }

    Ok(ImportedTournament {
        id: stored.id,
        name: stored.name,
        teams,
        match_ids,
    })
}
