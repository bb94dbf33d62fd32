use anyhow::Context;
use log::{error, info};
use rusqlite::Connection;
use tokio::task::JoinHandle;

use crate::database::{self, DbPool, RankingWithTeam};
use crate::domain::{Ranking, Scope, TournamentId};
use crate::errors::{Entity, StandingsError, StandingsResult};
use crate::ranking;

/// Sole writer of `rankings`. Stored rows are a projection of the match
/// results of their scope and are always replaced wholesale.
#[derive(Clone)]
pub struct StandingsService {
    pool: DbPool,
}

impl StandingsService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Computes rankings for one scope without storing them.
    /// `week = None` covers every result of the tournament.
    pub fn compute_rankings(
        &self,
        tournament_id: TournamentId,
        week: Option<&str>,
    ) -> StandingsResult<Vec<Ranking>> {
        let conn = database::get_connection(&self.pool)?;
        Ok(compute_scope(&conn, tournament_id, week)?)
    }

    /// Replaces the stored rankings of every week present in the tournament's
    /// results plus the cumulative scope. Returns the number of rows written.
    ///
    /// Each scope is replaced in its own transaction. On error the rebuild stops;
    /// scopes committed before the failure keep their new rows, so the caller
    /// should retry the whole tournament.
    pub fn rebuild_all_rankings(&self, tournament_id: TournamentId) -> StandingsResult<usize> {
        let mut conn = database::get_connection(&self.pool)?;

        if database::tournaments::find_by_id(&conn, tournament_id)?.is_none() {
            return Err(StandingsError::not_found(Entity::Tournament, tournament_id));
        }

        let weeks = database::match_results::list_distinct_weeks(&conn, tournament_id)?;
        let removed = database::rankings::delete_stale_weeks(&conn, tournament_id, &weeks)?;
        if removed > 0 {
            info!("Removed {} rankings of weeks without results", removed);
        }

        let scopes = weeks
            .into_iter()
            .map(Scope::Week)
            .chain(std::iter::once(Scope::Cumulative));

        let mut written = 0;
        for scope in scopes {
            let rows = rebuild_scope(&mut conn, tournament_id, &scope)?;
            info!("  → Tournament {} {}: {} rankings", tournament_id, scope, rows);
            written += rows;
        }

        info!("Rebuilt rankings for tournament {} ({} rows)", tournament_id, written);
        Ok(written)
    }

    /// Runs a full rebuild on the blocking pool without waiting for it.
    /// Must be called from within a tokio runtime.
    pub fn spawn_rebuild(&self, tournament_id: TournamentId) -> JoinHandle<()> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = service.rebuild_all_rankings(tournament_id) {
                error!("Background rebuild of tournament {} failed: {:?}", tournament_id, e);
            }
        })
    }

    pub fn list_rankings(
        &self,
        tournament_id: TournamentId,
        week: Option<&str>,
    ) -> StandingsResult<Vec<Ranking>> {
        let conn = database::get_connection(&self.pool)?;
        Ok(database::rankings::list_scope(&conn, tournament_id, week)?)
    }

    pub fn list_standings_table(
        &self,
        tournament_id: TournamentId,
        week: Option<&str>,
    ) -> StandingsResult<Vec<RankingWithTeam>> {
        let conn = database::get_connection(&self.pool)?;
        Ok(database::rankings::list_scope_with_teams(&conn, tournament_id, week)?)
    }
}

fn compute_scope(
    conn: &Connection,
    tournament_id: TournamentId,
    week: Option<&str>,
) -> anyhow::Result<Vec<Ranking>> {
    let results = match week {
        Some(week) => database::match_results::list_by_week(conn, tournament_id, week)?,
        None => database::match_results::list_by_tournament(conn, tournament_id)?,
    };

    Ok(ranking::compute_standings(&results)
        .into_iter()
        .map(|standing| standing.into_ranking(tournament_id, week))
        .collect())
}

fn rebuild_scope(
    conn: &mut Connection,
    tournament_id: TournamentId,
    scope: &Scope,
) -> anyhow::Result<usize> {
    let tx = conn
        .transaction()
        .with_context(|| format!("Failed to start rebuild of {}", scope))?;

    database::rankings::delete_scope(&tx, tournament_id, scope.week())?;
    let rankings = compute_scope(&tx, tournament_id, scope.week())?;
    for ranking in &rankings {
        database::rankings::insert_ranking(&tx, ranking)?;
    }

    tx.commit()
        .with_context(|| format!("Failed to commit rebuild of {}", scope))?;
    Ok(rankings.len())
}
