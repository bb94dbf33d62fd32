pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod ranking;
pub mod resolver;
pub mod services;

use std::path::Path;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use colored::Colorize;
use log::info;

use crate::cli::{Cli, Command};
use crate::config::AppConfig;
use crate::database::DbPool;
use crate::domain::{Fixture, TournamentId};
use crate::services::{ImportService, ManualResult, RecorderService, StandingsService};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

fn open_pool(config: &AppConfig) -> Result<DbPool> {
    info!("Using database {}", config.storage.database_path);
    database::create_pool(&config.storage.database_path, config.storage.pool_size)
}

pub fn handle_init(config: &AppConfig) -> Result<()> {
    let pool = open_pool(config)?;
    let conn = database::get_connection(&pool)?;
    database::setup::reset_database(&conn)
}

pub fn handle_import(config: &AppConfig, file: &Path) -> Result<()> {
    let fixture = Fixture::load(file)?;
    let summary = ImportService::new(open_pool(config)?).run(&fixture)?;

    for tournament in &summary.tournaments {
        println!("Tournament {} \"{}\"", tournament.id, tournament.name);
        for (team_id, name) in &tournament.teams {
            println!("  team {} {}", team_id, name);
        }
        println!("  matches {:?}", tournament.match_ids);
    }
    println!("Rounds {:?}", summary.round_ids);
    Ok(())
}

pub fn handle_resolve(config: &AppConfig, tournament_id: TournamentId, round_id: i64) -> Result<()> {
    let pool = open_pool(config)?;
    let conn = database::get_connection(&pool)?;

    let round = database::rounds::find_by_id(&conn, round_id)?
        .ok_or_else(|| anyhow::anyhow!("round not found: {}", round_id))?;
    let rosters = database::teams::list_rosters(&conn, tournament_id)?;

    match resolver::resolve_teams(&round, &rosters) {
        Ok(resolution) => {
            println!("{} -> team {}", round.label1, resolution.team1_id);
            println!("{} -> team {}", round.label2, resolution.team2_id);
            for score in &resolution.scores {
                println!(
                    "  {:>4} {:<24} {}: {:>3}  {}: {:>3}  ({:.0}% {})",
                    score.team_id,
                    score.name,
                    round.label1,
                    score.score_a,
                    round.label2,
                    score.score_b,
                    score.confidence_a() * 100.0,
                    round.label1
                );
            }
        }
        Err(reason) => println!("{} {}", "unresolved:".yellow(), reason),
    }
    Ok(())
}

pub fn handle_record_auto(
    config: &AppConfig,
    tournament_id: TournamentId,
    match_id: i64,
    map_id: i64,
    round_id: i64,
) -> Result<()> {
    let pool = open_pool(config)?;
    let recorded = RecorderService::new(pool.clone())
        .record_auto_result(tournament_id, match_id, map_id, round_id)?;

    println!("Recorded result {}", recorded.result_id);
    if let Some(warning) = &recorded.warning {
        println!("{} {}", "warning:".yellow(), warning);
    }

    trigger_rebuild(config, pool, tournament_id)
}

pub fn handle_record_manual(config: &AppConfig, input: &ManualResult) -> Result<()> {
    let pool = open_pool(config)?;
    let result_id = RecorderService::new(pool.clone()).record_manual_result(input)?;

    println!("Recorded result {}", result_id);
    trigger_rebuild(config, pool, input.tournament_id)
}

pub fn handle_override(config: &AppConfig, result_id: i64, team1_id: i64, team2_id: i64) -> Result<()> {
    let pool = open_pool(config)?;
    let updated = RecorderService::new(pool.clone()).override_teams(result_id, team1_id, team2_id)?;

    println!("Result {} now {} vs {}", updated.id, team1_id, team2_id);
    trigger_rebuild(config, pool, updated.tournament_id)
}

pub fn handle_delete(config: &AppConfig, result_id: i64) -> Result<()> {
    let pool = open_pool(config)?;
    let recorder = RecorderService::new(pool.clone());

    let tournament_id = recorder.get_result(result_id)?.tournament_id;
    recorder.delete_result(result_id)?;

    println!("Deleted result {}", result_id);
    trigger_rebuild(config, pool, tournament_id)
}

pub fn handle_standings(
    config: &AppConfig,
    tournament_id: TournamentId,
    week: Option<&str>,
    json: bool,
) -> Result<()> {
    let service = StandingsService::new(open_pool(config)?);

    if json {
        let rankings = service.list_rankings(tournament_id, week)?;
        println!("{}", serde_json::to_string_pretty(&rankings)?);
        return Ok(());
    }

    let rows = service.list_standings_table(tournament_id, week)?;
    println!(
        "{}",
        format!("{:>4}  {:<24} {:>3} {:>3} {:>3} {:>7}", "#", "Team", "W", "T", "L", "Diff").bold()
    );
    for row in rows {
        let diff = format!("{:>+7}", row.ticket_differential);
        let diff = if row.ticket_differential < 0 { diff.red() } else { diff.green() };
        println!(
            "{:>4}  {:<24} {:>3} {:>3} {:>3} {}",
            row.rank, row.team_name, row.rounds_won, row.rounds_tied, row.rounds_lost, diff
        );
    }
    Ok(())
}

pub fn handle_rebuild(config: &AppConfig, tournament_id: TournamentId) -> Result<()> {
    let written = StandingsService::new(open_pool(config)?).rebuild_all_rankings(tournament_id)?;
    println!("Wrote {} rankings", written);
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

/// Rankings are rebuilt after every mutation, inline or as a detached task
fn trigger_rebuild(config: &AppConfig, pool: DbPool, tournament_id: TournamentId) -> Result<()> {
    let service = StandingsService::new(pool);

    if !config.rebuild.detached {
        let written = service.rebuild_all_rankings(tournament_id)?;
        info!("Rebuilt {} rankings for tournament {}", written, tournament_id);
        return Ok(());
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let handle = service.spawn_rebuild(tournament_id);
        info!("Rankings rebuild for tournament {} dispatched", tournament_id);
        // The process must not exit before the task finishes
        handle.await
    })?;
    Ok(())
}
