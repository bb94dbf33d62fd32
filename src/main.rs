use anyhow::Result;

use tournament_standings::cli::Command;
use tournament_standings::config::AppConfig;
use tournament_standings::services::ManualResult;
use tournament_standings::{
    handle_completions, handle_delete, handle_import, handle_init, handle_override,
    handle_rebuild, handle_record_auto, handle_record_manual, handle_resolve, handle_standings,
    interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    let config = AppConfig::new();
    execute_command(&config, &command)
}

fn execute_command(config: &AppConfig, command: &Command) -> Result<()> {
    match command {
        Command::Init => handle_init(config),
        Command::Import { file } => handle_import(config, file),
        Command::Resolve { tournament, round } => handle_resolve(config, *tournament, *round),
        Command::RecordAuto {
            tournament,
            match_id,
            map,
            round,
        } => handle_record_auto(config, *tournament, *match_id, *map, *round),
        Command::RecordManual {
            tournament,
            match_id,
            map,
            team1,
            team2,
            tickets1,
            tickets2,
            winner,
        } => handle_record_manual(
            config,
            &ManualResult {
                tournament_id: *tournament,
                match_id: *match_id,
                map_id: *map,
                team1_id: *team1,
                team2_id: *team2,
                team1_tickets: *tickets1,
                team2_tickets: *tickets2,
                winner_id: *winner,
            },
        ),
        Command::Override {
            result,
            team1,
            team2,
        } => handle_override(config, *result, *team1, *team2),
        Command::Delete { result } => handle_delete(config, *result),
        Command::Standings {
            tournament,
            week,
            json,
        } => handle_standings(config, *tournament, week.as_deref(), *json),
        Command::Rebuild { tournament } => handle_rebuild(config, *tournament),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
