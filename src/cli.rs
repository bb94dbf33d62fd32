use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "tournament match results and standings")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Drop and recreate the database schema
    Init,
    /// Load tournaments, rosters, matches and rounds from a JSON fixture
    Import {
        /// Path to the fixture file
        file: PathBuf,
    },
    /// Show which roster a round's teams resolve to, without recording anything
    Resolve {
        #[arg(short, long)]
        tournament: i64,
        #[arg(short, long)]
        round: i64,
    },
    /// Record a map result from a played round
    RecordAuto {
        #[arg(short, long)]
        tournament: i64,
        #[arg(short = 'm', long = "match")]
        match_id: i64,
        #[arg(long)]
        map: i64,
        #[arg(short, long)]
        round: i64,
    },
    /// Record a map result from explicit scores
    RecordManual {
        #[arg(short, long)]
        tournament: i64,
        #[arg(short = 'm', long = "match")]
        match_id: i64,
        #[arg(long)]
        map: i64,
        #[arg(long)]
        team1: i64,
        #[arg(long)]
        team2: i64,
        #[arg(long)]
        tickets1: i32,
        #[arg(long)]
        tickets2: i32,
        /// Winner, when it should not follow from the tickets
        #[arg(long)]
        winner: Option<i64>,
    },
    /// Reassign the teams of a recorded result
    Override {
        #[arg(long)]
        result: i64,
        #[arg(long)]
        team1: i64,
        #[arg(long)]
        team2: i64,
    },
    /// Delete a recorded result
    Delete {
        #[arg(long)]
        result: i64,
    },
    /// Print stored standings
    Standings {
        #[arg(short, long)]
        tournament: i64,
        /// Week label; cumulative standings when omitted
        #[arg(short, long)]
        week: Option<String>,
        /// Print JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Recompute every ranking scope of a tournament
    Rebuild {
        #[arg(short, long)]
        tournament: i64,
    },
    /// Generate shell completions
    Completions {
        shell: Shell,
    },
}
