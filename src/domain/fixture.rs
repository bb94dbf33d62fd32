use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::models::PlayerObservation;

/// Seed data produced by round ingestion and team management, loaded by `import`.
///
/// Teams and matches are keyed by name since row ids are only known after insert.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    #[serde(default)]
    pub tournaments: Vec<TournamentFixture>,
    #[serde(default)]
    pub rounds: Vec<RoundFixture>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentFixture {
    pub name: String,
    #[serde(default)]
    pub teams: Vec<TeamFixture>,
    #[serde(default)]
    pub matches: Vec<MatchFixture>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamFixture {
    pub name: String,
    #[serde(default)]
    pub members: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchFixture {
    pub week: Option<String>,
    pub team1: String,
    pub team2: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundFixture {
    pub label1: String,
    pub label2: String,
    pub tickets1: Option<i32>,
    pub tickets2: Option<i32>,
    #[serde(default)]
    pub players: Vec<PlayerFixture>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerFixture {
    pub name: String,
    pub team: String,
}

impl From<&PlayerFixture> for PlayerObservation {
    fn from(player: &PlayerFixture) -> Self {
        PlayerObservation {
            player_name: player.name.clone(),
            team_label: player.team.clone(),
        }
    }
}

impl Fixture {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture file: {}", path.display()))?;
        Self::parse(&json)
    }

    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse fixture")
    }
}
