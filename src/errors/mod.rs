use std::fmt;
use thiserror::Error;

use crate::resolver::Unresolvable;

/// Kinds of rows an operation can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Round,
    Match,
    Tournament,
    Result,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Round => "round",
            Entity::Match => "match",
            Entity::Tournament => "tournament",
            Entity::Result => "match result",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum StandingsError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: Entity, id: i64 },

    #[error("could not resolve teams: {0}")]
    Unresolvable(#[from] Unresolvable),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl StandingsError {
    pub fn not_found(entity: Entity, id: i64) -> Self {
        StandingsError::NotFound { entity, id }
    }
}

pub type StandingsResult<T> = std::result::Result<T, StandingsError>;
