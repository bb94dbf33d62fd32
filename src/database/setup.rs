use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn reset_database(conn: &Connection) -> Result<()> {
    conn.execute_batch(include_str!("schema.sql"))
        .context("Failed to apply database schema")?;

    log::info!("Database schema reset successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{create_memory_pool, get_connection};

    #[test]
    fn test_reset_creates_all_tables() {
        let pool = create_memory_pool().unwrap();
        let conn = get_connection(&pool).unwrap();

        reset_database(&conn).unwrap();
        // A second reset drops and recreates everything
        reset_database(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('tournaments', 'teams', 'team_members', 'matches', 'rounds', 'round_players', 'match_results', 'rankings')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 8);
    }
}
