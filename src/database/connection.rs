use anyhow::{Context, Result};
use r2d2_sqlite::SqliteConnectionManager;

pub type DbPool = r2d2::Pool<SqliteConnectionManager>;
pub type DbConn = r2d2::PooledConnection<SqliteConnectionManager>;

pub fn create_pool(database_path: &str, max_size: u32) -> Result<DbPool> {
    build_pool(with_foreign_keys(SqliteConnectionManager::file(database_path)), max_size)
}

/// Every in-memory connection is its own database, so the pool holds exactly one.
pub fn create_memory_pool() -> Result<DbPool> {
    build_pool(with_foreign_keys(SqliteConnectionManager::memory()), 1)
}

/// SQLite leaves foreign keys off per connection unless asked
fn with_foreign_keys(manager: SqliteConnectionManager) -> SqliteConnectionManager {
    manager.with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"))
}

fn build_pool(manager: SqliteConnectionManager, max_size: u32) -> Result<DbPool> {
    r2d2::Pool::builder()
        .max_size(max_size)
        .build(manager)
        .context("Failed to create database connection pool")
}

pub fn get_connection(pool: &DbPool) -> Result<DbConn> {
    pool.get()
        .context("Failed to get database connection from pool")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::setup::reset_database;

    #[test]
    fn test_pooled_connections_enforce_foreign_keys() {
        let pool = create_memory_pool().unwrap();
        let conn = get_connection(&pool).unwrap();
        reset_database(&conn).unwrap();

        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);

        let orphan = conn.execute(
            "INSERT INTO teams (tournament_id, name) VALUES (?1, ?2)",
            rusqlite::params![99, "Nobody"],
        );
        assert!(orphan.is_err());
    }

    #[test]
    fn test_deleting_a_round_detaches_its_results() {
        let pool = create_memory_pool().unwrap();
        let conn = get_connection(&pool).unwrap();
        reset_database(&conn).unwrap();

        conn.execute_batch(
            "INSERT INTO tournaments (id, name) VALUES (1, 'Cup');
             INSERT INTO teams (id, tournament_id, name) VALUES (1, 1, 'Red'), (2, 1, 'Blue');
             INSERT INTO matches (id, tournament_id, week, team1_id, team2_id) VALUES (1, 1, 'W1', 1, 2);
             INSERT INTO rounds (id, label1, label2) VALUES (1, 'Axis', 'Allies');
             INSERT INTO match_results (tournament_id, match_id, map_id, round_id, created_at, updated_at)
                 VALUES (1, 1, 1, 1, '2026-01-01 00:00:00', '2026-01-01 00:00:00');
             DELETE FROM rounds WHERE id = 1;",
        )
        .unwrap();

        let round_id: Option<i64> = conn
            .query_row("SELECT round_id FROM match_results", [], |row| row.get(0))
            .unwrap();
        assert_eq!(round_id, None);
    }
}
