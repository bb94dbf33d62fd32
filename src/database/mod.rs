pub mod connection;
pub mod match_results;
pub mod matches;
pub mod models;
pub mod rankings;
pub mod rounds;
pub mod setup;
pub mod teams;
pub mod tournaments;

pub use connection::{create_memory_pool, create_pool, get_connection, DbConn, DbPool};
pub use models::*;
