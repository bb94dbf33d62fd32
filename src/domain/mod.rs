pub mod fixture;
pub mod models;

pub use fixture::Fixture;
pub use models::*;
