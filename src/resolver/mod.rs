pub mod identity;
pub mod types;

pub use identity::resolve_teams;
pub use types::{Resolution, RosterScore, Unresolvable};
