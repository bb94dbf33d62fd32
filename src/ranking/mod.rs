pub mod standings;
pub mod tiebreak;
pub mod types;

pub use standings::compute_standings;
pub use tiebreak::{compare, TiebreakCriteria, TIEBREAK_ORDER};
pub use types::TeamStanding;
