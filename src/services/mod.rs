pub mod import;
pub mod recorder;
pub mod standings;

#[cfg(test)]
pub(crate) mod testing;

pub use import::ImportService;
pub use recorder::{AutoRecorded, ManualResult, RecorderService};
pub use standings::StandingsService;
