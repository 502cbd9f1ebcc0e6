pub mod stage;
pub mod summary;

pub use stage::{CollectStats, DispatchStats};
pub use summary::RunSummary;
