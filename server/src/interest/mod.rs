mod interest_manager;
mod lod;
mod observer_directory;
mod send_budget;
mod snapshot;
mod sync_stats;

pub use interest_manager::InterestManager;
pub use lod::lod_interval;
pub use observer_directory::ObserverDirectory;
pub use send_budget::SendBudget;
pub use snapshot::{InstanceSnapshot, InstanceSnapshots};
pub use sync_stats::SyncStats;
