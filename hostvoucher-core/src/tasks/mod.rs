pub mod mining;
pub mod mining_supervisor;

pub use mining::{accrue_once, spawn_mining_task};
pub use mining_supervisor::MiningSupervisor;
