use serde::Serialize;
use crate::models::gamification::GamificationState;

/// High-level status reported by the engine to the console.
#[derive(Debug, Clone, Serialize)]
pub struct EngineStatus {
    pub state: Option<GamificationState>,
    pub email: Option<String>,
    /// Whether the mining task is currently scheduled.
    pub mining_running: bool,
    pub attached_sessions: usize,
    pub uptime_seconds: u64,
}
