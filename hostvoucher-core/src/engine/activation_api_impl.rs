use async_trait::async_trait;
use hostvoucher_common::models::{EngineStatus, GamificationState};
use hostvoucher_common::traits::api::ActivationApi;
use crate::Error;
use crate::engine::core::GamificationEngine;

#[async_trait]
impl ActivationApi for GamificationEngine {
    async fn activate(&self, email: Option<String>) -> Result<GamificationState, Error> {
        self.activation.activate(email).await
    }

    async fn deactivate(&self) -> Result<GamificationState, Error> {
        self.activation.deactivate().await
    }

    async fn state(&self) -> Option<GamificationState> {
        self.store.read().await
    }

    async fn status(&self) -> EngineStatus {
        let snapshot = self.store.snapshot().await;
        EngineStatus {
            state: snapshot.state,
            email: snapshot.profile.and_then(|p| p.email),
            mining_running: self.supervisor.is_running().await,
            attached_sessions: self.supervisor.session_count().await,
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}
