use async_trait::async_trait;
use uuid::Uuid;
use hostvoucher_common::traits::api::SessionApi;
use crate::engine::core::GamificationEngine;

#[async_trait]
impl SessionApi for GamificationEngine {
    async fn attach_session(&self) -> Uuid {
        self.supervisor.attach_session().await
    }

    async fn detach_session(&self, session_id: Uuid) {
        self.supervisor.detach_session(session_id).await;
    }
}
