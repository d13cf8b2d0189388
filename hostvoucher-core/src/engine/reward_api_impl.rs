use async_trait::async_trait;
use hostvoucher_common::models::{ActionKind, Award};
use hostvoucher_common::traits::api::RewardApi;
use crate::Error;
use crate::engine::core::GamificationEngine;

#[async_trait]
impl RewardApi for GamificationEngine {
    async fn award(&self, kind: ActionKind, subject_id: &str) -> Result<Award, Error> {
        let award = self.rewards.award(kind, subject_id).await?;
        self.report(award.points_awarded as i64, format!("{}:{}", award.kind, award.subject_id)).await;
        Ok(award)
    }
}
