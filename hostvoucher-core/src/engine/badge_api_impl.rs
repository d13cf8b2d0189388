use async_trait::async_trait;
use hostvoucher_common::models::{BadgeDefinition, BadgeReceipt, BadgeTier};
use hostvoucher_common::traits::api::BadgeApi;
use crate::Error;
use crate::engine::core::GamificationEngine;

#[async_trait]
impl BadgeApi for GamificationEngine {
    fn list_badges(&self, tier: Option<BadgeTier>) -> Vec<BadgeDefinition> {
        self.badges.list(tier)
    }

    async fn owned_badges(&self) -> Vec<BadgeDefinition> {
        self.badges.owned().await
    }

    async fn purchase_badge(&self, name: &str) -> Result<BadgeReceipt, Error> {
        let receipt = self.badges.purchase(name).await?;
        self.report(-(receipt.points_debited as i64), format!("badge purchase: {}", receipt.badge)).await;
        Ok(receipt)
    }

    async fn grant_special_badge(&self, name: &str) -> Result<BadgeReceipt, Error> {
        let receipt = self.badges.grant_special(name).await?;
        self.report(receipt.points_credited as i64, format!("special badge: {}", receipt.badge)).await;
        Ok(receipt)
    }
}
