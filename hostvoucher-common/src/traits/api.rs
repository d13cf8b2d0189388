use async_trait::async_trait;
use crate::error::Error;
use crate::models::{
    ActionKind, Award, BadgeDefinition, BadgeReceipt, BadgeTier, EngineStatus, GamificationState,
};

pub trait GamificationApi:
ActivationApi
+ RewardApi
+ BadgeApi
+ SessionApi
{
}

impl<T> GamificationApi for T
where
    T: ActivationApi
    + RewardApi
    + BadgeApi
    + SessionApi,
{
    // marker
}

#[async_trait]
pub trait ActivationApi: Send + Sync {
    async fn activate(&self, email: Option<String>) -> Result<GamificationState, Error>;
    async fn deactivate(&self) -> Result<GamificationState, Error>;
    async fn state(&self) -> Option<GamificationState>;
    async fn status(&self) -> EngineStatus;
}

#[async_trait]
pub trait RewardApi: Send + Sync {
    async fn award(&self, kind: ActionKind, subject_id: &str) -> Result<Award, Error>;
}

#[async_trait]
pub trait BadgeApi: Send + Sync {
    fn list_badges(&self, tier: Option<BadgeTier>) -> Vec<BadgeDefinition>;
    async fn owned_badges(&self) -> Vec<BadgeDefinition>;
    async fn purchase_badge(&self, name: &str) -> Result<BadgeReceipt, Error>;
    async fn grant_special_badge(&self, name: &str) -> Result<BadgeReceipt, Error>;
}

/// A session is one open UI surface; mining runs while at least one is attached.
#[async_trait]
pub trait SessionApi: Send + Sync {
    async fn attach_session(&self) -> uuid::Uuid;
    async fn detach_session(&self, session_id: uuid::Uuid);
}
