use std::sync::Arc;
use tracing::{debug, info};
use hostvoucher_common::models::{BadgeDefinition, BadgeReceipt, BadgeTier, ChangeCause};
use crate::Error;
use crate::catalog::{catalog, BadgeCatalog};
use crate::store::{Commit, GamificationStore};

pub struct BadgeService {
    store: Arc<GamificationStore>,
    catalog: &'static BadgeCatalog,
}

impl BadgeService {
    pub fn new(store: Arc<GamificationStore>) -> Self {
        Self { store, catalog: catalog() }
    }

    pub fn catalog(&self) -> &'static BadgeCatalog {
        self.catalog
    }

    pub fn list(&self, tier: Option<BadgeTier>) -> Vec<BadgeDefinition> {
        match tier {
            Some(t) => self.catalog.tier(t).cloned().collect(),
            None => self.catalog.all().to_vec(),
        }
    }

    /// Owned badges in catalog order.
    pub async fn owned(&self) -> Vec<BadgeDefinition> {
        let Some(state) = self.store.read().await else {
            return Vec::new();
        };
        self.catalog
            .all()
            .iter()
            .filter(|b| state.owns(&b.name))
            .cloned()
            .collect()
    }

    /// Debits the badge price and adds it to the owned set. Any unmet
    /// precondition leaves the state exactly as it was.
    pub async fn purchase(&self, name: &str) -> Result<BadgeReceipt, Error> {
        let badge = self
            .catalog
            .find(name)
            .ok_or_else(|| Error::UnknownBadge(name.to_string()))?;
        if !badge.is_purchasable() {
            return Err(Error::NotPurchasable(badge.name.clone()));
        }

        let result = self
            .store
            .update(|snap, _now| {
                let state = snap.state.as_mut().ok_or(Error::NotActivated)?;
                if state.owns(&badge.name) {
                    return Err(Error::AlreadyOwned(badge.name.clone()));
                }
                if state.points < badge.price_points {
                    return Err(Error::InsufficientPoints {
                        badge: badge.name.clone(),
                        price: badge.price_points,
                        available: state.points,
                    });
                }
                state.points -= badge.price_points;
                state.badges_owned.insert(badge.name.clone());
                let receipt = BadgeReceipt {
                    badge: badge.name.clone(),
                    tier: badge.tier,
                    points_debited: badge.price_points,
                    points_credited: 0,
                    total_points: state.points,
                };
                Ok(Commit::Changed(
                    receipt,
                    ChangeCause::BadgePurchased { badge: badge.name.clone(), price: badge.price_points },
                ))
            })
            .await;

        match &result {
            Ok(r) => info!("Badge '{}' purchased for {} points (remaining={})", r.badge, r.points_debited, r.total_points),
            Err(e) => debug!("Purchase of '{}' declined: {}", badge.name, e),
        }
        result
    }

    /// Awards a special badge once its proof flow has been accepted, crediting
    /// the badge's fixed point grant.
    pub async fn grant_special(&self, name: &str) -> Result<BadgeReceipt, Error> {
        let badge = self
            .catalog
            .specials()
            .find(|b| b.name == name || b.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownBadge(name.to_string()))?;

        let result = self
            .store
            .update(|snap, _now| {
                let state = snap.state.as_mut().ok_or(Error::NotActivated)?;
                if state.owns(&badge.name) {
                    return Err(Error::AlreadyOwned(badge.name.clone()));
                }
                state.points = state.points.saturating_add(badge.grant_points);
                state.badges_owned.insert(badge.name.clone());
                let receipt = BadgeReceipt {
                    badge: badge.name.clone(),
                    tier: badge.tier,
                    points_debited: 0,
                    points_credited: badge.grant_points,
                    total_points: state.points,
                };
                Ok(Commit::Changed(
                    receipt,
                    ChangeCause::SpecialBadgeGranted { badge: badge.name.clone(), points: badge.grant_points },
                ))
            })
            .await;

        if let Ok(r) = &result {
            info!("Special badge '{}' granted (+{} points)", r.badge, r.points_credited);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::helpers::{activate_with_points, build_test_store};

    #[tokio::test]
    async fn test_unknown_and_special_names_are_not_sold() -> Result<(), Error> {
        let (store, _clock, _repo) = build_test_store(0).await;
        activate_with_points(&store, u64::MAX / 2).await?;
        let svc = BadgeService::new(store);

        assert!(matches!(svc.purchase("Hourly Tin").await, Err(Error::UnknownBadge(_))));
        assert!(matches!(svc.purchase("Verified Buyer").await, Err(Error::NotPurchasable(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_purchase_requires_state() {
        let (store, _clock, _repo) = build_test_store(0).await;
        let svc = BadgeService::new(store);
        assert!(matches!(svc.purchase("Daily Bronze").await, Err(Error::NotActivated)));
    }

    #[tokio::test]
    async fn test_grant_special_once() -> Result<(), Error> {
        let (store, _clock, _repo) = build_test_store(0).await;
        activate_with_points(&store, 100).await?;
        let svc = BadgeService::new(store.clone());

        let r = svc.grant_special("Verified Buyer").await?;
        assert_eq!(r.points_credited, 50_000_000);
        assert_eq!(r.total_points, 50_000_100);
        assert!(matches!(svc.grant_special("Verified Buyer").await, Err(Error::AlreadyOwned(_))));
        assert!(matches!(svc.grant_special("Daily Bronze").await, Err(Error::UnknownBadge(_))));

        let owned: Vec<String> = svc.owned().await.into_iter().map(|b| b.name).collect();
        assert_eq!(owned, vec!["Verified Buyer".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_by_tier() {
        let (store, _clock, _repo) = build_test_store(0).await;
        let svc = BadgeService::new(store);
        assert_eq!(svc.list(Some(BadgeTier::Seasonal)).len(), 10);
        assert_eq!(svc.list(None).len(), 52);
    }
}
