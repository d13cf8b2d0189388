use std::sync::Arc;
use tracing::{debug, info};
use hostvoucher_common::models::{ActionKind, Award, ChangeCause, RewardTable};
use crate::Error;
use crate::store::{Commit, GamificationStore};

/// Grants fixed points for clicks, shares and visits, at most once per
/// cooldown window for each (kind, subject) pair.
pub struct RewardService {
    store: Arc<GamificationStore>,
    rules: RewardTable,
}

impl RewardService {
    pub fn new(store: Arc<GamificationStore>, rules: RewardTable) -> Self {
        Self { store, rules }
    }

    pub fn rules(&self) -> &RewardTable {
        &self.rules
    }

    pub async fn award(&self, kind: ActionKind, subject_id: &str) -> Result<Award, Error> {
        let subject = subject_id.trim().to_string();
        if subject.is_empty() {
            return Err(Error::Parse("subject id must not be empty".into()));
        }
        let rule = self.rules.rule(kind);
        let cooldown_ms = rule.cooldown_ms();

        let result = self
            .store
            .update(move |snap, now| {
                let state = match snap.state.as_mut() {
                    Some(st) if st.is_activated => st,
                    _ => return Err(Error::NotActivated),
                };

                if cooldown_ms > 0 {
                    if let Some(last) = snap.cooldowns.last_reward(kind, &subject) {
                        let elapsed = now.saturating_sub(last);
                        if elapsed <= cooldown_ms {
                            return Err(Error::OnCooldown {
                                kind,
                                subject,
                                remaining_ms: cooldown_ms.saturating_sub(elapsed),
                            });
                        }
                    }
                }

                state.points = state.points.saturating_add(rule.points);
                let award = Award {
                    kind,
                    subject_id: subject.clone(),
                    points_awarded: rule.points,
                    total_points: state.points,
                    awarded_at: now,
                };
                snap.cooldowns.record(kind, &subject, now);
                Ok(Commit::Changed(
                    award,
                    ChangeCause::Rewarded { kind, subject_id: subject, points: rule.points },
                ))
            })
            .await;

        match &result {
            Ok(award) => info!(
                "Awarded {} points for {} on '{}' (total={})",
                award.points_awarded, kind, award.subject_id, award.total_points
            ),
            Err(Error::NotActivated) if kind.notifies_when_inactive() => {
                self.store
                    .event_bus()
                    .publish_notice(format!("Activate points mining to earn rewards for each {kind}."))
                    .await;
            }
            Err(e) if e.is_rejection() => debug!("Reward declined for {} on '{}': {}", kind, subject_id, e),
            Err(_) => {}
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostvoucher_common::models::RewardRule;
    use crate::eventbus::GamificationEvent;
    use crate::test_utils::helpers::{activate_with_points, build_test_store};

    #[tokio::test]
    async fn test_inactive_click_is_silent() {
        let (store, _clock, _repo) = build_test_store(0).await;
        let mut rx = store.event_bus().subscribe(Some(4)).await;
        let svc = RewardService::new(store, RewardTable::default());

        assert!(matches!(svc.award(ActionKind::Click, "productA").await, Err(Error::NotActivated)));
        assert!(rx.try_recv().is_err(), "click must not raise a notice");
    }

    #[tokio::test]
    async fn test_inactive_share_raises_notice() {
        let (store, _clock, _repo) = build_test_store(0).await;
        let mut rx = store.event_bus().subscribe(Some(4)).await;
        let svc = RewardService::new(store, RewardTable::default());

        assert!(matches!(svc.award(ActionKind::Share, "productA").await, Err(Error::NotActivated)));
        match rx.try_recv() {
            Ok(GamificationEvent::Notice(text)) => assert!(text.contains("share")),
            other => panic!("expected a notice, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_zero_cooldown_always_grants() -> Result<(), Error> {
        let (store, _clock, _repo) = build_test_store(5_000).await;
        activate_with_points(&store, 0).await?;
        let mut table = RewardTable::default();
        table.click = RewardRule::new(10, 0);
        let svc = RewardService::new(store.clone(), table);

        svc.award(ActionKind::Click, "p").await?;
        let second = svc.award(ActionKind::Click, "p").await?;
        assert_eq!(second.total_points, 20);
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_subject_rejected() {
        let (store, _clock, _repo) = build_test_store(0).await;
        let svc = RewardService::new(store, RewardTable::default());
        assert!(matches!(svc.award(ActionKind::Visit, "  ").await, Err(Error::Parse(_))));
    }
}
