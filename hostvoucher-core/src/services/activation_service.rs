use std::sync::Arc;
use tracing::info;
use hostvoucher_common::models::{ActivationProfile, ChangeCause, GamificationState};
use crate::Error;
use crate::store::{Commit, GamificationStore};
use crate::utils::time::from_epoch_ms;

/// Handles the activation form and the mining on/off switch.
pub struct ActivationService {
    store: Arc<GamificationStore>,
    rate_per_second: u64,
}

impl ActivationService {
    pub fn new(store: Arc<GamificationStore>, rate_per_second: u64) -> Self {
        Self { store, rate_per_second }
    }

    /// Creates the state on first submission (zero points) and switches mining
    /// on. Already active: returns the current state untouched.
    pub async fn activate(&self, email: Option<String>) -> Result<GamificationState, Error> {
        let email = email.map(|e| e.trim().to_string()).filter(|e| !e.is_empty());
        self.store
            .update(move |snap, now| {
                let state = snap.state.get_or_insert_with(|| GamificationState::new(now));
                if state.is_activated {
                    return Ok(Commit::Unchanged(state.clone()));
                }
                state.is_activated = true;
                // Time spent switched off is not mined.
                state.last_updated = now;
                let activated = state.clone();

                match snap.profile.as_mut() {
                    Some(profile) => {
                        if email.is_some() {
                            profile.email = email;
                        }
                    }
                    None => {
                        snap.profile = Some(ActivationProfile {
                            email,
                            activated_at: from_epoch_ms(now),
                        });
                    }
                }
                info!("Points mining activated (points={})", activated.points);
                Ok(Commit::Changed(activated, ChangeCause::Activated))
            })
            .await
    }

    /// Settles mining up to now, then switches it off.
    pub async fn deactivate(&self) -> Result<GamificationState, Error> {
        let rate = self.rate_per_second;
        self.store
            .update(move |snap, now| {
                let state = snap.state.as_mut().ok_or(Error::NotActivated)?;
                if !state.is_activated {
                    return Ok(Commit::Unchanged(state.clone()));
                }
                state.accrue(now, rate);
                state.is_activated = false;
                info!("Points mining deactivated (points={})", state.points);
                Ok(Commit::Changed(state.clone(), ChangeCause::Deactivated))
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::helpers::build_test_store;
    use crate::utils::time::Clock;

    #[tokio::test]
    async fn test_first_activation_creates_state() -> Result<(), Error> {
        let (store, clock, _repo) = build_test_store(1_000_000).await;
        let svc = ActivationService::new(store.clone(), 1);

        let st = svc.activate(Some("  user@example.com ".into())).await?;
        assert!(st.is_activated);
        assert_eq!(st.points, 0);
        assert_eq!(st.last_updated, clock.now_ms());
        let profile = store.profile().await.expect("profile recorded");
        assert_eq!(profile.email.as_deref(), Some("user@example.com"));
        Ok(())
    }

    #[tokio::test]
    async fn test_reactivation_is_noop() -> Result<(), Error> {
        let (store, clock, repo) = build_test_store(0).await;
        let svc = ActivationService::new(store.clone(), 1);
        svc.activate(None).await?;
        clock.advance_secs(30);
        let again = svc.activate(None).await?;
        assert_eq!(again.last_updated, 0, "re-activating must not reset the accrual point");
        assert_eq!(repo.save_count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_deactivate_settles_points() -> Result<(), Error> {
        let (store, clock, _repo) = build_test_store(0).await;
        let svc = ActivationService::new(store.clone(), 2);
        svc.activate(None).await?;
        clock.advance_secs(5);
        let st = svc.deactivate().await?;
        assert!(!st.is_activated);
        assert_eq!(st.points, 10);

        // Off time is not paid out on the next activation.
        clock.advance_secs(100);
        let st = svc.activate(None).await?;
        assert_eq!(st.points, 10);
        assert_eq!(st.last_updated, clock.now_ms());
        Ok(())
    }

    #[tokio::test]
    async fn test_deactivate_without_state() {
        let (store, _clock, _repo) = build_test_store(0).await;
        let svc = ActivationService::new(store, 1);
        assert!(matches!(svc.deactivate().await, Err(Error::NotActivated)));
    }
}
