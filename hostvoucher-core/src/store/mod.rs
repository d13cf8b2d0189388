//! src/store/mod.rs
//!
//! The single owner of the gamification snapshot. All mutations are
//! serialized through one lock, persisted before they become visible, and
//! announced on the event bus once the lock is released.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error};
use hostvoucher_common::models::{
    ActivationProfile, ChangeCause, CooldownTimestamps, GamificationState, Snapshot,
};
use hostvoucher_common::traits::repository_traits::StateRepository;
use crate::Error;
use crate::eventbus::{EventBus, GamificationEvent};
use crate::utils::time::Clock;

/// Outcome of a mutation closure passed to [`GamificationStore::update`].
pub enum Commit<T> {
    /// Persist the modified snapshot and notify subscribers.
    Changed(T, ChangeCause),
    /// Nothing to write; the snapshot copy is discarded.
    Unchanged(T),
}

pub struct GamificationStore {
    snapshot: Mutex<Snapshot>,
    repo: Arc<dyn StateRepository>,
    bus: Arc<EventBus>,
    clock: Arc<dyn Clock>,
}

impl GamificationStore {
    /// Loads the persisted snapshot; nothing saved yet means an empty one.
    pub async fn open(
        repo: Arc<dyn StateRepository>,
        bus: Arc<EventBus>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, Error> {
        let snapshot = repo.load().await?.unwrap_or_default();
        debug!(
            "Gamification store opened (state present={}, cooldown subjects={})",
            snapshot.state.is_some(),
            snapshot.cooldowns.click.len() + snapshot.cooldowns.share.len() + snapshot.cooldowns.visit.len()
        );
        Ok(Self {
            snapshot: Mutex::new(snapshot),
            repo,
            bus,
            clock,
        })
    }

    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    pub fn event_bus(&self) -> Arc<EventBus> {
        self.bus.clone()
    }

    /// `None` until the activation form has been submitted once.
    pub async fn read(&self) -> Option<GamificationState> {
        self.snapshot.lock().await.state.clone()
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.snapshot.lock().await.clone()
    }

    pub async fn cooldowns(&self) -> CooldownTimestamps {
        self.snapshot.lock().await.cooldowns.clone()
    }

    pub async fn profile(&self) -> Option<ActivationProfile> {
        self.snapshot.lock().await.profile.clone()
    }

    /// Replaces the state wholesale. Last write wins.
    pub async fn write(&self, state: GamificationState) -> Result<(), Error> {
        self.update(move |snap, _now| {
            snap.state = Some(state);
            Ok(Commit::Changed((), ChangeCause::Replaced))
        })
        .await
    }

    /// Serialized read-modify-write. `f` works on a copy of the snapshot and
    /// receives the current time. On `Err` or `Commit::Unchanged` the stored
    /// snapshot is untouched and nothing is published.
    pub async fn update<T, F>(&self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Snapshot, i64) -> Result<Commit<T>, Error>,
    {
        let (value, event) = {
            let mut guard = self.snapshot.lock().await;
            let mut working = guard.clone();
            let now = self.clock.now_ms();
            match f(&mut working, now)? {
                Commit::Unchanged(v) => return Ok(v),
                Commit::Changed(v, cause) => {
                    if let Err(e) = self.repo.save(&working).await {
                        error!("Failed to persist gamification state ({:?}): {}", cause, e);
                        return Err(e);
                    }
                    let event = GamificationEvent::StateChanged {
                        state: working.state.clone(),
                        cause,
                    };
                    *guard = working;
                    (v, event)
                }
            }
        };
        self.bus.publish(event).await;
        Ok(value)
    }
}
