// File: hostvoucher-core/src/test_utils/helpers.rs

use std::sync::Arc;
use hostvoucher_common::models::GamificationState;
use crate::Error;
use crate::eventbus::EventBus;
use crate::repositories::InMemoryStateRepository;
use crate::store::GamificationStore;
use crate::utils::time::{Clock, ManualClock};

/// A store over an in-memory repository, driven by a manual clock that
/// starts at `start_ms`.
pub async fn build_test_store(
    start_ms: i64,
) -> (Arc<GamificationStore>, Arc<ManualClock>, InMemoryStateRepository) {
    let repo = InMemoryStateRepository::new();
    let clock = Arc::new(ManualClock::new(start_ms));
    let store = open_store_with(repo.clone(), clock.clone()).await;
    (store, clock, repo)
}

/// Reopens a store over an existing repository, as a page reload would.
pub async fn open_store_with(
    repo: InMemoryStateRepository,
    clock: Arc<ManualClock>,
) -> Arc<GamificationStore> {
    let clock: Arc<dyn Clock> = clock;
    let store = GamificationStore::open(Arc::new(repo), Arc::new(EventBus::new()), clock)
        .await
        .expect("in-memory repository never fails to load");
    Arc::new(store)
}

/// Puts the store into an activated state holding `points`, with the accrual
/// point set to the store's current time.
pub async fn activate_with_points(store: &GamificationStore, points: u64) -> Result<(), Error> {
    let mut state = GamificationState::new(store.now_ms());
    state.is_activated = true;
    state.points = points;
    store.write(state).await
}
