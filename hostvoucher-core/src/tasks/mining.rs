// hostvoucher-core/src/tasks/mining.rs

use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};
use hostvoucher_common::models::ChangeCause;
use crate::Error;
use crate::config::MiningConfig;
use crate::store::{Commit, GamificationStore};

/// One accrual step: credits the whole seconds elapsed since the last step.
/// Returns the points credited (zero when inactive, absent, or when less than
/// a second has passed; nothing is written in that case).
pub async fn accrue_once(store: &GamificationStore, rate_per_second: u64) -> Result<u64, Error> {
    store
        .update(|snap, now| {
            let Some(state) = snap.state.as_mut() else {
                return Ok(Commit::Unchanged(0));
            };
            let earned = state.accrue(now, rate_per_second);
            if earned == 0 {
                Ok(Commit::Unchanged(0))
            } else {
                Ok(Commit::Changed(earned, ChangeCause::Mined { points: earned }))
            }
        })
        .await
}

/// Spawns the mining loop: an offline catch-up step right away, then one
/// accrual per tick until `shutdown_rx` turns true (or its sender is dropped).
pub fn spawn_mining_task(
    store: Arc<GamificationStore>,
    config: MiningConfig,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        match accrue_once(&store, config.rate_per_second).await {
            Ok(0) => debug!("Mining started; nothing to catch up."),
            Ok(n) => info!("Offline catch-up credited {} points.", n),
            Err(e) => error!("Offline catch-up failed: {:?}", e),
        }

        let mut interval = tokio::time::interval(config.tick_interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; catch-up already covered it.
        interval.tick().await;

        loop {
            tokio::select! {
                biased;
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        debug!("Mining loop shutting down.");
                        break;
                    }
                },
                _ = interval.tick() => {
                    if let Err(e) = accrue_once(&store, config.rate_per_second).await {
                        error!("Mining tick failed: {:?}", e);
                    }
                }
            }
        }
    })
}
