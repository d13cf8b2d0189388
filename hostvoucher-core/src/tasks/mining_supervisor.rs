// hostvoucher-core/src/tasks/mining_supervisor.rs

use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;
use crate::config::MiningConfig;
use crate::eventbus::GamificationEvent;
use crate::store::GamificationStore;
use crate::tasks::mining::spawn_mining_task;

struct RunningLoop {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

#[derive(Default)]
struct Inner {
    sessions: HashSet<Uuid>,
    running: Option<RunningLoop>,
}

/// Runs the mining loop while at least one UI session is attached. The first
/// attach starts it (with offline catch-up), the last detach stops it.
pub struct MiningSupervisor {
    store: Arc<GamificationStore>,
    config: MiningConfig,
    inner: Mutex<Inner>,
}

impl MiningSupervisor {
    pub fn new(store: Arc<GamificationStore>, config: MiningConfig) -> Self {
        Self {
            store,
            config,
            inner: Mutex::new(Inner::default()),
        }
    }

    pub async fn attach_session(&self) -> Uuid {
        let id = Uuid::new_v4();
        let started = {
            let mut inner = self.inner.lock().await;
            inner.sessions.insert(id);
            if inner.running.is_none() {
                let (shutdown_tx, shutdown_rx) = watch::channel(false);
                let handle = spawn_mining_task(self.store.clone(), self.config.clone(), shutdown_rx);
                inner.running = Some(RunningLoop { shutdown_tx, handle });
                true
            } else {
                false
            }
        };
        if started {
            info!("Session {} attached; mining loop started.", id);
            self.store.event_bus().publish(GamificationEvent::MiningStarted).await;
        }
        id
    }

    /// Returns false for an unknown session id.
    pub async fn detach_session(&self, id: Uuid) -> bool {
        let stopped = {
            let mut inner = self.inner.lock().await;
            if !inner.sessions.remove(&id) {
                warn!("Detach for unknown session {}", id);
                return false;
            }
            if inner.sessions.is_empty() {
                inner.running.take()
            } else {
                None
            }
        };
        if let Some(running) = stopped {
            Self::stop_loop(running).await;
            info!("Last session {} detached; mining loop stopped.", id);
            self.store.event_bus().publish(GamificationEvent::MiningStopped).await;
        }
        true
    }

    /// Stops the loop regardless of attached sessions.
    pub async fn shutdown(&self) {
        let stopped = {
            let mut inner = self.inner.lock().await;
            inner.sessions.clear();
            inner.running.take()
        };
        if let Some(running) = stopped {
            Self::stop_loop(running).await;
            self.store.event_bus().publish(GamificationEvent::MiningStopped).await;
        }
    }

    async fn stop_loop(running: RunningLoop) {
        let _ = running.shutdown_tx.send(true);
        if let Err(e) = running.handle.await {
            warn!("Mining loop ended abnormally: {:?}", e);
        }
    }

    pub async fn is_running(&self) -> bool {
        self.inner.lock().await.running.is_some()
    }

    pub async fn session_count(&self) -> usize {
        self.inner.lock().await.sessions.len()
    }
}
