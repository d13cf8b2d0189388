//! src/eventbus/mod.rs
//!
//! In-process event bus fanning out state changes to every mounted view.
//! Each subscriber has its own bounded MPSC queue. Publishing never waits:
//! a subscriber whose queue is full is dropped, and a view that wants updates
//! again re-subscribes and re-reads the store.

use std::sync::Arc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, watch, Mutex};
use tracing::warn;
use hostvoucher_common::models::{ChangeCause, GamificationState};

/// Notifications published by the engine.
#[derive(Debug, Clone)]
pub enum GamificationEvent {
    /// Any committed write. Views re-render from `state`.
    StateChanged {
        state: Option<GamificationState>,
        cause: ChangeCause,
    },

    /// User-facing notice that did not change state (e.g. "activate first").
    Notice(String),

    MiningStarted,
    MiningStopped,
}

impl GamificationEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            GamificationEvent::StateChanged { .. } => "state_changed",
            GamificationEvent::Notice(_) => "notice",
            GamificationEvent::MiningStarted => "mining.started",
            GamificationEvent::MiningStopped => "mining.stopped",
        }
    }
}

#[derive(Clone)]
pub struct EventBus {
    subscribers: Arc<Mutex<Vec<mpsc::Sender<GamificationEvent>>>>,
    shutdown_tx: watch::Sender<bool>,
    pub shutdown_rx: watch::Receiver<bool>,
}

/// Default size for each subscriber's buffer.
const DEFAULT_BUFFER_SIZE: usize = 1024;

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            subscribers: Arc::new(Mutex::new(vec![])),
            shutdown_tx: tx,
            shutdown_rx: rx,
        }
    }

    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    pub fn is_shutdown(&self) -> bool {
        *self.shutdown_rx.borrow()
    }

    /// Returns a receiver on which events will be delivered.
    pub async fn subscribe(&self, buffer_size: Option<usize>) -> mpsc::Receiver<GamificationEvent> {
        let size = buffer_size.unwrap_or(DEFAULT_BUFFER_SIZE);
        let (tx, rx) = mpsc::channel(size);
        let mut subs = self.subscribers.lock().await;
        subs.push(tx);
        rx
    }

    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.lock().await.len()
    }

    /// Publish an event to all subscribers without waiting. Subscribers whose
    /// receiver was dropped, or whose queue is full, are forgotten.
    pub async fn publish(&self, event: GamificationEvent) {
        let mut subs = self.subscribers.lock().await;
        subs.retain(|s| match s.try_send(event.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!(
                    "Dropping event subscriber with a full queue ({} slots) on '{}'",
                    s.max_capacity(),
                    event.event_type()
                );
                false
            }
            Err(TrySendError::Closed(_)) => false,
        });
    }

    pub async fn publish_notice(&self, text: impl Into<String>) {
        self.publish(GamificationEvent::Notice(text.into())).await;
    }
}
