//! engine/core.rs
//!
//! Contains the `GamificationEngine` struct: wiring of the store, services,
//! mining supervisor and ledger reporter. The API trait impls live next door.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use hostvoucher_common::models::LedgerEntry;
use hostvoucher_common::traits::reporting_traits::ActivityReporter;
use hostvoucher_common::traits::repository_traits::StateRepository;
use crate::Error;
use crate::config::GamificationConfig;
use crate::eventbus::EventBus;
use crate::http::DefaultHttpClient;
use crate::services::{
    ActivationService, BadgeService, HttpActivityReporter, NoopActivityReporter, RewardService,
};
use crate::store::GamificationStore;
use crate::tasks::MiningSupervisor;
use crate::utils::time::Clock;

#[derive(Clone)]
pub struct GamificationEngine {
    pub(crate) store: Arc<GamificationStore>,
    pub(crate) activation: Arc<ActivationService>,
    pub(crate) rewards: Arc<RewardService>,
    pub(crate) badges: Arc<BadgeService>,
    pub(crate) supervisor: Arc<MiningSupervisor>,
    reporter: Arc<dyn ActivityReporter>,
    /// In-flight ledger reports; drained on shutdown.
    reports: Arc<Mutex<JoinSet<()>>>,
    pub(crate) start_time: Instant,
}

/// How long `shutdown` waits for pending ledger reports.
const REPORT_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

impl GamificationEngine {
    /// Opens the store through `repo` and wires everything from `config`.
    /// A configured `ledger_url` enables HTTP reporting.
    pub async fn open(
        config: &GamificationConfig,
        repo: Arc<dyn StateRepository>,
        bus: Arc<EventBus>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, Error> {
        config.validate()?;
        let store = Arc::new(GamificationStore::open(repo, bus, clock).await?);
        let reporter: Arc<dyn ActivityReporter> = match &config.ledger_url {
            Some(url) => {
                info!("Ledger reporting enabled => {}", url);
                Arc::new(HttpActivityReporter::new(Arc::new(DefaultHttpClient::new()), url)?)
            }
            None => Arc::new(NoopActivityReporter),
        };
        Ok(Self::with_reporter(store, config, reporter))
    }

    pub fn with_reporter(
        store: Arc<GamificationStore>,
        config: &GamificationConfig,
        reporter: Arc<dyn ActivityReporter>,
    ) -> Self {
        Self {
            activation: Arc::new(ActivationService::new(store.clone(), config.mining.rate_per_second)),
            rewards: Arc::new(RewardService::new(store.clone(), config.rewards.clone())),
            badges: Arc::new(BadgeService::new(store.clone())),
            supervisor: Arc::new(MiningSupervisor::new(store.clone(), config.mining.clone())),
            store,
            reporter,
            reports: Arc::new(Mutex::new(JoinSet::new())),
            start_time: Instant::now(),
        }
    }

    pub fn store(&self) -> Arc<GamificationStore> {
        self.store.clone()
    }

    pub fn event_bus(&self) -> Arc<EventBus> {
        self.store.event_bus()
    }

    /// Ledger report off the mutation path; needs an email from the activation
    /// form. The task is tracked so `shutdown` can let it finish.
    pub(crate) async fn report(&self, points: i64, reason: String) {
        let store = self.store.clone();
        let reporter = self.reporter.clone();
        let mut reports = self.reports.lock().await;
        // reap finished reports so the set stays small
        while reports.try_join_next().is_some() {}
        reports.spawn(async move {
            let Some(email) = store.profile().await.and_then(|p| p.email) else {
                return;
            };
            let entry = LedgerEntry { email, points, reason };
            if let Err(e) = reporter.report(&entry).await {
                warn!("Ledger report '{}' failed: {}", entry.reason, e);
            }
        });
    }

    /// Stops mining, waits (bounded) for pending ledger reports, and signals
    /// bus shutdown.
    pub async fn shutdown(&self) {
        self.supervisor.shutdown().await;
        self.drain_reports(REPORT_DRAIN_TIMEOUT).await;
        self.store.event_bus().shutdown();
        info!("Gamification engine stopped.");
    }

    async fn drain_reports(&self, limit: Duration) {
        let mut pending = std::mem::take(&mut *self.reports.lock().await);
        if pending.is_empty() {
            return;
        }
        debug!("Waiting for {} ledger report(s)", pending.len());
        let drained = tokio::time::timeout(limit, async {
            while pending.join_next().await.is_some() {}
        })
        .await;
        if drained.is_err() {
            warn!("Abandoning {} ledger report(s) still pending at shutdown", pending.len());
        }
    }
}
