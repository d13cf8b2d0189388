// File: hostvoucher-common/src/models/gamification.rs

use std::collections::{BTreeSet, HashMap};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::models::action::ActionKind;

/// Per-browser points state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamificationState {
    pub is_activated: bool,
    pub points: u64,
    #[serde(default)]
    pub badges_owned: BTreeSet<String>,
    /// Milliseconds since epoch of the last accrual point.
    pub last_updated: i64,
}

impl GamificationState {
    /// Fresh state as created by the activation form: inactive, zero points.
    pub fn new(now_ms: i64) -> Self {
        Self {
            is_activated: false,
            points: 0,
            badges_owned: BTreeSet::new(),
            last_updated: now_ms,
        }
    }

    pub fn owns(&self, badge: &str) -> bool {
        self.badges_owned.contains(badge)
    }

    /// Credits `rate_per_second` for every whole second between `last_updated`
    /// and `now_ms`, and moves `last_updated` forward by exactly the seconds
    /// credited so the sub-second remainder carries into the next step.
    ///
    /// A clock that went backwards credits nothing and leaves `last_updated`
    /// where it was; time already paid for is never paid again.
    pub fn accrue(&mut self, now_ms: i64, rate_per_second: u64) -> u64 {
        if !self.is_activated {
            return 0;
        }
        let elapsed_seconds = now_ms.saturating_sub(self.last_updated).max(0) / 1000;
        if elapsed_seconds == 0 {
            return 0;
        }
        let earned = (elapsed_seconds as u64).saturating_mul(rate_per_second);
        self.points = self.points.saturating_add(earned);
        self.last_updated = self.last_updated.saturating_add(elapsed_seconds * 1000);
        earned
    }
}

/// Last-reward timestamps, one map per action kind, keyed by subject id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooldownTimestamps {
    #[serde(default)]
    pub click: HashMap<String, i64>,
    #[serde(default)]
    pub share: HashMap<String, i64>,
    #[serde(default)]
    pub visit: HashMap<String, i64>,
}

impl CooldownTimestamps {
    pub fn map(&self, kind: ActionKind) -> &HashMap<String, i64> {
        match kind {
            ActionKind::Click => &self.click,
            ActionKind::Share => &self.share,
            ActionKind::Visit => &self.visit,
        }
    }

    fn map_mut(&mut self, kind: ActionKind) -> &mut HashMap<String, i64> {
        match kind {
            ActionKind::Click => &mut self.click,
            ActionKind::Share => &mut self.share,
            ActionKind::Visit => &mut self.visit,
        }
    }

    pub fn last_reward(&self, kind: ActionKind, subject_id: &str) -> Option<i64> {
        self.map(kind).get(subject_id).copied()
    }

    pub fn record(&mut self, kind: ActionKind, subject_id: &str, at_ms: i64) {
        self.map_mut(kind).insert(subject_id.to_string(), at_ms);
    }
}

/// Captured from the activation form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationProfile {
    pub email: Option<String>,
    pub activated_at: DateTime<Utc>,
}

pub const SNAPSHOT_VERSION: u32 = 1;

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

/// Everything the engine persists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub state: Option<GamificationState>,
    #[serde(default)]
    pub cooldowns: CooldownTimestamps,
    #[serde(default)]
    pub profile: Option<ActivationProfile>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            state: None,
            cooldowns: CooldownTimestamps::default(),
            profile: None,
        }
    }
}

/// Why the state changed; carried on every change notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeCause {
    Activated,
    Deactivated,
    Mined { points: u64 },
    Rewarded { kind: ActionKind, subject_id: String, points: u64 },
    BadgePurchased { badge: String, price: u64 },
    SpecialBadgeGranted { badge: String, points: u64 },
    Replaced,
}
