// File: hostvoucher-common/src/models/action.rs

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// User actions that can earn points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Click,
    Share,
    Visit,
}

impl ActionKind {
    pub const ALL: [ActionKind; 3] = [ActionKind::Click, ActionKind::Share, ActionKind::Visit];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Click => "click",
            ActionKind::Share => "share",
            ActionKind::Visit => "visit",
        }
    }

    /// Clicks on offers are rewarded silently; a share or visit attempted while
    /// mining is off tells the user to activate first.
    pub fn notifies_when_inactive(&self) -> bool {
        !matches!(self, ActionKind::Click)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "click" => Ok(ActionKind::Click),
            "share" => Ok(ActionKind::Share),
            "visit" => Ok(ActionKind::Visit),
            other => Err(format!("unknown action kind '{other}' (expected click, share or visit)")),
        }
    }
}

/// Fixed point amount and per-subject cooldown for one action kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardRule {
    pub points: u64,
    pub cooldown_hours: u64,
}

impl RewardRule {
    pub const fn new(points: u64, cooldown_hours: u64) -> Self {
        Self { points, cooldown_hours }
    }

    /// Largest `cooldown_hours` whose millisecond value fits in an `i64`.
    pub const MAX_COOLDOWN_HOURS: u64 = (i64::MAX / 3_600_000) as u64;

    /// Cooldown in milliseconds, saturating at `i64::MAX`.
    pub fn cooldown_ms(&self) -> i64 {
        i64::try_from(self.cooldown_hours)
            .unwrap_or(i64::MAX)
            .saturating_mul(3_600_000)
    }
}

pub const DEFAULT_CLICK_RULE: RewardRule = RewardRule::new(1_000, 1);
pub const DEFAULT_SHARE_RULE: RewardRule = RewardRule::new(5_000, 24);
pub const DEFAULT_VISIT_RULE: RewardRule = RewardRule::new(1_500, 24);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardTable {
    #[serde(default = "default_click")]
    pub click: RewardRule,
    #[serde(default = "default_share")]
    pub share: RewardRule,
    #[serde(default = "default_visit")]
    pub visit: RewardRule,
}

fn default_click() -> RewardRule {
    DEFAULT_CLICK_RULE
}

fn default_share() -> RewardRule {
    DEFAULT_SHARE_RULE
}

fn default_visit() -> RewardRule {
    DEFAULT_VISIT_RULE
}

impl Default for RewardTable {
    fn default() -> Self {
        Self {
            click: DEFAULT_CLICK_RULE,
            share: DEFAULT_SHARE_RULE,
            visit: DEFAULT_VISIT_RULE,
        }
    }
}

impl RewardTable {
    pub fn rule(&self, kind: ActionKind) -> RewardRule {
        match kind {
            ActionKind::Click => self.click,
            ActionKind::Share => self.share,
            ActionKind::Visit => self.visit,
        }
    }
}

/// A granted reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub kind: ActionKind,
    pub subject_id: String,
    pub points_awarded: u64,
    pub total_points: u64,
    pub awarded_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_action_kind() {
        assert_eq!("click".parse::<ActionKind>().unwrap(), ActionKind::Click);
        assert_eq!("SHARE".parse::<ActionKind>().unwrap(), ActionKind::Share);
        assert!("like".parse::<ActionKind>().is_err());
    }

    #[test]
    fn test_default_table_matches_site_rewards() {
        let table = RewardTable::default();
        assert_eq!(table.rule(ActionKind::Click), RewardRule::new(1_000, 1));
        assert_eq!(table.rule(ActionKind::Share), RewardRule::new(5_000, 24));
        assert_eq!(table.rule(ActionKind::Visit), RewardRule::new(1_500, 24));
        assert_eq!(table.click.cooldown_ms(), 3_600_000);
    }

    #[test]
    fn test_huge_cooldown_saturates_instead_of_wrapping() {
        let rule = RewardRule::new(1_000, u64::MAX);
        assert_eq!(rule.cooldown_ms(), i64::MAX);
        let rule = RewardRule::new(1_000, 9_223_372_036_854_775_808);
        assert_eq!(rule.cooldown_ms(), i64::MAX);
        let rule = RewardRule::new(1_000, RewardRule::MAX_COOLDOWN_HOURS);
        assert!(rule.cooldown_ms() > 0);
    }

    #[test]
    fn test_partial_table_keeps_defaults() {
        let table: RewardTable =
            serde_json::from_str(r#"{"click": {"points": 10, "cooldown_hours": 0}}"#).unwrap();
        assert_eq!(table.click, RewardRule::new(10, 0));
        assert_eq!(table.share, DEFAULT_SHARE_RULE);
        assert_eq!(table.visit, DEFAULT_VISIT_RULE);
    }
}
