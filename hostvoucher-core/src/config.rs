// hostvoucher-core/src/config.rs

use std::path::{Path, PathBuf};
use std::time::Duration;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use hostvoucher_common::models::{ActionKind, RewardRule, RewardTable};
use crate::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiningConfig {
    #[serde(default = "default_rate_per_second")]
    pub rate_per_second: u64,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

fn default_rate_per_second() -> u64 {
    1
}

fn default_tick_interval_ms() -> u64 {
    1000
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            rate_per_second: default_rate_per_second(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl MiningConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

/// Engine configuration. Every field has a default, so an empty JSON object
/// (or no file at all) yields the site's stock behaviour.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamificationConfig {
    #[serde(default)]
    pub mining: MiningConfig,
    #[serde(default)]
    pub rewards: RewardTable,
    /// Base URL of the admin ledger; reporting is off when unset.
    #[serde(default)]
    pub ledger_url: Option<String>,
    /// Where the snapshot lives; see `default_state_path`.
    #[serde(default)]
    pub state_path: Option<PathBuf>,
}

impl GamificationConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, Error> {
        let cfg: GamificationConfig = serde_json::from_str(raw)
            .map_err(|e| Error::Config(format!("Invalid gamification config: {}", e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads `path`; a missing file means defaults.
    pub async fn load(path: &Path) -> Result<Self, Error> {
        match tokio::fs::read_to_string(path).await {
            Ok(raw) => {
                info!("Loaded gamification config from {}", path.display());
                Self::from_json_str(&raw)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {}; using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(Error::Io(e)),
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.mining.tick_interval_ms == 0 {
            return Err(Error::Config("mining.tick_interval_ms must be > 0".into()));
        }
        for kind in ActionKind::ALL {
            let rule = self.rewards.rule(kind);
            if rule.cooldown_hours > RewardRule::MAX_COOLDOWN_HOURS {
                return Err(Error::Config(format!(
                    "rewards.{kind}.cooldown_hours must be <= {}, got {}",
                    RewardRule::MAX_COOLDOWN_HOURS,
                    rule.cooldown_hours
                )));
            }
        }
        if let Some(raw) = &self.ledger_url {
            url::Url::parse(raw)
                .map_err(|e| Error::Config(format!("ledger_url '{raw}' is not a valid URL: {e}")))?;
        }
        Ok(())
    }

    pub fn resolved_state_path(&self) -> PathBuf {
        self.state_path.clone().unwrap_or_else(default_state_path)
    }
}

/// `<data_dir>/hostvoucher/gamification.json`, or the working directory when
/// the platform has no data dir.
pub fn default_state_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hostvoucher")
        .join("gamification.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostvoucher_common::models::action::DEFAULT_SHARE_RULE;

    #[test]
    fn test_empty_config_is_default() {
        let cfg = GamificationConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, GamificationConfig::default());
        assert_eq!(cfg.mining.rate_per_second, 1);
        assert_eq!(cfg.mining.tick_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_overrides_are_applied() {
        let cfg = GamificationConfig::from_json_str(
            r#"{
                "mining": { "rate_per_second": 3 },
                "rewards": { "click": { "points": 250, "cooldown_hours": 0 } },
                "ledger_url": "https://hostvoucher.example"
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.mining.rate_per_second, 3);
        assert_eq!(cfg.mining.tick_interval_ms, 1000);
        assert_eq!(cfg.rewards.click, RewardRule::new(250, 0));
        assert_eq!(cfg.rewards.share, DEFAULT_SHARE_RULE);
    }

    #[test]
    fn test_rejects_zero_tick_and_bad_url() {
        let err = GamificationConfig::from_json_str(r#"{"mining": {"tick_interval_ms": 0}}"#);
        assert!(matches!(err, Err(Error::Config(_))));
        let err = GamificationConfig::from_json_str(r#"{"ledger_url": "not a url"}"#);
        assert!(matches!(err, Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_out_of_range_cooldown() {
        let err = GamificationConfig::from_json_str(
            r#"{"rewards":{"click":{"points":1000,"cooldown_hours":9223372036854775808}}}"#,
        );
        match err {
            Err(Error::Config(msg)) => assert!(msg.contains("rewards.click.cooldown_hours")),
            other => panic!("expected Config error, got {other:?}"),
        }

        let at_limit = format!(
            r#"{{"rewards":{{"visit":{{"points":1,"cooldown_hours":{}}}}}}}"#,
            RewardRule::MAX_COOLDOWN_HOURS
        );
        assert!(GamificationConfig::from_json_str(&at_limit).is_ok());
    }

    #[tokio::test]
    async fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = GamificationConfig::load(&dir.path().join("nope.json")).await.unwrap();
        assert_eq!(cfg, GamificationConfig::default());
    }
}
