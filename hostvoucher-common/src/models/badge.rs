// File: hostvoucher-common/src/models/badge.rs

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTier {
    Daily,
    Weekly,
    Monthly,
    Seasonal,
    Yearly,
    /// Achievement badges granted by proof flows, never sold.
    Special,
}

impl BadgeTier {
    pub const PURCHASABLE: [BadgeTier; 5] = [
        BadgeTier::Daily,
        BadgeTier::Weekly,
        BadgeTier::Monthly,
        BadgeTier::Seasonal,
        BadgeTier::Yearly,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BadgeTier::Daily => "Daily",
            BadgeTier::Weekly => "Weekly",
            BadgeTier::Monthly => "Monthly",
            BadgeTier::Seasonal => "Seasonal",
            BadgeTier::Yearly => "Yearly",
            BadgeTier::Special => "Special",
        }
    }

    pub fn is_purchasable(&self) -> bool {
        !matches!(self, BadgeTier::Special)
    }
}

impl fmt::Display for BadgeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BadgeTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Ok(BadgeTier::Daily),
            "weekly" => Ok(BadgeTier::Weekly),
            "monthly" => Ok(BadgeTier::Monthly),
            "seasonal" => Ok(BadgeTier::Seasonal),
            "yearly" => Ok(BadgeTier::Yearly),
            "special" => Ok(BadgeTier::Special),
            other => Err(format!("unknown badge tier '{other}'")),
        }
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeDefinition {
    pub name: String,
    /// Zero for special badges.
    pub price_points: u64,
    pub tier: BadgeTier,
    /// Key into the front-end icon registry.
    pub icon_ref: String,
    #[serde(default)]
    pub is_epic: bool,
    /// Points credited when a special badge is granted; zero for purchasable ones.
    #[serde(default)]
    pub grant_points: u64,
}

impl BadgeDefinition {
    pub fn is_purchasable(&self) -> bool {
        self.tier.is_purchasable()
    }
}

/// Result of a successful purchase or special grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeReceipt {
    pub badge: String,
    pub tier: BadgeTier,
    pub points_debited: u64,
    pub points_credited: u64,
    pub total_points: u64,
}
