//! src/catalog/mod.rs
//!
//! The static badge catalog: five purchasable tiers of ten badges each plus
//! the two special achievement badges. Built once on first use.

use once_cell::sync::Lazy;
use hostvoucher_common::models::{BadgeDefinition, BadgeTier};

/// One rung of a purchasable tier.
struct Step {
    name: &'static str,
    icon_ref: &'static str,
    /// Price within the Daily tier; other tiers scale it.
    daily_price: u64,
    is_epic: bool,
}

const STEPS: [Step; 10] = [
    Step { name: "Bronze", icon_ref: "medal", daily_price: 10_000_000, is_epic: false },
    Step { name: "Silver", icon_ref: "medal", daily_price: 20_000_000, is_epic: false },
    Step { name: "Gold", icon_ref: "medal", daily_price: 30_000_000, is_epic: false },
    Step { name: "Platinum", icon_ref: "award", daily_price: 50_000_000, is_epic: false },
    Step { name: "Diamond", icon_ref: "gem", daily_price: 75_000_000, is_epic: false },
    Step { name: "Ruby", icon_ref: "gem", daily_price: 100_000_000, is_epic: false },
    Step { name: "Emerald", icon_ref: "gem", daily_price: 150_000_000, is_epic: false },
    Step { name: "Sapphire", icon_ref: "gem", daily_price: 200_000_000, is_epic: false },
    Step { name: "Master", icon_ref: "crown", daily_price: 300_000_000, is_epic: true },
    Step { name: "Legend", icon_ref: "trophy", daily_price: 500_000_000, is_epic: true },
];

fn tier_multiplier(tier: BadgeTier) -> u64 {
    match tier {
        BadgeTier::Daily => 1,
        BadgeTier::Weekly => 5,
        BadgeTier::Monthly => 20,
        BadgeTier::Seasonal => 60,
        BadgeTier::Yearly => 240,
        BadgeTier::Special => 0,
    }
}

/// (name, icon, points granted)
const SPECIALS: [(&str, &str, u64); 2] = [
    ("Verified Buyer", "shield-check", 50_000_000),
    ("Trusted Reviewer", "message-star", 20_000_000),
];

pub struct BadgeCatalog {
    badges: Vec<BadgeDefinition>,
}

impl BadgeCatalog {
    fn build() -> Self {
        let mut badges = Vec::with_capacity(BadgeTier::PURCHASABLE.len() * STEPS.len() + SPECIALS.len());
        for tier in BadgeTier::PURCHASABLE {
            let mult = tier_multiplier(tier);
            for step in &STEPS {
                badges.push(BadgeDefinition {
                    name: format!("{} {}", tier.label(), step.name),
                    price_points: step.daily_price * mult,
                    tier,
                    icon_ref: step.icon_ref.to_string(),
                    is_epic: step.is_epic,
                    grant_points: 0,
                });
            }
        }
        for (name, icon, grant) in SPECIALS {
            badges.push(BadgeDefinition {
                name: name.to_string(),
                price_points: 0,
                tier: BadgeTier::Special,
                icon_ref: icon.to_string(),
                is_epic: true,
                grant_points: grant,
            });
        }
        Self { badges }
    }

    /// Every badge, tiers in order, cheapest first within a tier.
    pub fn all(&self) -> &[BadgeDefinition] {
        &self.badges
    }

    /// Exact, case-sensitive lookup; falls back to a case-insensitive match.
    pub fn find(&self, name: &str) -> Option<&BadgeDefinition> {
        self.badges
            .iter()
            .find(|b| b.name == name)
            .or_else(|| self.badges.iter().find(|b| b.name.eq_ignore_ascii_case(name)))
    }

    pub fn tier(&self, tier: BadgeTier) -> impl Iterator<Item = &BadgeDefinition> {
        self.badges.iter().filter(move |b| b.tier == tier)
    }

    pub fn purchasable(&self) -> impl Iterator<Item = &BadgeDefinition> {
        self.badges.iter().filter(|b| b.is_purchasable())
    }

    pub fn specials(&self) -> impl Iterator<Item = &BadgeDefinition> {
        self.tier(BadgeTier::Special)
    }
}

static CATALOG: Lazy<BadgeCatalog> = Lazy::new(BadgeCatalog::build);

pub fn catalog() -> &'static BadgeCatalog {
    &CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_shape() {
        let cat = catalog();
        for tier in BadgeTier::PURCHASABLE {
            assert_eq!(cat.tier(tier).count(), 10, "tier {tier} should have ten badges");
        }
        assert_eq!(cat.specials().count(), 2);
        assert_eq!(cat.all().len(), 52);
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = catalog().all().iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names.len(), catalog().all().len());
    }

    #[test]
    fn test_daily_bronze_price() {
        let b = catalog().find("Daily Bronze").expect("Daily Bronze exists");
        assert_eq!(b.price_points, 10_000_000);
        assert_eq!(b.tier, BadgeTier::Daily);
        assert!(!b.is_epic);
    }

    #[test]
    fn test_prices_rise_within_each_tier() {
        for tier in BadgeTier::PURCHASABLE {
            let prices: Vec<u64> = catalog().tier(tier).map(|b| b.price_points).collect();
            assert!(prices.windows(2).all(|w| w[0] < w[1]), "{tier} prices not ascending");
        }
    }

    #[test]
    fn test_specials_grant_instead_of_price() {
        for b in catalog().specials() {
            assert_eq!(b.price_points, 0);
            assert!(b.grant_points > 0);
            assert!(!b.is_purchasable());
        }
    }

    #[test]
    fn test_find_is_case_tolerant() {
        assert_eq!(
            catalog().find("yearly legend").map(|b| b.name.as_str()),
            Some("Yearly Legend")
        );
        assert!(catalog().find("Hourly Tin").is_none());
    }
}
