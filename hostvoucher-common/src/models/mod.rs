// File: hostvoucher-common/src/models/mod.rs
pub mod action;
pub mod badge;
pub mod gamification;
pub mod ledger;
pub mod status;

pub use action::{ActionKind, Award, RewardRule, RewardTable};
pub use badge::{BadgeDefinition, BadgeReceipt, BadgeTier};
pub use gamification::{
    ActivationProfile, ChangeCause, CooldownTimestamps, GamificationState, Snapshot,
};
pub use ledger::LedgerEntry;
pub use status::EngineStatus;
