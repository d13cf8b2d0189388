
// File: src/services/mod.rs

pub mod activation_service;
pub mod badge_service;
pub mod ledger_reporter;
pub mod reward_service;

pub use activation_service::ActivationService;
pub use badge_service::BadgeService;
pub use ledger_reporter::{HttpActivityReporter, NoopActivityReporter};
pub use reward_service::RewardService;
