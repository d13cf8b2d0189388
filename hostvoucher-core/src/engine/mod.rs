// File: src/engine/mod.rs

pub mod core;
pub mod activation_api_impl;
pub mod badge_api_impl;
pub mod reward_api_impl;
pub mod session_api_impl;

pub use self::core::GamificationEngine;
