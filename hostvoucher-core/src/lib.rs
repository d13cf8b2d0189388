// src/lib.rs

pub mod catalog;
pub mod config;
pub mod engine;
pub mod eventbus;
pub mod http;
pub mod repositories;
pub mod services;
pub mod store;
pub mod tasks;
pub mod test_utils;
pub mod utils;

pub use hostvoucher_common::error::Error;
pub use hostvoucher_common::models;
pub use engine::GamificationEngine;
pub use http::{DefaultHttpClient, HttpClient};
