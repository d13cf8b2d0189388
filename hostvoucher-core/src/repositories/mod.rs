// src/repositories/mod.rs

pub mod file;
pub mod memory;

pub use hostvoucher_common::traits::repository_traits::StateRepository;
pub use file::JsonFileStateRepository;
pub use memory::InMemoryStateRepository;
