pub mod state;

pub use state::JsonFileStateRepository;
