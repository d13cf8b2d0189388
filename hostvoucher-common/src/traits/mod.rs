pub mod api;
pub mod reporting_traits;
pub mod repository_traits;
