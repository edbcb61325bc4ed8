//! Categories

pub mod errors;
pub mod models;
pub mod service;

pub use errors::CategoriesServiceError;
pub use service::*;
