pub mod api;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use api::router;
pub use config::Config;
pub use crate::core::errors::AppError;
pub use infrastructure::storage::{Database, Session};

#[cfg(test)]
mod tests;
