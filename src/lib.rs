//! Libris Library Lending Service
//!
//! A Rust implementation of the Libris library lending server, providing
//! a REST JSON API for managing users, a book catalog and loan histories.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}
