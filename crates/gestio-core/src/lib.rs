//! Gestio Core Library
//!
//! This crate provides core domain models, error types, configuration, and validation
//! that are shared across all Gestio components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{AppConfig, StoreBackend};
pub use error::{AppError, ErrorMetadata, LogLevel};
