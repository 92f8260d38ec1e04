//! Gestio API Library
//!
//! This crate provides the HTTP API handlers, authentication, and application setup.

// Module declarations
mod api_doc;
pub mod constants;
mod handlers;
mod services;
pub mod setup;
mod telemetry;

// Public modules
pub mod auth;
pub mod error;
pub mod state;

// Re-exports
pub use error::ErrorResponse;
pub use services::ScheduleService;
