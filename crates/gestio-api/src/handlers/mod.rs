//! HTTP handlers, one module per resource.

pub mod appointments;
pub mod auth;
pub mod clients;
pub mod employees;
