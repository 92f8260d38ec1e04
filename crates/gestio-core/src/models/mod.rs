//! Data models for the application
//!
//! This module contains all data structures used throughout the application,
//! organized by domain. Each sub-module represents one entity type; `schedule`
//! holds the cross-entity read models.

mod appointment;
mod client;
mod employee;
mod schedule;

// Re-export all models for convenient imports
pub use appointment::*;
pub use client::*;
pub use employee::*;
pub use schedule::*;

/// Deserializer for patch fields that distinguishes an absent key (outer `None`)
/// from an explicit JSON `null` (`Some(None)`). Pair with `#[serde(default)]`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}
