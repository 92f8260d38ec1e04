//! In-memory store backend.
//!
//! Each collection is a `Vec` behind an async `RwLock`, so reads run
//! concurrently and writes serialize. Insertion order is preserved and is the
//! order `list` returns.

mod appointment;
mod client;
mod employee;

pub use appointment::MemoryAppointmentStore;
pub use client::MemoryClientStore;
pub use employee::MemoryEmployeeStore;
