//! Domain services composed on top of the stores.

pub mod schedule;

pub use schedule::ScheduleService;
