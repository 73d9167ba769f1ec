//! Per-date availability and price overrides for a room.

pub mod model;

pub use model::{Availability, AvailabilityPatch};
