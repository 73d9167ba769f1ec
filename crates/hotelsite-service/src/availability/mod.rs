//! Per-room availability calendar.

pub mod service;

pub use service::{AvailabilityService, CalendarDay, MonthCalendar};
