//! Booking draft, submission and management.

pub mod draft;
pub mod reference;
pub mod service;

pub use draft::{
    AdditionalGuest, BookingDraft, DraftEdit, GuestDetails, REQUIRED_FIELDS, RoomPreferences,
    StaySelection,
};
pub use reference::generate_reference;
pub use service::{BookingConfirmation, BookingDetails, BookingService, DraftQuote};
