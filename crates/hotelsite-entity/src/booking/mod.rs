//! Booking entities.

pub mod line;
pub mod model;
pub mod status;

pub use line::{
    BookingAddon, BookingGuest, BookingPackage, GuestType, NewBookingAddon, NewBookingGuest,
    NewBookingPackage,
};
pub use model::{Booking, CreateBooking, stay_nights};
pub use status::{BookingSource, BookingStatus, PaymentStatus};
