pub mod booking;

pub use booking::{Booking, BookingPatch, NewBooking};
