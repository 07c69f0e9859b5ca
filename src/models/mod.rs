//! Database models

pub mod reservation;
pub mod unit;

pub use reservation::{Reservation, ReservationStatus};
pub use unit::Unit;
