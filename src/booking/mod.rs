//! Availability & reservation engine for chalet units.
//!
//! Decides whether a date range may be booked, prices it, and keeps the
//! owner calendar consistent between customer reservations and owner
//! blocks. Customer bookings and owner blocks share one reservation store;
//! the no-overlap invariant holds across both.

pub mod access;
pub mod availability;
pub mod blocks;
pub mod calendar;
pub mod engine;
pub mod pricing;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;

// Re-export commonly used items
pub use availability::Occupancy;
pub use calendar::{DaySource, OccupiedDay};
pub use routes::router;
