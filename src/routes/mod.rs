//! HTTP route handlers outside the booking core

pub mod units;
