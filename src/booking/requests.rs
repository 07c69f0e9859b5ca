//! Request DTOs for the booking API endpoints.
//!
//! All dates are calendar dates serialized as YYYY-MM-DD; check_out is
//! exclusive everywhere.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::ReservationStatus;

/// Request to create a customer reservation
#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest_count: i32,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request to block calendar days for an off-platform booking
#[derive(Debug, Deserialize)]
pub struct BlockDatesRequest {
    pub dates: Vec<NaiveDate>,
    #[serde(default)]
    pub guest_name: Option<String>,
    #[serde(default)]
    pub guest_phone: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub deposit: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub remaining_amount: Option<Decimal>,
}

/// Request to release owner blocks
#[derive(Debug, Deserialize)]
pub struct UnblockDatesRequest {
    pub dates: Vec<NaiveDate>,
}

/// Request to record the remaining payment on a block
#[derive(Debug, Deserialize)]
pub struct RemainingPaymentRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub remaining_amount: Decimal,
    #[serde(default)]
    pub remaining_payment_method: Option<String>,
}

/// Request for an administrative status transition
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: ReservationStatus,
}

/// Query parameters for the occupancy endpoint
#[derive(Debug, Deserialize)]
pub struct OccupancyQuery {
    #[serde(default)]
    pub from: Option<NaiveDate>,
}
