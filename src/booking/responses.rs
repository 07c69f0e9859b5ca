//! Response DTOs for the booking API endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Reservation, ReservationStatus};

/// Reservation as returned to callers
#[derive(Debug, Clone, Serialize)]
pub struct ReservationResponse {
    pub id: Uuid,
    pub unit_id: Uuid,
    pub holder_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest_count: i32,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_price: Decimal,
    pub status: ReservationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub deposit: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub remaining_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_payment_method: Option<String>,
    pub remaining_collected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationResponse {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            unit_id: r.unit_id,
            holder_id: r.holder_id,
            check_in: r.check_in,
            check_out: r.check_out,
            guest_count: r.guest_count,
            total_price: r.total_price,
            status: r.status,
            guest_name: r.guest_name,
            guest_phone: r.guest_phone,
            payment_method: r.payment_method,
            deposit: r.deposit,
            remaining_amount: r.remaining_amount,
            remaining_payment_method: r.remaining_payment_method,
            remaining_collected: r.remaining_collected,
            notes: r.notes,
            created_at: r.created_at,
        }
    }
}

/// Response for a block request
#[derive(Debug, Serialize)]
pub struct BlockDatesResponse {
    pub created: u64,
}

/// Response for an unblock request
#[derive(Debug, Serialize)]
pub struct UnblockDatesResponse {
    pub deleted: u64,
}
