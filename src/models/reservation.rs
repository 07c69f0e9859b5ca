//! Reservation models
//!
//! A reservation row is either a customer booking (multi-night, priced) or
//! an owner block (always a single night, carrying guest/payment metadata
//! for off-platform bookings).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Reservation lifecycle status.
///
/// Only `Pending`, `Confirmed` and `Blocked` occupy calendar space.
/// `Cancelled` and `Completed` never block new reservations. `Blocked` rows
/// have no terminal status of their own: they exist or they are deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    Blocked,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Blocked => "blocked",
        }
    }

    /// Whether a reservation in this status holds calendar space
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Pending | ReservationStatus::Confirmed | ReservationStatus::Blocked
        )
    }
}

/// Reservation from reservations
#[derive(Debug, Clone, FromRow)]
pub struct Reservation {
    pub id: Uuid,
    pub unit_id: Uuid,
    pub holder_id: Uuid,
    /// Half-open interval: the stay covers nights in [check_in, check_out)
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest_count: i32,
    pub total_price: Decimal,
    pub status: ReservationStatus,
    pub guest_name: Option<String>,
    pub guest_phone: Option<String>,
    pub payment_method: Option<String>,
    pub deposit: Option<Decimal>,
    pub remaining_amount: Option<Decimal>,
    pub remaining_payment_method: Option<String>,
    pub remaining_collected: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Whether this reservation currently holds calendar space
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Half-open interval overlap against another date range
    pub fn overlaps(&self, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        self.check_in < check_out && self.check_out > check_in
    }
}
