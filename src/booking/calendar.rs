//! Calendar day expansion.
//!
//! Pure functions for turning half-open reservation intervals into
//! individual occupied days - no database access. Both pricing and the
//! availability index iterate stays night by night, so the expansion here
//! is the single source of truth for what "a night" means.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{Reservation, ReservationStatus};

/// Who holds a calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySource {
    /// A paying guest booked through the platform; not toggleable by the owner
    Customer,
    /// The owner blocked this day for an off-platform booking
    OwnerBlock,
}

/// One (unit, date) occupancy fact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupiedDay {
    pub unit_id: Uuid,
    pub date: NaiveDate,
    pub source: DaySource,
}

/// Expand a half-open `[check_in, check_out)` range into its nights.
///
/// `check_out` is exclusive: a one-night stay yields exactly `[check_in]`.
/// An inverted or zero-length range yields no nights.
pub fn nights(check_in: NaiveDate, check_out: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut day = check_in;
    while day < check_out {
        days.push(day);
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    days
}

/// Expand a reservation into one `OccupiedDay` per night.
///
/// Inactive reservations (cancelled, completed) hold no calendar space and
/// expand to nothing.
pub fn expand_reservation(reservation: &Reservation) -> Vec<OccupiedDay> {
    if !reservation.is_active() {
        return Vec::new();
    }

    let source = if reservation.status == ReservationStatus::Blocked {
        DaySource::OwnerBlock
    } else {
        DaySource::Customer
    };

    nights(reservation.check_in, reservation.check_out)
        .into_iter()
        .map(|date| OccupiedDay {
            unit_id: reservation.unit_id,
            date,
            source,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn reservation(
        check_in: NaiveDate,
        check_out: NaiveDate,
        status: ReservationStatus,
    ) -> Reservation {
        Reservation {
            id: Uuid::new_v4(),
            unit_id: Uuid::new_v4(),
            holder_id: Uuid::new_v4(),
            check_in,
            check_out,
            guest_count: 2,
            total_price: Decimal::ZERO,
            status,
            guest_name: None,
            guest_phone: None,
            payment_method: None,
            deposit: None,
            remaining_amount: None,
            remaining_payment_method: None,
            remaining_collected: false,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    // ==================== nights tests ====================

    #[test]
    fn test_nights_one_night_stay() {
        assert_eq!(nights(d(2024, 3, 10), d(2024, 3, 11)), vec![d(2024, 3, 10)]);
    }

    #[test]
    fn test_nights_excludes_checkout_day() {
        let days = nights(d(2024, 3, 10), d(2024, 3, 13));
        assert_eq!(days, vec![d(2024, 3, 10), d(2024, 3, 11), d(2024, 3, 12)]);
    }

    #[test]
    fn test_nights_empty_and_inverted_ranges() {
        assert!(nights(d(2024, 3, 10), d(2024, 3, 10)).is_empty());
        assert!(nights(d(2024, 3, 10), d(2024, 3, 9)).is_empty());
    }

    #[test]
    fn test_nights_crosses_month_boundary() {
        let days = nights(d(2024, 2, 28), d(2024, 3, 2));
        // 2024 is a leap year
        assert_eq!(
            days,
            vec![d(2024, 2, 28), d(2024, 2, 29), d(2024, 3, 1)]
        );
    }

    // ==================== expand_reservation tests ====================

    #[test]
    fn test_expand_customer_reservation() {
        let r = reservation(d(2024, 3, 10), d(2024, 3, 12), ReservationStatus::Pending);
        let days = expand_reservation(&r);
        assert_eq!(days.len(), 2);
        assert!(days.iter().all(|o| o.source == DaySource::Customer));
        assert!(days.iter().all(|o| o.unit_id == r.unit_id));
    }

    #[test]
    fn test_expand_block_is_owner_sourced() {
        let r = reservation(d(2024, 3, 10), d(2024, 3, 11), ReservationStatus::Blocked);
        let days = expand_reservation(&r);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].source, DaySource::OwnerBlock);
    }

    #[test]
    fn test_expand_inactive_reservation_is_empty() {
        let r = reservation(d(2024, 3, 10), d(2024, 3, 13), ReservationStatus::Cancelled);
        assert!(expand_reservation(&r).is_empty());
        let r = reservation(d(2024, 3, 10), d(2024, 3, 13), ReservationStatus::Completed);
        assert!(expand_reservation(&r).is_empty());
    }
}
