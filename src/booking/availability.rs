//! Availability index.
//!
//! Produces the set of occupied dates for a unit from all active
//! reservations, partitioned into customer-held vs owner-blocked days. The
//! partition is what lets the owner calendar distinguish "a paying guest is
//! here" (immutable) from "I blocked this day myself" (toggleable).

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::cache::AppCache;
use crate::error::Result;
use crate::models::Reservation;

use super::calendar::{expand_reservation, DaySource};
use super::queries;

/// Occupied days for one unit, partitioned by source.
///
/// The two sets are disjoint in a consistent store: a day can only be
/// covered by one active reservation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Occupancy {
    pub customer_dates: BTreeSet<NaiveDate>,
    pub blocked_dates: BTreeSet<NaiveDate>,
}

impl Occupancy {
    /// Whether any active reservation covers the given day
    pub fn is_taken(&self, date: NaiveDate) -> bool {
        self.customer_dates.contains(&date) || self.blocked_dates.contains(&date)
    }
}

/// Today as a calendar date (UTC)
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Partition reservations into customer vs owner-blocked days.
///
/// Pure function over already-loaded rows; inactive reservations expand to
/// nothing and contribute no days.
pub fn partition(reservations: &[Reservation]) -> Occupancy {
    let mut occupancy = Occupancy::default();
    for reservation in reservations {
        for day in expand_reservation(reservation) {
            match day.source {
                DaySource::Customer => occupancy.customer_dates.insert(day.date),
                DaySource::OwnerBlock => occupancy.blocked_dates.insert(day.date),
            };
        }
    }
    occupancy
}

/// Occupancy for a unit from an explicit start date. Uncached.
///
/// Stale past reservations (checked out before `from`) are excluded from
/// the live calendar but stay in the store. A unit with no reservations
/// yields empty sets, never an error.
pub async fn occupancy_from(
    pool: &PgPool,
    unit_id: Uuid,
    from: NaiveDate,
) -> Result<Occupancy> {
    let reservations = queries::find_active_reservations(pool, unit_id, from).await?;
    Ok(partition(&reservations))
}

/// Live occupancy from today, read through the per-unit cache.
///
/// Write paths invalidate the entry synchronously, so a hit is never stale
/// with respect to writes from this process.
pub async fn occupancy(pool: &PgPool, cache: &AppCache, unit_id: Uuid) -> Result<Arc<Occupancy>> {
    if let Some(cached) = cache.occupancy.get(&unit_id).await {
        debug!("Cache HIT for occupancy: {}", unit_id);
        return Ok(cached);
    }

    debug!("Cache MISS for occupancy: {}", unit_id);
    let fresh = Arc::new(occupancy_from(pool, unit_id, today()).await?);
    cache.occupancy.insert(unit_id, fresh.clone()).await;
    Ok(fresh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReservationStatus;
    use rust_decimal::Decimal;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn reservation(
        unit_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
        status: ReservationStatus,
    ) -> Reservation {
        Reservation {
            id: Uuid::new_v4(),
            unit_id,
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

    #[test]
    fn test_partition_empty_input_yields_empty_sets() {
        let occupancy = partition(&[]);
        assert!(occupancy.customer_dates.is_empty());
        assert!(occupancy.blocked_dates.is_empty());
    }

    #[test]
    fn test_partition_splits_by_source() {
        let unit_id = Uuid::new_v4();
        let rows = vec![
            reservation(unit_id, d(2024, 3, 10), d(2024, 3, 12), ReservationStatus::Confirmed),
            reservation(unit_id, d(2024, 3, 15), d(2024, 3, 16), ReservationStatus::Blocked),
        ];

        let occupancy = partition(&rows);
        assert_eq!(
            occupancy.customer_dates,
            BTreeSet::from([d(2024, 3, 10), d(2024, 3, 11)])
        );
        assert_eq!(occupancy.blocked_dates, BTreeSet::from([d(2024, 3, 15)]));
    }

    #[test]
    fn test_partition_union_covers_all_nights_and_sets_are_disjoint() {
        let unit_id = Uuid::new_v4();
        let rows = vec![
            reservation(unit_id, d(2024, 3, 1), d(2024, 3, 4), ReservationStatus::Pending),
            reservation(unit_id, d(2024, 3, 4), d(2024, 3, 5), ReservationStatus::Blocked),
            reservation(unit_id, d(2024, 3, 6), d(2024, 3, 7), ReservationStatus::Blocked),
        ];

        let occupancy = partition(&rows);
        let union: BTreeSet<NaiveDate> = occupancy
            .customer_dates
            .union(&occupancy.blocked_dates)
            .copied()
            .collect();
        let expected: BTreeSet<NaiveDate> = rows
            .iter()
            .flat_map(|r| super::super::calendar::nights(r.check_in, r.check_out))
            .collect();

        assert_eq!(union, expected);
        assert!(occupancy.customer_dates.is_disjoint(&occupancy.blocked_dates));
    }

    #[test]
    fn test_partition_ignores_inactive_reservations() {
        let unit_id = Uuid::new_v4();
        let rows = vec![
            reservation(unit_id, d(2024, 3, 10), d(2024, 3, 12), ReservationStatus::Cancelled),
            reservation(unit_id, d(2024, 3, 20), d(2024, 3, 22), ReservationStatus::Completed),
        ];

        let occupancy = partition(&rows);
        assert!(occupancy.customer_dates.is_empty());
        assert!(occupancy.blocked_dates.is_empty());
    }

    #[test]
    fn test_is_taken() {
        let unit_id = Uuid::new_v4();
        let rows = vec![reservation(
            unit_id,
            d(2024, 3, 10),
            d(2024, 3, 11),
            ReservationStatus::Blocked,
        )];

        let occupancy = partition(&rows);
        assert!(occupancy.is_taken(d(2024, 3, 10)));
        assert!(!occupancy.is_taken(d(2024, 3, 11)));
    }
}
