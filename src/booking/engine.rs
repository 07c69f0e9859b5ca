//! Customer reservation engine.
//!
//! Validates a candidate stay, prices it, and creates the reservation.
//! The overlap check and the insert run as one atomic unit: a transaction
//! holding the unit's advisory lock. Two concurrent requests for the same
//! unit serialize on that lock, so both can never pass the check.

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::cache::AppCache;
use crate::db;
use crate::error::{AppError, Result};
use crate::models::{Reservation, ReservationStatus};

use super::pricing;
use super::queries;

/// Validate a candidate stay range against `today`.
///
/// The range must be non-empty and must not start in the past. Split out
/// from the engine so the rules are testable without a clock or a database.
pub fn validate_stay(check_in: NaiveDate, check_out: NaiveDate, today: NaiveDate) -> Result<()> {
    if check_in >= check_out {
        return Err(AppError::Validation(
            "Check-out must be after check-in".to_string(),
        ));
    }
    if check_in < today {
        return Err(AppError::Validation(
            "Check-in date is in the past".to_string(),
        ));
    }
    Ok(())
}

/// Create a customer reservation for `[check_in, check_out)`.
///
/// Returns `Conflict` when the range overlaps an existing active
/// reservation; that is a normal user-facing outcome, the caller re-prompts
/// for different dates. The total price is stamped from the unit's current
/// rates and never recomputed.
#[allow(clippy::too_many_arguments)]
pub async fn create_reservation(
    pool: &PgPool,
    cache: &AppCache,
    unit_id: Uuid,
    holder_id: Uuid,
    check_in: NaiveDate,
    check_out: NaiveDate,
    guest_count: i32,
    notes: Option<String>,
) -> Result<Reservation> {
    validate_stay(check_in, check_out, super::availability::today())?;

    if guest_count < 1 {
        return Err(AppError::Validation(
            "Guest count must be positive".to_string(),
        ));
    }

    let unit = db::get_unit(pool, unit_id).await?;
    if !unit.active {
        return Err(AppError::Validation(
            "Unit is not open for booking".to_string(),
        ));
    }

    let total_price = pricing::quote(&unit, check_in, check_out);

    // Lock + check + insert is the atomic unit; dropping the transaction on
    // any error path rolls back and releases the lock.
    let mut tx = pool.begin().await?;
    queries::lock_unit(&mut tx, unit_id).await?;

    if queries::overlapping_reservation_exists(&mut tx, unit_id, check_in, check_out).await? {
        return Err(AppError::Conflict("Dates already booked".to_string()));
    }

    let reservation = queries::insert_reservation(
        &mut tx,
        unit_id,
        holder_id,
        check_in,
        check_out,
        guest_count,
        total_price,
        notes.as_deref(),
    )
    .await?;

    tx.commit().await?;
    cache.invalidate_unit_calendar(unit_id).await;

    info!(
        "Reservation {} created for unit {} [{} - {}), total {}",
        reservation.id, unit_id, check_in, check_out, total_price
    );

    Ok(reservation)
}

/// Whether an administrative status change is a legal transition.
///
/// Owners confirm or cancel pending requests and close out finished stays.
/// Blocks never transition; they are deleted on unblock.
pub fn can_transition(from: ReservationStatus, to: ReservationStatus) -> bool {
    use ReservationStatus::*;
    matches!(
        (from, to),
        (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Completed) | (Confirmed, Cancelled)
    )
}

/// Administrative status transition (owner action).
///
/// Cancelling frees the stay's nights, so the unit's occupancy snapshot is
/// invalidated on every successful transition.
pub async fn update_reservation_status(
    pool: &PgPool,
    cache: &AppCache,
    reservation_id: Uuid,
    status: ReservationStatus,
) -> Result<Reservation> {
    let current = queries::get_reservation(pool, reservation_id)
        .await?
        .ok_or(AppError::NotFound)?;

    if !can_transition(current.status, status) {
        return Err(AppError::Validation(format!(
            "Cannot move a {} reservation to {}",
            current.status.as_str(),
            status.as_str()
        )));
    }

    let updated = queries::update_status(pool, reservation_id, status)
        .await?
        .ok_or(AppError::NotFound)?;

    cache.invalidate_unit_calendar(updated.unit_id).await;

    info!(
        "Reservation {} moved {} -> {}",
        reservation_id,
        current.status.as_str(),
        status.as_str()
    );

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    // ==================== validate_stay tests ====================

    #[test]
    fn test_validate_stay_accepts_future_range() {
        let today = d(2024, 3, 1);
        assert!(validate_stay(d(2024, 3, 10), d(2024, 3, 13), today).is_ok());
    }

    #[test]
    fn test_validate_stay_accepts_same_day_check_in() {
        let today = d(2024, 3, 10);
        assert!(validate_stay(d(2024, 3, 10), d(2024, 3, 11), today).is_ok());
    }

    #[test]
    fn test_validate_stay_rejects_zero_nights() {
        let today = d(2024, 3, 1);
        let err = validate_stay(d(2024, 3, 10), d(2024, 3, 10), today);
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_stay_rejects_inverted_range() {
        let today = d(2024, 3, 1);
        let err = validate_stay(d(2024, 3, 13), d(2024, 3, 10), today);
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_stay_rejects_past_check_in() {
        let today = d(2024, 3, 11);
        let err = validate_stay(d(2024, 3, 10), d(2024, 3, 13), today);
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    // ==================== can_transition tests ====================

    #[test]
    fn test_pending_transitions() {
        use ReservationStatus::*;
        assert!(can_transition(Pending, Confirmed));
        assert!(can_transition(Pending, Cancelled));
        assert!(!can_transition(Pending, Completed));
        assert!(!can_transition(Pending, Blocked));
    }

    #[test]
    fn test_confirmed_transitions() {
        use ReservationStatus::*;
        assert!(can_transition(Confirmed, Completed));
        assert!(can_transition(Confirmed, Cancelled));
        assert!(!can_transition(Confirmed, Pending));
    }

    #[test]
    fn test_terminal_and_blocked_never_transition() {
        use ReservationStatus::*;
        for from in [Cancelled, Completed, Blocked] {
            for to in [Pending, Confirmed, Cancelled, Completed, Blocked] {
                assert!(!can_transition(from, to));
            }
        }
    }
}
