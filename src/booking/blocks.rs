//! Owner block manager.
//!
//! Owners hold individual calendar days for off-platform bookings (cash
//! guests, maintenance) and release them again. Blocking is best-effort
//! over a mixed selection: dates already taken by any active reservation
//! are silently skipped and only the count actually created is returned.
//! Every block is a single-night row, which is what makes per-day unblock
//! possible.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::cache::AppCache;
use crate::db;
use crate::error::{AppError, Result};
use crate::models::Reservation;

use super::access::UnitAccess;
use super::availability::{self, Occupancy};
use super::queries;

/// Guest and payment details carried by an owner block
#[derive(Debug, Clone, Default)]
pub struct BlockMeta {
    pub guest_name: Option<String>,
    pub guest_phone: Option<String>,
    pub payment_method: Option<String>,
    pub deposit: Option<Decimal>,
    pub remaining_amount: Option<Decimal>,
}

/// Outcome of a block request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockOutcome {
    /// Blocks actually created; requested dates already taken are skipped
    pub created: u64,
}

/// Outcome of an unblock request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnblockOutcome {
    /// Blocks actually deleted; dates without a block are a no-op
    pub deleted: u64,
}

/// Requested dates minus everything already occupied, in calendar order.
///
/// Both occupancy sets count: a customer-held day is never blockable and an
/// already-blocked day must not gain a duplicate row.
pub fn free_dates(requested: &BTreeSet<NaiveDate>, occupancy: &Occupancy) -> Vec<NaiveDate> {
    requested
        .iter()
        .copied()
        .filter(|date| !occupancy.is_taken(*date))
        .collect()
}

/// Block calendar days for an off-platform booking.
///
/// Duplicate input dates collapse; each free date becomes one single-night
/// blocked reservation carrying the guest/payment metadata. The occupancy
/// read and the inserts share the transaction holding the unit lock, so a
/// concurrent writer cannot slip a conflicting row in between.
pub async fn block_dates(
    pool: &PgPool,
    cache: &AppCache,
    access: &UnitAccess,
    unit_id: Uuid,
    dates: Vec<NaiveDate>,
    meta: BlockMeta,
) -> Result<BlockOutcome> {
    access.require_manage()?;

    if dates.is_empty() {
        return Err(AppError::Validation("No dates given".to_string()));
    }

    // Confirm the unit exists before taking the lock
    db::get_unit(pool, unit_id).await?;

    let requested: BTreeSet<NaiveDate> = dates.into_iter().collect();
    let earliest = match requested.iter().next() {
        Some(date) => *date,
        None => return Err(AppError::Validation("No dates given".to_string())),
    };

    let mut tx = pool.begin().await?;
    queries::lock_unit(&mut tx, unit_id).await?;

    let active = queries::find_active_reservations(&mut *tx, unit_id, earliest).await?;
    let occupancy = availability::partition(&active);
    let free = free_dates(&requested, &occupancy);

    let mut created = 0u64;
    for date in &free {
        queries::insert_block(
            &mut tx,
            unit_id,
            access.actor_id,
            *date,
            meta.guest_name.as_deref(),
            meta.guest_phone.as_deref(),
            meta.payment_method.as_deref(),
            meta.deposit,
            meta.remaining_amount,
        )
        .await?;
        created += 1;
    }

    tx.commit().await?;
    cache.invalidate_unit_calendar(unit_id).await;

    info!(
        "Blocked {} of {} requested dates on unit {}",
        created,
        requested.len(),
        unit_id
    );

    Ok(BlockOutcome { created })
}

/// Release owner blocks on the given dates.
///
/// Idempotent: a date with no block deletes nothing and raises no error.
pub async fn unblock_dates(
    pool: &PgPool,
    cache: &AppCache,
    access: &UnitAccess,
    unit_id: Uuid,
    dates: Vec<NaiveDate>,
) -> Result<UnblockOutcome> {
    access.require_manage()?;

    if dates.is_empty() {
        return Err(AppError::Validation("No dates given".to_string()));
    }

    let requested: Vec<NaiveDate> = dates
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let deleted = queries::delete_blocks(pool, unit_id, &requested).await?;
    cache.invalidate_unit_calendar(unit_id).await;

    info!("Unblocked {} dates on unit {}", deleted, unit_id);

    Ok(UnblockOutcome { deleted })
}

/// Record the remaining payment collected for an off-platform guest.
///
/// Only valid on a blocked reservation of the expected unit; anything else
/// is NotFound.
pub async fn record_remaining_payment(
    pool: &PgPool,
    access: &UnitAccess,
    unit_id: Uuid,
    reservation_id: Uuid,
    remaining_amount: Decimal,
    remaining_payment_method: Option<String>,
) -> Result<Reservation> {
    access.require_manage()?;

    if remaining_amount < Decimal::ZERO {
        return Err(AppError::Validation(
            "Remaining amount cannot be negative".to_string(),
        ));
    }

    queries::update_remaining_payment(
        pool,
        reservation_id,
        unit_id,
        remaining_amount,
        remaining_payment_method.as_deref(),
    )
    .await?
    .ok_or(AppError::NotFound)
}
