//! Database queries for reservations and blocks.
//!
//! Write paths that must be atomic (overlap check + insert) take an open
//! transaction; read paths take the pool directly.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Reservation, ReservationStatus};

/// Serialize writers for one unit within the current transaction.
///
/// Takes a per-unit Postgres advisory lock that is released at commit or
/// rollback. Two concurrent check-and-insert sequences for the same unit
/// cannot interleave between the overlap check and the insert.
pub async fn lock_unit(tx: &mut Transaction<'_, Postgres>, unit_id: Uuid) -> Result<()> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(advisory_key(unit_id))
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Fold a unit id into the 64-bit advisory lock keyspace
fn advisory_key(unit_id: Uuid) -> i64 {
    let bytes = unit_id.as_bytes();
    let mut key = [0u8; 8];
    key.copy_from_slice(&bytes[..8]);
    i64::from_be_bytes(key)
}

/// All active reservations for a unit still visible on the live calendar
/// (check-out on or after `from`).
///
/// Generic over the executor so the block manager can run it inside the
/// transaction that holds the unit lock.
pub async fn find_active_reservations<'e>(
    executor: impl sqlx::PgExecutor<'e>,
    unit_id: Uuid,
    from: NaiveDate,
) -> Result<Vec<Reservation>> {
    let reservations = sqlx::query_as::<_, Reservation>(
        r#"
        SELECT
            id,
            unit_id,
            holder_id,
            check_in,
            check_out,
            guest_count,
            total_price,
            status,
            guest_name,
            guest_phone,
            payment_method,
            deposit,
            remaining_amount,
            remaining_payment_method,
            remaining_collected,
            notes,
            created_at,
            updated_at
        FROM reservations
        WHERE unit_id = $1
          AND status IN ('pending', 'confirmed', 'blocked')
          AND check_out >= $2
        ORDER BY check_in
        "#,
    )
    .bind(unit_id)
    .bind(from)
    .fetch_all(executor)
    .await?;

    Ok(reservations)
}

/// Whether any active reservation overlaps the half-open candidate range.
///
/// Classic half-open interval intersection: existing.check_in < new.check_out
/// AND existing.check_out > new.check_in. Must run inside the transaction
/// that holds the unit's advisory lock.
pub async fn overlapping_reservation_exists(
    tx: &mut Transaction<'_, Postgres>,
    unit_id: Uuid,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> Result<bool> {
    let hit: Option<Uuid> = sqlx::query_scalar(
        r#"
        SELECT id
        FROM reservations
        WHERE unit_id = $1
          AND status IN ('pending', 'confirmed', 'blocked')
          AND check_in < $3
          AND check_out > $2
        LIMIT 1
        "#,
    )
    .bind(unit_id)
    .bind(check_in)
    .bind(check_out)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(hit.is_some())
}

/// Insert a customer reservation (status = pending) and return the row
#[allow(clippy::too_many_arguments)]
pub async fn insert_reservation(
    tx: &mut Transaction<'_, Postgres>,
    unit_id: Uuid,
    holder_id: Uuid,
    check_in: NaiveDate,
    check_out: NaiveDate,
    guest_count: i32,
    total_price: Decimal,
    notes: Option<&str>,
) -> Result<Reservation> {
    let reservation = sqlx::query_as::<_, Reservation>(
        r#"
        INSERT INTO reservations (
            id, unit_id, holder_id, check_in, check_out,
            guest_count, total_price, status, notes
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, 'pending', $8)
        RETURNING
            id,
            unit_id,
            holder_id,
            check_in,
            check_out,
            guest_count,
            total_price,
            status,
            guest_name,
            guest_phone,
            payment_method,
            deposit,
            remaining_amount,
            remaining_payment_method,
            remaining_collected,
            notes,
            created_at,
            updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(unit_id)
    .bind(holder_id)
    .bind(check_in)
    .bind(check_out)
    .bind(guest_count)
    .bind(total_price)
    .bind(notes)
    .fetch_one(&mut **tx)
    .await?;

    Ok(reservation)
}

/// Insert one single-night owner block for the night starting on `date`
#[allow(clippy::too_many_arguments)]
pub async fn insert_block(
    tx: &mut Transaction<'_, Postgres>,
    unit_id: Uuid,
    holder_id: Uuid,
    date: NaiveDate,
    guest_name: Option<&str>,
    guest_phone: Option<&str>,
    payment_method: Option<&str>,
    deposit: Option<Decimal>,
    remaining_amount: Option<Decimal>,
) -> Result<Reservation> {
    let check_out = date
        .succ_opt()
        .ok_or_else(|| crate::error::AppError::Validation("Date out of range".to_string()))?;

    let block = sqlx::query_as::<_, Reservation>(
        r#"
        INSERT INTO reservations (
            id, unit_id, holder_id, check_in, check_out,
            guest_count, total_price, status,
            guest_name, guest_phone, payment_method,
            deposit, remaining_amount
        )
        VALUES ($1, $2, $3, $4, $5, 0, 0, 'blocked', $6, $7, $8, $9, $10)
        RETURNING
            id,
            unit_id,
            holder_id,
            check_in,
            check_out,
            guest_count,
            total_price,
            status,
            guest_name,
            guest_phone,
            payment_method,
            deposit,
            remaining_amount,
            remaining_payment_method,
            remaining_collected,
            notes,
            created_at,
            updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(unit_id)
    .bind(holder_id)
    .bind(date)
    .bind(check_out)
    .bind(guest_name)
    .bind(guest_phone)
    .bind(payment_method)
    .bind(deposit)
    .bind(remaining_amount)
    .fetch_one(&mut **tx)
    .await?;

    Ok(block)
}

/// Delete owner blocks whose night matches one of the given dates.
///
/// Dates without a block simply do not match; the caller reads the returned
/// count. Customer reservations are never touched.
pub async fn delete_blocks(pool: &PgPool, unit_id: Uuid, dates: &[NaiveDate]) -> Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM reservations
        WHERE unit_id = $1
          AND status = 'blocked'
          AND check_in = ANY($2)
        "#,
    )
    .bind(unit_id)
    .bind(dates.to_vec())
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Get a reservation by id
pub async fn get_reservation(pool: &PgPool, reservation_id: Uuid) -> Result<Option<Reservation>> {
    let reservation = sqlx::query_as::<_, Reservation>(
        r#"
        SELECT
            id,
            unit_id,
            holder_id,
            check_in,
            check_out,
            guest_count,
            total_price,
            status,
            guest_name,
            guest_phone,
            payment_method,
            deposit,
            remaining_amount,
            remaining_payment_method,
            remaining_collected,
            notes,
            created_at,
            updated_at
        FROM reservations
        WHERE id = $1
        "#,
    )
    .bind(reservation_id)
    .fetch_optional(pool)
    .await?;

    Ok(reservation)
}

/// Record the remaining payment on an owner block.
///
/// Only matches a blocked row on the expected unit; anything else returns
/// None. remaining_collected tracks whether a remaining payment method was
/// supplied.
pub async fn update_remaining_payment(
    pool: &PgPool,
    reservation_id: Uuid,
    unit_id: Uuid,
    remaining_amount: Decimal,
    remaining_payment_method: Option<&str>,
) -> Result<Option<Reservation>> {
    let reservation = sqlx::query_as::<_, Reservation>(
        r#"
        UPDATE reservations
        SET remaining_amount = $3,
            remaining_payment_method = $4,
            remaining_collected = ($4 IS NOT NULL),
            updated_at = now()
        WHERE id = $1
          AND unit_id = $2
          AND status = 'blocked'
        RETURNING
            id,
            unit_id,
            holder_id,
            check_in,
            check_out,
            guest_count,
            total_price,
            status,
            guest_name,
            guest_phone,
            payment_method,
            deposit,
            remaining_amount,
            remaining_payment_method,
            remaining_collected,
            notes,
            created_at,
            updated_at
        "#,
    )
    .bind(reservation_id)
    .bind(unit_id)
    .bind(remaining_amount)
    .bind(remaining_payment_method)
    .fetch_optional(pool)
    .await?;

    Ok(reservation)
}

/// Administrative status transition on a customer reservation.
///
/// Blocked rows are excluded: blocks are deleted on unblock, they never
/// transition.
pub async fn update_status(
    pool: &PgPool,
    reservation_id: Uuid,
    status: ReservationStatus,
) -> Result<Option<Reservation>> {
    let reservation = sqlx::query_as::<_, Reservation>(
        r#"
        UPDATE reservations
        SET status = $2,
            updated_at = now()
        WHERE id = $1
          AND status <> 'blocked'
        RETURNING
            id,
            unit_id,
            holder_id,
            check_in,
            check_out,
            guest_count,
            total_price,
            status,
            guest_name,
            guest_phone,
            payment_method,
            deposit,
            remaining_amount,
            remaining_payment_method,
            remaining_collected,
            notes,
            created_at,
            updated_at
        "#,
    )
    .bind(reservation_id)
    .bind(status)
    .fetch_optional(pool)
    .await?;

    Ok(reservation)
}
