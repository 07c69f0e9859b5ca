//! Database queries for rental units

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::Unit;

/// Get an active unit by id
pub async fn get_unit(pool: &PgPool, unit_id: Uuid) -> Result<Unit> {
    let unit = sqlx::query_as::<_, Unit>(
        r#"
        SELECT
            id,
            owner_id,
            name,
            capacity,
            weekday_rate,
            weekend_rate,
            active,
            created_at,
            updated_at
        FROM units
        WHERE id = $1
        "#,
    )
    .bind(unit_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(unit)
}

/// List active units, newest first
pub async fn list_active_units(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Unit>> {
    let units = sqlx::query_as::<_, Unit>(
        r#"
        SELECT
            id,
            owner_id,
            name,
            capacity,
            weekday_rate,
            weekend_rate,
            active,
            created_at,
            updated_at
        FROM units
        WHERE active = true
        ORDER BY created_at DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(units)
}

/// Count active units (for pagination)
pub async fn count_active_units(pool: &PgPool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM units
        WHERE active = true
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}
