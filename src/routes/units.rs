//! Unit listing route handlers

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::db;
use crate::error::{AppError, Result};
use crate::models::Unit;
use crate::AppState;

/// Query parameters for unit listing
#[derive(Debug, Deserialize)]
pub struct UnitListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

const UNITS_PER_PAGE: i64 = 20;

/// Unit as returned to callers
#[derive(Debug, Clone, Serialize)]
pub struct UnitResponse {
    pub id: Uuid,
    pub name: String,
    pub capacity: i32,
    #[serde(with = "rust_decimal::serde::str")]
    pub weekday_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub weekend_rate: Option<Decimal>,
}

impl From<Unit> for UnitResponse {
    fn from(unit: Unit) -> Self {
        Self {
            id: unit.id,
            name: unit.name,
            capacity: unit.capacity,
            weekday_rate: unit.weekday_rate,
            weekend_rate: unit.weekend_rate,
        }
    }
}

/// Paginated unit listing
#[derive(Debug, Serialize)]
pub struct UnitListResponse {
    pub units: Vec<UnitResponse>,
    pub page: i64,
    pub total_pages: i64,
}

/// Unit API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/units", get(list))
        .route("/units/:id", get(detail))
}

/// Active unit listing for the booking form
async fn list(
    State(state): State<AppState>,
    Query(query): Query<UnitListQuery>,
) -> Result<Json<UnitListResponse>> {
    let offset = (query.page - 1) * UNITS_PER_PAGE;

    let units = db::list_active_units(&state.db, UNITS_PER_PAGE, offset).await?;
    let total = db::count_active_units(&state.db).await?;
    let total_pages = (total + UNITS_PER_PAGE - 1) / UNITS_PER_PAGE;

    Ok(Json(UnitListResponse {
        units: units.into_iter().map(Into::into).collect(),
        page: query.page,
        total_pages,
    }))
}

/// Unit detail, read through the unit cache
async fn detail(
    State(state): State<AppState>,
    Path(unit_id): Path<Uuid>,
) -> Result<Json<UnitResponse>> {
    let unit = if let Some(cached) = state.cache.units.get(&unit_id).await {
        tracing::debug!("Cache HIT for unit: {}", unit_id);
        (*cached).clone()
    } else {
        tracing::debug!("Cache MISS for unit: {}", unit_id);
        let unit = db::get_unit(&state.db, unit_id).await?;
        state
            .cache
            .units
            .insert(unit_id, Arc::new(unit.clone()))
            .await;
        unit
    };

    // Inactive units are not listed publicly
    if !unit.active {
        return Err(AppError::NotFound);
    }

    Ok(Json(unit.into()))
}
