//! Booking API route handlers
//!
//! Identity arrives from the upstream gateway as x-actor-id / x-actor-role
//! headers; it is mapped to a capability value once at this boundary and
//! the core only ever sees capabilities.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    routing::{delete, get, patch, post},
    Json, Router,
};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::AppState;

use super::access::UnitAccess;
use super::requests::{
    BlockDatesRequest, CreateReservationRequest, OccupancyQuery, RemainingPaymentRequest,
    UnblockDatesRequest, UpdateStatusRequest,
};
use super::responses::{BlockDatesResponse, ReservationResponse, UnblockDatesResponse};
use super::{availability, blocks, engine, queries};

/// Booking API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/units/:id/occupancy", get(occupancy))
        .route("/units/:id/reservations", post(create_reservation))
        .route("/units/:id/reservations", get(list_reservations))
        .route("/units/:id/blocks", post(block_dates))
        .route("/units/:id/blocks", delete(unblock_dates))
        .route("/reservations/:id/status", patch(update_status))
        .route(
            "/reservations/:id/remaining-payment",
            patch(remaining_payment),
        )
}

/// Build the actor's capability from the gateway identity headers
fn unit_access(headers: &HeaderMap) -> Result<UnitAccess> {
    let actor_id = headers
        .get("x-actor-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v).ok())
        .ok_or_else(|| AppError::Validation("Missing or invalid x-actor-id header".to_string()))?;

    let role = headers
        .get("x-actor-role")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("customer");

    Ok(match role {
        "owner" | "admin" => UnitAccess::manager(actor_id),
        _ => UnitAccess::customer(actor_id),
    })
}

/// Occupied days for a unit, partitioned for the calendar grid
async fn occupancy(
    State(state): State<AppState>,
    Path(unit_id): Path<Uuid>,
    Query(query): Query<OccupancyQuery>,
) -> Result<Json<availability::Occupancy>> {
    crate::db::get_unit(&state.db, unit_id).await?;

    let occupancy = match query.from {
        // Explicit window requests bypass the live-calendar cache
        Some(from) => availability::occupancy_from(&state.db, unit_id, from).await?,
        None => (*availability::occupancy(&state.db, &state.cache, unit_id).await?).clone(),
    };

    Ok(Json(occupancy))
}

/// Customer booking flow
async fn create_reservation(
    State(state): State<AppState>,
    Path(unit_id): Path<Uuid>,
    headers: HeaderMap,
    Json(req): Json<CreateReservationRequest>,
) -> Result<Json<ReservationResponse>> {
    let access = unit_access(&headers)?;

    let reservation = engine::create_reservation(
        &state.db,
        &state.cache,
        unit_id,
        access.actor_id,
        req.check_in,
        req.check_out,
        req.guest_count,
        req.notes,
    )
    .await?;

    Ok(Json(reservation.into()))
}

/// Owner view of upcoming reservations on a unit, in calendar order
async fn list_reservations(
    State(state): State<AppState>,
    Path(unit_id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<Vec<ReservationResponse>>> {
    let access = unit_access(&headers)?;
    access.require_manage()?;

    crate::db::get_unit(&state.db, unit_id).await?;

    let reservations =
        queries::find_active_reservations(&state.db, unit_id, availability::today()).await?;

    Ok(Json(reservations.into_iter().map(Into::into).collect()))
}

/// Owner calendar flow: hold days for an off-platform booking
async fn block_dates(
    State(state): State<AppState>,
    Path(unit_id): Path<Uuid>,
    headers: HeaderMap,
    Json(req): Json<BlockDatesRequest>,
) -> Result<Json<BlockDatesResponse>> {
    let access = unit_access(&headers)?;

    let outcome = blocks::block_dates(
        &state.db,
        &state.cache,
        &access,
        unit_id,
        req.dates,
        blocks::BlockMeta {
            guest_name: req.guest_name,
            guest_phone: req.guest_phone,
            payment_method: req.payment_method,
            deposit: req.deposit,
            remaining_amount: req.remaining_amount,
        },
    )
    .await?;

    Ok(Json(BlockDatesResponse {
        created: outcome.created,
    }))
}

/// Owner calendar flow: release held days
async fn unblock_dates(
    State(state): State<AppState>,
    Path(unit_id): Path<Uuid>,
    headers: HeaderMap,
    Json(req): Json<UnblockDatesRequest>,
) -> Result<Json<UnblockDatesResponse>> {
    let access = unit_access(&headers)?;

    let outcome =
        blocks::unblock_dates(&state.db, &state.cache, &access, unit_id, req.dates).await?;

    Ok(Json(UnblockDatesResponse {
        deleted: outcome.deleted,
    }))
}

/// Administrative status transition (confirm, cancel, complete)
async fn update_status(
    State(state): State<AppState>,
    Path(reservation_id): Path<Uuid>,
    headers: HeaderMap,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<ReservationResponse>> {
    let access = unit_access(&headers)?;
    access.require_manage()?;

    let reservation =
        engine::update_reservation_status(&state.db, &state.cache, reservation_id, req.status)
            .await?;

    Ok(Json(reservation.into()))
}

/// Record the remaining payment collected for an off-platform guest
async fn remaining_payment(
    State(state): State<AppState>,
    Path(reservation_id): Path<Uuid>,
    headers: HeaderMap,
    Json(req): Json<RemainingPaymentRequest>,
) -> Result<Json<ReservationResponse>> {
    let access = unit_access(&headers)?;

    let current = queries::get_reservation(&state.db, reservation_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let reservation = blocks::record_remaining_payment(
        &state.db,
        &access,
        current.unit_id,
        reservation_id,
        req.remaining_amount,
        req.remaining_payment_method,
    )
    .await?;

    Ok(Json(reservation.into()))
}
