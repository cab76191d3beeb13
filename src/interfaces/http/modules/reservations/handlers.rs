//! Reservation HTTP handlers

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::{error, info};

use crate::domain::{DomainError, Reservation, ReservationRepository};
use crate::interfaces::http::common::{ErrorResponse, JsonBody, StatusResponse};

use super::dto::*;

/// Application state for reservation handlers.
#[derive(Clone)]
pub struct ReservationAppState {
    pub reservations: Arc<dyn ReservationRepository>,
}

/// All current reservations keyed by ID
#[utoipa::path(
    get,
    path = "/reservations",
    tag = "Reservations",
    responses(
        (status = 200, description = "Reservation map", body = HashMap<String, Reservation>),
        (status = 500, description = "Store unavailable", body = ErrorResponse)
    )
)]
pub async fn list_reservations(
    State(state): State<ReservationAppState>,
) -> Result<Json<ReservationMap>, (StatusCode, Json<ErrorResponse>)> {
    state.reservations.find_all().await.map(Json).map_err(|e| {
        error!(error = %e, "Failed to list reservations");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(e.to_string())),
        )
    })
}

/// Create a reservation, replacing any existing one with the same ID
#[utoipa::path(
    post,
    path = "/reserve",
    tag = "Reservations",
    request_body = Reservation,
    responses(
        (status = 200, description = "Reservation stored", body = StatusResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse)
    )
)]
pub async fn create_reservation(
    State(state): State<ReservationAppState>,
    JsonBody(reservation): JsonBody<Reservation>,
) -> Result<Json<StatusResponse>, (StatusCode, Json<ErrorResponse>)> {
    let id = reservation.id.clone();
    state.reservations.save(reservation).await.map_err(|e| {
        error!(reservation_id = %id, error = %e, "Failed to save reservation");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(e.to_string())),
        )
    })?;

    info!(reservation_id = %id, "Reservation stored");
    Ok(Json(StatusResponse::ok()))
}

/// Delete a reservation by ID
#[utoipa::path(
    delete,
    path = "/reserve",
    tag = "Reservations",
    request_body = DeleteReservationRequest,
    responses(
        (status = 200, description = "Reservation deleted", body = StatusResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 404, description = "Reservation not found", body = StatusResponse)
    )
)]
pub async fn delete_reservation(
    State(state): State<ReservationAppState>,
    JsonBody(request): JsonBody<DeleteReservationRequest>,
) -> Result<Json<StatusResponse>, (StatusCode, Json<StatusResponse>)> {
    match state.reservations.delete(&request.reservation_id).await {
        Ok(_) => {
            info!(reservation_id = %request.reservation_id, "Reservation deleted");
            Ok(Json(StatusResponse::ok()))
        }
        Err(e @ DomainError::NotFound { .. }) => {
            info!(reservation_id = %request.reservation_id, "Delete of unknown reservation");
            Err((StatusCode::NOT_FOUND, Json(StatusResponse::new(e.to_string()))))
        }
    }
}
