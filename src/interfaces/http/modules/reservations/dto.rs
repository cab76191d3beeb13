//! Reservation DTOs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Reservation;

/// Body of `DELETE /reserve`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteReservationRequest {
    pub reservation_id: String,
}

/// `GET /reservations` response: reservation ID to reservation
pub type ReservationMap = HashMap<String, Reservation>;
