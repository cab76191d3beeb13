//! Reservation domain entity

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A booked usage window on this charger.
///
/// Field names follow the wire contract used by deployed clients, including
/// the misspelt `state_upatde_time` key. The corrected spelling is accepted
/// on input. Only `reservation_id` is mandatory; absent fields take their
/// zero value (epoch timestamps, empty state, zero distance).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Reservation {
    /// Caller-supplied unique key
    #[serde(rename = "reservation_id")]
    pub id: String,
    /// Start of the reserved interval
    #[serde(default)]
    pub start_time: DateTime<FixedOffset>,
    /// End of the reserved interval
    #[serde(default)]
    pub end_time: DateTime<FixedOffset>,
    /// Free-form lifecycle tag (pending, active, completed, ...)
    #[serde(rename = "reservation_state", default)]
    pub state: String,
    /// Caller-reported proximity of the vehicle
    #[serde(default)]
    pub vehicle_distance: i64,
    /// Time of the last state change, stamped by the caller
    #[serde(rename = "state_upatde_time", alias = "state_update_time", default)]
    pub state_update_time: DateTime<FixedOffset>,
}

// ── Tests ──────────────────────────────────────────────────────
