//! Charger descriptor HTTP handler

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::domain::ChargerDescriptor;

/// Application state for the descriptor endpoint.
#[derive(Clone)]
pub struct ChargerAppState {
    pub descriptor: Arc<ChargerDescriptor>,
}

/// Current charger descriptor (location, identity, bound port)
#[utoipa::path(
    get,
    path = "/config",
    tag = "Charger",
    responses(
        (status = 200, description = "Charger descriptor", body = ChargerDescriptor)
    )
)]
pub async fn get_config(State(state): State<ChargerAppState>) -> Json<ChargerDescriptor> {
    Json(state.descriptor.as_ref().clone())
}
