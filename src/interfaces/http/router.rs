//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::domain::{ChargerDescriptor, Location, Reservation, ReservationRepository};
use crate::interfaces::http::common::{ErrorResponse, StatusResponse};

use super::modules::charger::{self, ChargerAppState};
use super::modules::reservations::{self, DeleteReservationRequest, ReservationAppState};

/// Unified state for all agent routes.
/// Axum extracts the specific handler state via `FromRef`.
#[derive(Clone)]
pub struct AgentState {
    pub descriptor: Arc<ChargerDescriptor>,
    pub reservations: Arc<dyn ReservationRepository>,
}

impl FromRef<AgentState> for ChargerAppState {
    fn from_ref(s: &AgentState) -> Self {
        ChargerAppState {
            descriptor: Arc::clone(&s.descriptor),
        }
    }
}

impl FromRef<AgentState> for ReservationAppState {
    fn from_ref(s: &AgentState) -> Self {
        ReservationAppState {
            reservations: Arc::clone(&s.reservations),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        charger::handlers::get_config,
        reservations::handlers::list_reservations,
        reservations::handlers::create_reservation,
        reservations::handlers::delete_reservation,
    ),
    components(
        schemas(
            ChargerDescriptor,
            Location,
            Reservation,
            DeleteReservationRequest,
            StatusResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Charger", description = "Charger identity and reachable endpoint"),
        (name = "Reservations", description = "Reservation lifecycle on this charger"),
    ),
    info(
        title = "Charger Edge Agent API",
        version = "1.0.0",
        description = "Reservation management for a single EV charger"
    )
)]
pub struct ApiDoc;

pub fn create_api_router(state: AgentState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let agent_routes = Router::new()
        .route("/config", get(charger::get_config))
        .route("/reservations", get(reservations::list_reservations))
        .route(
            "/reserve",
            post(reservations::create_reservation).delete(reservations::delete_reservation),
        )
        .with_state(state);

    let swagger_routes =
        SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .merge(agent_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ── Tests ──────────────────────────────────────────────────────
