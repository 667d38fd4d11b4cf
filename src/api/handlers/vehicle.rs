//! Vehicle entry and exit handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{EntryResponse, ExitResponse, ExitingVehicleRequest, IncomingVehicleRequest};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, ParkingError};
use crate::input::ProvidedInput;

/// `POST /vehicles/incoming`: Park a vehicle.
///
/// # Errors
///
/// Returns [`ParkingError`] on invalid input, a full lot, or storage failure.
#[utoipa::path(
    post,
    path = "/api/v1/vehicles/incoming",
    tag = "Vehicles",
    summary = "Park a vehicle",
    description = "Allocates the lowest-numbered free spot for the vehicle type, marks it occupied and issues an open ticket.",
    request_body = IncomingVehicleRequest,
    responses(
        (status = 201, description = "Vehicle parked", body = EntryResponse),
        (status = 400, description = "Invalid vehicle type or registration number", body = ErrorResponse),
        (status = 409, description = "No spot available for the vehicle type", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn incoming_vehicle(
    State(state): State<AppState>,
    Json(req): Json<IncomingVehicleRequest>,
) -> Result<impl IntoResponse, ParkingError> {
    // Detached so a request timeout cannot leave a claimed spot without its ticket.
    let receipt = state
        .parking_service
        .process_incoming_detached(ProvidedInput::from(req))
        .await?;
    Ok((StatusCode::CREATED, Json(EntryResponse::from(receipt))))
}

/// `POST /vehicles/exiting`: Check a vehicle out.
///
/// # Errors
///
/// Returns [`ParkingError`] on invalid input, an unknown vehicle, or a
/// failed ticket lookup.
#[utoipa::path(
    post,
    path = "/api/v1/vehicles/exiting",
    tag = "Vehicles",
    summary = "Check a vehicle out",
    description = "Prices the vehicle's open ticket and frees its spot. The response reports whether each write was persisted.",
    request_body = ExitingVehicleRequest,
    responses(
        (status = 200, description = "Vehicle exited", body = ExitResponse),
        (status = 400, description = "Invalid registration number", body = ErrorResponse),
        (status = 404, description = "No open ticket for the vehicle", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn exiting_vehicle(
    State(state): State<AppState>,
    Json(req): Json<ExitingVehicleRequest>,
) -> Result<impl IntoResponse, ParkingError> {
    let receipt = state
        .parking_service
        .process_exiting_detached(ProvidedInput::from(req))
        .await?;
    Ok(Json(ExitResponse::from(receipt)))
}

/// Vehicle routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/vehicles/incoming", post(incoming_vehicle))
        .route("/vehicles/exiting", post(exiting_vehicle))
}
