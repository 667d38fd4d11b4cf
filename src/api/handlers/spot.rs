//! Spot availability handlers.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{NextSpotQuery, NextSpotResponse, SpotDto, SpotListResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, ParkingError};
use crate::input::ProvidedInput;

/// `GET /spots`: List every spot.
///
/// # Errors
///
/// Returns [`ParkingError::PersistenceError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/v1/spots",
    tag = "Spots",
    summary = "List spots",
    responses(
        (status = 200, description = "All spots with availability", body = SpotListResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn list_spots(State(state): State<AppState>) -> Result<impl IntoResponse, ParkingError> {
    let spots = state.parking_service.list_spots().await?;
    Ok(Json(SpotListResponse::from_spots(spots)))
}

/// `GET /spots/next`: Next free spot for a vehicle type.
///
/// # Errors
///
/// Returns [`ParkingError`] on an unknown vehicle type or storage failure.
#[utoipa::path(
    get,
    path = "/api/v1/spots/next",
    tag = "Spots",
    summary = "Next available spot",
    description = "Returns the lowest-numbered free spot for the vehicle type without reserving it, or `null` when the lot is full.",
    params(NextSpotQuery),
    responses(
        (status = 200, description = "Next spot or null", body = NextSpotResponse),
        (status = 400, description = "Invalid vehicle type", body = ErrorResponse),
    )
)]
pub async fn next_spot(
    State(state): State<AppState>,
    Query(query): Query<NextSpotQuery>,
) -> Result<impl IntoResponse, ParkingError> {
    let mut input = ProvidedInput::new(query.vehicle_type, None);
    let spot = state.parking_service.next_available_spot(&mut input).await?;
    Ok(Json(NextSpotResponse {
        spot: spot.map(SpotDto::from),
    }))
}

/// Spot routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/spots", get(list_spots))
        .route("/spots/next", get(next_spot))
}
