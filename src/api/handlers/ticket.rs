//! Ticket lookup handler.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::TicketDto;
use crate::app_state::AppState;
use crate::error::{ErrorResponse, ParkingError};
use crate::input::validate_registration_number;

/// `GET /tickets/{registration}`: Current or latest ticket of a vehicle.
///
/// # Errors
///
/// Returns [`ParkingError::TicketNotFound`] when the vehicle never parked.
#[utoipa::path(
    get,
    path = "/api/v1/tickets/{registration}",
    tag = "Tickets",
    summary = "Get a vehicle's ticket",
    description = "Returns the open ticket of the vehicle, or its most recent closed ticket.",
    params(
        ("registration" = String, Path, description = "Vehicle registration number"),
    ),
    responses(
        (status = 200, description = "Ticket found", body = TicketDto),
        (status = 404, description = "No ticket for the vehicle", body = ErrorResponse),
    )
)]
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(registration): Path<String>,
) -> Result<impl IntoResponse, ParkingError> {
    let registration = validate_registration_number(&registration)?;
    let ticket = state.parking_service.find_ticket(&registration).await?;
    Ok(Json(TicketDto::from(&ticket)))
}

/// Ticket routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/tickets/{registration}", get(get_ticket))
}
