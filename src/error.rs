//! Parking error types with HTTP status code mapping.
//!
//! [`ParkingError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{SpotId, VehicleType};

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "no available car spot"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see the code ranges on [`ParkingError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Service error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                  |
/// |-----------|-----------------|------------------------------|
/// | 1000–1999 | Invalid input   | 400 Bad Request              |
/// | 2000–2999 | Not found       | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server          | 500 Internal Server Error    |
#[derive(Debug, thiserror::Error)]
pub enum ParkingError {
    /// Caller-supplied input was rejected (blank registration number,
    /// malformed ticket timestamps, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Vehicle type selection or name could not be parsed.
    #[error("invalid vehicle type: {0}")]
    InvalidVehicleType(String),

    /// Every spot for the requested vehicle type is occupied.
    #[error("no available {0} spot")]
    SpotUnavailable(VehicleType),

    /// No open ticket exists for the registration number.
    #[error("no open ticket for vehicle {0}")]
    TicketNotFound(String),

    /// Spot with the given identifier does not exist.
    #[error("parking spot not found: {0}")]
    SpotNotFound(SpotId),

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ParkingError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidInput(_) => 1001,
            Self::InvalidVehicleType(_) => 1002,
            Self::SpotUnavailable(_) => 2001,
            Self::TicketNotFound(_) => 2002,
            Self::SpotNotFound(_) => 2003,
            Self::PersistenceError(_) => 3001,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) | Self::InvalidVehicleType(_) => StatusCode::BAD_REQUEST,
            Self::SpotUnavailable(_) => StatusCode::CONFLICT,
            Self::TicketNotFound(_) | Self::SpotNotFound(_) => StatusCode::NOT_FOUND,
            Self::PersistenceError(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns `true` for the expected, non-fatal "nothing to do" outcomes:
    /// a full lot or an unknown registration number.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::SpotUnavailable(_) | Self::TicketNotFound(_) | Self::SpotNotFound(_)
        )
    }
}

impl IntoResponse for ParkingError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
