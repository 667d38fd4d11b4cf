//! Parking spot DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{ParkingSpot, SpotId, VehicleType};

/// A parking spot and its availability.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SpotDto {
    /// Spot number.
    pub id: SpotId,
    /// Vehicle type the spot accepts.
    pub vehicle_type: VehicleType,
    /// Whether the spot is currently free.
    pub available: bool,
}

impl From<ParkingSpot> for SpotDto {
    fn from(spot: ParkingSpot) -> Self {
        Self {
            id: spot.id,
            vehicle_type: spot.vehicle_type,
            available: spot.available,
        }
    }
}

/// Query parameters for `GET /spots/next`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NextSpotQuery {
    /// Vehicle type name (`car`, `bike`) or menu number (`1`, `2`).
    #[serde(default)]
    pub vehicle_type: Option<String>,
}

/// Response body for `GET /spots/next`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NextSpotResponse {
    /// Next free spot, or `null` when the lot is full for the type.
    pub spot: Option<SpotDto>,
}

/// Response body for `GET /spots`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SpotListResponse {
    /// Every spot ordered by number.
    pub spots: Vec<SpotDto>,
    /// Total number of spots.
    pub total: usize,
    /// Number of free spots.
    pub available: usize,
}

impl SpotListResponse {
    /// Builds the listing and its counters.
    #[must_use]
    pub fn from_spots(spots: Vec<ParkingSpot>) -> Self {
        let available = spots.iter().filter(|s| s.available).count();
        Self {
            total: spots.len(),
            available,
            spots: spots.into_iter().map(SpotDto::from).collect(),
        }
    }
}
