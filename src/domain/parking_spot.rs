//! Parking spot entity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{SpotId, VehicleType};

/// A physical parking location reserved for one vehicle type.
///
/// Spots are seeded in storage and never created or destroyed by the
/// service; only `available` changes, toggling once per entry and once per
/// exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ParkingSpot {
    /// Spot number (immutable).
    pub id: SpotId,
    /// Vehicle category this spot accepts.
    pub vehicle_type: VehicleType,
    /// `true` when no open ticket references the spot.
    pub available: bool,
}

impl ParkingSpot {
    /// Creates a spot value.
    #[must_use]
    pub const fn new(id: SpotId, vehicle_type: VehicleType, available: bool) -> Self {
        Self {
            id,
            vehicle_type,
            available,
        }
    }

    /// Marks the spot as taken by a parked vehicle.
    pub fn occupy(&mut self) {
        self.available = false;
    }

    /// Marks the spot as free again.
    pub fn release(&mut self) {
        self.available = true;
    }
}
