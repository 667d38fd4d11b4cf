//! Vehicle categories a spot can be reserved for.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ParkingError;

/// Category of vehicle, and of the spots that accept it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    /// Passenger car.
    Car,
    /// Motorbike or bicycle.
    Bike,
}

impl VehicleType {
    /// All supported vehicle types, in menu order.
    pub const ALL: [Self; 2] = [Self::Car, Self::Bike];

    /// Maps a numeric menu selection (`1` = car, `2` = bike) to a type.
    ///
    /// # Errors
    ///
    /// Returns [`ParkingError::InvalidVehicleType`] for any other number.
    pub fn from_selection(selection: i32) -> Result<Self, ParkingError> {
        match selection {
            1 => Ok(Self::Car),
            2 => Ok(Self::Bike),
            other => Err(ParkingError::InvalidVehicleType(format!(
                "unknown selection {other}"
            ))),
        }
    }

    /// Upper-case label stored in the `vehicle_type` column.
    #[must_use]
    pub const fn as_db_str(self) -> &'static str {
        match self {
            Self::Car => "CAR",
            Self::Bike => "BIKE",
        }
    }

    /// Lower-case label used in JSON payloads and log lines.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Bike => "bike",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts type names in any case (`car`, `BIKE`) as well as the numeric
/// menu selections.
impl FromStr for VehicleType {
    type Err = ParkingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(selection) = trimmed.parse::<i32>() {
            return Self::from_selection(selection);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "car" => Ok(Self::Car),
            "bike" => Ok(Self::Bike),
            _ => Err(ParkingError::InvalidVehicleType(trimmed.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_maps_menu_numbers() {
        assert_eq!(VehicleType::from_selection(1).ok(), Some(VehicleType::Car));
        assert_eq!(VehicleType::from_selection(2).ok(), Some(VehicleType::Bike));
        assert!(VehicleType::from_selection(3).is_err());
        assert!(VehicleType::from_selection(-1).is_err());
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("CAR".parse::<VehicleType>().ok(), Some(VehicleType::Car));
        assert_eq!(" bike ".parse::<VehicleType>().ok(), Some(VehicleType::Bike));
        assert_eq!("2".parse::<VehicleType>().ok(), Some(VehicleType::Bike));
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "truck".parse::<VehicleType>();
        assert!(matches!(err, Err(ParkingError::InvalidVehicleType(_))));
    }

    #[test]
    fn db_label_round_trips_through_parse() {
        for vt in VehicleType::ALL {
            assert_eq!(vt.as_db_str().parse::<VehicleType>().ok(), Some(vt));
        }
    }
}
