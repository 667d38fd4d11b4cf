//! Input source backed by values supplied up front, such as an HTTP body.

use super::{InputSource, validate_registration_number};
use crate::domain::VehicleType;
use crate::error::ParkingError;

/// Answers the service's questions from values the caller already has.
///
/// A missing value is reported as invalid input when the flow asks for it,
/// so an exit request never needs a vehicle type.
#[derive(Debug, Clone, Default)]
pub struct ProvidedInput {
    vehicle_type: Option<String>,
    registration_number: Option<String>,
}

impl ProvidedInput {
    /// Creates an input source from optional raw values.
    #[must_use]
    pub const fn new(vehicle_type: Option<String>, registration_number: Option<String>) -> Self {
        Self {
            vehicle_type,
            registration_number,
        }
    }

    /// Input for an entry: vehicle type plus registration number.
    #[must_use]
    pub fn entry(vehicle_type: impl Into<String>, registration_number: impl Into<String>) -> Self {
        Self::new(Some(vehicle_type.into()), Some(registration_number.into()))
    }

    /// Input for an exit: registration number only.
    #[must_use]
    pub fn exit(registration_number: impl Into<String>) -> Self {
        Self::new(None, Some(registration_number.into()))
    }

    /// Input for an availability query: vehicle type only.
    #[must_use]
    pub fn vehicle_type(vehicle_type: impl Into<String>) -> Self {
        Self::new(Some(vehicle_type.into()), None)
    }
}

impl InputSource for ProvidedInput {
    fn read_vehicle_type_selection(&mut self) -> Result<VehicleType, ParkingError> {
        let Some(raw) = self.vehicle_type.as_deref() else {
            return Err(ParkingError::InvalidInput(
                "vehicle_type is required".to_string(),
            ));
        };
        raw.parse()
    }

    fn read_registration_number(&mut self) -> Result<String, ParkingError> {
        let Some(raw) = self.registration_number.as_deref() else {
            return Err(ParkingError::InvalidInput(
                "registration_number is required".to_string(),
            ));
        };
        validate_registration_number(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_input_parses_names_and_selections() {
        let mut input = ProvidedInput::entry("BIKE", " XY-987 ");
        assert_eq!(
            input.read_vehicle_type_selection().ok(),
            Some(VehicleType::Bike)
        );
        assert_eq!(input.read_registration_number().ok().as_deref(), Some("XY-987"));

        let mut input = ProvidedInput::vehicle_type("1");
        assert_eq!(
            input.read_vehicle_type_selection().ok(),
            Some(VehicleType::Car)
        );
    }

    #[test]
    fn missing_values_are_invalid_input() {
        let mut input = ProvidedInput::exit("AB-1");
        assert!(matches!(
            input.read_vehicle_type_selection(),
            Err(ParkingError::InvalidInput(_))
        ));

        let mut input = ProvidedInput::vehicle_type("car");
        assert!(input.read_registration_number().is_err());
    }
}
