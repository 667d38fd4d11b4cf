//! Input sources: where the parking service reads a vehicle type and a
//! registration number from.
//!
//! The service never touches stdin or request bodies directly. Each outer
//! surface hands it an [`InputSource`]: the console shell uses
//! [`ConsoleInput`], HTTP handlers use [`ProvidedInput`].

pub mod console;
pub mod provided;

pub use console::ConsoleInput;
pub use provided::ProvidedInput;

use crate::domain::VehicleType;
use crate::error::ParkingError;

/// Supplies the values an entry or exit flow asks the caller for.
pub trait InputSource: Send {
    /// Reads the vehicle type selection.
    ///
    /// # Errors
    ///
    /// Returns [`ParkingError::InvalidVehicleType`] when the selection is
    /// not a known type, or [`ParkingError::InvalidInput`] when nothing
    /// could be read.
    fn read_vehicle_type_selection(&mut self) -> Result<VehicleType, ParkingError>;

    /// Reads a vehicle registration number.
    ///
    /// # Errors
    ///
    /// Returns [`ParkingError::InvalidInput`] when the value is blank or
    /// the input is exhausted.
    fn read_registration_number(&mut self) -> Result<String, ParkingError>;
}

/// Longest registration number, in characters, the `tickets` table holds.
pub const MAX_REGISTRATION_LEN: usize = 32;

/// Trims a registration number and rejects blank or overlong values.
///
/// # Errors
///
/// Returns [`ParkingError::InvalidInput`] when nothing but whitespace is
/// left, or when the trimmed value exceeds [`MAX_REGISTRATION_LEN`].
pub fn validate_registration_number(raw: &str) -> Result<String, ParkingError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParkingError::InvalidInput(
            "vehicle registration number must not be blank".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_REGISTRATION_LEN {
        return Err(ParkingError::InvalidInput(format!(
            "vehicle registration number must be at most {MAX_REGISTRATION_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_is_trimmed() {
        assert_eq!(
            validate_registration_number("  AB-123-CD \n").ok().as_deref(),
            Some("AB-123-CD")
        );
    }

    #[test]
    fn blank_registration_is_rejected() {
        assert!(matches!(
            validate_registration_number("   "),
            Err(ParkingError::InvalidInput(_))
        ));
        assert!(validate_registration_number("").is_err());
    }

    #[test]
    fn registration_length_is_capped() {
        let longest = "A".repeat(MAX_REGISTRATION_LEN);
        assert_eq!(
            validate_registration_number(&format!(" {longest} ")).ok(),
            Some(longest.clone())
        );
        assert!(matches!(
            validate_registration_number(&format!("{longest}B")),
            Err(ParkingError::InvalidInput(_))
        ));
        // Counted in characters, as the column is.
        assert!(validate_registration_number(&"Ä".repeat(MAX_REGISTRATION_LEN)).is_ok());
    }
}
