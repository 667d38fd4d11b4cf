//! Database row shapes for spots and tickets.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{ParkingSpot, SpotId, Ticket, TicketId, VehicleType};
use crate::error::ParkingError;

/// A row from the `parking_spots` table: `(id, vehicle_type, available)`.
pub type SpotRow = (i32, String, bool);

/// A ticket row joined with its spot:
/// `(id, spot_id, vehicle_type, available, registration_number, price, in_time, out_time)`.
pub type TicketRow = (
    TicketId,
    i32,
    String,
    bool,
    String,
    Decimal,
    DateTime<Utc>,
    Option<DateTime<Utc>>,
);

/// Converts a spot row into a [`ParkingSpot`].
///
/// # Errors
///
/// Returns [`ParkingError::PersistenceError`] if the stored vehicle type is
/// not recognised.
pub fn spot_from_row((id, vehicle_type, available): SpotRow) -> Result<ParkingSpot, ParkingError> {
    let vehicle_type = vehicle_type.parse::<VehicleType>().map_err(|_| {
        ParkingError::PersistenceError(format!("spot {id} has unknown type {vehicle_type:?}"))
    })?;
    Ok(ParkingSpot::new(SpotId::new(id), vehicle_type, available))
}

/// Converts a joined ticket row into a [`Ticket`].
///
/// # Errors
///
/// Returns [`ParkingError::PersistenceError`] if the spot's stored vehicle
/// type is not recognised.
pub fn ticket_from_row(
    (id, spot_id, vehicle_type, available, registration_number, price, in_time, out_time): TicketRow,
) -> Result<Ticket, ParkingError> {
    let spot = spot_from_row((spot_id, vehicle_type, available))?;
    Ok(Ticket {
        id: Some(id),
        spot,
        registration_number,
        price,
        in_time,
        out_time,
    })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn spot_row_parses_db_label() {
        let Ok(spot) = spot_from_row((4, "BIKE".to_string(), true)) else {
            panic!("valid row");
        };
        assert_eq!(spot.id, SpotId::new(4));
        assert_eq!(spot.vehicle_type, VehicleType::Bike);
        assert!(spot.available);
    }

    #[test]
    fn unknown_vehicle_type_is_a_persistence_error() {
        let result = spot_from_row((1, "TRUCK".to_string(), true));
        assert!(matches!(result, Err(ParkingError::PersistenceError(_))));
    }

    #[test]
    fn ticket_row_keeps_open_state() {
        let now = Utc::now();
        let row = (
            11,
            2,
            "CAR".to_string(),
            false,
            "AB-123-CD".to_string(),
            Decimal::ZERO,
            now,
            None,
        );
        let Ok(ticket) = ticket_from_row(row) else {
            panic!("valid row");
        };
        assert_eq!(ticket.id, Some(11));
        assert!(ticket.is_open());
        assert!(!ticket.spot.available);
    }
}
