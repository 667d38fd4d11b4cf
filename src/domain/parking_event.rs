//! Domain events reflecting parking state changes.
//!
//! Every completed entry and exit emits a [`ParkingEvent`] through the
//! [`super::EventBus`]. Events are broadcast to WebSocket subscribers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::{SpotId, TicketId, VehicleType};

/// Domain event emitted after every state change.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum ParkingEvent {
    /// A vehicle entered and was issued a ticket.
    VehicleParked {
        /// Ticket issued for the session.
        ticket_id: TicketId,
        /// Spot the vehicle occupies.
        spot_id: SpotId,
        /// Vehicle category.
        vehicle_type: VehicleType,
        /// Vehicle registration number.
        registration_number: String,
        /// Whether the vehicle has at least one earlier ticket.
        returning_customer: bool,
        /// Entry timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A vehicle exited and its ticket was priced.
    VehicleExited {
        /// Ticket closed by the exit.
        ticket_id: TicketId,
        /// Spot the vehicle left.
        spot_id: SpotId,
        /// Vehicle category.
        vehicle_type: VehicleType,
        /// Vehicle registration number.
        registration_number: String,
        /// Price charged (string-encoded decimal).
        price: Decimal,
        /// Whether the loyalty discount was applied.
        discount_applied: bool,
        /// Exit timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A spot changed between available and occupied.
    SpotAvailabilityChanged {
        /// Spot whose flag changed.
        spot_id: SpotId,
        /// Vehicle category of the spot.
        vehicle_type: VehicleType,
        /// New availability flag.
        available: bool,
        /// Timestamp of the change.
        timestamp: DateTime<Utc>,
    },
}

impl ParkingEvent {
    /// Returns the vehicle type associated with this event.
    #[must_use]
    pub const fn vehicle_type(&self) -> VehicleType {
        match self {
            Self::VehicleParked { vehicle_type, .. }
            | Self::VehicleExited { vehicle_type, .. }
            | Self::SpotAvailabilityChanged { vehicle_type, .. } => *vehicle_type,
        }
    }

    /// Returns the spot associated with this event.
    #[must_use]
    pub const fn spot_id(&self) -> SpotId {
        match self {
            Self::VehicleParked { spot_id, .. }
            | Self::VehicleExited { spot_id, .. }
            | Self::SpotAvailabilityChanged { spot_id, .. } => *spot_id,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::VehicleParked { .. } => "vehicle_parked",
            Self::VehicleExited { .. } => "vehicle_exited",
            Self::SpotAvailabilityChanged { .. } => "spot_availability_changed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vehicle_exited_serializes_price_as_string() {
        let event = ParkingEvent::VehicleExited {
            ticket_id: 9,
            spot_id: SpotId::new(2),
            vehicle_type: VehicleType::Car,
            registration_number: "AB-123-CD".to_string(),
            price: Decimal::new(143, 2),
            discount_applied: true,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap_or_default();
        assert!(json.contains("\"event_type\":\"vehicle_exited\""));
        assert!(json.contains("\"price\":\"1.43\""));
        assert!(json.contains("\"vehicle_type\":\"car\""));
    }

    #[test]
    fn accessors_cover_every_variant() {
        let event = ParkingEvent::SpotAvailabilityChanged {
            spot_id: SpotId::new(4),
            vehicle_type: VehicleType::Bike,
            available: true,
            timestamp: Utc::now(),
        };
        assert_eq!(event.spot_id(), SpotId::new(4));
        assert_eq!(event.vehicle_type(), VehicleType::Bike);
        assert_eq!(event.event_type_str(), "spot_availability_changed");
    }
}
