//! Ticket DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{SpotId, Ticket, TicketId, VehicleType};

/// A parking ticket as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TicketDto {
    /// Ticket identifier.
    pub id: Option<TicketId>,
    /// Spot the vehicle occupies or occupied.
    pub spot_id: SpotId,
    /// Vehicle type of the spot.
    pub vehicle_type: VehicleType,
    /// Vehicle registration number.
    pub registration_number: String,
    /// Price charged (string-encoded decimal, `"0"` while open).
    pub price: String,
    /// Entry timestamp.
    pub in_time: DateTime<Utc>,
    /// Exit timestamp, absent while the vehicle is parked.
    pub out_time: Option<DateTime<Utc>>,
    /// Whether the vehicle is still parked.
    pub open: bool,
}

impl From<&Ticket> for TicketDto {
    fn from(ticket: &Ticket) -> Self {
        Self {
            id: ticket.id,
            spot_id: ticket.spot.id,
            vehicle_type: ticket.spot.vehicle_type,
            registration_number: ticket.registration_number.clone(),
            price: ticket.price.to_string(),
            in_time: ticket.in_time,
            out_time: ticket.out_time,
            open: ticket.is_open(),
        }
    }
}
