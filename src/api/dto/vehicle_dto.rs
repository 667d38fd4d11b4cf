//! Vehicle entry and exit DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::TicketDto;
use crate::input::ProvidedInput;
use crate::service::{EntryReceipt, ExitReceipt};

/// Request body for `POST /vehicles/incoming`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct IncomingVehicleRequest {
    /// Vehicle type name (`car`, `bike`) or menu number (`1`, `2`).
    #[serde(default)]
    pub vehicle_type: Option<String>,
    /// Vehicle registration number.
    #[serde(default)]
    pub registration_number: Option<String>,
}

impl From<IncomingVehicleRequest> for ProvidedInput {
    fn from(req: IncomingVehicleRequest) -> Self {
        Self::new(req.vehicle_type, req.registration_number)
    }
}

/// Request body for `POST /vehicles/exiting`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ExitingVehicleRequest {
    /// Vehicle registration number.
    #[serde(default)]
    pub registration_number: Option<String>,
}

impl From<ExitingVehicleRequest> for ProvidedInput {
    fn from(req: ExitingVehicleRequest) -> Self {
        Self::new(None, req.registration_number)
    }
}

/// Response body for `POST /vehicles/incoming`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EntryResponse {
    /// The issued ticket.
    pub ticket: TicketDto,
    /// The vehicle has parked here before.
    pub returning_customer: bool,
}

impl From<EntryReceipt> for EntryResponse {
    fn from(receipt: EntryReceipt) -> Self {
        Self {
            ticket: TicketDto::from(&receipt.ticket),
            returning_customer: receipt.returning_customer,
        }
    }
}

/// Response body for `POST /vehicles/exiting`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExitResponse {
    /// The priced ticket.
    pub ticket: TicketDto,
    /// Amount due (string-encoded decimal).
    pub price: String,
    /// The loyalty discount was applied.
    pub discount_applied: bool,
    /// Price and exit time were persisted.
    pub ticket_updated: bool,
    /// The spot was freed.
    pub spot_released: bool,
}

impl From<ExitReceipt> for ExitResponse {
    fn from(receipt: ExitReceipt) -> Self {
        Self {
            price: receipt.ticket.price.to_string(),
            ticket: TicketDto::from(&receipt.ticket),
            discount_applied: receipt.discount_applied,
            ticket_updated: receipt.ticket_updated,
            spot_released: receipt.spot_released,
        }
    }
}
