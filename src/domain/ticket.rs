//! Parking ticket: one vehicle session from entry to exit.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::ParkingSpot;
use crate::error::ParkingError;

/// Storage-assigned ticket identifier.
pub type TicketId = i64;

/// Record of a single parking session.
///
/// A ticket is *open* while `out_time` is `None`; the exit flow sets
/// `out_time` and `price` exactly once. Tickets are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ticket {
    /// Identifier assigned by storage; `None` until the ticket is saved.
    pub id: Option<TicketId>,
    /// Spot the vehicle was parked in.
    pub spot: ParkingSpot,
    /// Vehicle registration number (non-empty).
    pub registration_number: String,
    /// Price charged at exit, two-decimal precision. Zero while open.
    pub price: Decimal,
    /// Entry timestamp.
    pub in_time: DateTime<Utc>,
    /// Exit timestamp, present once the ticket is closed.
    pub out_time: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Creates an unsaved, open ticket with a zero price.
    #[must_use]
    pub fn open(spot: ParkingSpot, registration_number: String, in_time: DateTime<Utc>) -> Self {
        Self {
            id: None,
            spot,
            registration_number,
            price: Decimal::ZERO,
            in_time,
            out_time: None,
        }
    }

    /// Returns `true` while the vehicle has not exited.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.out_time.is_none()
    }

    /// Length of the stay, from entry to exit.
    ///
    /// # Errors
    ///
    /// Returns [`ParkingError::InvalidInput`] if the exit time is missing or
    /// earlier than the entry time.
    pub fn stay_duration(&self) -> Result<Duration, ParkingError> {
        let Some(out_time) = self.out_time else {
            return Err(ParkingError::InvalidInput(
                "ticket has no exit time".to_string(),
            ));
        };
        if out_time < self.in_time {
            return Err(ParkingError::InvalidInput(format!(
                "exit time {out_time} is before entry time {}",
                self.in_time
            )));
        }
        Ok(out_time - self.in_time)
    }
}
