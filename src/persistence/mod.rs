//! Persistence layer: spot and ticket storage.
//!
//! Provides the [`ParkingStore`] trait, the narrow interface the parking
//! service needs from storage. [`postgres::PostgresParkingStore`] backs it
//! with `sqlx::PgPool`; [`memory::InMemoryParkingStore`] keeps everything
//! in process and is used when persistence is disabled and in tests.

pub mod memory;
pub mod models;
pub mod postgres;

use async_trait::async_trait;

use crate::domain::{ParkingSpot, SpotId, Ticket, TicketId, VehicleType};
use crate::error::ParkingError;

pub use memory::InMemoryParkingStore;
pub use postgres::PostgresParkingStore;

/// Storage operations for spots and tickets.
///
/// Every call is a single all-or-nothing statement. Callers decide how to
/// react to a failed write; the store never retries.
#[async_trait]
pub trait ParkingStore: std::fmt::Debug + Send + Sync {
    /// Loads a spot by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ParkingError::PersistenceError`] on storage failure.
    async fn get_spot(&self, id: SpotId) -> Result<Option<ParkingSpot>, ParkingError>;

    /// Returns the smallest-numbered available spot of the given type, or
    /// `None` when the lot is full for that type.
    ///
    /// # Errors
    ///
    /// Returns [`ParkingError::PersistenceError`] on storage failure.
    async fn next_available_spot(
        &self,
        vehicle_type: VehicleType,
    ) -> Result<Option<SpotId>, ParkingError>;

    /// Sets the availability flag of a spot unconditionally.
    ///
    /// # Errors
    ///
    /// Returns [`ParkingError::SpotNotFound`] if no row was updated, or
    /// [`ParkingError::PersistenceError`] on storage failure.
    async fn update_spot_availability(
        &self,
        id: SpotId,
        available: bool,
    ) -> Result<(), ParkingError>;

    /// Marks a spot occupied only if it is still available.
    ///
    /// Returns `false` when another entry claimed the spot first.
    ///
    /// # Errors
    ///
    /// Returns [`ParkingError::PersistenceError`] on storage failure.
    async fn claim_spot(&self, id: SpotId) -> Result<bool, ParkingError>;

    /// Lists every spot ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ParkingError::PersistenceError`] on storage failure.
    async fn list_spots(&self) -> Result<Vec<ParkingSpot>, ParkingError>;

    /// Inserts a new ticket and returns its storage-assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ParkingError::PersistenceError`] on storage failure.
    async fn save_ticket(&self, ticket: &Ticket) -> Result<TicketId, ParkingError>;

    /// Returns the open ticket with the latest entry time for the vehicle,
    /// falling back to its most recent closed ticket.
    ///
    /// # Errors
    ///
    /// Returns [`ParkingError::PersistenceError`] on storage failure.
    async fn get_open_or_latest_ticket(
        &self,
        registration_number: &str,
    ) -> Result<Option<Ticket>, ParkingError>;

    /// Writes the price and exit time of a ticket that is still open.
    ///
    /// The write applies only while the stored ticket has no exit time, so
    /// of two concurrent exits at most one closes it.
    ///
    /// # Errors
    ///
    /// Returns [`ParkingError::InvalidInput`] if the ticket was never saved
    /// or has no exit time, [`ParkingError::TicketNotFound`] if no open
    /// ticket with that id exists, or [`ParkingError::PersistenceError`] on
    /// storage failure.
    async fn update_ticket_on_exit(&self, ticket: &Ticket) -> Result<(), ParkingError>;

    /// Counts every ticket, open or closed, issued to the vehicle.
    ///
    /// # Errors
    ///
    /// Returns [`ParkingError::PersistenceError`] on storage failure.
    async fn count_tickets_for(&self, registration_number: &str) -> Result<i64, ParkingError>;
}

/// Extracts the fields `update_ticket_on_exit` writes, rejecting tickets
/// that cannot be persisted as closed.
pub(crate) fn exit_fields(
    ticket: &Ticket,
) -> Result<(TicketId, chrono::DateTime<chrono::Utc>), ParkingError> {
    let Some(id) = ticket.id else {
        return Err(ParkingError::InvalidInput(
            "ticket has not been saved".to_string(),
        ));
    };
    let Some(out_time) = ticket.out_time else {
        return Err(ParkingError::InvalidInput(format!(
            "ticket {id} has no exit time"
        )));
    };
    Ok((id, out_time))
}
