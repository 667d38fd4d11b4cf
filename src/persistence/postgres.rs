//! PostgreSQL implementation of the persistence layer.

use async_trait::async_trait;
use sqlx::PgPool;

use super::models::{SpotRow, TicketRow, spot_from_row, ticket_from_row};
use super::{ParkingStore, exit_fields};
use crate::domain::{ParkingSpot, SpotId, Ticket, TicketId, VehicleType};
use crate::error::ParkingError;

const SELECT_TICKET: &str = "SELECT t.id, t.spot_id, s.vehicle_type, s.available, \
     t.registration_number, t.price, t.in_time, t.out_time \
     FROM tickets t JOIN parking_spots s ON s.id = t.spot_id \
     WHERE t.registration_number = $1 \
     ORDER BY (t.out_time IS NULL) DESC, t.in_time DESC, t.id DESC \
     LIMIT 1";

/// PostgreSQL-backed parking store using `sqlx::PgPool`.
///
/// Each operation acquires a pooled connection for the duration of one
/// statement; the connection returns to the pool on every exit path.
#[derive(Debug, Clone)]
pub struct PostgresParkingStore {
    pool: PgPool,
}

impl PostgresParkingStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the embedded schema migrations (tables and seeded spots).
    ///
    /// # Errors
    ///
    /// Returns a [`ParkingError::PersistenceError`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), ParkingError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ParkingError::PersistenceError(e.to_string()))
    }
}

#[async_trait]
impl ParkingStore for PostgresParkingStore {
    async fn get_spot(&self, id: SpotId) -> Result<Option<ParkingSpot>, ParkingError> {
        let row = sqlx::query_as::<_, SpotRow>(
            "SELECT id, vehicle_type, available FROM parking_spots WHERE id = $1",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ParkingError::PersistenceError(e.to_string()))?;

        row.map(spot_from_row).transpose()
    }

    async fn next_available_spot(
        &self,
        vehicle_type: VehicleType,
    ) -> Result<Option<SpotId>, ParkingError> {
        let id = sqlx::query_scalar::<_, i32>(
            "SELECT id FROM parking_spots WHERE vehicle_type = $1 AND available \
             ORDER BY id ASC LIMIT 1",
        )
        .bind(vehicle_type.as_db_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ParkingError::PersistenceError(e.to_string()))?;

        Ok(id.map(SpotId::new))
    }

    async fn update_spot_availability(
        &self,
        id: SpotId,
        available: bool,
    ) -> Result<(), ParkingError> {
        let result = sqlx::query("UPDATE parking_spots SET available = $1 WHERE id = $2")
            .bind(available)
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| ParkingError::PersistenceError(e.to_string()))?;

        if result.rows_affected() == 1 {
            Ok(())
        } else {
            Err(ParkingError::SpotNotFound(id))
        }
    }

    async fn claim_spot(&self, id: SpotId) -> Result<bool, ParkingError> {
        let result = sqlx::query(
            "UPDATE parking_spots SET available = FALSE WHERE id = $1 AND available",
        )
        .bind(id.get())
        .execute(&self.pool)
        .await
        .map_err(|e| ParkingError::PersistenceError(e.to_string()))?;

        Ok(result.rows_affected() == 1)
    }

    async fn list_spots(&self) -> Result<Vec<ParkingSpot>, ParkingError> {
        let rows = sqlx::query_as::<_, SpotRow>(
            "SELECT id, vehicle_type, available FROM parking_spots ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ParkingError::PersistenceError(e.to_string()))?;

        rows.into_iter().map(spot_from_row).collect()
    }

    async fn save_ticket(&self, ticket: &Ticket) -> Result<TicketId, ParkingError> {
        let id = sqlx::query_scalar::<_, TicketId>(
            "INSERT INTO tickets (spot_id, registration_number, price, in_time, out_time) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(ticket.spot.id.get())
        .bind(&ticket.registration_number)
        .bind(ticket.price)
        .bind(ticket.in_time)
        .bind(ticket.out_time)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ParkingError::PersistenceError(e.to_string()))?;

        Ok(id)
    }

    async fn get_open_or_latest_ticket(
        &self,
        registration_number: &str,
    ) -> Result<Option<Ticket>, ParkingError> {
        let row = sqlx::query_as::<_, TicketRow>(SELECT_TICKET)
            .bind(registration_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ParkingError::PersistenceError(e.to_string()))?;

        row.map(ticket_from_row).transpose()
    }

    async fn update_ticket_on_exit(&self, ticket: &Ticket) -> Result<(), ParkingError> {
        let (id, out_time) = exit_fields(ticket)?;

        let result = sqlx::query(
            "UPDATE tickets SET price = $1, out_time = $2 WHERE id = $3 AND out_time IS NULL",
        )
        .bind(ticket.price)
        .bind(out_time)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| ParkingError::PersistenceError(e.to_string()))?;

        if result.rows_affected() == 1 {
            Ok(())
        } else {
            Err(ParkingError::TicketNotFound(
                ticket.registration_number.clone(),
            ))
        }
    }

    async fn count_tickets_for(&self, registration_number: &str) -> Result<i64, ParkingError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM tickets WHERE registration_number = $1",
        )
        .bind(registration_number)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ParkingError::PersistenceError(e.to_string()))
    }
}
