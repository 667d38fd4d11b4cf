//! In-process implementation of the persistence layer.
//!
//! [`InMemoryParkingStore`] keeps spots and tickets behind a single
//! [`tokio::sync::RwLock`], so every operation observes a consistent
//! snapshot and `claim_spot` is a true compare-and-swap.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ParkingStore, exit_fields};
use crate::domain::{ParkingSpot, SpotId, Ticket, TicketId, VehicleType};
use crate::error::ParkingError;

#[derive(Debug, Default)]
struct LotState {
    spots: BTreeMap<SpotId, ParkingSpot>,
    tickets: Vec<Ticket>,
    last_ticket_id: TicketId,
}

/// Parking store that lives entirely in memory.
///
/// Spot iteration is ordered by [`SpotId`], which gives the same
/// smallest-identifier-first allocation as the SQL store.
#[derive(Debug, Default)]
pub struct InMemoryParkingStore {
    state: RwLock<LotState>,
}

impl InMemoryParkingStore {
    /// Creates a store holding the given spots and no tickets.
    #[must_use]
    pub fn new(spots: impl IntoIterator<Item = ParkingSpot>) -> Self {
        let spots = spots.into_iter().map(|spot| (spot.id, spot)).collect();
        Self {
            state: RwLock::new(LotState {
                spots,
                ..LotState::default()
            }),
        }
    }

    /// Creates a store with `car_spots` car spots numbered from 1, followed
    /// by `bike_spots` bike spots, all available.
    #[must_use]
    pub fn seeded(car_spots: u32, bike_spots: u32) -> Self {
        let layout = std::iter::repeat_n(VehicleType::Car, car_spots as usize)
            .chain(std::iter::repeat_n(VehicleType::Bike, bike_spots as usize));
        Self::new(
            (1_i32..)
                .zip(layout)
                .map(|(id, vehicle_type)| ParkingSpot::new(SpotId::new(id), vehicle_type, true)),
        )
    }

    /// Returns a copy of every ticket, in insertion order.
    pub async fn tickets(&self) -> Vec<Ticket> {
        self.state.read().await.tickets.clone()
    }
}

#[async_trait]
impl ParkingStore for InMemoryParkingStore {
    async fn get_spot(&self, id: SpotId) -> Result<Option<ParkingSpot>, ParkingError> {
        Ok(self.state.read().await.spots.get(&id).copied())
    }

    async fn next_available_spot(
        &self,
        vehicle_type: VehicleType,
    ) -> Result<Option<SpotId>, ParkingError> {
        let state = self.state.read().await;
        Ok(state
            .spots
            .values()
            .find(|spot| spot.available && spot.vehicle_type == vehicle_type)
            .map(|spot| spot.id))
    }

    async fn update_spot_availability(
        &self,
        id: SpotId,
        available: bool,
    ) -> Result<(), ParkingError> {
        let mut state = self.state.write().await;
        let spot = state
            .spots
            .get_mut(&id)
            .ok_or(ParkingError::SpotNotFound(id))?;
        spot.available = available;
        Ok(())
    }

    async fn claim_spot(&self, id: SpotId) -> Result<bool, ParkingError> {
        let mut state = self.state.write().await;
        match state.spots.get_mut(&id) {
            Some(spot) if spot.available => {
                spot.occupy();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn list_spots(&self) -> Result<Vec<ParkingSpot>, ParkingError> {
        Ok(self.state.read().await.spots.values().copied().collect())
    }

    async fn save_ticket(&self, ticket: &Ticket) -> Result<TicketId, ParkingError> {
        let mut state = self.state.write().await;
        state.last_ticket_id = state.last_ticket_id.saturating_add(1);
        let id = state.last_ticket_id;
        let mut stored = ticket.clone();
        stored.id = Some(id);
        state.tickets.push(stored);
        Ok(id)
    }

    async fn get_open_or_latest_ticket(
        &self,
        registration_number: &str,
    ) -> Result<Option<Ticket>, ParkingError> {
        let state = self.state.read().await;
        let mut found: Option<&Ticket> = None;
        for ticket in state
            .tickets
            .iter()
            .filter(|t| t.registration_number == registration_number)
        {
            let better = match found {
                None => true,
                Some(current) => {
                    (ticket.is_open(), ticket.in_time, ticket.id)
                        > (current.is_open(), current.in_time, current.id)
                }
            };
            if better {
                found = Some(ticket);
            }
        }
        let Some(ticket) = found else {
            return Ok(None);
        };
        let mut ticket = ticket.clone();
        if let Some(spot) = state.spots.get(&ticket.spot.id) {
            ticket.spot = *spot;
        }
        Ok(Some(ticket))
    }

    async fn update_ticket_on_exit(&self, ticket: &Ticket) -> Result<(), ParkingError> {
        let (id, out_time) = exit_fields(ticket)?;
        let mut state = self.state.write().await;
        let stored = state
            .tickets
            .iter_mut()
            .find(|t| t.id == Some(id) && t.is_open())
            .ok_or_else(|| ParkingError::TicketNotFound(ticket.registration_number.clone()))?;
        stored.price = ticket.price;
        stored.out_time = Some(out_time);
        Ok(())
    }

    async fn count_tickets_for(&self, registration_number: &str) -> Result<i64, ParkingError> {
        let state = self.state.read().await;
        let count = state
            .tickets
            .iter()
            .filter(|t| t.registration_number == registration_number)
            .count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn seeded_layout_numbers_cars_before_bikes() {
        let store = InMemoryParkingStore::seeded(3, 2);
        let Ok(spots) = store.list_spots().await else {
            panic!("list failed");
        };
        let layout: Vec<(i32, VehicleType)> =
            spots.iter().map(|s| (s.id.get(), s.vehicle_type)).collect();
        assert_eq!(
            layout,
            vec![
                (1, VehicleType::Car),
                (2, VehicleType::Car),
                (3, VehicleType::Car),
                (4, VehicleType::Bike),
                (5, VehicleType::Bike),
            ]
        );
        assert!(spots.iter().all(|s| s.available));
    }

    #[tokio::test]
    async fn next_available_returns_smallest_free_id() {
        let store = InMemoryParkingStore::seeded(3, 2);
        let _ = store.update_spot_availability(SpotId::new(1), false).await;

        let next = store.next_available_spot(VehicleType::Car).await.ok().flatten();
        assert_eq!(next, Some(SpotId::new(2)));

        let next = store.next_available_spot(VehicleType::Bike).await.ok().flatten();
        assert_eq!(next, Some(SpotId::new(4)));
    }

    #[tokio::test]
    async fn next_available_is_none_when_type_is_full() {
        let store = InMemoryParkingStore::seeded(1, 1);
        let _ = store.update_spot_availability(SpotId::new(1), false).await;

        let next = store.next_available_spot(VehicleType::Car).await;
        assert!(matches!(next, Ok(None)));
    }

    #[tokio::test]
    async fn update_unknown_spot_is_reported() {
        let store = InMemoryParkingStore::seeded(1, 0);
        let result = store.update_spot_availability(SpotId::new(99), true).await;
        assert!(matches!(result, Err(ParkingError::SpotNotFound(_))));
    }

    #[tokio::test]
    async fn claim_succeeds_only_once() {
        let store = InMemoryParkingStore::seeded(1, 0);
        assert!(matches!(store.claim_spot(SpotId::new(1)).await, Ok(true)));
        assert!(matches!(store.claim_spot(SpotId::new(1)).await, Ok(false)));
    }

    #[tokio::test]
    async fn open_ticket_wins_over_newer_closed_one() {
        let store = InMemoryParkingStore::seeded(2, 0);
        let now = Utc::now();
        let spot = ParkingSpot::new(SpotId::new(1), VehicleType::Car, false);

        let mut open = Ticket::open(spot, "AB-123".to_string(), now - Duration::hours(3));
        let mut closed = Ticket::open(spot, "AB-123".to_string(), now - Duration::hours(1));
        closed.out_time = Some(now);
        closed.price = Decimal::new(150, 2);

        let Ok(open_id) = store.save_ticket(&open).await else {
            panic!("save failed");
        };
        let _ = store.save_ticket(&closed).await;
        open.id = Some(open_id);

        let found = store.get_open_or_latest_ticket("AB-123").await.ok().flatten();
        assert_eq!(found.map(|t| t.id), Some(open.id));
    }

    #[tokio::test]
    async fn latest_closed_ticket_is_returned_without_open_one() {
        let store = InMemoryParkingStore::seeded(1, 0);
        let now = Utc::now();
        let spot = ParkingSpot::new(SpotId::new(1), VehicleType::Car, true);

        let mut older = Ticket::open(spot, "ZZ-1".to_string(), now - Duration::days(2));
        older.out_time = Some(now - Duration::days(1));
        let mut newer = Ticket::open(spot, "ZZ-1".to_string(), now - Duration::hours(2));
        newer.out_time = Some(now);

        let _ = store.save_ticket(&older).await;
        let Ok(newer_id) = store.save_ticket(&newer).await else {
            panic!("save failed");
        };

        let found = store.get_open_or_latest_ticket("ZZ-1").await.ok().flatten();
        assert_eq!(found.and_then(|t| t.id), Some(newer_id));
    }

    #[tokio::test]
    async fn update_ticket_on_exit_requires_saved_ticket() {
        let store = InMemoryParkingStore::seeded(1, 0);
        let spot = ParkingSpot::new(SpotId::new(1), VehicleType::Car, false);
        let mut ticket = Ticket::open(spot, "AB-123".to_string(), Utc::now());
        ticket.out_time = Some(Utc::now());

        let result = store.update_ticket_on_exit(&ticket).await;
        assert!(matches!(result, Err(ParkingError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn closed_ticket_cannot_be_closed_again() {
        let store = InMemoryParkingStore::seeded(1, 0);
        let spot = ParkingSpot::new(SpotId::new(1), VehicleType::Car, false);
        let mut ticket = Ticket::open(spot, "AB-123".to_string(), Utc::now() - Duration::hours(1));
        let Ok(id) = store.save_ticket(&ticket).await else {
            panic!("save failed");
        };
        ticket.id = Some(id);
        ticket.out_time = Some(Utc::now());
        ticket.price = Decimal::new(150, 2);

        assert!(store.update_ticket_on_exit(&ticket).await.is_ok());

        ticket.price = Decimal::new(999, 2);
        let again = store.update_ticket_on_exit(&ticket).await;
        assert!(matches!(again, Err(ParkingError::TicketNotFound(_))));
        let stored = store.tickets().await;
        assert_eq!(stored.first().map(|t| t.price), Some(Decimal::new(150, 2)));
    }

    #[tokio::test]
    async fn count_includes_open_and_closed_tickets() {
        let store = InMemoryParkingStore::seeded(2, 0);
        let spot = ParkingSpot::new(SpotId::new(1), VehicleType::Car, false);
        let _ = store
            .save_ticket(&Ticket::open(spot, "AB-123".to_string(), Utc::now()))
            .await;
        let _ = store
            .save_ticket(&Ticket::open(spot, "AB-123".to_string(), Utc::now()))
            .await;
        let _ = store
            .save_ticket(&Ticket::open(spot, "OTHER".to_string(), Utc::now()))
            .await;

        assert_eq!(store.count_tickets_for("AB-123").await.ok(), Some(2));
        assert_eq!(store.count_tickets_for("NOPE").await.ok(), Some(0));
    }
}
