//! Spot allocation: picks the next free spot of a type and flips spot
//! availability.

use std::sync::Arc;

use crate::domain::{ParkingSpot, VehicleType};
use crate::error::ParkingError;
use crate::persistence::ParkingStore;

/// Upper bound on claim retries when concurrent entries keep taking the
/// selected spot first.
const MAX_CLAIM_ATTEMPTS: usize = 16;

/// Selects and mutates parking spots through the [`ParkingStore`].
#[derive(Debug, Clone)]
pub struct SpotAllocator {
    store: Arc<dyn ParkingStore>,
}

impl SpotAllocator {
    /// Creates an allocator over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn ParkingStore>) -> Self {
        Self { store }
    }

    /// Returns the available spot of `vehicle_type` with the smallest
    /// identifier, or `None` when the lot is full for that type.
    ///
    /// # Errors
    ///
    /// Returns [`ParkingError::PersistenceError`] on storage failure.
    pub async fn next_available_spot(
        &self,
        vehicle_type: VehicleType,
    ) -> Result<Option<ParkingSpot>, ParkingError> {
        let id = self.store.next_available_spot(vehicle_type).await?;
        Ok(id.map(|id| ParkingSpot::new(id, vehicle_type, true)))
    }

    /// Marks the spot occupied in storage, then on the value.
    ///
    /// # Errors
    ///
    /// Returns the store error if the write failed; `spot` is left as is.
    pub async fn occupy(&self, spot: &mut ParkingSpot) -> Result<(), ParkingError> {
        self.store.update_spot_availability(spot.id, false).await?;
        spot.occupy();
        Ok(())
    }

    /// Marks the spot available in storage, then on the value.
    ///
    /// # Errors
    ///
    /// Returns the store error if the write failed; `spot` is left as is.
    pub async fn release(&self, spot: &mut ParkingSpot) -> Result<(), ParkingError> {
        self.store.update_spot_availability(spot.id, true).await?;
        spot.release();
        Ok(())
    }

    /// Occupies the spot only if nobody else has since; returns whether
    /// this caller won it.
    ///
    /// # Errors
    ///
    /// Returns [`ParkingError::PersistenceError`] on storage failure.
    pub async fn claim(&self, spot: &mut ParkingSpot) -> Result<bool, ParkingError> {
        let won = self.store.claim_spot(spot.id).await?;
        if won {
            spot.occupy();
        }
        Ok(won)
    }

    /// Selects and claims the next available spot in one step.
    ///
    /// A spot taken by a concurrent entry between selection and claim is
    /// skipped and selection repeats. Returns `None` once no spot of the
    /// type is left (or contention outlasts the retry budget).
    ///
    /// # Errors
    ///
    /// Returns [`ParkingError::PersistenceError`] on storage failure.
    pub async fn reserve_next(
        &self,
        vehicle_type: VehicleType,
    ) -> Result<Option<ParkingSpot>, ParkingError> {
        for _ in 0..MAX_CLAIM_ATTEMPTS {
            let Some(mut spot) = self.next_available_spot(vehicle_type).await? else {
                return Ok(None);
            };
            if self.claim(&mut spot).await? {
                return Ok(Some(spot));
            }
            tracing::debug!(spot_id = %spot.id, %vehicle_type, "spot claimed concurrently, retrying");
        }
        tracing::warn!(%vehicle_type, "gave up reserving a spot under contention");
        Ok(None)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::SpotId;
    use crate::persistence::InMemoryParkingStore;

    fn allocator(cars: u32, bikes: u32) -> (SpotAllocator, Arc<InMemoryParkingStore>) {
        let store = Arc::new(InMemoryParkingStore::seeded(cars, bikes));
        let dyn_store: Arc<dyn ParkingStore> = Arc::clone(&store) as Arc<dyn ParkingStore>;
        (SpotAllocator::new(dyn_store), store)
    }

    #[tokio::test]
    async fn next_available_is_smallest_id_and_available() {
        let (allocator, _) = allocator(3, 2);
        let Ok(Some(spot)) = allocator.next_available_spot(VehicleType::Bike).await else {
            panic!("expected a bike spot");
        };
        assert_eq!(spot.id, SpotId::new(4));
        assert_eq!(spot.vehicle_type, VehicleType::Bike);
        assert!(spot.available);
    }

    #[tokio::test]
    async fn occupy_and_release_toggle_storage() {
        let (allocator, store) = allocator(2, 0);
        let Ok(Some(mut spot)) = allocator.next_available_spot(VehicleType::Car).await else {
            panic!("expected a car spot");
        };

        assert!(allocator.occupy(&mut spot).await.is_ok());
        assert!(!spot.available);
        let stored = store.get_spot(spot.id).await.ok().flatten();
        assert_eq!(stored.map(|s| s.available), Some(false));

        let next = allocator.next_available_spot(VehicleType::Car).await.ok().flatten();
        assert_eq!(next.map(|s| s.id), Some(SpotId::new(2)));

        assert!(allocator.release(&mut spot).await.is_ok());
        assert!(spot.available);
        let stored = store.get_spot(spot.id).await.ok().flatten();
        assert_eq!(stored.map(|s| s.available), Some(true));
    }

    #[tokio::test]
    async fn failed_write_is_reported_and_value_unchanged() {
        let (allocator, _) = allocator(1, 0);
        let mut ghost = ParkingSpot::new(SpotId::new(42), VehicleType::Car, true);
        let result = allocator.occupy(&mut ghost).await;
        assert!(matches!(result, Err(ParkingError::SpotNotFound(_))));
        assert!(ghost.available);
    }

    #[tokio::test]
    async fn reserve_next_skips_spots_already_taken() {
        let (allocator, store) = allocator(2, 0);
        let _ = store.claim_spot(SpotId::new(1)).await;

        let Ok(Some(spot)) = allocator.reserve_next(VehicleType::Car).await else {
            panic!("expected a reservation");
        };
        assert_eq!(spot.id, SpotId::new(2));
        assert!(!spot.available);

        let none = allocator.reserve_next(VehicleType::Car).await;
        assert!(matches!(none, Ok(None)));
    }
}
