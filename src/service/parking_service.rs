//! Parking service: orchestrates vehicle entry and exit.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use super::fare_calculator::{FareCalculator, FareSchedule};
use super::spot_allocator::SpotAllocator;
use crate::domain::{EventBus, ParkingEvent, ParkingSpot, Ticket, VehicleType};
use crate::error::ParkingError;
use crate::input::InputSource;
use crate::persistence::ParkingStore;

/// Outcome of a successful entry.
#[derive(Debug, Clone, Serialize)]
pub struct EntryReceipt {
    /// The saved, open ticket.
    pub ticket: Ticket,
    /// The vehicle already had at least one ticket before this visit.
    pub returning_customer: bool,
}

/// Outcome of an exit.
///
/// Ticket update and spot release are independent writes; each flag
/// reports whether its write reached storage.
#[derive(Debug, Clone, Serialize)]
pub struct ExitReceipt {
    /// The priced ticket with its exit time.
    pub ticket: Ticket,
    /// The loyalty discount was applied to the rate.
    pub discount_applied: bool,
    /// Price and exit time were persisted.
    pub ticket_updated: bool,
    /// The spot was marked available again.
    pub spot_released: bool,
}

impl ExitReceipt {
    /// Returns `true` when both exit writes succeeded.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.ticket_updated && self.spot_released
    }
}

/// At entry the current visit is not yet stored, so one earlier ticket is
/// enough to count as returning.
const fn returning_at_entry(prior_tickets: i64) -> bool {
    prior_tickets >= 1
}

/// At exit the count includes the ticket being closed.
const fn discount_at_exit(tickets_including_current: i64) -> bool {
    tickets_including_current > 1
}

/// Orchestration layer for parking sessions.
///
/// Stateless coordinator: storage lives behind [`ParkingStore`], spot
/// selection in [`SpotAllocator`], pricing in [`FareCalculator`]. Every
/// completed flow publishes events on the [`EventBus`].
#[derive(Debug, Clone)]
pub struct ParkingService {
    store: Arc<dyn ParkingStore>,
    allocator: SpotAllocator,
    fare_calculator: FareCalculator,
    event_bus: EventBus,
}

impl ParkingService {
    /// Creates a new `ParkingService`.
    #[must_use]
    pub fn new(store: Arc<dyn ParkingStore>, schedule: FareSchedule, event_bus: EventBus) -> Self {
        Self {
            allocator: SpotAllocator::new(Arc::clone(&store)),
            store,
            fare_calculator: FareCalculator::new(schedule),
            event_bus,
        }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns the fare schedule exits are priced with.
    #[must_use]
    pub const fn fare_schedule(&self) -> &FareSchedule {
        self.fare_calculator.schedule()
    }

    /// Returns the fare calculator.
    #[must_use]
    pub const fn fare_calculator(&self) -> &FareCalculator {
        &self.fare_calculator
    }

    /// Parks a vehicle: reserves a spot and issues an open ticket.
    ///
    /// Reads the vehicle type, checks that a spot of that type is free,
    /// then reads the registration number. The spot is claimed atomically;
    /// if the ticket cannot be saved afterwards, the spot is released again
    /// so no spot stays occupied without a ticket.
    ///
    /// # Errors
    ///
    /// - [`ParkingError::InvalidVehicleType`] / [`ParkingError::InvalidInput`]
    ///   when the input is rejected.
    /// - [`ParkingError::SpotUnavailable`] when the lot is full for the type;
    ///   no ticket is created.
    /// - [`ParkingError::PersistenceError`] when storage fails.
    pub async fn process_incoming_vehicle(
        &self,
        input: &mut dyn InputSource,
    ) -> Result<EntryReceipt, ParkingError> {
        let vehicle_type = input.read_vehicle_type_selection()?;
        if self.allocator.next_available_spot(vehicle_type).await?.is_none() {
            tracing::info!(%vehicle_type, "parking full, no ticket issued");
            return Err(ParkingError::SpotUnavailable(vehicle_type));
        }

        let registration_number = input.read_registration_number()?;
        let prior_tickets = self.store.count_tickets_for(&registration_number).await?;
        let returning_customer = returning_at_entry(prior_tickets);

        let Some(mut spot) = self.allocator.reserve_next(vehicle_type).await? else {
            tracing::info!(%vehicle_type, "last spot taken concurrently, no ticket issued");
            return Err(ParkingError::SpotUnavailable(vehicle_type));
        };

        let mut ticket = Ticket::open(spot, registration_number, Utc::now());
        let ticket_id = match self.store.save_ticket(&ticket).await {
            Ok(id) => id,
            Err(err) => {
                tracing::error!(spot_id = %spot.id, error = %err, "ticket not saved, releasing spot");
                if let Err(release_err) = self.allocator.release(&mut spot).await {
                    tracing::error!(spot_id = %spot.id, error = %release_err, "spot left occupied without a ticket");
                }
                return Err(err);
            }
        };
        ticket.id = Some(ticket_id);

        self.publish_availability(&spot);
        let _ = self.event_bus.publish(ParkingEvent::VehicleParked {
            ticket_id,
            spot_id: spot.id,
            vehicle_type,
            registration_number: ticket.registration_number.clone(),
            returning_customer,
            timestamp: ticket.in_time,
        });

        tracing::info!(
            ticket_id,
            spot_id = %spot.id,
            %vehicle_type,
            registration_number = %ticket.registration_number,
            returning_customer,
            "vehicle parked"
        );
        Ok(EntryReceipt {
            ticket,
            returning_customer,
        })
    }

    /// Checks a vehicle out: prices its open ticket and frees the spot.
    ///
    /// The ticket update and the spot release are attempted independently:
    /// a failed ticket write does not stop the spot from being freed. The
    /// receipt reports the outcome of each.
    ///
    /// # Errors
    ///
    /// - [`ParkingError::InvalidInput`] when the registration number is
    ///   rejected or the stored entry time lies after now.
    /// - [`ParkingError::TicketNotFound`] when the vehicle has no open
    ///   ticket, or a concurrent exit closed it first; the spot is left
    ///   untouched.
    /// - [`ParkingError::PersistenceError`] when the ticket lookup fails.
    pub async fn process_exiting_vehicle(
        &self,
        input: &mut dyn InputSource,
    ) -> Result<ExitReceipt, ParkingError> {
        let registration_number = input.read_registration_number()?;
        let found = self
            .store
            .get_open_or_latest_ticket(&registration_number)
            .await?;
        let Some(mut ticket) = found.filter(Ticket::is_open) else {
            tracing::info!(%registration_number, "no open ticket for exiting vehicle");
            return Err(ParkingError::TicketNotFound(registration_number));
        };

        ticket.out_time = Some(Utc::now());
        let ticket_count = self.store.count_tickets_for(&registration_number).await?;
        let discount_applied = discount_at_exit(ticket_count);
        ticket.price = self
            .fare_calculator
            .calculate_fare(&ticket, discount_applied)?;

        let ticket_updated = match self.store.update_ticket_on_exit(&ticket).await {
            Ok(()) => true,
            Err(ParkingError::TicketNotFound(_)) => {
                tracing::info!(ticket_id = ?ticket.id, %registration_number, "ticket already closed by another exit");
                return Err(ParkingError::TicketNotFound(registration_number));
            }
            Err(err) => {
                tracing::error!(ticket_id = ?ticket.id, error = %err, "unable to update ticket on exit");
                false
            }
        };

        let mut spot = ticket.spot;
        let spot_released = match self.allocator.release(&mut spot).await {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(spot_id = %spot.id, error = %err, "unable to release spot on exit");
                false
            }
        };
        ticket.spot = spot;

        if spot_released {
            self.publish_availability(&spot);
        }
        if let Some(ticket_id) = ticket.id
            && ticket_updated
        {
            let _ = self.event_bus.publish(ParkingEvent::VehicleExited {
                ticket_id,
                spot_id: spot.id,
                vehicle_type: spot.vehicle_type,
                registration_number: ticket.registration_number.clone(),
                price: ticket.price,
                discount_applied,
                timestamp: ticket.out_time.unwrap_or_else(Utc::now),
            });
        }

        tracing::info!(
            ticket_id = ?ticket.id,
            spot_id = %spot.id,
            price = %ticket.price,
            discount_applied,
            ticket_updated,
            spot_released,
            "vehicle exited"
        );
        Ok(ExitReceipt {
            ticket,
            discount_applied,
            ticket_updated,
            spot_released,
        })
    }

    /// Runs [`Self::process_incoming_vehicle`] on its own task.
    ///
    /// The flow completes even if the caller stops waiting, so a dropped
    /// request never strands a claimed spot without its ticket.
    ///
    /// # Errors
    ///
    /// Same as [`Self::process_incoming_vehicle`], plus
    /// [`ParkingError::Internal`] if the task panicked.
    pub async fn process_incoming_detached<I>(
        self: &Arc<Self>,
        mut input: I,
    ) -> Result<EntryReceipt, ParkingError>
    where
        I: InputSource + 'static,
    {
        let service = Arc::clone(self);
        tokio::spawn(async move { service.process_incoming_vehicle(&mut input).await })
            .await
            .map_err(|e| ParkingError::Internal(format!("entry task failed: {e}")))?
    }

    /// Runs [`Self::process_exiting_vehicle`] on its own task.
    ///
    /// # Errors
    ///
    /// Same as [`Self::process_exiting_vehicle`], plus
    /// [`ParkingError::Internal`] if the task panicked.
    pub async fn process_exiting_detached<I>(
        self: &Arc<Self>,
        mut input: I,
    ) -> Result<ExitReceipt, ParkingError>
    where
        I: InputSource + 'static,
    {
        let service = Arc::clone(self);
        tokio::spawn(async move { service.process_exiting_vehicle(&mut input).await })
            .await
            .map_err(|e| ParkingError::Internal(format!("exit task failed: {e}")))?
    }

    /// Reads a vehicle type from `input` and returns the next free spot of
    /// that type, or `None` when the lot is full for it.
    ///
    /// # Errors
    ///
    /// Returns [`ParkingError::InvalidVehicleType`] for an unknown
    /// selection, or [`ParkingError::PersistenceError`] on storage failure.
    pub async fn next_available_spot(
        &self,
        input: &mut dyn InputSource,
    ) -> Result<Option<ParkingSpot>, ParkingError> {
        let vehicle_type = input.read_vehicle_type_selection()?;
        self.next_available_spot_for(vehicle_type).await
    }

    /// Returns the next free spot of `vehicle_type`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ParkingError::PersistenceError`] on storage failure.
    pub async fn next_available_spot_for(
        &self,
        vehicle_type: VehicleType,
    ) -> Result<Option<ParkingSpot>, ParkingError> {
        self.allocator.next_available_spot(vehicle_type).await
    }

    /// Lists every spot with its current availability.
    ///
    /// # Errors
    ///
    /// Returns [`ParkingError::PersistenceError`] on storage failure.
    pub async fn list_spots(&self) -> Result<Vec<ParkingSpot>, ParkingError> {
        self.store.list_spots().await
    }

    /// Returns the open ticket of a vehicle, or its latest closed one.
    ///
    /// # Errors
    ///
    /// Returns [`ParkingError::TicketNotFound`] when the vehicle has no
    /// ticket, or [`ParkingError::PersistenceError`] on storage failure.
    pub async fn find_ticket(&self, registration_number: &str) -> Result<Ticket, ParkingError> {
        self.store
            .get_open_or_latest_ticket(registration_number)
            .await?
            .ok_or_else(|| ParkingError::TicketNotFound(registration_number.to_string()))
    }

    fn publish_availability(&self, spot: &ParkingSpot) {
        let _ = self.event_bus.publish(ParkingEvent::SpotAvailabilityChanged {
            spot_id: spot.id,
            vehicle_type: spot.vehicle_type,
            available: spot.available,
            timestamp: Utc::now(),
        });
    }
}
