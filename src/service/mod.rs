//! Service layer: business logic orchestration.
//!
//! [`ParkingService`] runs the entry and exit flows. It picks spots through
//! [`SpotAllocator`], prices stays with [`FareCalculator`], and emits events
//! through the [`super::domain::EventBus`].

pub mod fare_calculator;
pub mod parking_service;
pub mod spot_allocator;

pub use fare_calculator::{FareCalculator, FareSchedule};
pub use parking_service::{EntryReceipt, ExitReceipt, ParkingService};
pub use spot_allocator::SpotAllocator;
