//! Domain layer: parking entities, money rules, and the event system.
//!
//! This module contains the spot and ticket model, vehicle categories,
//! monetary rounding, and the event bus that broadcasts parking state
//! changes.

pub mod event_bus;
pub mod money;
pub mod parking_event;
pub mod parking_spot;
pub mod spot_id;
pub mod ticket;
pub mod vehicle_type;

pub use event_bus::EventBus;
pub use parking_event::ParkingEvent;
pub use parking_spot::ParkingSpot;
pub use spot_id::SpotId;
pub use ticket::{Ticket, TicketId};
pub use vehicle_type::VehicleType;
