//! Data Transfer Objects for REST request/response serialization.
//!
//! Monetary amounts are serialized as JSON strings to keep their exact
//! decimal value.

pub mod spot_dto;
pub mod ticket_dto;
pub mod vehicle_dto;

pub use spot_dto::*;
pub use ticket_dto::*;
pub use vehicle_dto::*;
