//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The WebSocket endpoint at `/ws` streams parking events filtered by
//! vehicle type and answers availability queries.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
