//! REST endpoint handlers organized by resource.

pub mod spot;
pub mod system;
pub mod ticket;
pub mod vehicle;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(vehicle::routes())
        .merge(spot::routes())
        .merge(ticket::routes())
}
