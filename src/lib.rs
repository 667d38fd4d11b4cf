//! # parkit-gateway
//!
//! Parking lot service: allocates spots to cars and bikes, issues tickets on
//! entry and prices stays on exit.
//!
//! The same [`service::ParkingService`] backs three front ends: the REST
//! API, the WebSocket event feed, and the interactive `parkit-shell`
//! console. Storage is either PostgreSQL or an in-memory lot.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket, console)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     ├── InputSource (input/)
//!     │
//!     ├── ParkingService (service/)
//!     │     ├── SpotAllocator
//!     │     └── FareCalculator
//!     ├── EventBus (domain/)
//!     │
//!     └── ParkingStore (persistence/)
//!           ├── PostgreSQL
//!           └── in-memory
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod input;
pub mod persistence;
pub mod service;
pub mod ws;

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

/// Builds the full HTTP application: REST routes, the `/ws` endpoint, and
/// (with the `swagger-ui` feature) the OpenAPI browser.
///
/// Requests running longer than `request_timeout` get `408 Request Timeout`.
pub fn build_app(state: AppState, request_timeout: Duration) -> Router {
    let router = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws::handler::ws_handler));

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", api::openapi::ApiDoc::openapi()),
        )
    };

    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
