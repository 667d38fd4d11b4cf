//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

use crate::config::GatewayConfig;
use crate::domain::EventBus;
use crate::persistence::{InMemoryParkingStore, ParkingStore, PostgresParkingStore};
use crate::service::ParkingService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Parking service for all business logic.
    pub parking_service: Arc<ParkingService>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}

impl AppState {
    /// Wires the service layer on top of `store`.
    #[must_use]
    pub fn with_store(store: Arc<dyn ParkingStore>, config: &GatewayConfig) -> Self {
        let event_bus = EventBus::new(config.event_bus_capacity);
        let parking_service = Arc::new(ParkingService::new(
            store,
            config.fare_schedule,
            event_bus.clone(),
        ));
        Self {
            parking_service,
            event_bus,
        }
    }

    /// In-memory lot seeded with the configured spot counts.
    #[must_use]
    pub fn in_memory(config: &GatewayConfig) -> Self {
        let store = Arc::new(InMemoryParkingStore::seeded(
            config.car_spots,
            config.bike_spots,
        ));
        Self::with_store(store, config)
    }

    /// Builds the state from configuration.
    ///
    /// With persistence enabled this connects to PostgreSQL and applies the
    /// migrations; otherwise the lot lives in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unreachable or a migration fails.
    pub async fn from_config(config: &GatewayConfig) -> anyhow::Result<Self> {
        if !config.persistence_enabled {
            tracing::info!(
                car_spots = config.car_spots,
                bike_spots = config.bike_spots,
                "persistence disabled, using in-memory lot"
            );
            return Ok(Self::in_memory(config));
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(config.database_connect_timeout())
            .connect(&config.database_url)
            .await?;
        let store = PostgresParkingStore::new(pool);
        store.migrate().await?;
        tracing::info!("connected to PostgreSQL, migrations applied");

        Ok(Self::with_store(Arc::new(store), config))
    }
}
