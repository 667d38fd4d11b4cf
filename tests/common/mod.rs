//! Shared helpers: an in-memory gateway bound to an ephemeral port.

#![allow(dead_code, clippy::panic)]

use std::net::SocketAddr;
use std::time::Duration;

use parkit_gateway::app_state::AppState;
use parkit_gateway::build_app;
use parkit_gateway::config::GatewayConfig;

/// Starts a gateway over an in-memory lot and returns its address.
pub async fn spawn_gateway(car_spots: u32, bike_spots: u32) -> SocketAddr {
    let config = GatewayConfig {
        persistence_enabled: false,
        car_spots,
        bike_spots,
        ..GatewayConfig::default()
    };
    let app = build_app(AppState::in_memory(&config), Duration::from_secs(5));

    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("cannot bind ephemeral port");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("listener has no address");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// Absolute URL for `path` on the gateway at `addr`.
pub fn url(addr: SocketAddr, path: &str) -> String {
    format!("http://{addr}{path}")
}
