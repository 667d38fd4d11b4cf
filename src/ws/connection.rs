//! WebSocket connection state machine.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching incoming commands and forwarding filtered events.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{WsCommand, WsMessage, WsMessageType};
use super::subscription::SubscriptionManager;
use crate::api::dto::SpotDto;
use crate::domain::{ParkingEvent, VehicleType};
use crate::service::ParkingService;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and dispatches them.
/// - Forwards matching events from the [`broadcast::Receiver`] to the client.
pub async fn run_connection(
    socket: WebSocket,
    mut event_rx: broadcast::Receiver<ParkingEvent>,
    parking_service: Arc<ParkingService>,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();

    loop {
        tokio::select! {
            // Incoming message from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let response = handle_text_message(&text, &mut subs, &parking_service).await;
                        if let Some(resp_json) = response
                            && ws_tx.send(Message::text(resp_json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            // Event from EventBus
            event = event_rx.recv() => {
                match event {
                    Ok(parking_event) => {
                        if subs.matches(parking_event.vehicle_type()) {
                            let msg = WsMessage::new(
                                uuid::Uuid::new_v4().to_string(),
                                WsMessageType::Event,
                                serde_json::to_value(&parking_event).unwrap_or_default(),
                            );
                            let json = serde_json::to_string(&msg).unwrap_or_default();
                            if ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

/// Splits raw vehicle-type names into parsed types, the wildcard flag, and
/// the names that were not recognised.
fn parse_vehicle_types(raw: &[String]) -> (Vec<VehicleType>, bool, Vec<String>) {
    let mut types = Vec::new();
    let mut wildcard = false;
    let mut rejected = Vec::new();
    for name in raw {
        if name.trim() == "*" {
            wildcard = true;
        } else if let Ok(vehicle_type) = name.parse::<VehicleType>() {
            types.push(vehicle_type);
        } else {
            rejected.push(name.clone());
        }
    }
    (types, wildcard, rejected)
}

/// Handles a text message from the client, returning an optional JSON response.
async fn handle_text_message(
    text: &str,
    subs: &mut SubscriptionManager,
    parking_service: &ParkingService,
) -> Option<String> {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        return serde_json::to_string(&WsMessage::error("", 400, "malformed JSON")).ok();
    };
    if msg.msg_type != WsMessageType::Command {
        return serde_json::to_string(&WsMessage::error(msg.id, 400, "expected a command")).ok();
    }
    let Ok(command) = serde_json::from_value::<WsCommand>(msg.payload) else {
        return serde_json::to_string(&WsMessage::error(msg.id, 404, "unknown command")).ok();
    };

    let response = match command {
        WsCommand::Subscribe { vehicle_types } => {
            let (types, wildcard, rejected) = parse_vehicle_types(&vehicle_types);
            subs.subscribe(&types, wildcard);
            WsMessage::new(
                msg.id,
                WsMessageType::Response,
                serde_json::json!({
                    "subscribed": types.iter().map(|t| t.as_str()).collect::<Vec<_>>(),
                    "rejected": rejected,
                    "count": subs.count(),
                    "wildcard": subs.is_subscribed_all(),
                }),
            )
        }
        WsCommand::Unsubscribe { vehicle_types } => {
            let (types, wildcard, rejected) = parse_vehicle_types(&vehicle_types);
            subs.unsubscribe(&types, wildcard);
            WsMessage::new(
                msg.id,
                WsMessageType::Response,
                serde_json::json!({
                    "unsubscribed": types.iter().map(|t| t.as_str()).collect::<Vec<_>>(),
                    "rejected": rejected,
                    "remaining_count": subs.count(),
                    "wildcard": subs.is_subscribed_all(),
                }),
            )
        }
        WsCommand::Availability => {
            let mut payload = serde_json::Map::new();
            for vehicle_type in VehicleType::ALL {
                match parking_service.next_available_spot_for(vehicle_type).await {
                    Ok(spot) => {
                        let spot = spot.map(SpotDto::from);
                        payload.insert(
                            vehicle_type.as_str().to_string(),
                            serde_json::to_value(spot).unwrap_or_default(),
                        );
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "availability query failed");
                        return serde_json::to_string(&WsMessage::error(
                            msg.id,
                            err.error_code(),
                            &err.to_string(),
                        ))
                        .ok();
                    }
                }
            }
            WsMessage::new(
                msg.id,
                WsMessageType::Response,
                serde_json::Value::Object(payload),
            )
        }
    };
    serde_json::to_string(&response).ok()
}
