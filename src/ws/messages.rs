//! WebSocket message types: envelope, commands, and events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level WebSocket message envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsMessage {
    /// Client-provided ID for requests; server-generated for events.
    pub id: String,
    /// Message type discriminator.
    #[serde(rename = "type")]
    pub msg_type: WsMessageType,
    /// ISO-8601 timestamp.
    pub timestamp: DateTime<Utc>,
    /// Variant-specific payload.
    pub payload: serde_json::Value,
}

impl WsMessage {
    /// Builds a server message stamped with the current time.
    #[must_use]
    pub fn new(id: impl Into<String>, msg_type: WsMessageType, payload: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            msg_type,
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Builds an error message with a numeric code.
    #[must_use]
    pub fn error(id: impl Into<String>, code: u32, message: &str) -> Self {
        Self::new(
            id,
            WsMessageType::Error,
            serde_json::json!({ "code": code, "message": message }),
        )
    }
}

/// Discriminator for WebSocket message types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WsMessageType {
    /// Client → Server command.
    Command,
    /// Server → Client response to a command.
    Response,
    /// Server → Client broadcast event.
    Event,
    /// Server → Client error.
    Error,
}

/// Commands that a client can send over WebSocket.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum WsCommand {
    /// Subscribe to events for specific vehicle types.
    Subscribe {
        /// Vehicle types (`"car"`, `"bike"`). Use `["*"]` for all.
        vehicle_types: Vec<String>,
    },
    /// Unsubscribe from events for specific vehicle types.
    Unsubscribe {
        /// Vehicle types to drop.
        vehicle_types: Vec<String>,
    },
    /// Report the next free spot of every vehicle type.
    Availability,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn parses_subscribe_command() {
        let payload = serde_json::json!({ "command": "subscribe", "vehicle_types": ["car", "*"] });
        let Ok(cmd) = serde_json::from_value::<WsCommand>(payload) else {
            panic!("subscribe should parse");
        };
        assert_eq!(
            cmd,
            WsCommand::Subscribe {
                vehicle_types: vec!["car".to_string(), "*".to_string()]
            }
        );
    }

    #[test]
    fn parses_availability_command() {
        let payload = serde_json::json!({ "command": "availability" });
        assert!(matches!(
            serde_json::from_value::<WsCommand>(payload),
            Ok(WsCommand::Availability)
        ));
    }

    #[test]
    fn envelope_uses_type_key() {
        let msg = WsMessage::error("42", 404, "unknown command");
        let Ok(json) = serde_json::to_value(&msg) else {
            panic!("envelope should serialize");
        };
        assert_eq!(json.get("type"), Some(&serde_json::json!("error")));
        assert_eq!(json.get("id"), Some(&serde_json::json!("42")));
    }
}
