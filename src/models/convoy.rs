use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::GeoPoint;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Convoy {
    pub id: Uuid,
    pub call_sign: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, alias = "speed")]
    pub speed_kmph: f64,
    pub current_location: GeoPoint,
    #[serde(default)]
    pub eta: Option<String>,
}

/// Body returned by command endpoints, usually `{"message": "..."}`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommandAck {
    pub message: Option<String>,
}

impl CommandAck {
    /// Any JSON reply is accepted; only a string `message` is kept
    pub fn from_reply(reply: &serde_json::Value) -> Self {
        Self {
            message: reply.get("message").and_then(|m| m.as_str()).map(str::to_string),
        }
    }
}
