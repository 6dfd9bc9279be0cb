// ============================================================================
// API - Backend contract + response handling shared by every transport
// ============================================================================

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::models::{
    Alert, CommandAck, Convoy, LoginResponse, Mission, RouteRequest, RouteResponse, SystemStatus,
    Threat, ThreatFilter,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Request never produced a response
    Network(String),
    /// Non-2xx response; `message` is the body's `detail` or the status text
    Http { status: u16, message: String },
    /// Response body did not match the expected shape
    Parse(String),
    /// Request body could not be built
    Encode(String),
}

impl ApiError {
    /// Message suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Http { status, message } => write!(f, "HTTP {}: {}", status, message),
            ApiError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ApiError::Encode(msg) => write!(f, "Encode error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Backend operations used by the dashboard.
///
/// `token` is attached as a bearer header when present.
#[async_trait(?Send)]
pub trait ConvoyApi {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError>;
    async fn system_status(&self, token: Option<&str>) -> Result<SystemStatus, ApiError>;
    async fn list_convoys(&self, token: Option<&str>) -> Result<Vec<Convoy>, ApiError>;
    async fn stop_convoy(&self, token: Option<&str>, convoy_id: &Uuid) -> Result<Option<CommandAck>, ApiError>;
    async fn list_alerts(&self, token: Option<&str>) -> Result<Vec<Alert>, ApiError>;
    async fn acknowledge_alert(&self, token: Option<&str>, alert_id: i64) -> Result<Option<CommandAck>, ApiError>;
    async fn list_threats(&self, token: Option<&str>, filter: &ThreatFilter) -> Result<Vec<Threat>, ApiError>;
    async fn list_missions(&self, token: Option<&str>) -> Result<Vec<Mission>, ApiError>;
    async fn compute_route(&self, token: Option<&str>, request: &RouteRequest) -> Result<RouteResponse, ApiError>;
    async fn simulate_mission(&self, token: Option<&str>) -> Result<Option<CommandAck>, ApiError>;
    async fn reset_demo(&self, token: Option<&str>) -> Result<Option<CommandAck>, ApiError>;
}

/// Endpoint paths relative to the versioned API root
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    Login,
    SystemStatus,
    Convoys,
    StopConvoy(Uuid),
    Alerts,
    AcknowledgeAlert(i64),
    /// Filters travel as query parameters, see `ThreatFilter::query_pairs`
    Threats,
    Missions,
    Route,
    SimulateMission,
    ResetDemo,
}

impl Endpoint {
    pub fn path(&self) -> String {
        match self {
            Endpoint::Login => "/login".to_string(),
            Endpoint::SystemStatus => "/system_status".to_string(),
            Endpoint::Convoys => "/convoys".to_string(),
            Endpoint::StopConvoy(id) => format!("/convoy/{}/stop", id),
            Endpoint::Alerts => "/alerts".to_string(),
            Endpoint::AcknowledgeAlert(id) => format!("/alerts/acknowledge/{}", id),
            Endpoint::Threats => "/threats".to_string(),
            Endpoint::Missions => "/missions".to_string(),
            Endpoint::Route => "/get_route".to_string(),
            Endpoint::SimulateMission => "/simulate_mission".to_string(),
            Endpoint::ResetDemo => "/reset_demo".to_string(),
        }
    }

    pub fn url(&self, api_base: &str) -> String {
        format!("{}{}", api_base.trim_end_matches('/'), self.path())
    }
}

/// `Authorization` header for a bearer token; no session means no header
pub fn bearer_header(token: Option<&str>) -> Option<(&'static str, String)> {
    token.map(|token| ("Authorization", format!("Bearer {}", token)))
}

/// Fields of the form-encoded login body
pub fn login_form<'a>(username: &'a str, password: &'a str) -> [(&'static str, &'a str); 2] {
    [("username", username), ("password", password)]
}

/// 204 or an explicitly/actually empty body means "no content"
pub fn is_empty_response(status: u16, content_length: Option<&str>, body: &str) -> bool {
    status == 204 || content_length.map(str::trim) == Some("0") || body.trim().is_empty()
}

/// Extract the user-facing message from an error body.
///
/// Uses the JSON `detail` field (string, or the first validation entry's
/// `msg`), falling back to the status text when the body is not JSON.
pub fn error_message(status_text: &str, body: &str) -> String {
    let fallback = || {
        if status_text.trim().is_empty() {
            "An API error occurred".to_string()
        } else {
            status_text.to_string()
        }
    };

    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("detail").and_then(detail_message))
        .unwrap_or_else(fallback)
}

/// Message carried by a `detail` value; `None` when it is null or carries nothing usable
pub fn detail_message(detail: &serde_json::Value) -> Option<String> {
    match detail {
        serde_json::Value::Null => None,
        serde_json::Value::String(detail) => Some(detail.clone()),
        serde_json::Value::Array(items) => items
            .first()
            .and_then(|item| item.get("msg"))
            .and_then(|msg| msg.as_str())
            .map(|msg| msg.to_string()),
        other => Some(other.to_string()),
    }
}

/// Turn a completed response into a typed result.
///
/// `Ok(None)` for empty bodies; `Err(Http)` for non-2xx statuses.
pub fn decode_response<T: DeserializeOwned>(
    status: u16,
    status_text: &str,
    content_length: Option<&str>,
    body: &str,
) -> Result<Option<T>, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::Http {
            status,
            message: error_message(status_text, body),
        });
    }
    if is_empty_response(status, content_length, body) {
        return Ok(None);
    }
    serde_json::from_str::<T>(body)
        .map(Some)
        .map_err(|e| ApiError::Parse(e.to_string()))
}

/// Decode the reply to a command (stop, acknowledge, ...).
///
/// Only the status decides success. A 2xx body is read for an optional
/// `message` string and otherwise ignored, whatever its shape.
pub fn decode_command(
    status: u16,
    status_text: &str,
    content_length: Option<&str>,
    body: &str,
) -> Result<Option<CommandAck>, ApiError> {
    let reply = match decode_response::<serde_json::Value>(status, status_text, content_length, body) {
        Ok(reply) => reply,
        Err(ApiError::Parse(e)) => {
            log::debug!("Command reply is not JSON ({}), ignoring body", e);
            None
        }
        Err(e) => return Err(e),
    };
    Ok(reply.map(|value| CommandAck::from_reply(&value)))
}
