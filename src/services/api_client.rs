// ============================================================================
// API CLIENT - HTTP only (stateless), gloo-net over the Fetch API
// ============================================================================

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use uuid::Uuid;
use web_sys::UrlSearchParams;

use crate::config::CONFIG;
use crate::models::{
    Alert, CommandAck, Convoy, LoginResponse, Mission, RouteRequest, RouteResponse, SystemStatus,
    Threat, ThreatFilter,
};
use crate::services::api::{
    bearer_header, decode_command, decode_response, login_form, ApiError, ConvoyApi, Endpoint,
};

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_base_url(CONFIG.api_base_url())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn url(&self, endpoint: &Endpoint) -> String {
        endpoint.url(&self.base_url)
    }

    fn authorize(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match bearer_header(token) {
            Some((name, value)) => builder.header(name, &value),
            None => builder,
        }
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint, token: Option<&str>) -> Result<Option<T>, ApiError> {
        self.get_with_query(endpoint, token, Vec::new()).await
    }

    async fn get_with_query<'q, T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        token: Option<&str>,
        query: Vec<(&'q str, &'q str)>,
    ) -> Result<Option<T>, ApiError> {
        let url = self.url(&endpoint);
        log::debug!("📡 GET {} {:?}", url, query);
        let response = Self::authorize(Request::get(&url), token)
            .query(query)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_response(response).await
    }

    async fn post_command(&self, endpoint: Endpoint, token: Option<&str>) -> Result<Option<CommandAck>, ApiError> {
        let url = self.url(&endpoint);
        log::debug!("📡 POST {}", url);
        let response = Self::authorize(Request::post(&url), token)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let raw = RawResponse::read(response).await?;
        decode_command(raw.status, &raw.status_text, raw.content_length.as_deref(), &raw.body)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

struct RawResponse {
    status: u16,
    status_text: String,
    content_length: Option<String>,
    body: String,
}

impl RawResponse {
    async fn read(response: Response) -> Result<Self, ApiError> {
        let status = response.status();
        let status_text = response.status_text();
        let content_length = response.headers().get("content-length");
        let body = if status == 204 {
            String::new()
        } else {
            response
                .text()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?
        };
        Ok(Self {
            status,
            status_text,
            content_length,
            body,
        })
    }
}

async fn read_response<T: DeserializeOwned>(response: Response) -> Result<Option<T>, ApiError> {
    let raw = RawResponse::read(response).await?;
    decode_response(raw.status, &raw.status_text, raw.content_length.as_deref(), &raw.body)
}

#[async_trait(?Send)]
impl ConvoyApi for ApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let url = self.url(&Endpoint::Login);
        log::info!("🔐 Login request for {}", username);

        let form = UrlSearchParams::new().map_err(|e| ApiError::Encode(format!("{:?}", e)))?;
        for (name, value) in login_form(username, password) {
            form.append(name, value);
        }

        let response = Request::post(&url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(form)
            .map_err(|e| ApiError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(read_response::<LoginResponse>(response).await?.unwrap_or_default())
    }

    async fn system_status(&self, token: Option<&str>) -> Result<SystemStatus, ApiError> {
        Ok(self.get(Endpoint::SystemStatus, token).await?.unwrap_or_default())
    }

    async fn list_convoys(&self, token: Option<&str>) -> Result<Vec<Convoy>, ApiError> {
        Ok(self.get(Endpoint::Convoys, token).await?.unwrap_or_default())
    }

    async fn stop_convoy(&self, token: Option<&str>, convoy_id: &Uuid) -> Result<Option<CommandAck>, ApiError> {
        self.post_command(Endpoint::StopConvoy(*convoy_id), token).await
    }

    async fn list_alerts(&self, token: Option<&str>) -> Result<Vec<Alert>, ApiError> {
        Ok(self.get(Endpoint::Alerts, token).await?.unwrap_or_default())
    }

    async fn acknowledge_alert(&self, token: Option<&str>, alert_id: i64) -> Result<Option<CommandAck>, ApiError> {
        self.post_command(Endpoint::AcknowledgeAlert(alert_id), token).await
    }

    async fn list_threats(&self, token: Option<&str>, filter: &ThreatFilter) -> Result<Vec<Threat>, ApiError> {
        Ok(self
            .get_with_query(Endpoint::Threats, token, filter.query_pairs())
            .await?
            .unwrap_or_default())
    }

    async fn list_missions(&self, token: Option<&str>) -> Result<Vec<Mission>, ApiError> {
        Ok(self.get(Endpoint::Missions, token).await?.unwrap_or_default())
    }

    async fn compute_route(&self, token: Option<&str>, request: &RouteRequest) -> Result<RouteResponse, ApiError> {
        let url = self.url(&Endpoint::Route);
        log::info!("🗺️ Route request ({}, {}) → ({}, {}) mode={}",
                   request.start_lat, request.start_lon, request.end_lat, request.end_lon, request.mode);

        let response = Self::authorize(Request::post(&url), token)
            .json(request)
            .map_err(|e| ApiError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        read_response::<RouteResponse>(response)
            .await?
            .ok_or_else(|| ApiError::Parse("empty route response".to_string()))
    }

    async fn simulate_mission(&self, token: Option<&str>) -> Result<Option<CommandAck>, ApiError> {
        self.post_command(Endpoint::SimulateMission, token).await
    }

    async fn reset_demo(&self, token: Option<&str>) -> Result<Option<CommandAck>, ApiError> {
        self.post_command(Endpoint::ResetDemo, token).await
    }
}
