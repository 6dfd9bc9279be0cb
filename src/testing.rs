// ============================================================================
// TESTING - In-memory doubles for the platform seams (cfg(test) only)
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use futures::channel::oneshot;
use futures::executor::LocalPool;
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use uuid::Uuid;

use crate::maps::{ConvoyMarker, HeatPoint, LatLng, MapContainer, MapError, MapRenderer};
use crate::models::{
    Alert, CommandAck, Convoy, GeoPoint, LoginResponse, Mission, RouteRequest, RouteResponse, SystemStatus,
    Threat, ThreatFilter, User,
};
use crate::services::api::{decode_command, ConvoyApi, Endpoint};
use crate::services::{ApiError, RefreshHandle, RefreshScheduler, Spawner};
use crate::viewmodels::{AlertCard, ConvoyCard, DashboardStats, MissionCard, RouteSummary, ThreatCard};
use crate::views::{DashboardView, NavItem, ViewId};

// ============================================================================
// TOKENS & FIXTURES
// ============================================================================

/// `header.payload.sig` with `payload` base64url-encoded
pub fn make_token(payload: &str) -> String {
    format!(
        "{}.{}.sig",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(payload)
    )
}

pub fn token_for(sub: &str, role: &str, exp: Option<i64>) -> String {
    let mut claims = serde_json::json!({ "sub": sub, "role": role });
    if let Some(exp) = exp {
        claims["exp"] = serde_json::json!(exp);
    }
    make_token(&claims.to_string())
}

pub fn convoy(call_sign: &str, lat: f64, lon: f64) -> Convoy {
    let seed = call_sign
        .bytes()
        .fold(0u128, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u128));
    Convoy {
        id: Uuid::from_u128(seed),
        call_sign: call_sign.to_string(),
        status: "En Route".to_string(),
        speed_kmph: 60.0,
        current_location: GeoPoint::new(lat, lon),
        eta: None,
    }
}

pub fn alert(id: i64, severity: &str, message: &str) -> Alert {
    Alert {
        id,
        severity: severity.to_string(),
        message: message.to_string(),
        segment_id: None,
        status: None,
        timestamp: None,
    }
}

pub fn threat(classification: &str, status: &str, location: Option<GeoPoint>) -> Threat {
    Threat {
        id: None,
        classification: classification.to_string(),
        verified_status: status.to_string(),
        source_type: "uav".to_string(),
        location,
        lat: None,
        lon: None,
        timestamp: None,
    }
}

// ============================================================================
// API
// ============================================================================

/// Scripted backend that records every request as `"<METHOD> <path>"`
pub struct MockApi {
    calls: RefCell<Vec<String>>,
    login: RefCell<Result<LoginResponse, ApiError>>,
    status: RefCell<SystemStatus>,
    convoys: RefCell<Vec<Convoy>>,
    alerts: RefCell<Vec<Alert>>,
    threats: RefCell<Vec<Threat>>,
    missions: RefCell<Vec<Mission>>,
    route: RefCell<Result<RouteResponse, ApiError>>,
    route_requests: RefCell<Vec<RouteRequest>>,
    threat_filters: RefCell<Vec<ThreatFilter>>,
    /// Raw 2xx body returned by every command endpoint
    command_reply: RefCell<String>,
    /// Keys passed to `fail`: "status", "convoys", "alerts", "threats", "missions", "stop", "acknowledge"
    failing: RefCell<Vec<&'static str>>,
    hold: RefCell<Option<oneshot::Receiver<()>>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            login: RefCell::new(Ok(LoginResponse::default())),
            status: RefCell::new(SystemStatus::default()),
            convoys: RefCell::new(Vec::new()),
            alerts: RefCell::new(Vec::new()),
            threats: RefCell::new(Vec::new()),
            missions: RefCell::new(Vec::new()),
            route: RefCell::new(Err(ApiError::Network("no route scripted".into()))),
            route_requests: RefCell::new(Vec::new()),
            threat_filters: RefCell::new(Vec::new()),
            command_reply: RefCell::new(String::new()),
            failing: RefCell::new(Vec::new()),
            hold: RefCell::new(None),
        }
    }

    pub fn set_login_token(&self, token: String) {
        *self.login.borrow_mut() = Ok(LoginResponse {
            access_token: Some(token),
            token_type: Some("bearer".into()),
            detail: None,
        });
    }

    pub fn set_login_detail(&self, detail: serde_json::Value) {
        *self.login.borrow_mut() = Ok(LoginResponse {
            detail: Some(detail),
            ..LoginResponse::default()
        });
    }

    pub fn fail_login(&self, error: ApiError) {
        *self.login.borrow_mut() = Err(error);
    }

    pub fn set_convoys(&self, convoys: Vec<Convoy>) {
        *self.convoys.borrow_mut() = convoys;
    }

    pub fn set_alerts(&self, alerts: Vec<Alert>) {
        *self.alerts.borrow_mut() = alerts;
    }

    pub fn set_route(&self, route: Result<RouteResponse, ApiError>) {
        *self.route.borrow_mut() = route;
    }

    pub fn set_threats(&self, threats: Vec<Threat>) {
        *self.threats.borrow_mut() = threats;
    }

    pub fn set_command_reply(&self, body: &str) {
        *self.command_reply.borrow_mut() = body.to_string();
    }

    pub fn fail(&self, key: &'static str) {
        self.failing.borrow_mut().push(key);
    }

    /// Park the next data request (login excluded) until the sender fires
    pub fn hold_next_call(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.hold.borrow_mut() = Some(rx);
        tx
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn last_route_request(&self) -> Option<RouteRequest> {
        self.route_requests.borrow().last().cloned()
    }

    pub fn last_threat_filter(&self) -> Option<ThreatFilter> {
        self.threat_filters.borrow().last().cloned()
    }

    fn record(&self, method: &str, endpoint: Endpoint) {
        self.calls.borrow_mut().push(format!("{} {}", method, endpoint.path()));
    }

    fn check(&self, key: &str) -> Result<(), ApiError> {
        if self.failing.borrow().iter().any(|failing| *failing == key) {
            Err(ApiError::Http {
                status: 500,
                message: "Internal Server Error".into(),
            })
        } else {
            Ok(())
        }
    }

    /// Response data is captured before parking so a held call returns what
    /// was current when it was issued
    async fn respond<T>(&self, key: &str, data: T) -> Result<T, ApiError> {
        let hold = self.hold.borrow_mut().take();
        if let Some(rx) = hold {
            let _ = rx.await;
        }
        self.check(key)?;
        Ok(data)
    }

    async fn command(&self, key: &str) -> Result<Option<CommandAck>, ApiError> {
        self.respond(key, ()).await?;
        let body = self.command_reply.borrow().clone();
        decode_command(200, "OK", None, &body)
    }
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl ConvoyApi for MockApi {
    async fn login(&self, username: &str, _password: &str) -> Result<LoginResponse, ApiError> {
        self.calls.borrow_mut().push(format!("login {}", username));
        self.login.borrow().clone()
    }

    async fn system_status(&self, _token: Option<&str>) -> Result<SystemStatus, ApiError> {
        self.record("GET", Endpoint::SystemStatus);
        let data = self.status.borrow().clone();
        self.respond("status", data).await
    }

    async fn list_convoys(&self, _token: Option<&str>) -> Result<Vec<Convoy>, ApiError> {
        self.record("GET", Endpoint::Convoys);
        let data = self.convoys.borrow().clone();
        self.respond("convoys", data).await
    }

    async fn stop_convoy(&self, _token: Option<&str>, convoy_id: &Uuid) -> Result<Option<CommandAck>, ApiError> {
        self.record("POST", Endpoint::StopConvoy(*convoy_id));
        self.command("stop").await
    }

    async fn list_alerts(&self, _token: Option<&str>) -> Result<Vec<Alert>, ApiError> {
        self.record("GET", Endpoint::Alerts);
        let data = self.alerts.borrow().clone();
        self.respond("alerts", data).await
    }

    async fn acknowledge_alert(&self, _token: Option<&str>, alert_id: i64) -> Result<Option<CommandAck>, ApiError> {
        self.record("POST", Endpoint::AcknowledgeAlert(alert_id));
        self.command("acknowledge").await
    }

    async fn list_threats(&self, _token: Option<&str>, filter: &ThreatFilter) -> Result<Vec<Threat>, ApiError> {
        self.record("GET", Endpoint::Threats);
        self.threat_filters.borrow_mut().push(filter.clone());
        let data = self.threats.borrow().clone();
        self.respond("threats", data).await
    }

    async fn list_missions(&self, _token: Option<&str>) -> Result<Vec<Mission>, ApiError> {
        self.record("GET", Endpoint::Missions);
        let data = self.missions.borrow().clone();
        self.respond("missions", data).await
    }

    async fn compute_route(&self, _token: Option<&str>, request: &RouteRequest) -> Result<RouteResponse, ApiError> {
        self.record("POST", Endpoint::Route);
        self.route_requests.borrow_mut().push(request.clone());
        let data = self.route.borrow().clone();
        self.respond("route", ()).await?;
        data
    }

    async fn simulate_mission(&self, _token: Option<&str>) -> Result<Option<CommandAck>, ApiError> {
        self.record("POST", Endpoint::SimulateMission);
        self.command("simulate").await
    }

    async fn reset_demo(&self, _token: Option<&str>) -> Result<Option<CommandAck>, ApiError> {
        self.record("POST", Endpoint::ResetDemo);
        self.command("reset").await
    }
}

// ============================================================================
// MAP
// ============================================================================

#[derive(Default)]
struct MapLayers {
    markers: Vec<ConvoyMarker>,
    heat_layers: Vec<(Vec<HeatPoint>, u32)>,
    routes: Vec<Vec<LatLng>>,
}

/// Renderer that keeps the layers' contents; clones share the same layers
#[derive(Clone, Default)]
pub struct RecordingMap {
    layers: Rc<RefCell<MapLayers>>,
}

impl RecordingMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn renderer(&self) -> RecordingMap {
        self.clone()
    }

    pub fn markers(&self) -> Vec<ConvoyMarker> {
        self.layers.borrow().markers.clone()
    }

    /// The heat layer on the map, if any; panics if more than one is attached
    pub fn heat(&self) -> Option<(Vec<HeatPoint>, u32)> {
        let layers = self.layers.borrow();
        assert!(layers.heat_layers.len() <= 1, "stale heat layer left on the map");
        layers.heat_layers.first().cloned()
    }

    pub fn routes(&self) -> Vec<Vec<LatLng>> {
        self.layers.borrow().routes.clone()
    }
}

impl MapRenderer for RecordingMap {
    fn clear_markers(&mut self) -> Result<(), MapError> {
        self.layers.borrow_mut().markers.clear();
        Ok(())
    }

    fn add_marker(&mut self, marker: &ConvoyMarker) -> Result<(), MapError> {
        self.layers.borrow_mut().markers.push(marker.clone());
        Ok(())
    }

    fn remove_heat_layer(&mut self) -> Result<(), MapError> {
        self.layers.borrow_mut().heat_layers.clear();
        Ok(())
    }

    fn add_heat_layer(&mut self, points: &[HeatPoint], radius: u32) -> Result<(), MapError> {
        self.layers.borrow_mut().heat_layers.push((points.to_vec(), radius));
        Ok(())
    }

    fn clear_route(&mut self) -> Result<(), MapError> {
        self.layers.borrow_mut().routes.clear();
        Ok(())
    }

    fn draw_route(&mut self, path: &[LatLng], _color: &str) -> Result<(), MapError> {
        self.layers.borrow_mut().routes.push(path.to_vec());
        Ok(())
    }
}

// ============================================================================
// VIEW
// ============================================================================

/// Records what the controller rendered
pub struct RecordingView {
    login_shown: Cell<usize>,
    app_user: RefCell<Option<User>>,
    login_error: RefCell<Option<String>>,
    visibility: RefCell<HashMap<ViewId, bool>>,
    visibility_updates: Cell<usize>,
    nav: RefCell<Vec<NavItem>>,
    stats: RefCell<Vec<DashboardStats>>,
    convoys: RefCell<Option<Vec<ConvoyCard>>>,
    alerts: RefCell<Vec<Vec<AlertCard>>>,
    threats: RefCell<Option<Vec<ThreatCard>>>,
    missions: RefCell<Option<Vec<MissionCard>>>,
    route_summary: RefCell<Option<RouteSummary>>,
    route_error: RefCell<Option<String>>,
    confirm_answer: Cell<bool>,
    prompts: RefCell<Vec<String>>,
    maps: RefCell<HashMap<MapContainer, RecordingMap>>,
    map_inits: RefCell<Vec<MapContainer>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self {
            login_shown: Cell::new(0),
            app_user: RefCell::new(None),
            login_error: RefCell::new(None),
            visibility: RefCell::new(HashMap::new()),
            visibility_updates: Cell::new(0),
            nav: RefCell::new(Vec::new()),
            stats: RefCell::new(Vec::new()),
            convoys: RefCell::new(None),
            alerts: RefCell::new(Vec::new()),
            threats: RefCell::new(None),
            missions: RefCell::new(None),
            route_summary: RefCell::new(None),
            route_error: RefCell::new(None),
            confirm_answer: Cell::new(true),
            prompts: RefCell::new(Vec::new()),
            maps: RefCell::new(HashMap::new()),
            map_inits: RefCell::new(Vec::new()),
        }
    }

    pub fn answer_confirm(&self, answer: bool) {
        self.confirm_answer.set(answer);
    }

    pub fn login_shown(&self) -> usize {
        self.login_shown.get()
    }

    pub fn app_user(&self) -> Option<User> {
        self.app_user.borrow().clone()
    }

    pub fn login_error(&self) -> Option<String> {
        self.login_error.borrow().clone()
    }

    /// Views currently visible, in `ViewId::ALL` order
    pub fn visible_views(&self) -> Vec<ViewId> {
        let visibility = self.visibility.borrow();
        ViewId::ALL
            .into_iter()
            .filter(|view| visibility.get(view).copied().unwrap_or(false))
            .collect()
    }

    pub fn visibility_updates(&self) -> usize {
        self.visibility_updates.get()
    }

    pub fn nav(&self) -> Vec<NavItem> {
        self.nav.borrow().clone()
    }

    pub fn last_stats(&self) -> Option<DashboardStats> {
        self.stats.borrow().last().cloned()
    }

    pub fn stats_renders(&self) -> usize {
        self.stats.borrow().len()
    }

    pub fn convoys(&self) -> Option<Vec<ConvoyCard>> {
        self.convoys.borrow().clone()
    }

    pub fn alerts(&self) -> Option<Vec<AlertCard>> {
        self.alerts.borrow().last().cloned()
    }

    pub fn alert_renders(&self) -> usize {
        self.alerts.borrow().len()
    }

    pub fn threats(&self) -> Option<Vec<ThreatCard>> {
        self.threats.borrow().clone()
    }

    pub fn missions(&self) -> Option<Vec<MissionCard>> {
        self.missions.borrow().clone()
    }

    pub fn route_summary(&self) -> Option<RouteSummary> {
        self.route_summary.borrow().clone()
    }

    pub fn route_error(&self) -> Option<String> {
        self.route_error.borrow().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }

    pub fn map(&self, container: MapContainer) -> Option<RecordingMap> {
        self.maps.borrow().get(&container).cloned()
    }

    pub fn map_inits(&self) -> Vec<MapContainer> {
        self.map_inits.borrow().clone()
    }
}

impl Default for RecordingView {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardView for RecordingView {
    fn show_login(&self) {
        self.login_shown.set(self.login_shown.get() + 1);
        *self.app_user.borrow_mut() = None;
    }

    fn show_app(&self, user: &User) {
        *self.app_user.borrow_mut() = Some(user.clone());
    }

    fn set_login_error(&self, message: Option<&str>) {
        *self.login_error.borrow_mut() = message.map(str::to_string);
    }

    fn set_view_visibility(&self, view: ViewId, visible: bool) {
        self.visibility.borrow_mut().insert(view, visible);
        self.visibility_updates.set(self.visibility_updates.get() + 1);
    }

    fn highlight_nav(&self, items: &[NavItem]) {
        *self.nav.borrow_mut() = items.to_vec();
    }

    fn render_stats(&self, stats: &DashboardStats) {
        self.stats.borrow_mut().push(stats.clone());
    }

    fn render_convoys(&self, cards: &[ConvoyCard]) {
        *self.convoys.borrow_mut() = Some(cards.to_vec());
    }

    fn render_alerts(&self, cards: &[AlertCard]) {
        self.alerts.borrow_mut().push(cards.to_vec());
    }

    fn render_threats(&self, cards: &[ThreatCard]) {
        *self.threats.borrow_mut() = Some(cards.to_vec());
    }

    fn render_missions(&self, cards: &[MissionCard]) {
        *self.missions.borrow_mut() = Some(cards.to_vec());
    }

    fn render_route_summary(&self, summary: &RouteSummary) {
        *self.route_summary.borrow_mut() = Some(summary.clone());
    }

    fn render_route_error(&self, message: &str) {
        *self.route_error.borrow_mut() = Some(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.prompts.borrow_mut().push(message.to_string());
        self.confirm_answer.get()
    }

    fn init_map(&self, container: MapContainer) -> Result<Box<dyn MapRenderer>, MapError> {
        self.map_inits.borrow_mut().push(container);
        let map = RecordingMap::new();
        self.maps.borrow_mut().insert(container, map.clone());
        Ok(Box::new(map))
    }
}

// ============================================================================
// SCHEDULING
// ============================================================================

struct Timer {
    period_ms: u32,
    tick: Rc<RefCell<Option<Rc<dyn Fn()>>>>,
}

/// Timers that only fire when the test says so
#[derive(Default)]
pub struct ManualScheduler {
    timers: RefCell<Vec<Timer>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every live timer's tick once
    pub fn fire(&self) {
        let ticks: Vec<Rc<dyn Fn()>> = self
            .timers
            .borrow()
            .iter()
            .filter_map(|timer| timer.tick.borrow().clone())
            .collect();
        for tick in ticks {
            tick();
        }
    }

    pub fn active_periods(&self) -> Vec<u32> {
        self.timers
            .borrow()
            .iter()
            .filter(|timer| timer.tick.borrow().is_some())
            .map(|timer| timer.period_ms)
            .collect()
    }
}

impl RefreshScheduler for ManualScheduler {
    fn every(&self, period_ms: u32, tick: Rc<dyn Fn()>) -> RefreshHandle {
        let slot = Rc::new(RefCell::new(Some(tick)));
        self.timers.borrow_mut().push(Timer {
            period_ms,
            tick: slot.clone(),
        });
        RefreshHandle::new(move || {
            slot.borrow_mut().take();
        })
    }
}

/// Single-threaded executor standing in for the browser's task queue
pub struct TestExecutor {
    pool: RefCell<LocalPool>,
}

impl TestExecutor {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            pool: RefCell::new(LocalPool::new()),
        })
    }

    pub fn spawner(&self) -> Spawner {
        let spawner = self.pool.borrow().spawner();
        Rc::new(move |future: LocalBoxFuture<'static, ()>| {
            if let Err(e) = spawner.spawn_local(future) {
                panic!("test executor shut down: {:?}", e);
            }
        })
    }

    /// Run queued tasks (and whatever they spawn) until all are blocked or done
    pub fn run(&self) {
        self.pool.borrow_mut().run_until_stalled();
    }
}
