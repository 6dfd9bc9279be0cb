// ============================================================================
// APP - Controller tying session, router, loaders, maps and actions together
// ============================================================================
// Owns AppState; talks to the outside world only through the injected
// ConvoyApi / TokenStore / DashboardView / RefreshScheduler / Spawner.
// ============================================================================

use std::rc::Rc;

use futures::FutureExt;

use crate::config::{AppConfig, MapConfig};
use crate::maps::{MapContainer, MapError};
use crate::models::{Role, Session, ThreatFilter};
use crate::services::{ApiError, ConvoyApi, RefreshScheduler, Spawner, TokenStore};
use crate::state::AppState;
use crate::viewmodels::{
    Action, ActionTarget, ActionViewModel, AuthError, DashboardViewModel, LayerSnapshot, MapViewModel,
    RouteError, RouteSummary, RouteViewModel, SessionViewModel,
};
use crate::views::{nav_items, DashboardView, ViewId};

/// Seconds since the Unix epoch
pub type Clock = Rc<dyn Fn() -> i64>;

#[derive(Clone)]
pub struct App {
    state: AppState,
    api: Rc<dyn ConvoyApi>,
    tokens: Rc<dyn TokenStore>,
    view: Rc<dyn DashboardView>,
    scheduler: Rc<dyn RefreshScheduler>,
    spawn: Spawner,
    clock: Clock,
    refresh_interval_ms: u32,
    map_config: Rc<MapConfig>,
}

impl App {
    pub fn new(
        api: Rc<dyn ConvoyApi>,
        tokens: Rc<dyn TokenStore>,
        view: Rc<dyn DashboardView>,
        scheduler: Rc<dyn RefreshScheduler>,
        spawn: Spawner,
        config: &AppConfig,
    ) -> Self {
        Self {
            state: AppState::new(),
            api,
            tokens,
            view,
            scheduler,
            spawn,
            clock: Rc::new(|| chrono::Utc::now().timestamp()),
            refresh_interval_ms: config.refresh_interval_ms,
            map_config: Rc::new(config.map_config.clone()),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    // ========================================================================
    // SESSION
    // ========================================================================

    /// Log in, persist the token and enter the app; on failure the message is
    /// shown inline and the login view stays up.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), AuthError> {
        log::info!("🔐 Logging in as {}", username);
        match SessionViewModel::login(self.api.as_ref(), username, password).await {
            Ok(session) => {
                if let Err(e) = self.tokens.save(&session.token) {
                    log::error!("❌ {}", e);
                }
                self.view.set_login_error(None);
                self.start_session(session);
                Ok(())
            }
            Err(e) => {
                log::warn!("⚠️ {}", e);
                self.view.set_login_error(Some(&e.user_message()));
                Err(e)
            }
        }
    }

    /// Resume a persisted, unexpired session; otherwise show the login view
    pub fn restore(&self) -> bool {
        match SessionViewModel::restore(self.tokens.as_ref(), (self.clock)()) {
            Some(session) => {
                log::info!("🔄 Restored session for {}", session.user.username);
                self.start_session(session);
                true
            }
            None => {
                self.view.show_login();
                false
            }
        }
    }

    fn start_session(&self, session: Session) {
        log::info!("✅ Session started: {} ({})", session.user.username, session.user.role);
        self.view.show_app(&session.user);
        self.state.session.begin(session);

        let app = self.clone();
        let handle = self
            .scheduler
            .every(self.refresh_interval_ms, Rc::new(move || app.on_refresh_tick()));
        self.state.set_refresh(Some(handle));

        self.show_view(ViewId::Dashboard.element_id());
    }

    /// Clear the token everywhere, stop the refresh timer, back to login. No server call.
    pub fn logout(&self) {
        self.tokens.clear();
        self.state.set_refresh(None);
        if self.state.session.end() {
            log::info!("👋 Logged out");
        }
        self.view.show_login();
    }

    pub fn on_refresh_tick(&self) {
        match self.state.session.current() {
            Some(session) if session.is_expired_at((self.clock)()) => {
                log::warn!("⌛ Session expired, logging out");
                // Leave the timer callback before cancelling its own timer
                let app = self.clone();
                (self.spawn)(async move { app.logout() }.boxed_local());
            }
            Some(_) => self.spawn_load(ViewId::Dashboard),
            None => {}
        }
    }

    // ========================================================================
    // ROUTER
    // ========================================================================

    /// Make `id` the only visible view and load its data. Unknown ids change nothing.
    pub fn show_view(&self, id: &str) -> Option<ViewId> {
        let Some(target) = ViewId::from_element_id(id) else {
            log::warn!("⚠️ Unknown view '{}'", id);
            return None;
        };

        for view in ViewId::ALL {
            self.view.set_view_visibility(view, view == target);
        }
        self.state.active_view.set(target);

        let role = self
            .state
            .session
            .user()
            .map(|user| user.role)
            .unwrap_or_else(|| Role::Other(String::new()));
        self.view.highlight_nav(&nav_items(target, &role));

        log::info!("🧭 Showing {}", target);
        self.spawn_load(target);
        Some(target)
    }

    pub fn active_view(&self) -> ViewId {
        self.state.active_view.get()
    }

    /// Replace the threats filter, reloading the list if it is showing
    pub fn filter_threats(&self, filter: ThreatFilter) {
        log::info!("🔎 Threat filter: {:?}", filter);
        *self.state.threat_filter.borrow_mut() = filter;
        if self.active_view() == ViewId::Threats {
            self.spawn_load(ViewId::Threats);
        }
    }

    fn spawn_load(&self, view: ViewId) {
        let app = self.clone();
        (self.spawn)(async move { app.load_view(view).await }.boxed_local());
    }

    // ========================================================================
    // LOADERS
    // ========================================================================

    /// Run the loader for `view`, logging (not propagating) its failure
    pub async fn load_view(&self, view: ViewId) {
        let result = match view {
            ViewId::Dashboard => self.load_dashboard().await,
            ViewId::Convoys => self.load_convoys().await,
            ViewId::Threats => {
                let filter = self.state.threat_filter.borrow().clone();
                self.load_threats(&filter).await
            }
            ViewId::Alerts => self.load_alerts().await,
            ViewId::Missions => self.load_missions().await,
            // Route results only come from a form submission
            ViewId::Route => Ok(()),
        };
        if let Err(e) = result {
            log::error!("❌ Failed to load {}: {}", view, e);
        }
    }

    fn still_current(&self, epoch: u64, what: &str) -> bool {
        let current = self.state.session.is_current(epoch);
        if !current {
            log::debug!("🗑️ Dropping stale {} response", what);
        }
        current
    }

    pub async fn load_dashboard(&self) -> Result<(), ApiError> {
        let epoch = self.state.session.epoch();
        let token = self.state.session.token();
        let token = token.as_deref();

        let (status, convoys, alerts) = futures::try_join!(
            self.api.system_status(token),
            self.api.list_convoys(token),
            self.api.list_alerts(token),
        )?;
        if !self.still_current(epoch, "dashboard") {
            return Ok(());
        }

        self.view
            .render_stats(&DashboardViewModel::stats(&status, &convoys, &alerts));

        let snapshot = MapViewModel::snapshot(&convoys, &[], None, &self.map_config);
        if let Err(e) = self.update_map(MapContainer::Dashboard, &snapshot) {
            log::error!("❌ Dashboard map update failed: {}", e);
        }
        log::debug!("📊 Dashboard: {} convoys, {} alerts", convoys.len(), alerts.len());
        Ok(())
    }

    pub async fn load_convoys(&self) -> Result<(), ApiError> {
        let epoch = self.state.session.epoch();
        let token = self.state.session.token();
        let convoys = self.api.list_convoys(token.as_deref()).await?;
        if !self.still_current(epoch, "convoys") {
            return Ok(());
        }

        let role = self.state.session.user().map(|u| u.role).unwrap_or_else(|| Role::Other(String::new()));
        self.view
            .render_convoys(&DashboardViewModel::convoy_cards(&convoys, &role));
        Ok(())
    }

    pub async fn load_alerts(&self) -> Result<(), ApiError> {
        let epoch = self.state.session.epoch();
        let token = self.state.session.token();
        let alerts = self.api.list_alerts(token.as_deref()).await?;
        if !self.still_current(epoch, "alerts") {
            return Ok(());
        }
        self.view.render_alerts(&DashboardViewModel::alert_cards(&alerts));
        Ok(())
    }

    pub async fn load_threats(&self, filter: &ThreatFilter) -> Result<(), ApiError> {
        let epoch = self.state.session.epoch();
        let token = self.state.session.token();
        let threats = self.api.list_threats(token.as_deref(), filter).await?;
        if !self.still_current(epoch, "threats") {
            return Ok(());
        }
        self.view.render_threats(&DashboardViewModel::threat_cards(&threats));
        Ok(())
    }

    pub async fn load_missions(&self) -> Result<(), ApiError> {
        let epoch = self.state.session.epoch();
        let token = self.state.session.token();
        let missions = self.api.list_missions(token.as_deref()).await?;
        if !self.still_current(epoch, "missions") {
            return Ok(());
        }
        self.view.render_missions(&DashboardViewModel::mission_cards(&missions));
        Ok(())
    }

    /// Compute a route from the form values and draw it on the route map.
    ///
    /// Failures are logged, rendered in the results container and returned.
    pub async fn submit_route(&self, start: &str, end: &str, mode: &str) -> Result<RouteSummary, RouteError> {
        let epoch = self.state.session.epoch();
        let result = self.compute_route(epoch, start, end, mode).await;
        if let Err(e) = &result {
            log::error!("❌ Route request failed: {}", e);
            if self.state.session.is_current(epoch) {
                self.view.render_route_error(&e.to_string());
            }
        }
        result
    }

    async fn compute_route(&self, epoch: u64, start: &str, end: &str, mode: &str) -> Result<RouteSummary, RouteError> {
        let request = RouteViewModel::parse_request(start, end, mode)?;
        let token = self.state.session.token();
        let route = self.api.compute_route(token.as_deref(), &request).await?;
        let summary = RouteViewModel::summarize(&route);
        if !self.still_current(epoch, "route") {
            return Ok(summary);
        }

        self.view.render_route_summary(&summary);
        let snapshot = LayerSnapshot {
            route: Some(summary.path.clone()),
            ..LayerSnapshot::default()
        };
        if let Err(e) = self.update_map(MapContainer::Route, &snapshot) {
            log::error!("❌ Route map update failed: {}", e);
        }
        Ok(summary)
    }

    /// Initialise the container's map on first use, then replace its layers
    fn update_map(&self, container: MapContainer, snapshot: &LayerSnapshot) -> Result<(), MapError> {
        let mut slot = self.state.map_slot(container).borrow_mut();
        if slot.is_none() {
            *slot = Some(self.view.init_map(container)?);
        }
        let map = slot.as_mut().ok_or(MapError::NotReady)?;
        MapViewModel::update_map_layers(map.as_mut(), snapshot, &self.map_config)
    }

    // ========================================================================
    // ACTIONS
    // ========================================================================

    /// Delegated click entry point; returns whether the target carried a known action
    pub fn handle_click(&self, target: &dyn ActionTarget) -> bool {
        let Some(action) = ActionViewModel::parse(target) else {
            return false;
        };
        let app = self.clone();
        (self.spawn)(
            async move {
                let name = action.name();
                if let Err(e) = app.dispatch(action).await {
                    log::error!("❌ Action '{}' failed: {}", name, e);
                }
            }
            .boxed_local(),
        );
        true
    }

    /// Confirm if needed, post the command, then re-run the affected loader
    pub async fn dispatch(&self, action: Action) -> Result<(), ApiError> {
        if let Some(prompt) = action.confirmation() {
            if !self.view.confirm(&prompt) {
                log::info!("🚫 '{}' cancelled", action.name());
                return Ok(());
            }
        }

        let token = self.state.session.token();
        let token = token.as_deref();
        let ack = match &action {
            Action::Stop(id) => self.api.stop_convoy(token, id).await?,
            Action::Acknowledge(id) => self.api.acknowledge_alert(token, *id).await?,
            Action::SimulateMission => self.api.simulate_mission(token).await?,
            Action::ResetDemo => self.api.reset_demo(token).await?,
        };
        match ack.and_then(|ack| ack.message) {
            Some(message) => log::info!("✅ {}: {}", action.name(), message),
            None => log::info!("✅ {} done", action.name()),
        }

        self.load_view(action.refreshes()).await;
        Ok(())
    }
}
