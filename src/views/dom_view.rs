// ============================================================================
// DOM VIEW - DashboardView backed by the host page's elements
// ============================================================================

use wasm_bindgen::JsValue;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom;
use crate::maps::web::WebMapRenderer;
use crate::maps::{MapContainer, MapError, MapRenderer};
use crate::models::User;
use crate::utils::ids;
use crate::viewmodels::{
    ActionTarget, AlertCard, ConvoyCard, DashboardStats, MissionCard, RouteSummary, ThreatCard,
};
use crate::views::cards;
use crate::views::{DashboardView, NavItem, ViewId};

/// `data-*` attributes of a clicked element
impl ActionTarget for Element {
    fn data(&self, key: &str) -> Option<String> {
        self.get_attribute(&format!("data-{}", key))
    }
}

fn log_dom_error(context: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        log::error!("❌ DOM update failed ({}): {:?}", context, e);
    }
}

#[derive(Default)]
pub struct DomView;

impl DomView {
    pub fn new() -> Self {
        Self
    }

    fn set_html(&self, id: &str, html: &str) {
        log_dom_error(id, dom::require_element(id).map(|el| dom::set_inner_html(&el, html)));
    }
}

impl DashboardView for DomView {
    fn show_login(&self) {
        log_dom_error(
            "show_login",
            (|| -> Result<(), JsValue> {
                dom::set_hidden(&dom::require_element(ids::LOGIN_CONTAINER)?, false)?;
                dom::set_hidden(&dom::require_element(ids::APP_CONTAINER)?, true)
            })(),
        );
    }

    fn show_app(&self, user: &User) {
        log_dom_error(
            "show_app",
            (|| -> Result<(), JsValue> {
                dom::set_hidden(&dom::require_element(ids::LOGIN_CONTAINER)?, true)?;
                dom::set_hidden(&dom::require_element(ids::APP_CONTAINER)?, false)?;
                dom::set_text_content(&dom::require_element(ids::USERNAME_DISPLAY)?, &user.username);
                dom::set_text_content(&dom::require_element(ids::ROLE_DISPLAY)?, user.role.as_str());
                Ok(())
            })(),
        );
    }

    fn set_login_error(&self, message: Option<&str>) {
        log_dom_error(
            "login_error",
            dom::require_element(ids::LOGIN_ERROR).and_then(|el| {
                dom::set_text_content(&el, message.unwrap_or_default());
                dom::set_hidden(&el, message.is_none())
            }),
        );
    }

    fn set_view_visibility(&self, view: ViewId, visible: bool) {
        log_dom_error(
            view.element_id(),
            dom::require_element(view.element_id()).and_then(|el| dom::set_hidden(&el, !visible)),
        );
    }

    fn highlight_nav(&self, items: &[NavItem]) {
        log_dom_error(
            "highlight_nav",
            (|| -> Result<(), JsValue> {
                let nav = dom::require_element(ids::NAV_LINKS)?;
                for link in dom::query_all(&nav, "a[data-view]")? {
                    let item = dom::get_attribute(&link, "data-view")
                        .and_then(|id| ViewId::from_element_id(&id))
                        .and_then(|view| items.iter().find(|item| item.view == view));
                    if let Some(item) = item {
                        dom::toggle_class(&link, dom::ACTIVE_CLASS, item.active)?;
                        dom::toggle_class(&link, dom::DISABLED_CLASS, !item.permitted)?;
                    }
                }
                Ok(())
            })(),
        );
    }

    fn render_stats(&self, stats: &DashboardStats) {
        self.set_html(ids::STATS_GRID, &cards::render_stats_html(stats));
    }

    fn render_convoys(&self, items: &[ConvoyCard]) {
        self.set_html(ids::CONVOYS_LIST, &cards::render_list(items, cards::render_convoy_card));
    }

    fn render_alerts(&self, items: &[AlertCard]) {
        self.set_html(ids::ALERTS_LIST, &cards::render_list(items, cards::render_alert_card));
    }

    fn render_threats(&self, items: &[ThreatCard]) {
        self.set_html(ids::THREATS_LIST, &cards::render_list(items, cards::render_threat_card));
    }

    fn render_missions(&self, items: &[MissionCard]) {
        self.set_html(ids::MISSIONS_LIST, &cards::render_list(items, cards::render_mission_card));
    }

    fn render_route_summary(&self, summary: &RouteSummary) {
        self.set_html(ids::ROUTE_RESULTS, &cards::render_route_summary_html(summary));
    }

    fn render_route_error(&self, message: &str) {
        self.set_html(ids::ROUTE_RESULTS, &cards::render_route_error_html(message));
    }

    fn confirm(&self, message: &str) -> bool {
        dom::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn init_map(&self, container: MapContainer) -> Result<Box<dyn MapRenderer>, MapError> {
        let map = WebMapRenderer::initialize(container, &CONFIG.map_config)?;
        Ok(Box::new(map))
    }
}
