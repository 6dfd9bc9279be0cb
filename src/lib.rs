// ============================================================================
// CONVOY COMMAND DASHBOARD - Rust/WASM client for the convoy-tracking API
// ============================================================================
// - Models: backend payloads
// - Services: HTTP, token storage, timers (behind traits)
// - ViewModels: pure data preparation (cards, stats, map layers, actions)
// - Views: DashboardView trait + DOM implementation
// - State: Rc<RefCell> cells owned by the App controller
// ============================================================================

pub mod config;
pub mod models;
pub mod services;
pub mod viewmodels;
pub mod state;
pub mod maps;
pub mod views;
pub mod utils;
pub mod app;
#[cfg(target_arch = "wasm32")]
pub mod dom;

#[cfg(test)]
mod testing;

pub use app::App;

#[cfg(target_arch = "wasm32")]
mod entry {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use wasm_logger::Config;

    use crate::app::App;
    use crate::config::CONFIG;
    use crate::dom;
    use crate::models::ThreatFilter;
    use crate::services::scheduler::{browser_spawner, IntervalScheduler};
    use crate::services::{ApiClient, LocalTokenStore};
    use crate::utils::ids;
    use crate::views::DomView;

    // Keeps the controller reachable from JS-facing exports
    thread_local! {
        static APP: RefCell<Option<App>> = RefCell::new(None);
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let level = if CONFIG.is_logging_enabled() {
            log::Level::Debug
        } else {
            log::Level::Error
        };
        wasm_logger::init(Config::new(level));
        if !CONFIG.is_logging_enabled() {
            log::set_max_level(log::LevelFilter::Off);
        }
        log::info!("🚀 Convoy Command Dashboard starting (API: {})", CONFIG.api_base_url());

        let app = App::new(
            Rc::new(ApiClient::new()),
            Rc::new(LocalTokenStore::new()),
            Rc::new(DomView::new()),
            Rc::new(IntervalScheduler),
            browser_spawner(),
            &CONFIG,
        );

        wire_listeners(&app)?;
        app.restore();

        APP.with(|cell| *cell.borrow_mut() = Some(app));
        Ok(())
    }

    fn wire_listeners(app: &App) -> Result<(), JsValue> {
        let login_form = dom::require_element(ids::LOGIN_FORM)?;
        let handler = app.clone();
        let form = login_form.clone();
        dom::on_submit(&login_form, move || {
            let fields = (dom::field_value(&form, "username"), dom::field_value(&form, "password"));
            let (username, password) = match fields {
                (Ok(username), Ok(password)) => (username, password),
                _ => {
                    log::error!("❌ Login form fields missing");
                    return;
                }
            };
            let app = handler.clone();
            wasm_bindgen_futures::spawn_local(async move {
                // Failure is already shown inline
                let _ = app.login(&username, &password).await;
            });
        })?;

        let logout = dom::require_element(ids::LOGOUT_BUTTON)?;
        let handler = app.clone();
        dom::on_click(&logout, move |_| handler.logout())?;

        let nav = dom::require_element(ids::NAV_LINKS)?;
        let handler = app.clone();
        dom::on_click(&nav, move |event| {
            if let Some(link) = dom::closest_target(&event, "a[data-view]") {
                event.prevent_default();
                if let Some(view_id) = dom::get_attribute(&link, "data-view") {
                    handler.show_view(&view_id);
                }
            }
        })?;

        let route_form = dom::require_element(ids::ROUTE_FORM)?;
        let handler = app.clone();
        dom::on_submit(&route_form, move || {
            let fields = (
                dom::input_value(ids::START_COORDS),
                dom::input_value(ids::END_COORDS),
                dom::input_value(ids::ROUTE_MODE),
            );
            let (start, end, mode) = match fields {
                (Ok(start), Ok(end), Ok(mode)) => (start, end, mode),
                _ => {
                    log::error!("❌ Route form fields missing");
                    return;
                }
            };
            let app = handler.clone();
            wasm_bindgen_futures::spawn_local(async move {
                // Failure is already logged and rendered
                let _ = app.submit_route(&start, &end, &mode).await;
            });
        })?;

        let body = dom::document()
            .and_then(|doc| doc.body())
            .ok_or_else(|| JsValue::from_str("No document body"))?;
        let handler = app.clone();
        dom::on_click(&body, move |event| {
            if let Some(target) = dom::closest_target(&event, "[data-action]") {
                handler.handle_click(&target);
            }
        })?;

        Ok(())
    }

    /// Filter the threats list; empty strings clear a filter (callable from JavaScript)
    #[wasm_bindgen]
    pub fn filter_threats(status: Option<String>, classification: Option<String>) {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        let filter = ThreatFilter {
            status: non_empty(status),
            classification: non_empty(classification),
        };
        APP.with(|cell| {
            if let Some(app) = cell.borrow().as_ref() {
                app.filter_threats(filter);
            }
        });
    }

    /// Re-run the active view's loader (callable from JavaScript)
    #[wasm_bindgen]
    pub fn refresh_active_view() {
        APP.with(|cell| {
            if let Some(app) = cell.borrow().as_ref() {
                app.show_view(app.active_view().element_id());
            }
        });
    }
}
