// ============================================================================
// APP STATE - UI state owned by the App controller
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::maps::{MapContainer, MapRenderer};
use crate::models::ThreatFilter;
use crate::services::RefreshHandle;
use crate::state::SessionState;
use crate::views::ViewId;

pub type MapSlot = Rc<RefCell<Option<Box<dyn MapRenderer>>>>;

#[derive(Clone)]
pub struct AppState {
    pub session: SessionState,
    pub active_view: Rc<Cell<ViewId>>,
    /// Each map owns its own overlay layers
    pub dashboard_map: MapSlot,
    pub route_map: MapSlot,
    /// Applied by every threats reload until replaced
    pub threat_filter: Rc<RefCell<ThreatFilter>>,
    /// Background refresh timer; dropping it cancels the timer
    pub refresh: Rc<RefCell<Option<RefreshHandle>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            session: SessionState::new(),
            active_view: Rc::new(Cell::new(ViewId::Dashboard)),
            dashboard_map: Rc::new(RefCell::new(None)),
            route_map: Rc::new(RefCell::new(None)),
            threat_filter: Rc::new(RefCell::new(ThreatFilter::default())),
            refresh: Rc::new(RefCell::new(None)),
        }
    }

    pub fn map_slot(&self, container: MapContainer) -> &MapSlot {
        match container {
            MapContainer::Dashboard => &self.dashboard_map,
            MapContainer::Route => &self.route_map,
        }
    }

    pub fn set_refresh(&self, handle: Option<RefreshHandle>) {
        // Old handle is cancelled on drop, outside the borrow
        let previous = self.refresh.replace(handle);
        drop(previous);
    }

    pub fn has_refresh(&self) -> bool {
        self.refresh.borrow().is_some()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
