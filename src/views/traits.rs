use crate::maps::{MapContainer, MapError, MapRenderer};
use crate::models::User;
use crate::viewmodels::{AlertCard, ConvoyCard, DashboardStats, MissionCard, RouteSummary, ThreatCard};
use crate::views::{NavItem, ViewId};

/// Everything the controller draws. Each `render_*` replaces its container wholesale.
pub trait DashboardView {
    fn show_login(&self);
    fn show_app(&self, user: &User);
    fn set_login_error(&self, message: Option<&str>);

    fn set_view_visibility(&self, view: ViewId, visible: bool);
    fn highlight_nav(&self, items: &[NavItem]);

    fn render_stats(&self, stats: &DashboardStats);
    fn render_convoys(&self, cards: &[ConvoyCard]);
    fn render_alerts(&self, cards: &[AlertCard]);
    fn render_threats(&self, cards: &[ThreatCard]);
    fn render_missions(&self, cards: &[MissionCard]);
    fn render_route_summary(&self, summary: &RouteSummary);
    fn render_route_error(&self, message: &str);

    /// Blocking yes/no prompt
    fn confirm(&self, message: &str) -> bool;

    /// Create the map in `container`; called at most once per container
    fn init_map(&self, container: MapContainer) -> Result<Box<dyn MapRenderer>, MapError>;
}
