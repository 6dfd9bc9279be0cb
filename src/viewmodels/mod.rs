pub mod session_viewmodel;
pub mod map_viewmodel;
pub mod dashboard_viewmodel;
pub mod route_viewmodel;
pub mod action_viewmodel;

pub use session_viewmodel::{AuthError, SessionViewModel};
pub use map_viewmodel::{LayerSnapshot, MapViewModel};
pub use dashboard_viewmodel::{AlertCard, ConvoyCard, DashboardStats, DashboardViewModel, MissionCard, ThreatCard};
pub use route_viewmodel::{RouteError, RouteFormError, RouteSummary, RouteViewModel};
pub use action_viewmodel::{Action, ActionTarget, ActionViewModel};
