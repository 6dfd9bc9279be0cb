// ============================================================================
// NAVIGATION - The fixed set of mutually exclusive views
// ============================================================================

use serde::Serialize;

use crate::models::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ViewId {
    Dashboard,
    Convoys,
    Threats,
    Alerts,
    Missions,
    Route,
}

impl ViewId {
    pub const ALL: [ViewId; 6] = [
        ViewId::Dashboard,
        ViewId::Convoys,
        ViewId::Threats,
        ViewId::Alerts,
        ViewId::Missions,
        ViewId::Route,
    ];

    /// Host-page element id; also the nav link's `data-view`
    pub fn element_id(&self) -> &'static str {
        match self {
            ViewId::Dashboard => "dashboard-view",
            ViewId::Convoys => "convoys-view",
            ViewId::Threats => "threats-view",
            ViewId::Alerts => "alerts-view",
            ViewId::Missions => "missions-view",
            ViewId::Route => "route-view",
        }
    }

    pub fn from_element_id(id: &str) -> Option<ViewId> {
        Self::ALL.into_iter().find(|view| view.element_id() == id)
    }

    /// Whether the backend lets `role` read this view's resources
    pub fn permits(&self, role: &Role) -> bool {
        match self {
            ViewId::Dashboard | ViewId::Route => true,
            ViewId::Convoys | ViewId::Alerts => matches!(role, Role::Operator | Role::Commander),
            ViewId::Threats | ViewId::Missions => matches!(role, Role::Analyst | Role::Commander),
        }
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.element_id())
    }
}

/// Highlight state for one nav link
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NavItem {
    pub view: ViewId,
    pub active: bool,
    /// Shown but marked `disabled` when false
    pub permitted: bool,
}

pub fn nav_items(active: ViewId, role: &Role) -> Vec<NavItem> {
    ViewId::ALL
        .into_iter()
        .map(|view| NavItem {
            view,
            active: view == active,
            permitted: view.permits(role),
        })
        .collect()
}
