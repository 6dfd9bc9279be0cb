/// Local-storage key holding the raw bearer token
pub const TOKEN_STORAGE_KEY: &str = "accessToken";

/// Shown in cards when a timestamp or reading is missing
pub const MISSING_VALUE: &str = "N/A";

/// Host-page element ids
pub mod ids {
    pub const LOGIN_CONTAINER: &str = "login-container";
    pub const APP_CONTAINER: &str = "app-container";
    pub const LOGIN_FORM: &str = "login-form";
    pub const LOGIN_ERROR: &str = "login-error";
    pub const LOGOUT_BUTTON: &str = "logout-button";
    pub const NAV_LINKS: &str = "nav-links";
    pub const USERNAME_DISPLAY: &str = "username-display";
    pub const ROLE_DISPLAY: &str = "role-display";
    pub const STATS_GRID: &str = "stats-grid";
    pub const ALERTS_LIST: &str = "alerts-list";
    pub const CONVOYS_LIST: &str = "convoys-list";
    pub const THREATS_LIST: &str = "threats-list";
    pub const MISSIONS_LIST: &str = "missions-list";
    pub const ROUTE_FORM: &str = "route-form";
    pub const START_COORDS: &str = "start-coords";
    pub const END_COORDS: &str = "end-coords";
    pub const ROUTE_MODE: &str = "route-mode";
    pub const ROUTE_RESULTS: &str = "route-results";
    pub const DASHBOARD_MAP: &str = "dashboard-map";
    pub const ROUTE_MAP: &str = "route-map";
}
