use serde::Serialize;

/// Leaflet axis order: latitude first
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvoyMarker {
    pub position: LatLng,
    /// Popup HTML, already escaped
    pub popup_html: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatPoint {
    pub position: LatLng,
    pub intensity: f64,
}

/// The two map containers the dashboard owns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapContainer {
    Dashboard,
    Route,
}

impl MapContainer {
    pub fn element_id(&self) -> &'static str {
        match self {
            MapContainer::Dashboard => crate::utils::ids::DASHBOARD_MAP,
            MapContainer::Route => crate::utils::ids::ROUTE_MAP,
        }
    }
}

/// One map instance and its three overlays (marker group, heat layer, route group).
///
/// Implementations create the underlying layers lazily; clearing a layer that
/// was never created is a no-op.
pub trait MapRenderer {
    fn clear_markers(&mut self) -> Result<(), MapError>;
    fn add_marker(&mut self, marker: &ConvoyMarker) -> Result<(), MapError>;

    fn remove_heat_layer(&mut self) -> Result<(), MapError>;
    fn add_heat_layer(&mut self, points: &[HeatPoint], radius: u32) -> Result<(), MapError>;

    fn clear_route(&mut self) -> Result<(), MapError>;
    fn draw_route(&mut self, path: &[LatLng], color: &str) -> Result<(), MapError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapError {
    NotReady,
    ContainerMissing(String),
    Js(String),
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::NotReady => write!(f, "Map is not ready"),
            MapError::ContainerMissing(id) => write!(f, "Map container #{} not found", id),
            MapError::Js(msg) => write!(f, "Map library error: {}", msg),
        }
    }
}

impl std::error::Error for MapError {}
