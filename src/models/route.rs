use serde::{Deserialize, Serialize};

/// Travel modes accepted by `POST /get_route`
pub const ROUTE_MODES: &[&str] = &["stealth", "speed", "balance", "fastest"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub start_lat: f64,
    pub start_lon: f64,
    pub end_lat: f64,
    pub end_lon: f64,
    pub mode: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    pub path_geometry: PathGeometry,
    pub total_distance_km: f64,
    pub estimated_fuel_liters: f64,
    #[serde(default)]
    pub segments: Vec<SegmentDetail>,
    #[serde(default)]
    pub risk_heatmap: Vec<Vec<f64>>,
}

/// GeoJSON LineString; coordinates are `[lon, lat]`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PathGeometry {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Vec<[f64; 2]>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentDetail {
    pub segment_id: i64,
    pub distance_km: f64,
    pub risk_score: f64,
}
