// ============================================================================
// ROUTE VIEWMODEL - Route form parsing and results summary
// ============================================================================

use serde::Serialize;

use crate::maps::LatLng;
use crate::models::{GeoPoint, RouteRequest, RouteResponse, ROUTE_MODES};
use crate::services::ApiError;
use crate::utils::format::format_fixed;
use crate::viewmodels::MapViewModel;

#[derive(Debug, Clone, PartialEq)]
pub enum RouteFormError {
    /// `field` did not hold a valid `"lat,lon"` pair
    InvalidCoordinates { field: &'static str, input: String },
    InvalidMode(String),
}

impl std::fmt::Display for RouteFormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteFormError::InvalidCoordinates { field, input } => {
                write!(f, "Invalid {} coordinates '{}': expected \"lat,lon\"", field, input)
            }
            RouteFormError::InvalidMode(mode) => write!(
                f,
                "Unknown route mode '{}' (expected one of: {})",
                mode,
                ROUTE_MODES.join(", ")
            ),
        }
    }
}

impl std::error::Error for RouteFormError {}

/// Why a route submission produced no results card
#[derive(Debug, Clone, PartialEq)]
pub enum RouteError {
    Form(RouteFormError),
    Api(ApiError),
}

impl From<RouteFormError> for RouteError {
    fn from(e: RouteFormError) -> Self {
        RouteError::Form(e)
    }
}

impl From<ApiError> for RouteError {
    fn from(e: ApiError) -> Self {
        RouteError::Api(e)
    }
}

impl std::fmt::Display for RouteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteError::Form(e) => write!(f, "{}", e),
            RouteError::Api(e) => f.write_str(&e.user_message()),
        }
    }
}

impl std::error::Error for RouteError {}

/// Results card content plus the path to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub distance_label: String,
    pub fuel_label: String,
    pub segment_count: usize,
    pub peak_risk: Option<String>,
    pub path: Vec<LatLng>,
}

pub struct RouteViewModel;

impl RouteViewModel {
    /// Parse `"lat,lon"`; whitespace around either number is ignored
    pub fn parse_coords(field: &'static str, input: &str) -> Result<GeoPoint, RouteFormError> {
        let invalid = || RouteFormError::InvalidCoordinates {
            field,
            input: input.to_string(),
        };

        let mut parts = input.split(',');
        let (lat, lon) = match (parts.next(), parts.next(), parts.next()) {
            (Some(lat), Some(lon), None) => (lat.trim(), lon.trim()),
            _ => return Err(invalid()),
        };

        let point = GeoPoint::new(
            lat.parse().map_err(|_| invalid())?,
            lon.parse().map_err(|_| invalid())?,
        );
        if point.is_valid() {
            Ok(point)
        } else {
            Err(invalid())
        }
    }

    pub fn parse_request(start: &str, end: &str, mode: &str) -> Result<RouteRequest, RouteFormError> {
        let start = Self::parse_coords("start", start)?;
        let end = Self::parse_coords("end", end)?;
        let mode = mode.trim();
        if !ROUTE_MODES.contains(&mode) {
            return Err(RouteFormError::InvalidMode(mode.to_string()));
        }

        Ok(RouteRequest {
            start_lat: start.lat,
            start_lon: start.lon,
            end_lat: end.lat,
            end_lon: end.lon,
            mode: mode.to_string(),
        })
    }

    pub fn summarize(route: &RouteResponse) -> RouteSummary {
        let peak_risk = route
            .segments
            .iter()
            .map(|segment| segment.risk_score)
            .fold(None, |peak: Option<f64>, risk| Some(peak.map_or(risk, |p| p.max(risk))));

        RouteSummary {
            distance_label: format!("{} km", format_fixed(route.total_distance_km, 2)),
            fuel_label: format!("{} L", format_fixed(route.estimated_fuel_liters, 1)),
            segment_count: route.segments.len(),
            peak_risk: peak_risk.map(|risk| format_fixed(risk, 2)),
            path: MapViewModel::route_path(&route.path_geometry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PathGeometry, SegmentDetail};

    #[test]
    fn parses_form_values() {
        let request = RouteViewModel::parse_request("13.08,80.27", " 13.10 , 80.30 ", "fastest").unwrap();
        assert_eq!(
            request,
            RouteRequest {
                start_lat: 13.08,
                start_lon: 80.27,
                end_lat: 13.10,
                end_lon: 80.30,
                mode: "fastest".into(),
            }
        );
    }

    #[test]
    fn rejects_malformed_coordinates() {
        for bad in ["", "13.08", "13.08,80.27,1", "abc,80", "91,80", "13,181", "NaN,80"] {
            let err = RouteViewModel::parse_request(bad, "13.10,80.30", "fastest").unwrap_err();
            assert!(
                matches!(err, RouteFormError::InvalidCoordinates { field: "start", .. }),
                "{:?} should be rejected",
                bad
            );
        }
        let err = RouteViewModel::parse_request("13.08,80.27", "x", "fastest").unwrap_err();
        assert!(matches!(err, RouteFormError::InvalidCoordinates { field: "end", .. }));
    }

    #[test]
    fn rejects_unknown_mode() {
        let err = RouteViewModel::parse_request("13.08,80.27", "13.10,80.30", "teleport").unwrap_err();
        assert_eq!(err, RouteFormError::InvalidMode("teleport".into()));
        assert!(err.to_string().contains("stealth, speed, balance, fastest"));
    }

    #[test]
    fn summary_rounds_and_reports_peak_risk() {
        let route = RouteResponse {
            path_geometry: PathGeometry {
                kind: "LineString".into(),
                coordinates: vec![[80.27, 13.08], [80.30, 13.10]],
            },
            total_distance_km: 4.5678,
            estimated_fuel_liters: 0.96,
            segments: vec![
                SegmentDetail { segment_id: 1, distance_km: 2.0, risk_score: 0.125 },
                SegmentDetail { segment_id: 2, distance_km: 2.5678, risk_score: 0.7349 },
            ],
            risk_heatmap: vec![],
        };
        let summary = RouteViewModel::summarize(&route);
        assert_eq!(summary.distance_label, "4.57 km");
        assert_eq!(summary.fuel_label, "1.0 L");
        assert_eq!(summary.segment_count, 2);
        assert_eq!(summary.peak_risk.as_deref(), Some("0.73"));
        assert_eq!(summary.path[0], LatLng::new(13.08, 80.27));
    }

    #[test]
    fn summary_without_segments_has_no_peak() {
        let route = RouteResponse {
            path_geometry: PathGeometry::default(),
            total_distance_km: 1.0,
            estimated_fuel_liters: 0.2,
            segments: vec![],
            risk_heatmap: vec![],
        };
        let summary = RouteViewModel::summarize(&route);
        assert_eq!(summary.peak_risk, None);
        assert!(summary.path.is_empty());
    }
}
