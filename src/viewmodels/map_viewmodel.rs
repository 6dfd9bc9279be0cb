// ============================================================================
// MAP VIEWMODEL - Data preparation for the map overlays
// ============================================================================
// No state: turns fetched models into layer content and replays it onto a
// MapRenderer
// ============================================================================

use serde::Serialize;

use crate::config::MapConfig;
use crate::maps::{ConvoyMarker, HeatPoint, LatLng, MapError, MapRenderer};
use crate::models::{Convoy, PathGeometry, Threat};
use crate::utils::format::escape_html;

/// Everything one map shows after a refresh
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayerSnapshot {
    pub markers: Vec<ConvoyMarker>,
    pub heat: Vec<HeatPoint>,
    pub route: Option<Vec<LatLng>>,
}

pub struct MapViewModel;

impl MapViewModel {
    /// One marker per convoy, popup shows call sign and status
    pub fn convoy_markers(convoys: &[Convoy]) -> Vec<ConvoyMarker> {
        convoys
            .iter()
            .map(|convoy| ConvoyMarker {
                position: LatLng::new(convoy.current_location.lat, convoy.current_location.lon),
                popup_html: format!(
                    "<b>{}</b><br>Status: {}",
                    escape_html(&convoy.call_sign),
                    escape_html(&convoy.status)
                ),
            })
            .collect()
    }

    /// Heat points from confirmed threats that carry a position
    pub fn heat_points(threats: &[Threat], intensity: f64) -> Vec<HeatPoint> {
        threats
            .iter()
            .filter(|threat| threat.is_confirmed())
            .filter_map(|threat| threat.position())
            .map(|point| HeatPoint {
                position: LatLng::new(point.lat, point.lon),
                intensity,
            })
            .collect()
    }

    /// GeoJSON `[lon, lat]` pairs transposed to Leaflet order
    pub fn route_path(geometry: &PathGeometry) -> Vec<LatLng> {
        geometry
            .coordinates
            .iter()
            .map(|[lon, lat]| LatLng::new(*lat, *lon))
            .collect()
    }

    pub fn snapshot(
        convoys: &[Convoy],
        threats: &[Threat],
        route: Option<&PathGeometry>,
        config: &MapConfig,
    ) -> LayerSnapshot {
        LayerSnapshot {
            markers: Self::convoy_markers(convoys),
            heat: Self::heat_points(threats, config.heat_intensity),
            route: route.map(Self::route_path),
        }
    }

    /// Replace the map's overlays with `snapshot`.
    ///
    /// All three layers are cleared first so nothing from the previous
    /// refresh survives; no heat layer is created when there are no points.
    pub fn update_map_layers(
        map: &mut dyn MapRenderer,
        snapshot: &LayerSnapshot,
        config: &MapConfig,
    ) -> Result<(), MapError> {
        map.clear_markers()?;
        map.remove_heat_layer()?;
        map.clear_route()?;

        for marker in &snapshot.markers {
            map.add_marker(marker)?;
        }

        if !snapshot.heat.is_empty() {
            map.add_heat_layer(&snapshot.heat, config.heat_radius)?;
        }

        if let Some(path) = &snapshot.route {
            map.draw_route(path, &config.route_line_color)?;
        }

        log::debug!(
            "🗺️ Map layers updated: {} markers, {} heat points, route: {}",
            snapshot.markers.len(),
            snapshot.heat.len(),
            snapshot.route.is_some()
        );
        Ok(())
    }
}
