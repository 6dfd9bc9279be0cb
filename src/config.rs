// ============================================================================
// CONFIG - Compile-time configuration (option_env! + .env via build.rs)
// ============================================================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url: String,
    pub api_prefix: String,
    pub refresh_interval_ms: u32,
    pub enable_logging: bool,
    pub map_config: MapConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:8000".to_string(),
            api_prefix: "/api/v1".to_string(),
            refresh_interval_ms: 10_000,
            enable_logging: true,
            map_config: MapConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    pub default_center_lat: f64,
    pub default_center_lng: f64,
    pub default_zoom: f64,
    pub tile_url: String,
    pub tile_attribution: String,
    pub heat_radius: u32,
    pub heat_intensity: f64,
    pub route_line_color: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center_lat: 13.0827,
            default_center_lng: 80.2707,
            default_zoom: 10.0,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            tile_attribution: "&copy; OpenStreetMap contributors".to_string(),
            heat_radius: 25,
            heat_intensity: 0.8,
            route_line_color: "blue".to_string(),
        }
    }
}

impl AppConfig {
    /// Build the configuration from compile-time environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let map_defaults = defaults.map_config.clone();

        Self {
            backend_url: option_env!("BACKEND_URL")
                .map(|s| s.to_string())
                .unwrap_or(defaults.backend_url),
            api_prefix: option_env!("API_PREFIX")
                .map(|s| s.to_string())
                .unwrap_or(defaults.api_prefix),
            refresh_interval_ms: parse_or(option_env!("REFRESH_INTERVAL_MS"), defaults.refresh_interval_ms),
            enable_logging: parse_or(option_env!("ENABLE_LOGGING"), defaults.enable_logging),
            map_config: MapConfig {
                default_center_lat: parse_or(option_env!("DEFAULT_MAP_CENTER_LAT"), map_defaults.default_center_lat),
                default_center_lng: parse_or(option_env!("DEFAULT_MAP_CENTER_LNG"), map_defaults.default_center_lng),
                default_zoom: parse_or(option_env!("DEFAULT_MAP_ZOOM"), map_defaults.default_zoom),
                tile_url: option_env!("MAP_TILE_URL")
                    .map(|s| s.to_string())
                    .unwrap_or(map_defaults.tile_url),
                tile_attribution: map_defaults.tile_attribution,
                heat_radius: parse_or(option_env!("HEAT_RADIUS"), map_defaults.heat_radius),
                heat_intensity: parse_or(option_env!("HEAT_INTENSITY"), map_defaults.heat_intensity),
                route_line_color: option_env!("ROUTE_LINE_COLOR")
                    .map(|s| s.to_string())
                    .unwrap_or(map_defaults.route_line_color),
            },
        }
    }

    /// Versioned API root, e.g. `http://127.0.0.1:8000/api/v1`
    pub fn api_base_url(&self) -> String {
        format!(
            "{}/{}",
            self.backend_url.trim_end_matches('/'),
            self.api_prefix.trim_matches('/')
        )
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|value| value.trim().parse().ok()).unwrap_or(default)
}

lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_base_url_joins_without_double_slashes() {
        let config = AppConfig {
            backend_url: "http://localhost:8000/".to_string(),
            api_prefix: "/api/v1/".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.api_base_url(), "http://localhost:8000/api/v1");
    }

    #[test]
    fn parse_or_falls_back_on_garbage() {
        assert_eq!(parse_or::<u32>(Some("abc"), 10_000), 10_000);
        assert_eq!(parse_or::<u32>(Some(" 5000 "), 10_000), 5000);
        assert!(!parse_or::<bool>(Some("false"), true));
        assert_eq!(parse_or::<f64>(None, 0.8), 0.8);
    }

    #[test]
    fn defaults_match_chennai_dashboard() {
        let map = MapConfig::default();
        assert_eq!(map.heat_radius, 25);
        assert_eq!(map.default_zoom, 10.0);
        assert_eq!(AppConfig::default().refresh_interval_ms, 10_000);
    }
}
