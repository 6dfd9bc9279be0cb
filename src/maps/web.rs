use wasm_bindgen::JsValue;

use crate::config::MapConfig;
use crate::utils::leaflet_ffi::{self as leaflet, Layer, LeafletMap};
use super::{ConvoyMarker, HeatPoint, LatLng, MapContainer, MapError, MapRenderer};

fn js_error(e: JsValue) -> MapError {
    MapError::Js(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

/// Leaflet map with lazily created overlay layers
pub struct WebMapRenderer {
    map: LeafletMap,
    convoy_layer: Option<Layer>,
    heat_layer: Option<Layer>,
    route_layer: Option<Layer>,
}

impl WebMapRenderer {
    /// Create the map in its container, centred on the configured default view
    pub fn initialize(container: MapContainer, config: &MapConfig) -> Result<Self, MapError> {
        let id = container.element_id();
        if crate::dom::get_element_by_id(id).is_none() {
            return Err(MapError::ContainerMissing(id.to_string()));
        }

        log::info!("🗺️ Initializing Leaflet map in #{}", id);
        let map = leaflet::create_map(id).map_err(js_error)?;
        map.set_view(
            &leaflet::lat_lng_array(config.default_center_lat, config.default_center_lng),
            config.default_zoom,
        );

        let tile_options = leaflet::options(&[(
            "attribution",
            JsValue::from_str(&config.tile_attribution),
        )])
        .map_err(js_error)?;
        leaflet::tile_layer(&config.tile_url, &tile_options)
            .add_to_map(&map)
            .map_err(js_error)?;

        Ok(Self {
            map,
            convoy_layer: None,
            heat_layer: None,
            route_layer: None,
        })
    }

    fn group(slot: &mut Option<Layer>, map: &LeafletMap) -> Result<Layer, MapError> {
        if let Some(layer) = slot {
            return Ok(layer.clone());
        }
        let layer = leaflet::layer_group().add_to_map(map).map_err(js_error)?;
        *slot = Some(layer.clone());
        Ok(layer)
    }
}

impl MapRenderer for WebMapRenderer {
    fn clear_markers(&mut self) -> Result<(), MapError> {
        if let Some(layer) = &self.convoy_layer {
            layer.clear_layers();
        }
        Ok(())
    }

    fn add_marker(&mut self, marker: &ConvoyMarker) -> Result<(), MapError> {
        let group = Self::group(&mut self.convoy_layer, &self.map)?;
        leaflet::marker(&leaflet::lat_lng_array(marker.position.lat, marker.position.lng))
            .map_err(js_error)?
            .add_to_group(&group)
            .map_err(js_error)?
            .bind_popup(&marker.popup_html);
        Ok(())
    }

    fn remove_heat_layer(&mut self) -> Result<(), MapError> {
        if let Some(layer) = self.heat_layer.take() {
            self.map.remove_layer(&layer).map_err(js_error)?;
        }
        Ok(())
    }

    fn add_heat_layer(&mut self, points: &[HeatPoint], radius: u32) -> Result<(), MapError> {
        let data = js_sys::Array::new();
        for point in points {
            let entry = js_sys::Array::new();
            entry.push(&JsValue::from_f64(point.position.lat));
            entry.push(&JsValue::from_f64(point.position.lng));
            entry.push(&JsValue::from_f64(point.intensity));
            data.push(&entry);
        }
        let options = leaflet::options(&[("radius", JsValue::from_f64(radius as f64))]).map_err(js_error)?;
        let layer = leaflet::heat_layer(&data, &options)
            .map_err(js_error)?
            .add_to_map(&self.map)
            .map_err(js_error)?;
        self.heat_layer = Some(layer);
        Ok(())
    }

    fn clear_route(&mut self) -> Result<(), MapError> {
        if let Some(layer) = &self.route_layer {
            layer.clear_layers();
        }
        Ok(())
    }

    fn draw_route(&mut self, path: &[LatLng], color: &str) -> Result<(), MapError> {
        let group = Self::group(&mut self.route_layer, &self.map)?;
        let coords = js_sys::Array::new();
        for point in path {
            coords.push(&leaflet::lat_lng_array(point.lat, point.lng));
        }
        let options = leaflet::options(&[("color", JsValue::from_str(color))]).map_err(js_error)?;
        leaflet::polyline(&coords, &options)
            .map_err(js_error)?
            .add_to_group(&group)
            .map_err(js_error)?;
        Ok(())
    }
}
