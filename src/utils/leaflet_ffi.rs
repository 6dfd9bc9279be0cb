// ============================================================================
// LEAFLET FFI - wasm-bindgen bindings for the global `L` namespace
// ============================================================================
// Bindings only - no state, no logic. leaflet.heat provides `L.heatLayer`.
// ============================================================================

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    pub type LeafletMap;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    pub fn create_map(container_id: &str) -> Result<LeafletMap, JsValue>;

    #[wasm_bindgen(method, js_name = setView)]
    pub fn set_view(this: &LeafletMap, center: &JsValue, zoom: f64) -> LeafletMap;

    #[wasm_bindgen(method, catch, js_name = removeLayer)]
    pub fn remove_layer(this: &LeafletMap, layer: &Layer) -> Result<LeafletMap, JsValue>;

    #[derive(Clone)]
    pub type Layer;

    #[wasm_bindgen(method, catch, js_name = addTo)]
    pub fn add_to_map(this: &Layer, map: &LeafletMap) -> Result<Layer, JsValue>;

    #[wasm_bindgen(method, catch, js_name = addTo)]
    pub fn add_to_group(this: &Layer, group: &Layer) -> Result<Layer, JsValue>;

    #[wasm_bindgen(method, js_name = clearLayers)]
    pub fn clear_layers(this: &Layer) -> Layer;

    #[wasm_bindgen(method, js_name = bindPopup)]
    pub fn bind_popup(this: &Layer, html: &str) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    pub fn tile_layer(url_template: &str, options: &JsValue) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = layerGroup)]
    pub fn layer_group() -> Layer;

    #[wasm_bindgen(catch, js_namespace = L, js_name = marker)]
    pub fn marker(lat_lng: &JsValue) -> Result<Layer, JsValue>;

    #[wasm_bindgen(catch, js_namespace = L, js_name = heatLayer)]
    pub fn heat_layer(points: &JsValue, options: &JsValue) -> Result<Layer, JsValue>;

    #[wasm_bindgen(catch, js_namespace = L, js_name = polyline)]
    pub fn polyline(lat_lngs: &JsValue, options: &JsValue) -> Result<Layer, JsValue>;
}

/// `[lat, lng]` as a JS array
pub fn lat_lng_array(lat: f64, lng: f64) -> JsValue {
    let pair = js_sys::Array::new();
    pair.push(&JsValue::from_f64(lat));
    pair.push(&JsValue::from_f64(lng));
    pair.into()
}

/// Plain JS object from `(key, value)` pairs
pub fn options(entries: &[(&str, JsValue)]) -> Result<JsValue, JsValue> {
    let object = js_sys::Object::new();
    for (key, value) in entries {
        js_sys::Reflect::set(&object, &JsValue::from_str(key), value)?;
    }
    Ok(object.into())
}
