// ============================================================================
// LEAFLET FFI - Foreign Function Interface para Leaflet (global `L`)
// ============================================================================
// Solo wrappers para funciones JS - Sin estado, sin lógica
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement};

use crate::maps::Bounds;
use crate::models::LatLng;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = L, js_name = Map)]
    #[derive(Debug, Clone)]
    pub type LeafletMap;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    pub fn create_map(container: &HtmlElement, options: &JsValue) -> Result<LeafletMap, JsValue>;

    #[wasm_bindgen(method, catch, js_name = setView)]
    pub fn set_view(this: &LeafletMap, center: &JsValue, zoom: f64) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = fitBounds)]
    pub fn fit_bounds(this: &LeafletMap, bounds: &JsValue, options: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = invalidateSize)]
    pub fn invalidate_size(this: &LeafletMap);

    #[wasm_bindgen(method, js_name = remove)]
    pub fn remove_map(this: &LeafletMap);

    #[wasm_bindgen(js_namespace = L, js_name = TileLayer)]
    #[derive(Debug, Clone)]
    pub type LeafletTileLayer;

    #[wasm_bindgen(catch, js_namespace = L, js_name = tileLayer)]
    pub fn tile_layer(url: &str, options: &JsValue) -> Result<LeafletTileLayer, JsValue>;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_tiles_to(this: &LeafletTileLayer, map: &LeafletMap);

    #[wasm_bindgen(method, js_name = remove)]
    pub fn remove_tiles(this: &LeafletTileLayer);

    #[wasm_bindgen(js_namespace = L, js_name = Marker)]
    #[derive(Debug, Clone)]
    pub type LeafletMarker;

    #[wasm_bindgen(catch, js_namespace = L, js_name = marker)]
    pub fn create_marker(lat_lng: &JsValue, options: &JsValue) -> Result<LeafletMarker, JsValue>;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_marker_to(this: &LeafletMarker, map: &LeafletMap);

    #[wasm_bindgen(method, js_name = bindPopup)]
    pub fn bind_popup(this: &LeafletMarker, content: &Element);

    #[wasm_bindgen(method, js_name = on)]
    pub fn on(this: &LeafletMarker, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method, js_name = off)]
    pub fn off(this: &LeafletMarker, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method, js_name = remove)]
    pub fn remove_marker(this: &LeafletMarker);

    #[wasm_bindgen(catch, js_namespace = L, js_name = icon)]
    pub fn create_icon(options: &JsValue) -> Result<JsValue, JsValue>;
}

/// `[lat, lng]`
pub fn lat_lng(point: LatLng) -> JsValue {
    js_sys::Array::of2(&JsValue::from_f64(point.lat), &JsValue::from_f64(point.lng)).into()
}

/// `[[south, west], [north, east]]`
pub fn lat_lng_bounds(bounds: &Bounds) -> JsValue {
    js_sys::Array::of2(&lat_lng(bounds.south_west()), &lat_lng(bounds.north_east())).into()
}

/// Mensaje legible de una excepción JS
pub fn js_error_message(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            js_sys::Reflect::get(err, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", err))
}
