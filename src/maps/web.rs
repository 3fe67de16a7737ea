use gloo_timers::callback::Timeout;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::config::MapConfig;
use crate::dom::build_popup;
use crate::models::{LatLng, MarkerVariant};
use crate::utils::leaflet_ffi::{self, LeafletMap, LeafletMarker, LeafletTileLayer};

use super::camera::Bounds;
use super::traits::{MapBackend, MarkerClick, MarkerSpec};
use super::MapError;

/// Espera antes de `invalidateSize`, para que el contenedor tenga su tamaño final
const INVALIDATE_SIZE_DELAY_MS: u32 = 100;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapOptions {
    center: [f64; 2],
    zoom: f64,
    max_zoom: f64,
    scroll_wheel_zoom: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TileLayerOptions<'a> {
    attribution: &'a str,
    max_zoom: f64,
}

#[derive(Serialize)]
struct PaddingOptions {
    padding: [u32; 2],
}

/// Marcador Leaflet + el closure de click que lo mantiene vivo
pub struct LeafletMarkerHandle {
    marker: LeafletMarker,
    on_click: Closure<dyn FnMut()>,
}

/// Renderizador de mapas para web usando Leaflet
#[derive(Default)]
pub struct LeafletBackend {
    map: Option<LeafletMap>,
    tiles: Option<LeafletTileLayer>,
    default_icon: Option<JsValue>,
    premium_icon: Option<JsValue>,
    resize: Option<Timeout>,
}

impl LeafletBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self) -> Result<&LeafletMap, MapError> {
        self.map.as_ref().ok_or(MapError::NotReady)
    }

    fn icon(&self, variant: MarkerVariant) -> Option<&JsValue> {
        match variant {
            MarkerVariant::Default => self.default_icon.as_ref(),
            MarkerVariant::Premium => self.premium_icon.as_ref(),
        }
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, MapError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| MapError::Backend(e.to_string()))
}

fn js_err(err: JsValue) -> MapError {
    MapError::Backend(leaflet_ffi::js_error_message(&err))
}

fn point(p: LatLng) -> [f64; 2] {
    [p.lat, p.lng]
}

impl MapBackend for LeafletBackend {
    type Surface = HtmlElement;
    type Marker = LeafletMarkerHandle;

    fn create_map(&mut self, surface: &HtmlElement, config: &MapConfig) -> Result<(), MapError> {
        let default_icon = leaflet_ffi::create_icon(&to_js(&config.default_icon)?).map_err(js_err)?;
        let premium_icon = leaflet_ffi::create_icon(&to_js(&config.premium_icon)?).map_err(js_err)?;

        let options = to_js(&MapOptions {
            center: point(config.center_default),
            zoom: config.zoom_default,
            max_zoom: config.max_zoom,
            scroll_wheel_zoom: config.scroll_wheel_zoom,
        })?;
        let map = leaflet_ffi::create_map(surface, &options).map_err(js_err)?;
        log::info!("🗺️ Leaflet creado");

        let resize_target = map.clone();
        self.resize = Some(Timeout::new(INVALIDATE_SIZE_DELAY_MS, move || {
            resize_target.invalidate_size();
        }));
        self.map = Some(map);
        self.default_icon = Some(default_icon);
        self.premium_icon = Some(premium_icon);
        Ok(())
    }

    fn add_tile_layer(&mut self, url: &str, attribution: &str, max_zoom: f64) -> Result<(), MapError> {
        let options = to_js(&TileLayerOptions { attribution, max_zoom })?;
        let tiles = leaflet_ffi::tile_layer(url, &options).map_err(js_err)?;
        tiles.add_tiles_to(self.map()?);
        self.tiles = Some(tiles);
        Ok(())
    }

    fn add_marker(&mut self, spec: &MarkerSpec, on_click: MarkerClick) -> Result<LeafletMarkerHandle, MapError> {
        let map = self.map()?;

        let options = js_sys::Object::new();
        if let Some(icon) = self.icon(spec.variant) {
            js_sys::Reflect::set(&options, &JsValue::from_str("icon"), icon).map_err(js_err)?;
        }

        let marker = leaflet_ffi::create_marker(&leaflet_ffi::lat_lng(spec.position), &options).map_err(js_err)?;
        let popup = build_popup(&spec.popup).map_err(js_err)?;
        marker.bind_popup(&popup);

        let on_click = Closure::wrap(Box::new(move || on_click()) as Box<dyn FnMut()>);
        marker.on("click", on_click.as_ref().unchecked_ref());
        marker.add_marker_to(map);

        Ok(LeafletMarkerHandle { marker, on_click })
    }

    fn remove_marker(&mut self, handle: LeafletMarkerHandle) {
        handle.marker.off("click", handle.on_click.as_ref().unchecked_ref());
        handle.marker.remove_marker();
        // El closure se libera aquí, sin forget()
    }

    fn set_view(&mut self, center: LatLng, zoom: f64) -> Result<(), MapError> {
        self.map()?.set_view(&leaflet_ffi::lat_lng(center), zoom).map_err(js_err)
    }

    fn fit_bounds(&mut self, bounds: &Bounds, padding_px: u32) -> Result<(), MapError> {
        let options = to_js(&PaddingOptions {
            padding: [padding_px, padding_px],
        })?;
        self.map()?
            .fit_bounds(&leaflet_ffi::lat_lng_bounds(bounds), &options)
            .map_err(js_err)
    }

    fn destroy(&mut self) {
        // Cancelar el timer pendiente antes de soltar el mapa
        if let Some(timeout) = self.resize.take() {
            timeout.cancel();
        }
        if let Some(tiles) = self.tiles.take() {
            tiles.remove_tiles();
        }
        if let Some(map) = self.map.take() {
            map.remove_map();
        }
        self.default_icon = None;
        self.premium_icon = None;
        log::debug!("Leaflet liberado");
    }
}
