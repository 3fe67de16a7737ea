// ============================================================================
// HEADLESS MAP - Backend en memoria (nativo / tests)
// ============================================================================
// Guarda lo que Leaflet pintaría: marcadores, popup, cámara y ciclo de vida
// ============================================================================

use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;

use crate::config::MapConfig;
use crate::models::{LatLng, MarkerVariant};

use super::camera::{resolve_fit, Bounds};
use super::traits::{MapBackend, MarkerClick, MarkerSpec};
use super::MapError;

/// Viewport simulado en píxeles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlessSurface {
    pub width: f64,
    pub height: f64,
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
        }
    }
}

/// Marcador pintado en memoria
pub struct RenderedMarker {
    pub id: String,
    pub position: LatLng,
    pub variant: MarkerVariant,
    pub popup_text: String,
    on_click: Rc<dyn Fn()>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct HeadlessMarker(u64);

#[derive(Default)]
pub struct HeadlessMap {
    created: usize,
    destroyed: usize,
    tile_url: Option<String>,
    markers: BTreeMap<u64, RenderedMarker>,
    next_handle: u64,
    viewport: (f64, f64),
    max_zoom: f64,
    center: Option<LatLng>,
    zoom: f64,
    last_fit: Option<(Bounds, u32)>,
    fail_create: bool,
    fail_tile_layer: bool,
    failing_ids: HashSet<String>,
}

impl HeadlessMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// `create_map` devolverá error
    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// `add_tile_layer` devolverá error
    pub fn failing_tile_layer(mut self) -> Self {
        self.fail_tile_layer = true;
        self
    }

    /// `add_marker` fallará para este id
    pub fn failing_marker(mut self, id: &str) -> Self {
        self.failing_ids.insert(id.to_string());
        self
    }

    pub fn created_count(&self) -> usize {
        self.created
    }

    pub fn destroyed_count(&self) -> usize {
        self.destroyed
    }

    pub fn is_alive(&self) -> bool {
        self.created > self.destroyed
    }

    pub fn tile_url(&self) -> Option<&str> {
        self.tile_url.as_deref()
    }

    pub fn markers(&self) -> impl Iterator<Item = &RenderedMarker> {
        self.markers.values()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn marker(&self, id: &str) -> Option<&RenderedMarker> {
        self.markers.values().find(|m| m.id == id)
    }

    pub fn center(&self) -> Option<LatLng> {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Último `fit_bounds` (None si la última operación fue `set_view`)
    pub fn last_fit(&self) -> Option<(Bounds, u32)> {
        self.last_fit
    }

    /// Handler de click del marcador, para llamarlo fuera de cualquier préstamo del mapa
    pub fn click_handler(&self, id: &str) -> Option<Rc<dyn Fn()>> {
        self.marker(id).map(|m| Rc::clone(&m.on_click))
    }

    /// Simula un click del usuario. false si no hay marcador con ese id.
    pub fn click(&self, id: &str) -> bool {
        match self.click_handler(id) {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    fn ensure_alive(&self) -> Result<(), MapError> {
        if self.is_alive() {
            Ok(())
        } else {
            Err(MapError::NotReady)
        }
    }
}

impl MapBackend for HeadlessMap {
    type Surface = HeadlessSurface;
    type Marker = HeadlessMarker;

    fn create_map(&mut self, surface: &HeadlessSurface, config: &MapConfig) -> Result<(), MapError> {
        if self.fail_create {
            return Err(MapError::Backend("simulated create failure".to_string()));
        }
        self.created += 1;
        self.viewport = (surface.width, surface.height);
        self.max_zoom = config.max_zoom;
        self.center = Some(config.center_default);
        self.zoom = config.zoom_default;
        Ok(())
    }

    fn add_tile_layer(&mut self, url: &str, _attribution: &str, _max_zoom: f64) -> Result<(), MapError> {
        self.ensure_alive()?;
        if self.fail_tile_layer {
            return Err(MapError::Backend("simulated tile layer failure".to_string()));
        }
        self.tile_url = Some(url.to_string());
        Ok(())
    }

    fn add_marker(&mut self, spec: &MarkerSpec, on_click: MarkerClick) -> Result<HeadlessMarker, MapError> {
        self.ensure_alive()?;
        if self.failing_ids.contains(&spec.id) {
            return Err(MapError::Backend(format!("simulated marker failure for {}", spec.id)));
        }
        if !spec.position.is_valid() {
            return Err(MapError::InvalidCoordinates);
        }

        let handle = self.next_handle;
        self.next_handle += 1;
        self.markers.insert(
            handle,
            RenderedMarker {
                id: spec.id.clone(),
                position: spec.position,
                variant: spec.variant,
                popup_text: spec.popup.to_plain_text(),
                on_click: Rc::from(on_click),
            },
        );
        Ok(HeadlessMarker(handle))
    }

    fn remove_marker(&mut self, marker: HeadlessMarker) {
        self.markers.remove(&marker.0);
    }

    fn set_view(&mut self, center: LatLng, zoom: f64) -> Result<(), MapError> {
        self.ensure_alive()?;
        self.center = Some(center);
        self.zoom = zoom;
        self.last_fit = None;
        Ok(())
    }

    fn fit_bounds(&mut self, bounds: &Bounds, padding_px: u32) -> Result<(), MapError> {
        self.ensure_alive()?;
        let (center, zoom) = resolve_fit(bounds, self.viewport, padding_px, self.max_zoom);
        self.center = Some(center);
        self.zoom = zoom;
        self.last_fit = Some((*bounds, padding_px));
        Ok(())
    }

    fn destroy(&mut self) {
        self.destroyed += 1;
        self.markers.clear();
        self.tile_url = None;
    }
}
