// ============================================================================
// MARKER SYNCHRONIZER - Mantiene los marcadores del mapa al día
// ============================================================================
// Dueño exclusivo del widget: lo crea una vez, reconcilia marcadores y cámara
// en cada cambio de lista, y lo libera en teardown (o al hacer drop).
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::config::MapConfig;
use crate::models::{LatLng, MapMarker};

use super::camera::{self, CameraFraming};
use super::popup::PopupContent;
use super::traits::{MapBackend, MarkerClick, MarkerSpec};
use super::InitializationError;

/// Callback del llamador: recibe el id del marcador pulsado
pub type MarkerClickHandler = Rc<dyn Fn(&str)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Ready,
    TornDown,
}

struct LiveMarker<H> {
    marker: MapMarker,
    handle: H,
    /// false en cuanto el marcador deja de estar pintado
    alive: Rc<Cell<bool>>,
}

pub struct MarkerSynchronizer<B: MapBackend> {
    backend: B,
    config: MapConfig,
    phase: Phase,
    live: HashMap<String, LiveMarker<B::Marker>>,
    camera: CameraFraming,
    /// Última lista recibida antes de `initialize`
    pending: Option<Vec<MapMarker>>,
    on_marker_click: Rc<RefCell<Option<MarkerClickHandler>>>,
}

impl<B: MapBackend> MarkerSynchronizer<B> {
    pub fn new(backend: B, config: MapConfig) -> Self {
        let camera = CameraFraming::Centered {
            center: config.center_default,
            zoom: config.zoom_default,
        };
        Self {
            backend,
            config,
            phase: Phase::Idle,
            live: HashMap::new(),
            camera,
            pending: None,
            on_marker_click: Rc::new(RefCell::new(None)),
        }
    }

    /// Crear el widget sobre `surface`. No-op si ya está inicializado.
    pub fn initialize(&mut self, surface: Option<&B::Surface>) -> Result<(), InitializationError> {
        match self.phase {
            Phase::Ready => {
                log::debug!("🗺️ Mapa ya inicializado, ignorando");
                return Ok(());
            }
            Phase::TornDown => return Err(InitializationError::TornDown),
            Phase::Idle => {}
        }

        let surface = surface.ok_or(InitializationError::SurfaceUnavailable)?;

        self.backend.create_map(surface, &self.config)?;
        if let Err(err) = self.backend.add_tile_layer(
            &self.config.tile_url,
            &self.config.tile_attribution,
            self.config.max_zoom,
        ) {
            // Sin widget a medio construir
            self.backend.destroy();
            return Err(err.into());
        }

        self.phase = Phase::Ready;
        log::info!(
            "🗺️ Mapa inicializado en ({}, {}) zoom {}",
            self.config.center_default.lat,
            self.config.center_default.lng,
            self.config.zoom_default
        );

        if let Some(pending) = self.pending.take() {
            self.reconcile(&pending);
        }
        Ok(())
    }

    /// Reemplaza el callback de click (también para los marcadores ya pintados)
    pub fn set_on_marker_click(&self, handler: Option<MarkerClickHandler>) {
        *self.on_marker_click.borrow_mut() = handler;
    }

    /// Llevar los marcadores pintados y la cámara a `markers`
    pub fn reconcile(&mut self, markers: &[MapMarker]) {
        match self.phase {
            Phase::Idle => {
                log::debug!("⏳ Mapa no inicializado, guardando {} marcadores", markers.len());
                self.pending = Some(markers.to_vec());
                return;
            }
            Phase::TornDown => {
                log::debug!("Mapa destruido, reconcile ignorado");
                return;
            }
            Phase::Ready => {}
        }

        let next = usable_markers(markers);
        let wanted: HashMap<&str, &MapMarker> = next.iter().map(|m| (m.id.as_str(), *m)).collect();

        // 1. Fuera los que ya no están o han cambiado
        let stale: Vec<String> = self
            .live
            .iter()
            .filter(|(id, live)| wanted.get(id.as_str()).map_or(true, |m| **m != live.marker))
            .map(|(id, _)| id.clone())
            .collect();
        for id in &stale {
            if let Some(live) = self.live.remove(id) {
                live.alive.set(false);
                self.backend.remove_marker(live.handle);
            }
        }

        // 2. Pintar los nuevos
        let mut added = 0;
        for marker in &next {
            if self.live.contains_key(&marker.id) {
                continue;
            }

            let spec = MarkerSpec {
                id: marker.id.clone(),
                position: marker.position(),
                variant: marker.variant(),
                popup: PopupContent::for_marker(marker),
            };
            let alive = Rc::new(Cell::new(true));
            let on_click = self.click_dispatcher(&marker.id, &alive);

            match self.backend.add_marker(&spec, on_click) {
                Ok(handle) => {
                    self.live.insert(
                        marker.id.clone(),
                        LiveMarker {
                            marker: (*marker).clone(),
                            handle,
                            alive,
                        },
                    );
                    added += 1;
                }
                Err(err) => log::warn!("⚠️ Marcador {} omitido: {}", marker.id, err),
            }
        }

        log::debug!(
            "📍 Reconcile: {} quitados, {} añadidos, {} pintados",
            stale.len(),
            added,
            self.live.len()
        );

        // 3. Cámara con la lista nueva
        let points: Vec<LatLng> = next.iter().map(|m| m.position()).collect();
        if let Some(framing) = camera::frame_points(&points, &self.config) {
            let result = match framing {
                CameraFraming::Centered { center, zoom } => self.backend.set_view(center, zoom),
                CameraFraming::Fitted { bounds, padding_px } => self.backend.fit_bounds(&bounds, padding_px),
            };
            match result {
                Ok(()) => self.camera = framing,
                Err(err) => log::warn!("⚠️ No se pudo encuadrar la cámara: {}", err),
            }
        }
    }

    /// Liberar marcadores y widget. Idempotente.
    pub fn teardown(&mut self) {
        match self.phase {
            Phase::TornDown => return,
            Phase::Idle => {
                self.pending = None;
            }
            Phase::Ready => {
                for (_, live) in self.live.drain() {
                    live.alive.set(false);
                    self.backend.remove_marker(live.handle);
                }
                self.backend.destroy();
                log::info!("🧹 Mapa destruido");
            }
        }
        self.on_marker_click.borrow_mut().take();
        self.phase = Phase::TornDown;
    }

    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    /// Último encuadre aplicado
    pub fn camera(&self) -> CameraFraming {
        self.camera
    }

    pub fn rendered_ids(&self) -> HashSet<&str> {
        self.live.keys().map(String::as_str).collect()
    }

    pub fn rendered_count(&self) -> usize {
        self.live.len()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    fn click_dispatcher(&self, id: &str, alive: &Rc<Cell<bool>>) -> MarkerClick {
        let handler = Rc::clone(&self.on_marker_click);
        let alive = Rc::clone(alive);
        let id = id.to_string();
        Box::new(move || {
            if !alive.get() {
                return;
            }
            // Clonar antes de llamar: el handler puede volver a entrar en el sincronizador
            let callback = handler.borrow().clone();
            if let Some(callback) = callback {
                callback(&id);
            }
        })
    }
}

impl<B: MapBackend> Drop for MarkerSynchronizer<B> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Entradas pintables, sin ids repetidos (gana la última aparición, en la posición de la primera)
fn usable_markers(markers: &[MapMarker]) -> Vec<&MapMarker> {
    let mut order: Vec<&MapMarker> = Vec::with_capacity(markers.len());
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut skipped = 0;

    for marker in markers {
        if !marker.is_renderable() {
            skipped += 1;
            continue;
        }
        match index.get(marker.id.as_str()) {
            Some(&i) => order[i] = marker,
            None => {
                index.insert(marker.id.as_str(), order.len());
                order.push(marker);
            }
        }
    }

    if skipped > 0 {
        log::debug!("{} marcadores con coordenadas inválidas omitidos", skipped);
    }
    order
}
