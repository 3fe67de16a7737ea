use crate::config::MapConfig;
use crate::models::{LatLng, MarkerVariant};

use super::camera::Bounds;
use super::popup::PopupContent;
use super::MapError;

/// Handler de click que el sincronizador entrega al backend por cada marcador
pub type MarkerClick = Box<dyn Fn()>;

/// Lo que el backend necesita para pintar un marcador
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub id: String,
    pub position: LatLng,
    pub variant: MarkerVariant,
    pub popup: PopupContent,
}

/// Widget de mapa imperativo (Leaflet en web, memoria en nativo/tests).
/// Solo el sincronizador lo toca.
pub trait MapBackend {
    /// Superficie de dibujo donde se monta el widget
    type Surface;
    /// Handle de un marcador pintado
    type Marker;

    /// Crear el widget sobre la superficie con la cámara inicial
    fn create_map(&mut self, surface: &Self::Surface, config: &MapConfig) -> Result<(), MapError>;

    /// Capa base de tiles
    fn add_tile_layer(&mut self, url: &str, attribution: &str, max_zoom: f64) -> Result<(), MapError>;

    fn add_marker(&mut self, spec: &MarkerSpec, on_click: MarkerClick) -> Result<Self::Marker, MapError>;

    fn remove_marker(&mut self, marker: Self::Marker);

    fn set_view(&mut self, center: LatLng, zoom: f64) -> Result<(), MapError>;

    fn fit_bounds(&mut self, bounds: &Bounds, padding_px: u32) -> Result<(), MapError>;

    /// Liberar el widget. Se llama como mucho una vez por widget creado.
    fn destroy(&mut self);
}
