// Módulo de mapas: sincronizador de marcadores + backends por plataforma

#[cfg(target_arch = "wasm32")]
pub mod web;

pub mod camera;
pub mod headless;
pub mod popup;
pub mod synchronizer;
pub mod traits;

pub use camera::{Bounds, CameraFraming};
pub use synchronizer::{MarkerClickHandler, MarkerSynchronizer};
pub use traits::{MapBackend, MarkerSpec};

/// Error de una operación del backend del mapa
#[derive(Debug, Clone, PartialEq)]
pub enum MapError {
    NotReady,
    InvalidCoordinates,
    Backend(String),
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::NotReady => write!(f, "Map is not ready"),
            MapError::InvalidCoordinates => write!(f, "Invalid coordinates"),
            MapError::Backend(msg) => write!(f, "Map backend error: {}", msg),
        }
    }
}

impl std::error::Error for MapError {}

/// Único error que sale del sincronizador
#[derive(Debug, Clone, PartialEq)]
pub enum InitializationError {
    /// La superficie de dibujo no existe (vista desmontada antes de crear el mapa)
    SurfaceUnavailable,
    /// `initialize` después de `teardown`
    TornDown,
    Backend(MapError),
}

impl std::fmt::Display for InitializationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InitializationError::SurfaceUnavailable => write!(f, "Map drawing surface is not available"),
            InitializationError::TornDown => write!(f, "Map was already torn down"),
            InitializationError::Backend(err) => write!(f, "Map initialization failed: {}", err),
        }
    }
}

impl std::error::Error for InitializationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InitializationError::Backend(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MapError> for InitializationError {
    fn from(err: MapError) -> Self {
        InitializationError::Backend(err)
    }
}
