// ============================================================================
// ANNUAIRE MAP - Mapa de empresas y farmacias de guardia (Rust + WASM)
// ============================================================================
// - models: marcadores y filas del annuaire
// - maps: sincronizador de marcadores + backends (Leaflet / memoria)
// - components: componente Yew que aloja el mapa
// ============================================================================

pub mod config;
pub mod maps;
pub mod models;
pub mod utils;

#[cfg(target_arch = "wasm32")]
pub mod bindings;
#[cfg(target_arch = "wasm32")]
pub mod components;
#[cfg(target_arch = "wasm32")]
mod dom;

pub use config::{MapConfig, CONFIG};
pub use maps::{InitializationError, MapBackend, MapError, MarkerClickHandler, MarkerSynchronizer};
pub use models::{LatLng, MapMarker, MarkerVariant};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    // Panic hook + logging a la consola del navegador
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("🚀 Annuaire map listo");
}
