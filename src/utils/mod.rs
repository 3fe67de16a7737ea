// Utils compartidos

#[cfg(target_arch = "wasm32")]
pub mod leaflet_ffi;
