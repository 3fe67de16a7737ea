// ============================================================================
// DOM MODULE - Helpers para construir el contenido de los popups
// ============================================================================

pub mod builder;
pub mod element;

pub use builder::*;
pub use element::*;
