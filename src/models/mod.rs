pub mod marker;
pub mod directory;

pub use marker::{LatLng, MapMarker, MarkerVariant};
pub use directory::{business_markers, pharmacy_markers, Business, BusinessStatus, Category, PharmacyOnDuty};
