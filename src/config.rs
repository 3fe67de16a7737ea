use serde::{Deserialize, Serialize};

use crate::models::LatLng;

/// Configuración del mapa del annuaire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    pub center_default: LatLng,
    pub zoom_default: f64,
    /// Zoom "quartier" usado cuando solo hay un marcador
    pub single_marker_zoom: f64,
    /// Margen en píxeles alrededor del bounding box
    pub padding_px: u32,
    pub max_zoom: f64,
    pub scroll_wheel_zoom: bool,
    pub tile_url: String,
    pub tile_attribution: String,
    pub default_icon: IconConfig,
    pub premium_icon: IconConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_default: LatLng::new(5.3599, -4.0083), // Abidjan
            zoom_default: 12.0,
            single_marker_zoom: 14.0,
            padding_px: 50,
            max_zoom: 19.0,
            scroll_wheel_zoom: true,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            tile_attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors".to_string(),
            default_icon: IconConfig::default_marker(),
            premium_icon: IconConfig::premium_marker(),
        }
    }
}

impl MapConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            center_default: LatLng::new(
                option_env!("DEFAULT_MAP_CENTER_LAT")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.center_default.lat),
                option_env!("DEFAULT_MAP_CENTER_LNG")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.center_default.lng),
            ),
            zoom_default: option_env!("DEFAULT_MAP_ZOOM")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.zoom_default),
            single_marker_zoom: option_env!("SINGLE_MARKER_ZOOM")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.single_marker_zoom),
            padding_px: option_env!("MAP_BOUNDS_PADDING_PX")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.padding_px),
            tile_url: option_env!("MAP_TILE_URL")
                .map(|s| s.to_string())
                .unwrap_or(defaults.tile_url),
            ..Self::default()
        }
    }

    /// Misma configuración con otro centro/zoom inicial (props del componente)
    pub fn with_view(mut self, center: Option<LatLng>, zoom: Option<f64>) -> Self {
        if let Some(center) = center {
            self.center_default = center;
        }
        if let Some(zoom) = zoom {
            self.zoom_default = zoom;
        }
        self
    }
}

/// Opciones de icono tal como las espera Leaflet (`L.icon`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconConfig {
    pub icon_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_retina_url: Option<String>,
    pub shadow_url: String,
    pub icon_size: [i32; 2],
    pub icon_anchor: [i32; 2],
    pub popup_anchor: [i32; 2],
    pub shadow_size: [i32; 2],
}

const LEAFLET_IMAGES: &str = "https://unpkg.com/leaflet@1.9.4/dist/images";

impl IconConfig {
    pub fn default_marker() -> Self {
        Self {
            icon_url: format!("{}/marker-icon.png", LEAFLET_IMAGES),
            icon_retina_url: Some(format!("{}/marker-icon-2x.png", LEAFLET_IMAGES)),
            ..Self::base()
        }
    }

    pub fn premium_marker() -> Self {
        Self {
            icon_url: "https://raw.githubusercontent.com/pointhi/leaflet-color-markers/master/img/marker-icon-2x-gold.png".to_string(),
            icon_retina_url: None,
            ..Self::base()
        }
    }

    fn base() -> Self {
        Self {
            icon_url: String::new(),
            icon_retina_url: None,
            shadow_url: format!("{}/marker-shadow.png", LEAFLET_IMAGES),
            icon_size: [25, 41],
            icon_anchor: [12, 41],
            popup_anchor: [1, -34],
            shadow_size: [41, 41],
        }
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: MapConfig = MapConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_abidjan() {
        let config = MapConfig::default();
        assert_eq!(config.center_default, LatLng::new(5.3599, -4.0083));
        assert_eq!(config.zoom_default, 12.0);
        assert_eq!(config.padding_px, 50);
        assert_eq!(config.single_marker_zoom, 14.0);
    }

    #[test]
    fn test_with_view_overrides_only_given_fields() {
        let config = MapConfig::default().with_view(None, Some(9.0));
        assert_eq!(config.center_default, LatLng::new(5.3599, -4.0083));
        assert_eq!(config.zoom_default, 9.0);
    }

    #[test]
    fn test_icon_options_use_leaflet_names() {
        let json = serde_json::to_value(IconConfig::premium_marker()).unwrap();
        assert_eq!(json["iconSize"], serde_json::json!([25, 41]));
        assert!(json.get("iconRetinaUrl").is_none());
        assert!(json["shadowUrl"].as_str().unwrap().ends_with("marker-shadow.png"));
    }
}
