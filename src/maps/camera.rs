// ============================================================================
// CAMERA - Encuadre del mapa a partir de una lista de marcadores
// ============================================================================

use std::f64::consts::PI;

use crate::config::MapConfig;
use crate::models::LatLng;

const TILE_SIZE: f64 = 256.0;
const MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_6;

/// Rectángulo mínimo que cubre un conjunto de puntos.
/// No trata el antimeridiano: un conjunto que lo cruza da un rectángulo que da la vuelta al mundo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// `None` si no hay ningún punto válido
    pub fn covering<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LatLng>,
    {
        points
            .into_iter()
            .filter(LatLng::is_valid)
            .fold(None, |acc: Option<Bounds>, p| {
                Some(match acc {
                    None => Bounds {
                        south: p.lat,
                        west: p.lng,
                        north: p.lat,
                        east: p.lng,
                    },
                    Some(b) => Bounds {
                        south: b.south.min(p.lat),
                        west: b.west.min(p.lng),
                        north: b.north.max(p.lat),
                        east: b.east.max(p.lng),
                    },
                })
            })
    }

    pub fn south_west(&self) -> LatLng {
        LatLng::new(self.south, self.west)
    }

    pub fn north_east(&self) -> LatLng {
        LatLng::new(self.north, self.east)
    }

    pub fn contains(&self, point: LatLng) -> bool {
        (self.south..=self.north).contains(&point.lat) && (self.west..=self.east).contains(&point.lng)
    }
}

/// Encuadre de cámara: un punto con zoom fijo, o un bounding box con margen
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraFraming {
    Centered { center: LatLng, zoom: f64 },
    Fitted { bounds: Bounds, padding_px: u32 },
}

/// Encuadre para los puntos dados. `None` = no tocar la cámara (lista vacía).
pub fn frame_points(points: &[LatLng], config: &MapConfig) -> Option<CameraFraming> {
    match points {
        [] => None,
        [single] => Some(CameraFraming::Centered {
            center: *single,
            zoom: config.single_marker_zoom,
        }),
        many => Bounds::covering(many.iter().copied()).map(|bounds| CameraFraming::Fitted {
            bounds,
            padding_px: config.padding_px,
        }),
    }
}

/// Proyección Web Mercator a píxeles de mundo en zoom 0
fn project(point: LatLng) -> (f64, f64) {
    let lat = point.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
    let x = (point.lng + 180.0) / 360.0 * TILE_SIZE;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * TILE_SIZE;
    (x, y)
}

fn unproject(x: f64, y: f64) -> LatLng {
    let lng = x / TILE_SIZE * 360.0 - 180.0;
    let n = PI * (1.0 - 2.0 * y / TILE_SIZE);
    let lat = n.sinh().atan().to_degrees();
    LatLng::new(lat, lng)
}

/// Centro y zoom entero resultantes de encajar `bounds` en un viewport de
/// `viewport` píxeles con `padding_px` a cada lado (mismo cálculo que `fitBounds` de Leaflet).
pub fn resolve_fit(bounds: &Bounds, viewport: (f64, f64), padding_px: u32, max_zoom: f64) -> (LatLng, f64) {
    let (west_x, south_y) = project(bounds.south_west());
    let (east_x, north_y) = project(bounds.north_east());

    let center = unproject((west_x + east_x) / 2.0, (south_y + north_y) / 2.0);

    let padding = 2.0 * padding_px as f64;
    let available = ((viewport.0 - padding).max(0.0), (viewport.1 - padding).max(0.0));
    let span = ((east_x - west_x).abs(), (south_y - north_y).abs());

    let scale_x = if span.0 > 0.0 { available.0 / span.0 } else { f64::INFINITY };
    let scale_y = if span.1 > 0.0 { available.1 / span.1 } else { f64::INFINITY };
    let scale = scale_x.min(scale_y);

    let zoom = if scale.is_infinite() {
        max_zoom
    } else if scale <= 0.0 {
        0.0
    } else {
        scale.log2().floor().clamp(0.0, max_zoom)
    };

    (center, zoom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_empty_list_keeps_camera() {
        assert_eq!(frame_points(&[], &MapConfig::default()), None);
    }

    #[test]
    fn test_single_point_is_centered_at_neighbourhood_zoom() {
        let config = MapConfig::default();
        let framing = frame_points(&[LatLng::new(5.336, -4.027)], &config);
        assert_eq!(
            framing,
            Some(CameraFraming::Centered {
                center: LatLng::new(5.336, -4.027),
                zoom: config.single_marker_zoom,
            })
        );
    }

    #[test]
    fn test_bounds_cover_all_points() {
        let points = [
            LatLng::new(5.30, -4.00),
            LatLng::new(5.40, -3.90),
            LatLng::new(5.35, -3.95),
        ];
        let bounds = Bounds::covering(points).unwrap();
        assert_eq!(
            bounds,
            Bounds {
                south: 5.30,
                west: -4.00,
                north: 5.40,
                east: -3.90
            }
        );
        assert!(points.iter().all(|p| bounds.contains(*p)));
    }

    #[test]
    fn test_bounds_skip_invalid_points() {
        let bounds = Bounds::covering([
            LatLng::new(f64::NAN, 0.0),
            LatLng::new(5.0, -4.0),
            LatLng::new(200.0, 0.0),
        ])
        .unwrap();
        assert_eq!(bounds.south_west(), LatLng::new(5.0, -4.0));
        assert_eq!(bounds.north_east(), LatLng::new(5.0, -4.0));
        assert_eq!(Bounds::covering([LatLng::new(f64::NAN, 0.0)]), None);
    }

    #[test]
    fn test_resolve_fit_world() {
        let world = Bounds {
            south: -MAX_MERCATOR_LAT,
            west: -180.0,
            north: MAX_MERCATOR_LAT,
            east: 180.0,
        };
        let (center, zoom) = resolve_fit(&world, (256.0, 256.0), 0, 19.0);
        assert!(approx(center.lat, 0.0));
        assert!(approx(center.lng, 0.0));
        assert_eq!(zoom, 0.0);

        let (_, zoom) = resolve_fit(&world, (1030.0, 1030.0), 0, 19.0);
        assert_eq!(zoom, 2.0);
    }

    #[test]
    fn test_resolve_fit_padding_lowers_zoom() {
        let bounds = Bounds {
            south: 5.30,
            west: -4.00,
            north: 5.40,
            east: -3.90,
        };
        let (center, tight) = resolve_fit(&bounds, (800.0, 400.0), 0, 19.0);
        let (_, padded) = resolve_fit(&bounds, (800.0, 400.0), 50, 19.0);
        assert!(padded <= tight);
        assert!(bounds.contains(center));
        assert!(approx(center.lng, -3.95));
    }

    #[test]
    fn test_resolve_fit_degenerate_bounds_uses_max_zoom() {
        let point = Bounds::covering([LatLng::new(5.0, -4.0)]).unwrap();
        let (center, zoom) = resolve_fit(&point, (800.0, 400.0), 50, 18.0);
        assert_eq!(zoom, 18.0);
        assert!(approx(center.lat, 5.0));
        assert!(approx(center.lng, -4.0));
    }
}
