// ============================================================================
// DIRECTORY ROWS - Filas del annuaire tal como llegan de la base de datos
// ============================================================================
// Solo conversión fila -> MapMarker, sin acceso a red
// ============================================================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::MapMarker;

/// Etiqueta mostrada en el popup de las farmacias de guardia
pub const PHARMACY_ON_DUTY_LABEL: &str = "Pharmacie de garde";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
    Suspended,
}

/// Empresa del annuaire (tabla `businesses`, columnas usadas por el mapa)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub is_premium: Option<bool>,
    #[serde(default)]
    pub status: Option<BusinessStatus>,
}

/// Categoría (tabla `categories`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub parent_id: Option<String>,
}

/// Farmacia de guardia (tabla `pharmacies_garde`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PharmacyOnDuty {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Business {
    pub fn is_published(&self) -> bool {
        self.status == Some(BusinessStatus::Approved)
    }

    /// `None` si falta alguna coordenada
    pub fn to_map_marker(&self, categories: &HashMap<String, Category>) -> Option<MapMarker> {
        let (lat, lng) = (self.latitude?, self.longitude?);
        let category = self
            .category_id
            .as_ref()
            .and_then(|id| categories.get(id))
            .map(|c| c.name.clone());

        Some(MapMarker {
            id: self.id.clone(),
            name: self.name.clone(),
            lat,
            lng,
            category,
            is_premium: Some(self.is_premium.unwrap_or(false)),
            address: self.address.clone(),
        })
    }
}

impl PharmacyOnDuty {
    /// Ventana de guardia inclusiva en ambos extremos
    pub fn is_on_duty(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn to_map_marker(&self) -> Option<MapMarker> {
        let (lat, lng) = (self.latitude?, self.longitude?);
        Some(MapMarker {
            id: self.id.clone(),
            name: self.name.clone(),
            lat,
            lng,
            category: Some(PHARMACY_ON_DUTY_LABEL.to_string()),
            is_premium: None,
            address: self.address.clone(),
        })
    }
}

/// Marcadores de las empresas publicadas con coordenadas
pub fn business_markers(businesses: &[Business], categories: &[Category]) -> Vec<MapMarker> {
    let by_id: HashMap<String, Category> = categories
        .iter()
        .map(|c| (c.id.clone(), c.clone()))
        .collect();

    let markers: Vec<MapMarker> = businesses
        .iter()
        .filter(|b| b.is_published())
        .filter_map(|b| b.to_map_marker(&by_id))
        .collect();

    log::debug!(
        "📍 {} empresas con coordenadas (de {} filas)",
        markers.len(),
        businesses.len()
    );
    markers
}

/// Marcadores de las farmacias de guardia en `date`
pub fn pharmacy_markers(pharmacies: &[PharmacyOnDuty], date: NaiveDate) -> Vec<MapMarker> {
    pharmacies
        .iter()
        .filter(|p| p.is_on_duty(date))
        .filter_map(PharmacyOnDuty::to_map_marker)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn categories() -> Vec<Category> {
        serde_json::from_value(json!([
            { "id": "cat-1", "name": "Restaurants", "slug": "restaurants", "parent_id": null }
        ]))
        .unwrap()
    }

    #[test]
    fn test_business_markers_keep_approved_rows_with_coordinates() {
        let rows: Vec<Business> = serde_json::from_value(json!([
            {
                "id": "b1", "name": "Le Baobab", "slug": "le-baobab",
                "address": "Rue des Jardins, Cocody", "category_id": "cat-1",
                "latitude": 5.336, "longitude": -4.027, "is_premium": true, "status": "approved"
            },
            {
                "id": "b2", "name": "Sans GPS", "slug": "sans-gps",
                "latitude": null, "longitude": -4.0, "status": "approved"
            },
            {
                "id": "b3", "name": "Brouillon", "slug": "brouillon",
                "latitude": 5.3, "longitude": -4.0, "status": "draft"
            }
        ]))
        .unwrap();

        let markers = business_markers(&rows, &categories());
        assert_eq!(markers.len(), 1);
        let marker = &markers[0];
        assert_eq!(marker.id, "b1");
        assert_eq!(marker.category.as_deref(), Some("Restaurants"));
        assert_eq!(marker.address.as_deref(), Some("Rue des Jardins, Cocody"));
        assert_eq!(marker.is_premium, Some(true));
    }

    #[test]
    fn test_unknown_category_is_left_empty() {
        let business: Business = serde_json::from_value(json!({
            "id": "b1", "name": "Chez Tantie", "category_id": "missing",
            "latitude": 5.3, "longitude": -4.0, "is_premium": null, "status": "approved"
        }))
        .unwrap();

        let marker = business.to_map_marker(&HashMap::new()).unwrap();
        assert_eq!(marker.category, None);
        assert_eq!(marker.is_premium, Some(false));
    }

    #[test]
    fn test_pharmacy_duty_window_is_inclusive() {
        let pharmacy: PharmacyOnDuty = serde_json::from_value(json!({
            "id": "p1", "name": "Pharmacie du Plateau",
            "address": "Avenue Franchet d'Esperey, Plateau",
            "latitude": 5.3167, "longitude": -4.0167,
            "start_date": "2026-10-12", "end_date": "2026-10-18"
        }))
        .unwrap();

        let day = |d| NaiveDate::from_ymd_opt(2026, 10, d).unwrap();
        assert!(!pharmacy.is_on_duty(day(11)));
        assert!(pharmacy.is_on_duty(day(12)));
        assert!(pharmacy.is_on_duty(day(18)));
        assert!(!pharmacy.is_on_duty(day(19)));

        let markers = pharmacy_markers(&[pharmacy], day(15));
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].category.as_deref(), Some(PHARMACY_ON_DUTY_LABEL));
        assert_eq!(markers[0].is_premium, None);
    }
}
