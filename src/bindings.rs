// ============================================================================
// JS BINDINGS - API para páginas que no usan Yew
// ============================================================================

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::config::CONFIG;
use crate::maps::web::LeafletBackend;
use crate::maps::MarkerSynchronizer;
use crate::models::{self, Business, Category, MapMarker, PharmacyOnDuty};

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Mapa del annuaire montado sobre un elemento del DOM
#[wasm_bindgen]
pub struct AnnuaireMap {
    inner: MarkerSynchronizer<LeafletBackend>,
}

#[wasm_bindgen]
impl AnnuaireMap {
    /// Crea el mapa en el elemento `container_id`. Lanza si el elemento no existe.
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str) -> Result<AnnuaireMap, JsValue> {
        let surface = crate::dom::document()
            .and_then(|doc| doc.get_element_by_id(container_id))
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        let mut inner = MarkerSynchronizer::new(LeafletBackend::new(), CONFIG.clone());
        inner
            .initialize(surface.as_ref())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }

    /// `markers`: array de `{id, name, lat, lng, category?, isPremium?, address?}`
    pub fn reconcile(&mut self, markers: JsValue) -> Result<(), JsValue> {
        let markers: Vec<MapMarker> = from_js(markers)?;
        self.inner.reconcile(&markers);
        Ok(())
    }

    #[wasm_bindgen(js_name = setOnMarkerClick)]
    pub fn set_on_marker_click(&self, handler: Option<js_sys::Function>) {
        let handler = handler.map(|f| -> crate::maps::MarkerClickHandler {
            std::rc::Rc::new(move |id: &str| {
                if let Err(err) = f.call1(&JsValue::NULL, &JsValue::from_str(id)) {
                    log::error!("❌ Error en onMarkerClick: {:?}", err);
                }
            })
        });
        self.inner.set_on_marker_click(handler);
    }

    pub fn teardown(&mut self) {
        self.inner.teardown();
    }
}

/// Filas `businesses` + `categories` -> marcadores
#[wasm_bindgen(js_name = businessMarkers)]
pub fn business_markers(businesses: JsValue, categories: JsValue) -> Result<JsValue, JsValue> {
    let businesses: Vec<Business> = from_js(businesses)?;
    let categories: Vec<Category> = from_js(categories)?;
    to_js(&models::business_markers(&businesses, &categories))
}

/// Filas `pharmacies_garde` -> marcadores de las farmacias de guardia en `date` (YYYY-MM-DD)
#[wasm_bindgen(js_name = pharmacyMarkers)]
pub fn pharmacy_markers(pharmacies: JsValue, date: &str) -> Result<JsValue, JsValue> {
    let pharmacies: Vec<PharmacyOnDuty> = from_js(pharmacies)?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("Invalid date {}: {}", date, e)))?;
    to_js(&models::pharmacy_markers(&pharmacies, date))
}
