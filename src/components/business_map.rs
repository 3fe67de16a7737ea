// ============================================================================
// BUSINESS MAP - Componente Yew que aloja el sincronizador de marcadores
// ============================================================================
// mount -> initialize, cambio de markers -> reconcile, unmount -> teardown
// ============================================================================

use std::rc::Rc;

use web_sys::HtmlElement;
use yew::prelude::*;

use crate::config::CONFIG;
use crate::maps::web::LeafletBackend;
use crate::maps::{MarkerClickHandler, MarkerSynchronizer};
use crate::models::{LatLng, MapMarker};

#[derive(Properties, PartialEq)]
pub struct BusinessMapProps {
    pub markers: Vec<MapMarker>,
    /// Centro inicial (por defecto el de la configuración)
    #[prop_or_default]
    pub center: Option<LatLng>,
    #[prop_or_default]
    pub zoom: Option<f64>,
    #[prop_or(AttrValue::from("h-[400px] w-full rounded-xl"))]
    pub class: AttrValue,
    #[prop_or_default]
    pub on_marker_click: Option<Callback<String>>,
}

#[function_component(BusinessMap)]
pub fn business_map(props: &BusinessMapProps) -> Html {
    let container = use_node_ref();

    let synchronizer = {
        let (center, zoom) = (props.center, props.zoom);
        use_mut_ref(move || {
            MarkerSynchronizer::new(LeafletBackend::new(), CONFIG.clone().with_view(center, zoom))
        })
    };

    // Montaje / desmontaje del widget
    {
        let container = container.clone();
        let synchronizer = synchronizer.clone();
        use_effect_with((), move |_| {
            let surface = container.cast::<HtmlElement>();
            if let Err(err) = synchronizer.borrow_mut().initialize(surface.as_ref()) {
                log::error!("❌ No se pudo inicializar el mapa: {}", err);
            }
            move || synchronizer.borrow_mut().teardown()
        });
    }

    // Callback de click
    {
        let synchronizer = synchronizer.clone();
        use_effect_with(props.on_marker_click.clone(), move |on_click| {
            let handler = on_click.clone().map(|callback| -> MarkerClickHandler {
                Rc::new(move |id: &str| callback.emit(id.to_string()))
            });
            synchronizer.borrow().set_on_marker_click(handler);
            || ()
        });
    }

    // Marcadores + cámara
    {
        let synchronizer = synchronizer.clone();
        use_effect_with(props.markers.clone(), move |markers| {
            synchronizer.borrow_mut().reconcile(markers);
            || ()
        });
    }

    html! {
        <div ref={container} class={props.class.clone()} style="z-index: 0;" />
    }
}
