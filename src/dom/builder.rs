// ============================================================================
// ELEMENT BUILDER - Builder pattern para crear elementos fácilmente
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, create_element, set_class_name, set_text_content};
use crate::maps::popup::{PopupContent, PopupLineKind};

pub struct ElementBuilder {
    element: Element,
}

impl ElementBuilder {
    pub fn new(tag: &str) -> Result<Self, JsValue> {
        Ok(Self {
            element: create_element(tag)?,
        })
    }

    pub fn class(self, class: &str) -> Self {
        set_class_name(&self.element, class);
        self
    }

    pub fn text(self, text: &str) -> Self {
        set_text_content(&self.element, text);
        self
    }

    pub fn child(self, child: Element) -> Result<Self, JsValue> {
        append_child(&self.element, &child)?;
        Ok(self)
    }

    pub fn build(self) -> Element {
        self.element
    }
}

/// Popup de marcador: un `<p>` por línea
pub fn build_popup(content: &PopupContent) -> Result<Element, JsValue> {
    let mut popup = ElementBuilder::new("div")?.class("text-sm");

    for line in &content.lines {
        let class = match line.kind {
            PopupLineKind::Name => "font-semibold",
            PopupLineKind::Category => "text-muted-foreground",
            PopupLineKind::Address => "text-muted-foreground text-xs mt-1",
        };
        let paragraph = ElementBuilder::new("p")?.class(class).text(&line.text).build();
        popup = popup.child(paragraph)?;
    }

    Ok(popup.build())
}
