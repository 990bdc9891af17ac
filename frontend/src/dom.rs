use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::error::Result;

/// Vertical extent of an element's bounding box, in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub top: f64,
    pub bottom: f64,
}

impl Span {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// True when some part of the span lies between the top and bottom edges
    /// of a viewport of the given height.
    pub fn overlaps_viewport(&self, viewport_height: f64) -> bool {
        self.top < viewport_height && self.bottom > 0.0
    }
}

/// Scroll geometry read once per animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub scroll_y: f64,
    pub viewport_height: f64,
}

impl Snapshot {
    pub fn read(window: &Window) -> Result<Self> {
        let scroll_y = window.scroll_y()?;
        let viewport_height = window.inner_height()?.as_f64().unwrap_or(0.0);
        Ok(Self {
            scroll_y,
            viewport_height,
        })
    }
}

/// The handful of element operations the interactions need.
///
/// Implemented for [`web_sys::Element`] in the browser and by a fake element
/// in tests, so every effect's decision logic runs without a DOM.
pub trait Styled: Clone {
    fn add_class(&self, name: &str);
    fn remove_class(&self, name: &str);
    fn has_class(&self, name: &str) -> bool;
    fn set_style(&self, property: &str, value: &str);
    fn attr(&self, name: &str) -> Option<String>;
    fn set_attr(&self, name: &str, value: &str);
    fn remove_attr(&self, name: &str);
    fn span(&self) -> Span;
    fn text(&self) -> String;
    fn set_text(&self, text: &str);
}

impl Styled for Element {
    fn add_class(&self, name: &str) {
        let _ = self.class_list().add_1(name);
    }

    fn remove_class(&self, name: &str) {
        let _ = self.class_list().remove_1(name);
    }

    fn has_class(&self, name: &str) -> bool {
        self.class_list().contains(name)
    }

    fn set_style(&self, property: &str, value: &str) {
        // Only HTML elements carry an inline style declaration
        if let Some(html) = self.dyn_ref::<HtmlElement>() {
            let _ = html.style().set_property(property, value);
        }
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn set_attr(&self, name: &str, value: &str) {
        let _ = self.set_attribute(name, value);
    }

    fn remove_attr(&self, name: &str) {
        let _ = self.remove_attribute(name);
    }

    fn span(&self) -> Span {
        let rect = self.get_bounding_client_rect();
        Span::new(rect.top(), rect.bottom())
    }

    fn text(&self) -> String {
        self.text_content().unwrap_or_default()
    }

    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }
}

/// Every element matching `selector`, in document order.
pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>> {
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|index| nodes.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}
