//! In-memory stand-ins for the page, used by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::dom::{Snapshot, Span, Styled};
use crate::intersection::{reachable_ratio, Crossing};

/// A scrollable page of fixed viewport height.
#[derive(Debug)]
pub struct FakePage {
    scroll_y: Rc<Cell<f64>>,
    pub viewport_height: f64,
}

impl FakePage {
    pub fn new(viewport_height: f64) -> Self {
        Self {
            scroll_y: Rc::new(Cell::new(0.0)),
            viewport_height,
        }
    }

    /// An element whose top edge sits `top` pixels into the document.
    pub fn element(&self, top: f64, height: f64) -> FakeElement {
        FakeElement {
            state: Rc::new(RefCell::new(FakeState {
                top,
                height,
                ..FakeState::default()
            })),
            scroll_y: Rc::clone(&self.scroll_y),
        }
    }

    pub fn scroll_to(&self, scroll_y: f64) {
        self.scroll_y.set(scroll_y);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            scroll_y: self.scroll_y.get(),
            viewport_height: self.viewport_height,
        }
    }

    /// What a viewport observer whose root is shrunk by `bottom_inset` pixels
    /// at the bottom would report for `element` right now.
    pub fn crossing(&self, element: &FakeElement, bottom_inset: f64) -> Crossing {
        let span = element.span();
        let root_bottom = self.viewport_height - bottom_inset;
        let overlap = (span.bottom.min(root_bottom) - span.top.max(0.0)).max(0.0);
        let height = span.bottom - span.top;
        Crossing {
            is_intersecting: overlap > 0.0,
            ratio: if height > 0.0 { overlap / height } else { 0.0 },
            reachable_ratio: reachable_ratio(root_bottom, height),
        }
    }
}

#[derive(Debug, Default)]
struct FakeState {
    top: f64,
    height: f64,
    classes: BTreeSet<String>,
    styles: BTreeMap<String, String>,
    attrs: BTreeMap<String, String>,
    text: String,
}

/// Shared handle, like a DOM node reference: clones see the same element.
#[derive(Debug, Clone)]
pub struct FakeElement {
    state: Rc<RefCell<FakeState>>,
    scroll_y: Rc<Cell<f64>>,
}

impl FakeElement {
    /// An element on a page that never scrolls.
    pub fn detached() -> Self {
        FakePage::new(0.0).element(0.0, 0.0)
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.state.borrow().styles.get(property).cloned()
    }
}

impl Styled for FakeElement {
    fn add_class(&self, name: &str) {
        self.state.borrow_mut().classes.insert(name.to_string());
    }

    fn remove_class(&self, name: &str) {
        self.state.borrow_mut().classes.remove(name);
    }

    fn has_class(&self, name: &str) -> bool {
        self.state.borrow().classes.contains(name)
    }

    fn set_style(&self, property: &str, value: &str) {
        self.state
            .borrow_mut()
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.state.borrow().attrs.get(name).cloned()
    }

    fn set_attr(&self, name: &str, value: &str) {
        self.state
            .borrow_mut()
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    fn remove_attr(&self, name: &str) {
        self.state.borrow_mut().attrs.remove(name);
    }

    fn span(&self) -> Span {
        let state = self.state.borrow();
        let top = state.top - self.scroll_y.get();
        Span::new(top, top + state.height)
    }

    fn text(&self) -> String {
        self.state.borrow().text.clone()
    }

    fn set_text(&self, text: &str) {
        self.state.borrow_mut().text = text.to_string();
    }
}

#[cfg(target_arch = "wasm32")]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

#[cfg(target_arch = "wasm32")]
pub fn dispatch_scroll(window: &web_sys::Window) {
    let event = web_sys::Event::new("scroll").unwrap();
    window.dispatch_event(&event).unwrap();
}

/// Resolves after every animation frame callback already requested has run.
#[cfg(target_arch = "wasm32")]
pub async fn next_frame(window: &web_sys::Window) {
    use web_sys::js_sys::{Function, Promise};

    let promise = Promise::new(&mut |resolve: Function, _reject: Function| {
        window.request_animation_frame(&resolve).unwrap();
    });
    wasm_bindgen_futures::JsFuture::from(promise).await.unwrap();
}
