use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Window};

use crate::dom::Styled;
use crate::error::Result;

pub const LOADED_CLASS: &str = "loaded";

pub fn mark_loaded<E: Styled>(body: &E) {
    body.add_class(LOADED_CLASS);
}

/// Adds `loaded` to `<body>` once the window's `load` event has fired.
pub struct LoadFlag {
    window: Window,
    on_load: Option<Closure<dyn FnMut()>>,
}

impl LoadFlag {
    pub fn attach(window: &Window, document: &Document) -> Result<Self> {
        // The wasm module can finish booting after `load` already fired
        if document.ready_state() == "complete" {
            if let Some(body) = document.body() {
                mark_loaded::<Element>(&body);
            }
            debug!("Document already loaded");
            return Ok(Self {
                window: window.clone(),
                on_load: None,
            });
        }

        let on_load = Closure::wrap(Box::new({
            let document = document.clone();
            move || {
                if let Some(body) = document.body() {
                    mark_loaded::<Element>(&body);
                }
            }
        }) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())?;

        Ok(Self {
            window: window.clone(),
            on_load: Some(on_load),
        })
    }

    pub fn detach(self) {}
}

impl Drop for LoadFlag {
    fn drop(&mut self) {
        if let Some(on_load) = self.on_load.take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("load", on_load.as_ref().unchecked_ref());
        }
    }
}
