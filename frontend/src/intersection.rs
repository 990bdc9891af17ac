use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::error::Result;

/// What an intersection observer reported for one target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    pub is_intersecting: bool,
    pub ratio: f64,
    /// Largest ratio the target can ever report against this root.
    pub reachable_ratio: f64,
}

impl Crossing {
    /// A report for a target that fits inside the root.
    pub fn new(is_intersecting: bool, ratio: f64) -> Self {
        Self {
            is_intersecting,
            ratio,
            reachable_ratio: 1.0,
        }
    }
}

/// Share of a target of `target_height` that a root of `root_height` can
/// cover at once.
pub fn reachable_ratio(root_height: f64, target_height: f64) -> f64 {
    if target_height > 0.0 {
        (root_height / target_height).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

impl From<&IntersectionObserverEntry> for Crossing {
    fn from(entry: &IntersectionObserverEntry) -> Self {
        // Cross-origin roots report no bounds
        let reachable = entry
            .root_bounds()
            .map(|root| reachable_ratio(root.height(), entry.bounding_client_rect().height()))
            .unwrap_or(1.0);
        Self {
            reachable_ratio: reachable,
            ..Self::new(entry.is_intersecting(), entry.intersection_ratio())
        }
    }
}

type EntriesCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// An `IntersectionObserver` together with the closure it calls.
///
/// Disconnects when dropped.
pub struct IntersectionWatch {
    observer: IntersectionObserver,
    _callback: EntriesCallback,
}

impl IntersectionWatch {
    /// `options` of `None` watches against the plain viewport with the
    /// browser's default threshold.
    pub fn new(
        options: Option<&IntersectionObserverInit>,
        mut on_entry: impl FnMut(&Element, Crossing, &IntersectionObserver) + 'static,
    ) -> Result<Self> {
        let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                on_entry(&entry.target(), Crossing::from(&entry), &observer);
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let observer = match options {
            Some(options) => {
                IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), options)?
            }
            None => IntersectionObserver::new(callback.as_ref().unchecked_ref())?,
        };

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe_all(&self, targets: &[Element]) {
        for target in targets {
            self.observer.observe(target);
        }
        debug!("Watching {} element(s) for intersection", targets.len());
    }

    pub fn detach(self) {}
}

impl Drop for IntersectionWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

pub fn viewport_options(root_margin: &str, threshold: f64) -> IntersectionObserverInit {
    let options = IntersectionObserverInit::new();
    options.set_root_margin(root_margin);
    options.set_threshold(&JsValue::from_f64(threshold));
    options
}
