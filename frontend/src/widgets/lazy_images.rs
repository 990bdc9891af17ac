use log::debug;
use wasm_bindgen::JsValue;
use web_sys::js_sys::Reflect;
use web_sys::{Document, Window};

use crate::config::InteractionConfig;
use crate::dom::{query_all, Styled};
use crate::error::Result;
use crate::intersection::IntersectionWatch;

pub const DEFERRED_SOURCE: &str = "data-src";

/// How deferred images get their real `src`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LazyLoadStrategy {
    /// The browser understands `loading="lazy"`; hand everything over to it.
    Native,
    /// Swap sources in ourselves as images scroll into view.
    IntersectionFallback,
}

impl LazyLoadStrategy {
    pub fn detect(window: &Window) -> Self {
        // Same test as `'loading' in HTMLImageElement.prototype`
        let supported = Reflect::get(window, &JsValue::from_str("HTMLImageElement"))
            .and_then(|image| Reflect::get(&image, &JsValue::from_str("prototype")))
            .and_then(|prototype| Reflect::has(&prototype, &JsValue::from_str("loading")))
            .unwrap_or(false);

        if supported {
            LazyLoadStrategy::Native
        } else {
            LazyLoadStrategy::IntersectionFallback
        }
    }

    /// Gives `image` its deferred source. Returns `false` when it has none.
    pub fn load<E: Styled>(self, image: &E) -> bool {
        let Some(src) = image.attr(DEFERRED_SOURCE).filter(|src| !src.is_empty()) else {
            return false;
        };
        if self == LazyLoadStrategy::Native {
            // Set before `src` so the browser never starts an eager fetch
            image.set_attr("loading", "lazy");
        }
        image.set_attr("src", &src);
        true
    }
}

pub struct LazyImages {
    watch: Option<IntersectionWatch>,
}

impl LazyImages {
    pub fn attach(
        document: &Document,
        config: &InteractionConfig,
        strategy: LazyLoadStrategy,
    ) -> Result<Option<Self>> {
        let images = query_all(document, &config.lazy_image_selector)?;
        if images.is_empty() {
            return Ok(None);
        }

        let watch = match strategy {
            LazyLoadStrategy::Native => {
                let loaded = images.iter().filter(|image| strategy.load(*image)).count();
                debug!("Native lazy loading for {} image(s)", loaded);
                None
            }
            LazyLoadStrategy::IntersectionFallback => {
                let watch = IntersectionWatch::new(None, move |image, crossing, observer| {
                    if crossing.is_intersecting {
                        strategy.load(image);
                        observer.unobserve(image);
                    }
                })?;
                watch.observe_all(&images);
                Some(watch)
            }
        };

        Ok(Some(Self { watch }))
    }

    pub fn detach(self) {
        if let Some(watch) = self.watch {
            watch.detach();
        }
    }
}
