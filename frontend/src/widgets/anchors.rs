use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, MouseEvent, ScrollBehavior, ScrollToOptions, Window};

use crate::config::InteractionConfig;
use crate::dom::{query_all, Styled};
use crate::error::Result;

/// The in-page selector an anchor's `href` points at, if any.
///
/// A bare `#` is the conventional "go nowhere" link and is left alone.
pub fn target_selector(href: &str) -> Option<&str> {
    (href.len() > 1 && href.starts_with('#')).then_some(href)
}

/// Document offset to scroll to so that the target lands just below the
/// fixed navigation bar.
pub fn scroll_destination(target_top: f64, scroll_y: f64, nav_height: f64) -> f64 {
    target_top + scroll_y - nav_height
}

type ClickHandler = Closure<dyn FnMut(MouseEvent)>;

/// Smooth scrolling for every `href="#..."` link on the page.
pub struct AnchorLinks {
    bindings: Vec<(Element, ClickHandler)>,
}

impl AnchorLinks {
    pub fn attach(
        window: &Window,
        document: &Document,
        config: &InteractionConfig,
    ) -> Result<Option<Self>> {
        let anchors = query_all(document, &config.anchor_selector)?;
        if anchors.is_empty() {
            return Ok(None);
        }
        let nav = document.query_selector(&config.nav_selector)?;

        let mut bindings = Vec::with_capacity(anchors.len());
        for anchor in anchors {
            let on_click = Closure::wrap(Box::new({
                let anchor = anchor.clone();
                let window = window.clone();
                let document = document.clone();
                let nav = nav.clone();
                move |event: MouseEvent| {
                    let Some(href) = anchor.attr("href") else {
                        return;
                    };
                    let Some(selector) = target_selector(&href) else {
                        return;
                    };
                    // `#top-of-page!` and friends are valid hrefs but not selectors
                    let target = match document.query_selector(selector) {
                        Ok(Some(target)) => target,
                        Ok(None) => return,
                        Err(_) => {
                            debug!("Anchor {} is not a usable selector", href);
                            return;
                        }
                    };
                    event.prevent_default();

                    let nav_height = nav
                        .as_ref()
                        .and_then(|nav| nav.dyn_ref::<HtmlElement>())
                        .map(|nav| f64::from(nav.offset_height()))
                        .unwrap_or(0.0);
                    let scroll_y = window.scroll_y().unwrap_or(0.0);

                    let options = ScrollToOptions::new();
                    options.set_top(scroll_destination(target.span().top, scroll_y, nav_height));
                    options.set_behavior(ScrollBehavior::Smooth);
                    window.scroll_to_with_scroll_to_options(&options);
                }
            }) as Box<dyn FnMut(MouseEvent)>);

            anchor.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
            bindings.push((anchor, on_click));
        }

        debug!("Smooth scrolling {} anchor(s)", bindings.len());
        Ok(Some(Self { bindings }))
    }

    pub fn detach(self) {}
}

impl Drop for AnchorLinks {
    fn drop(&mut self) {
        for (anchor, on_click) in &self.bindings {
            let _ = anchor.remove_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_hash_is_ignored() {
        assert_eq!(target_selector("#"), None);
        assert_eq!(target_selector(""), None);
        assert_eq!(target_selector("/about#team"), None);
        assert_eq!(target_selector("#story"), Some("#story"));
    }

    #[test]
    fn destination_clears_the_nav_bar() {
        // Target 600px below the current viewport top, page already scrolled 250px
        assert_eq!(scroll_destination(600.0, 250.0, 80.0), 770.0);
        // Target above the viewport
        assert_eq!(scroll_destination(-400.0, 1000.0, 80.0), 520.0);
        assert_eq!(scroll_destination(120.0, 0.0, 0.0), 120.0);
    }
}
