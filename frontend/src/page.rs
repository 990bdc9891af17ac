use log::{debug, info};
use web_sys::Window;

use crate::config::InteractionConfig;
use crate::effects::nav::NavWatch;
use crate::effects::parallax::ParallaxWatch;
use crate::effects::reduced_motion::{self, MotionPreference};
use crate::effects::reveal::RevealWatch;
use crate::error::{Error, Result};
use crate::widgets::anchors::AnchorLinks;
use crate::widgets::lazy_images::{LazyImages, LazyLoadStrategy};
use crate::widgets::newsletter::NewsletterForm;
use crate::widgets::page_load::LoadFlag;

/// Every interaction attached to the current document.
///
/// Each field owns its listeners and observers; dropping the handle (or
/// calling [`Interactions::detach`]) removes them all.
pub struct Interactions {
    reveal: Option<RevealWatch>,
    nav: Option<NavWatch>,
    parallax: Option<ParallaxWatch>,
    lazy_images: Option<LazyImages>,
    anchors: Option<AnchorLinks>,
    newsletter: Option<NewsletterForm>,
    load_flag: LoadFlag,
}

impl Interactions {
    pub fn attach(window: &Window, config: &InteractionConfig) -> Result<Self> {
        let document = window.document().ok_or(Error::MissingDocument)?;

        let motion = MotionPreference::detect(window);
        let lazy_strategy = LazyLoadStrategy::detect(window);
        debug!("Motion: {:?}, lazy images: {:?}", motion, lazy_strategy);

        reduced_motion::apply(&document, config, motion)?;

        let interactions = Self {
            reveal: RevealWatch::attach(&document, config)?,
            nav: NavWatch::attach(window, &document, config)?,
            parallax: ParallaxWatch::attach(window, &document, config, motion)?,
            lazy_images: LazyImages::attach(&document, config, lazy_strategy)?,
            anchors: AnchorLinks::attach(window, &document, config)?,
            newsletter: NewsletterForm::attach(&document, config)?,
            load_flag: LoadFlag::attach(window, &document)?,
        };
        info!("Interactions attached ({})", interactions.summary());
        Ok(interactions)
    }

    fn summary(&self) -> String {
        [
            ("reveal", self.reveal.is_some()),
            ("nav", self.nav.is_some()),
            ("parallax", self.parallax.is_some()),
            ("lazy-images", self.lazy_images.is_some()),
            ("anchors", self.anchors.is_some()),
            ("newsletter", self.newsletter.is_some()),
        ]
        .iter()
        .filter(|(_, attached)| *attached)
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
    }

    pub fn detach(self) {
        let Self {
            reveal,
            nav,
            parallax,
            lazy_images,
            anchors,
            newsletter,
            load_flag,
        } = self;

        if let Some(reveal) = reveal {
            reveal.detach();
        }
        if let Some(nav) = nav {
            nav.detach();
        }
        if let Some(parallax) = parallax {
            parallax.detach();
        }
        if let Some(lazy_images) = lazy_images {
            lazy_images.detach();
        }
        if let Some(anchors) = anchors {
            anchors.detach();
        }
        if let Some(newsletter) = newsletter {
            newsletter.detach();
        }
        load_flag.detach();
        debug!("Interactions detached");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use crate::dom::Styled;
    use crate::effects::nav::NAV_SCROLLED_CLASS;
    use crate::testing::{dispatch_scroll, next_frame};
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    async fn detached_interactions_stop_reacting_to_scroll() {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        let nav = document.create_element("nav").unwrap();
        nav.set_class_name("nav");
        document.body().unwrap().append_child(&nav).unwrap();

        // Any offset counts as scrolled
        let config = InteractionConfig {
            nav_threshold: -1.0,
            ..InteractionConfig::default()
        };
        let interactions = Interactions::attach(&window, &config).unwrap();
        assert!(interactions.nav.is_some());
        assert!(nav.has_class(NAV_SCROLLED_CLASS));

        nav.remove_class(NAV_SCROLLED_CLASS);
        dispatch_scroll(&window);
        next_frame(&window).await;
        assert!(nav.has_class(NAV_SCROLLED_CLASS));

        interactions.detach();
        nav.remove_class(NAV_SCROLLED_CLASS);
        dispatch_scroll(&window);
        next_frame(&window).await;
        assert!(!nav.has_class(NAV_SCROLLED_CLASS));

        nav.remove();
    }
}
