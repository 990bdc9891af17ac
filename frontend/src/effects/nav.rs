use log::debug;
use web_sys::{Document, Window};

use crate::config::InteractionConfig;
use crate::dom::{Snapshot, Styled};
use crate::error::Result;
use crate::frame::ScrollFrames;

pub const NAV_SCROLLED_CLASS: &str = "nav-scrolled";

/// Keeps `nav-scrolled` on the navigation bar in step with the scroll offset.
#[derive(Debug, Clone)]
pub struct NavToggler<E> {
    nav: E,
    threshold: f64,
}

impl<E: Styled> NavToggler<E> {
    pub fn new(nav: E, threshold: f64) -> Self {
        Self { nav, threshold }
    }

    pub fn is_scrolled(&self, scroll_y: f64) -> bool {
        scroll_y > self.threshold
    }

    pub fn update(&self, scroll_y: f64) {
        if self.is_scrolled(scroll_y) {
            self.nav.add_class(NAV_SCROLLED_CLASS);
        } else {
            self.nav.remove_class(NAV_SCROLLED_CLASS);
        }
    }
}

pub struct NavWatch {
    frames: ScrollFrames,
}

impl NavWatch {
    pub fn attach(
        window: &Window,
        document: &Document,
        config: &InteractionConfig,
    ) -> Result<Option<Self>> {
        let Some(nav) = document.query_selector(&config.nav_selector)? else {
            debug!("No {} element, nav toggle not attached", config.nav_selector);
            return Ok(None);
        };

        let toggler = NavToggler::new(nav, config.nav_threshold);
        // Initial check, the page may open already scrolled
        toggler.update(Snapshot::read(window)?.scroll_y);

        let frames = ScrollFrames::attach(window, move |snapshot| toggler.update(snapshot.scroll_y))?;
        Ok(Some(Self { frames }))
    }

    pub fn detach(self) {
        self.frames.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakePage;

    #[test]
    fn flag_tracks_threshold_at_each_offset() {
        let page = FakePage::new(800.0);
        let nav = page.element(0.0, 64.0);
        let toggler = NavToggler::new(nav.clone(), 100.0);

        for (offset, expected) in [
            (0.0, false),
            (99.0, false),
            (100.0, false),
            (101.0, true),
            (5000.0, true),
        ] {
            page.scroll_to(offset);
            toggler.update(page.snapshot().scroll_y);
            assert_eq!(nav.has_class(NAV_SCROLLED_CLASS), expected, "offset {offset}");
        }
    }

    #[test]
    fn flag_is_removed_when_scrolling_back_up() {
        let page = FakePage::new(800.0);
        let nav = page.element(0.0, 64.0);
        let toggler = NavToggler::new(nav.clone(), 100.0);

        toggler.update(400.0);
        assert!(nav.has_class(NAV_SCROLLED_CLASS));
        toggler.update(20.0);
        assert!(!nav.has_class(NAV_SCROLLED_CLASS));
    }
}
