//! Scroll-triggered reveal.
//!
//! Elements marked for reveal start out hidden by the stylesheet and gain the
//! `visible` class the first time enough of them scrolls into view. The class
//! is never taken away again.

use log::debug;
use web_sys::Document;

use crate::config::InteractionConfig;
use crate::dom::{query_all, Styled};
use crate::error::Result;
use crate::intersection::{viewport_options, Crossing, IntersectionWatch};

pub const VISIBLE_CLASS: &str = "visible";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Unrevealed,
    Visible,
}

impl RevealState {
    pub fn of<E: Styled>(element: &E) -> Self {
        if element.has_class(VISIBLE_CLASS) {
            RevealState::Visible
        } else {
            RevealState::Unrevealed
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Revealer {
    threshold: f64,
}

impl Revealer {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Applies one observer report to `target`.
    ///
    /// Only ever moves `Unrevealed -> Visible`; reports for an element that is
    /// already visible, or that is leaving the viewport, change nothing.
    /// An element too tall to ever reach the threshold is revealed as soon as
    /// it intersects at all.
    pub fn observe<E: Styled>(&self, target: &E, crossing: Crossing) -> RevealState {
        let enough = crossing.ratio >= self.threshold || crossing.reachable_ratio < self.threshold;
        if RevealState::of(target) == RevealState::Unrevealed && crossing.is_intersecting && enough {
            target.add_class(VISIBLE_CLASS);
        }
        RevealState::of(target)
    }
}

pub struct RevealWatch {
    watch: IntersectionWatch,
}

impl RevealWatch {
    /// Returns `None` when the page has nothing to reveal.
    pub fn attach(document: &Document, config: &InteractionConfig) -> Result<Option<Self>> {
        let targets = query_all(document, &config.reveal_selector)?;
        if targets.is_empty() {
            debug!("No {} elements, reveal not attached", config.reveal_selector);
            return Ok(None);
        }

        let revealer = Revealer::new(config.reveal_threshold);
        let options = viewport_options(&config.reveal_root_margin, config.reveal_threshold);
        // The watch stays registered after firing; later crossings are no-ops
        let watch = IntersectionWatch::new(Some(&options), move |target, crossing, _| {
            revealer.observe(target, crossing);
        })?;
        watch.observe_all(&targets);

        Ok(Some(Self { watch }))
    }

    pub fn detach(self) {
        self.watch.detach();
    }
}
