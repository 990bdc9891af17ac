//! Subtle parallax for elements carrying `data-parallax="<speed>"`.

use log::debug;
use web_sys::{Document, Window};

use crate::config::InteractionConfig;
use crate::dom::{query_all, Span, Styled};
use crate::effects::reduced_motion::MotionPreference;
use crate::error::Result;
use crate::frame::ScrollFrames;

pub const SPEED_ATTRIBUTE: &str = "data-parallax";

/// Parses a speed factor, falling back to `default` for anything that is not
/// a finite number.
pub fn speed_factor(raw: Option<&str>, default: f64) -> f64 {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|speed| speed.is_finite())
        .unwrap_or(default)
}

/// Vertical offset for an element, or `None` when it is outside the viewport.
pub fn offset(span: Span, viewport_height: f64, speed: f64) -> Option<f64> {
    span.overlaps_viewport(viewport_height)
        .then(|| (span.top - viewport_height) * speed)
}

#[derive(Debug, Clone)]
struct Layer<E> {
    element: E,
    speed: f64,
}

#[derive(Debug, Clone)]
pub struct ParallaxDriver<E> {
    layers: Vec<Layer<E>>,
}

impl<E: Styled> ParallaxDriver<E> {
    pub fn new(elements: impl IntoIterator<Item = E>, default_speed: f64) -> Self {
        let layers = elements
            .into_iter()
            .map(|element| {
                let speed = speed_factor(element.attr(SPEED_ATTRIBUTE).as_deref(), default_speed);
                Layer { element, speed }
            })
            .collect();
        Self { layers }
    }

    /// Moves every layer currently in view. Returns how many were moved.
    ///
    /// Layers outside the viewport keep whatever transform they had.
    pub fn update(&self, viewport_height: f64) -> usize {
        let mut moved = 0;
        for layer in &self.layers {
            if let Some(y) = offset(layer.element.span(), viewport_height, layer.speed) {
                layer
                    .element
                    .set_style("transform", &format!("translateY({}px)", y));
                moved += 1;
            }
        }
        moved
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

pub struct ParallaxWatch {
    frames: ScrollFrames,
}

impl ParallaxWatch {
    /// Not attached at all for reduced motion or when nothing is marked.
    pub fn attach(
        window: &Window,
        document: &Document,
        config: &InteractionConfig,
        motion: MotionPreference,
    ) -> Result<Option<Self>> {
        if motion.is_reduced() {
            debug!("Reduced motion requested, parallax not attached");
            return Ok(None);
        }

        let driver = ParallaxDriver::new(
            query_all(document, &config.parallax_selector)?,
            config.parallax_default_speed,
        );
        if driver.is_empty() {
            return Ok(None);
        }
        debug!("Parallax on {} element(s)", driver.len());

        let frames = ScrollFrames::attach(window, move |snapshot| {
            driver.update(snapshot.viewport_height);
        })?;
        Ok(Some(Self { frames }))
    }

    pub fn detach(self) {
        self.frames.detach();
    }
}
