use log::{debug, warn};
use web_sys::{Document, Window};

use crate::config::InteractionConfig;
use crate::dom::{query_all, Styled};
use crate::effects::reveal::VISIBLE_CLASS;
use crate::error::Result;

/// The user's motion preference, read once when the page starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionPreference {
    Full,
    Reduced,
}

impl MotionPreference {
    pub const MEDIA_QUERY: &'static str = "(prefers-reduced-motion: reduce)";

    pub fn detect(window: &Window) -> Self {
        match window.match_media(Self::MEDIA_QUERY) {
            Ok(Some(list)) if list.matches() => MotionPreference::Reduced,
            Ok(_) => MotionPreference::Full,
            Err(err) => {
                warn!("matchMedia failed, assuming full motion: {:?}", err);
                MotionPreference::Full
            }
        }
    }

    pub fn is_reduced(self) -> bool {
        self == MotionPreference::Reduced
    }
}

/// Puts an animated element straight into its final, visible state.
pub fn settle<E: Styled>(element: &E) {
    element.set_style("animation", "none");
    element.set_style("opacity", "1");
    element.set_style("transform", "none");
    element.add_class(VISIBLE_CLASS);
}

/// One-shot override for reduced motion. Returns how many elements were
/// settled; always zero for full motion.
pub fn apply(
    document: &Document,
    config: &InteractionConfig,
    motion: MotionPreference,
) -> Result<usize> {
    if !motion.is_reduced() {
        return Ok(0);
    }

    let elements = query_all(document, &config.motion_selector())?;
    elements.iter().for_each(settle);
    debug!("Reduced motion: settled {} element(s)", elements.len());
    Ok(elements.len())
}
