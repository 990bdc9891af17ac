use log::{warn, Level};
use serde::Deserialize;
use web_sys::Document;

use crate::error::Result;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Chatty while running under `trunk serve`
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Selectors and tuning for every interaction on the page.
///
/// The defaults match the markup the site ships with. A page can override any
/// field with an inline `<script type="application/json" id="interactions-config">`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub nav_selector: String,
    pub nav_threshold: f64,
    pub reveal_selector: String,
    pub fade_selector: String,
    pub reveal_root_margin: String,
    pub reveal_threshold: f64,
    pub parallax_selector: String,
    pub parallax_default_speed: f64,
    pub lazy_image_selector: String,
    pub anchor_selector: String,
    pub newsletter_selector: String,
    pub newsletter_reset_ms: u32,
    pub newsletter_thanks: String,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            nav_selector: ".nav".to_string(),
            nav_threshold: 100.0,
            reveal_selector: ".animate-on-scroll".to_string(),
            fade_selector: ".animate-fade-up".to_string(),
            reveal_root_margin: "0px 0px -100px 0px".to_string(),
            reveal_threshold: 0.1,
            parallax_selector: "[data-parallax]".to_string(),
            parallax_default_speed: 0.1,
            lazy_image_selector: "img[data-src]".to_string(),
            anchor_selector: "a[href^=\"#\"]".to_string(),
            newsletter_selector: ".newsletter-form".to_string(),
            newsletter_reset_ms: 2000,
            newsletter_thanks: "Thank you".to_string(),
        }
    }
}

impl InteractionConfig {
    pub const ELEMENT_ID: &'static str = "interactions-config";

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads the inline override block, falling back to defaults when it is
    /// missing or unreadable.
    pub fn load(document: &Document) -> Self {
        let Some(raw) = document
            .get_element_by_id(Self::ELEMENT_ID)
            .and_then(|node| node.text_content())
        else {
            return Self::default();
        };

        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(err) => {
                warn!("Ignoring #{}: {}", Self::ELEMENT_ID, err);
                Self::default()
            }
        }
    }

    /// Selector list for everything the reduced-motion override settles.
    pub fn motion_selector(&self) -> String {
        format!("{}, {}", self.fade_selector, self.reveal_selector)
    }
}
