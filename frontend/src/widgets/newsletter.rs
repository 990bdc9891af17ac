//! Placeholder newsletter signup.
//!
//! Nothing is sent anywhere yet: the address is logged and the button shows a
//! short thank-you before the form resets.

use gloo_timers::callback::Timeout;
use log::{debug, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlFormElement, HtmlInputElement};

use crate::config::InteractionConfig;
use crate::dom::Styled;
use crate::error::Result;

const DISABLED: &str = "disabled";

/// Temporary "thank you" state of the submit button.
#[derive(Debug)]
pub struct SubmitFeedback {
    original: String,
}

impl SubmitFeedback {
    /// Swaps in `thanks` and disables the button. Returns `None` while a
    /// previous submission is still showing its feedback.
    pub fn show<E: Styled>(button: &E, thanks: &str) -> Option<Self> {
        if button.attr(DISABLED).is_some() {
            return None;
        }
        let original = button.text();
        button.set_text(thanks);
        button.set_attr(DISABLED, "");
        Some(Self { original })
    }

    pub fn restore<E: Styled>(self, button: &E) {
        button.set_text(&self.original);
        button.remove_attr(DISABLED);
    }
}

pub struct NewsletterForm {
    form: HtmlFormElement,
    on_submit: Closure<dyn FnMut(Event)>,
}

impl NewsletterForm {
    pub fn attach(document: &Document, config: &InteractionConfig) -> Result<Option<Self>> {
        let Some(form) = document.query_selector(&config.newsletter_selector)? else {
            return Ok(None);
        };
        let Ok(form) = form.dyn_into::<HtmlFormElement>() else {
            debug!("{} is not a <form>, skipping", config.newsletter_selector);
            return Ok(None);
        };

        let thanks = config.newsletter_thanks.clone();
        let reset_ms = config.newsletter_reset_ms;
        let on_submit = Closure::wrap(Box::new({
            let form = form.clone();
            move |event: Event| {
                event.prevent_default();

                let email = form
                    .query_selector("input[type=\"email\"]")
                    .ok()
                    .flatten()
                    .and_then(|input| input.dyn_into::<HtmlInputElement>().ok())
                    .map(|input| input.value())
                    .unwrap_or_default();
                info!("Newsletter signup: {}", email);

                let button = form.query_selector("button").ok().flatten();
                let feedback = button
                    .as_ref()
                    .and_then(|button| SubmitFeedback::show(button, &thanks));

                let form = form.clone();
                Timeout::new(reset_ms, move || {
                    if let (Some(feedback), Some(button)) = (feedback, button) {
                        feedback.restore(&button);
                    }
                    form.reset();
                })
                .forget();
            }
        }) as Box<dyn FnMut(Event)>);

        form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
        Ok(Some(Self { form, on_submit }))
    }

    pub fn detach(self) {}
}

impl Drop for NewsletterForm {
    fn drop(&mut self) {
        let _ = self
            .form
            .remove_event_listener_with_callback("submit", self.on_submit.as_ref().unchecked_ref());
    }
}
