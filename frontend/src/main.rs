use log::{error, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{PageTransitionEvent, Window};

use crate::config::InteractionConfig;
use crate::error::Error;
use crate::page::Interactions;

mod config;
mod dom;
mod error;
mod frame;
mod intersection;
mod page;
mod effects {
    pub mod nav;
    pub mod parallax;
    pub mod reduced_motion;
    pub mod reveal;
}
mod widgets {
    pub mod anchors;
    pub mod lazy_images;
    pub mod newsletter;
    pub mod page_load;
}
#[cfg(test)]
mod testing;

fn start() -> Result<(), Error> {
    let window = web_sys::window().ok_or(Error::MissingWindow)?;
    let document = window.document().ok_or(Error::MissingDocument)?;
    let config = InteractionConfig::load(&document);
    let interactions = Interactions::attach(&window, &config)?;
    detach_on_unload(&window, interactions)
}

/// Keeps the interactions attached until the page is really torn down.
fn detach_on_unload(window: &Window, interactions: Interactions) -> Result<(), Error> {
    let mut interactions = Some(interactions);
    let on_pagehide = Closure::wrap(Box::new(move |event: PageTransitionEvent| {
        // Pages kept in the back/forward cache come back with listeners intact
        if event.persisted() {
            return;
        }
        if let Some(interactions) = interactions.take() {
            interactions.detach();
        }
    }) as Box<dyn FnMut(PageTransitionEvent)>);

    window.add_event_listener_with_callback("pagehide", on_pagehide.as_ref().unchecked_ref())?;
    on_pagehide.forget();
    Ok(())
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting site interactions");
    if let Err(err) = start() {
        error!("Interactions disabled: {}", err);
    }
}
