//! Frame throttling for scroll-driven effects.
//!
//! Browsers fire `scroll` far more often than they paint. [`ScrollFrames`]
//! folds every burst of scroll events into at most one handler run per
//! animation frame, and hands that run a single [`Snapshot`] read at frame time.

use std::cell::Cell;
use std::rc::Rc;

use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Window};

use crate::dom::Snapshot;
use crate::error::Result;

/// Pending-frame guard.
///
/// A frame may be scheduled only while none is pending; the flag is cleared
/// once the scheduled work has run.
#[derive(Debug, Default)]
pub struct FrameGate {
    pending: Cell<bool>,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a frame pending. Returns `false` when one already is, in which
    /// case the caller must not schedule another.
    pub fn try_schedule(&self) -> bool {
        !self.pending.replace(true)
    }

    pub fn release(&self) {
        self.pending.set(false);
    }
}

struct FrameState {
    gate: FrameGate,
    /// Id of the outstanding `requestAnimationFrame`, cancelled on detach.
    raf_id: Cell<Option<i32>>,
}

/// A passive window `scroll` listener that runs `handler` once per frame.
pub struct ScrollFrames {
    window: Window,
    state: Rc<FrameState>,
    on_scroll: Closure<dyn FnMut()>,
}

impl ScrollFrames {
    pub fn attach(window: &Window, mut handler: impl FnMut(Snapshot) + 'static) -> Result<Self> {
        let state = Rc::new(FrameState {
            gate: FrameGate::new(),
            raf_id: Cell::new(None),
        });

        let on_frame = Rc::new(Closure::wrap(Box::new({
            let state = Rc::clone(&state);
            let window = window.clone();
            move || {
                state.raf_id.set(None);
                match Snapshot::read(&window) {
                    Ok(snapshot) => handler(snapshot),
                    Err(err) => warn!("Skipping scroll frame: {}", err),
                }
                state.gate.release();
            }
        }) as Box<dyn FnMut()>));

        let on_scroll = Closure::wrap(Box::new({
            let state = Rc::clone(&state);
            let window = window.clone();
            move || {
                if !state.gate.try_schedule() {
                    return;
                }
                let frame: &Closure<dyn FnMut()> = &on_frame;
                match window.request_animation_frame(frame.as_ref().unchecked_ref()) {
                    Ok(id) => state.raf_id.set(Some(id)),
                    Err(err) => {
                        state.gate.release();
                        warn!("requestAnimationFrame failed: {:?}", err);
                    }
                }
            }
        }) as Box<dyn FnMut()>);

        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        window.add_event_listener_with_callback_and_add_event_listener_options(
            "scroll",
            on_scroll.as_ref().unchecked_ref(),
            &options,
        )?;

        Ok(Self {
            window: window.clone(),
            state,
            on_scroll,
        })
    }

    pub fn detach(self) {}
}

impl Drop for ScrollFrames {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("scroll", self.on_scroll.as_ref().unchecked_ref());
        // The frame closure is dropped with `on_scroll`, so a pending frame
        // must not be allowed to call into it.
        if let Some(id) = self.state.raf_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        self.state.gate.release();
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use crate::testing::{dispatch_scroll, next_frame};
    use wasm_bindgen_test::wasm_bindgen_test;

    fn counting_frames(window: &Window) -> (ScrollFrames, Rc<Cell<u32>>) {
        let runs = Rc::new(Cell::new(0));
        let frames = ScrollFrames::attach(window, {
            let runs = Rc::clone(&runs);
            move |_| runs.set(runs.get() + 1)
        })
        .unwrap();
        (frames, runs)
    }

    #[wasm_bindgen_test]
    async fn scroll_burst_runs_handler_once_per_frame() {
        let window = web_sys::window().unwrap();
        let (frames, runs) = counting_frames(&window);

        for _ in 0..100 {
            dispatch_scroll(&window);
        }
        assert_eq!(runs.get(), 0);
        next_frame(&window).await;
        assert_eq!(runs.get(), 1);

        // Released after the handler ran, so the next burst gets a frame
        dispatch_scroll(&window);
        dispatch_scroll(&window);
        next_frame(&window).await;
        assert_eq!(runs.get(), 2);

        frames.detach();
    }

    #[wasm_bindgen_test]
    async fn detach_cancels_the_pending_frame() {
        let window = web_sys::window().unwrap();
        let (frames, runs) = counting_frames(&window);

        dispatch_scroll(&window);
        frames.detach();
        next_frame(&window).await;
        assert_eq!(runs.get(), 0);

        dispatch_scroll(&window);
        next_frame(&window).await;
        assert_eq!(runs.get(), 0);
    }
}
