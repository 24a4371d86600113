//! Idle-cursor auto-hide: the pointer stays visible while it moves over the
//! surface and disappears after a short stillness timeout.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, HtmlElement, MouseEvent};

/// Attach the behavior to `element`. Movement clears the inline cursor
/// override and restarts the countdown; once `timeout_ms` pass without
/// movement the cursor is hidden. The countdown is also armed immediately,
/// so a pointer that never moves is hidden too.
pub fn auto_hide_cursor(element: &HtmlElement, timeout_ms: u32) -> Result<(), JsValue> {
    let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));

    let arm = {
        let element = element.clone();
        move || {
            let _ = element.style().remove_property("cursor");
            let hide_target = element.clone();
            let timer = Timeout::new(timeout_ms, move || {
                let _ = hide_target.style().set_property("cursor", "none");
            });
            // Dropping the previous timeout cancels it.
            pending.borrow_mut().replace(timer);
        }
    };

    let on_move = {
        let arm = arm.clone();
        Closure::<dyn FnMut(_)>::wrap(Box::new(move |_event: MouseEvent| arm()))
    };
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    element.add_event_listener_with_callback_and_add_event_listener_options(
        "mousemove",
        on_move.as_ref().unchecked_ref(),
        &options,
    )?;
    on_move.forget(); // listener lives for the page lifetime

    arm();
    Ok(())
}
