pub mod cursor;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::App;

// Frame driver: a self-rescheduling requestAnimationFrame callback. The
// browser hands each invocation a monotonically increasing timestamp; the
// difference between consecutive timestamps is the simulated elapsed time.
pub fn setup_animation_loop(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
    let window =
        web_sys::window().ok_or_else(|| JsValue::from_str("no global `window` exists"))?;

    // Seed the previous-frame timestamp before the loop starts; the first
    // callback must not compute a delta against an undefined prior frame.
    let mut last_timestamp = window
        .performance()
        .ok_or_else(|| JsValue::from_str("no performance timer on window"))?
        .now();

    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        let elapsed_ms = timestamp - last_timestamp;
        last_timestamp = timestamp;

        app.borrow_mut().frame(elapsed_ms);

        // Request the next animation frame
        web_sys::window()
            .expect("no global window")
            .request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref())
            .expect("request_animation_frame failed");
    }) as Box<dyn FnMut(f64)>));

    // Start the animation loop
    window.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref())?;
    Ok(())
}
