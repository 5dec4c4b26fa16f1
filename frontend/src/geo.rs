use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Position as GeolocationPosition, PositionError as GeolocationPositionError};

use artemis::models::Coordinates;
use artemis::safety::GeolocationError;

type Slot = Rc<RefCell<Option<Box<dyn FnOnce(Result<Coordinates, GeolocationError>)>>>>;

fn finish(slot: &Slot, result: Result<Coordinates, GeolocationError>) {
    if let Some(done) = slot.borrow_mut().take() {
        done(result);
    }
}

/// Asks the browser for the current position once and hands the outcome to
/// `done`. Exactly one of the success or error paths runs it.
pub fn current_position(done: impl FnOnce(Result<Coordinates, GeolocationError>) + 'static) {
    let Some(geolocation) = web_sys::window().and_then(|w| w.navigator().geolocation().ok()) else {
        done(Err(GeolocationError::Unsupported));
        return;
    };

    let slot: Slot = Rc::new(RefCell::new(Some(Box::new(done))));

    let on_success = {
        let slot = slot.clone();
        Closure::once_into_js(move |position: JsValue| {
            let coords = position.unchecked_into::<GeolocationPosition>().coords();
            finish(&slot, Ok(Coordinates::new(coords.latitude(), coords.longitude())));
        })
    };
    let on_error = {
        let slot = slot.clone();
        Closure::once_into_js(move |error: JsValue| {
            let code = error.unchecked_into::<GeolocationPositionError>().code();
            finish(&slot, Err(GeolocationError::from_code(code)));
        })
    };

    if let Err(e) = geolocation
        .get_current_position_with_error_callback(on_success.unchecked_ref(), Some(on_error.unchecked_ref()))
    {
        log::error!("Geolocation request rejected: {e:?}");
        finish(&slot, Err(GeolocationError::Unavailable));
    }
}
