use std::cell::Cell;
use std::rc::Rc;

use js_sys::Array;
use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::state::{SeenOnce, VISIBLE_THRESHOLD};

type EntriesCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Watches one element until it is first seen. Disconnects when dropped.
pub struct OnceObserver {
	observer: IntersectionObserver,
	_callback: EntriesCallback,
}

impl Drop for OnceObserver {
	fn drop(&mut self) {
		self.observer.disconnect();
	}
}

/// Runs `on_enter` the first time `target` is at least [`VISIBLE_THRESHOLD`] in
/// view. Without IntersectionObserver support it runs straight away.
pub fn observe_once(target: &Element, on_enter: impl FnOnce() + 'static) -> Option<OnceObserver> {
	let pending = Rc::new(Cell::new(Some(on_enter)));
	let slot = pending.clone();
	let mut gate = SeenOnce::default();
	let callback: EntriesCallback = Closure::new(move |entries: Array, observer: IntersectionObserver| {
		let intersecting = entries
			.iter()
			.filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
			.any(|entry| entry.is_intersecting());
		if gate.observe(intersecting) {
			observer.disconnect();
			if let Some(on_enter) = slot.take() {
				on_enter();
			}
		}
	});

	let init = IntersectionObserverInit::new();
	init.set_threshold(&JsValue::from_f64(VISIBLE_THRESHOLD));
	match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
		Ok(observer) => {
			observer.observe(target);
			Some(OnceObserver {
				observer,
				_callback: callback,
			})
		}
		Err(err) => {
			debug!("IntersectionObserver unavailable ({err:?}), showing immediately");
			if let Some(on_enter) = pending.take() {
				on_enter();
			}
			None
		}
	}
}
