use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::state::CounterAnimation;
use crate::components::canvas::now_ms;
use crate::components::scroll::{OnceObserver, observe_once};

/// Counts up to `target` once the number first scrolls into view.
#[component]
pub fn AnimatedCounter(target: u64, #[prop(optional, into)] suffix: String) -> impl IntoView {
	let span_ref = NodeRef::<leptos::html::Span>::new();
	let (value, set_value) = signal(0u64);
	let counter = Rc::new(Cell::new(CounterAnimation::new(target)));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let observer: Rc<RefCell<Option<OnceObserver>>> = Rc::new(RefCell::new(None));

	let (counter_anim, animate_inner) = (counter.clone(), animate.clone());
	*animate.borrow_mut() = Some(Closure::new(move || {
		let (counter, now) = (counter_anim.get(), now_ms());
		// Some(_) back means the counter was unmounted
		if set_value.try_set(counter.value_now(now)).is_some() || counter.is_done_at(now) {
			return;
		}
		if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
			let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	}));

	Effect::new(move |_| {
		let Some(span) = span_ref.get() else {
			return;
		};
		let (counter, animate) = (counter.clone(), animate.clone());
		*observer.borrow_mut() = observe_once(&span, move || {
			let mut started = counter.get();
			if !started.start(now_ms()) {
				return;
			}
			counter.set(started);
			if let (Some(win), Some(cb)) = (web_sys::window(), animate.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		});
	});

	view! {
		<span node_ref=span_ref class="counter">{move || value.get()}{suffix}</span>
	}
}
