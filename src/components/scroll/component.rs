use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::observer::{OnceObserver, observe_once};
use super::state::{parallax_transform, reveal_class};
use crate::components::canvas::{WindowListener, add_window_listener, remove_window_listeners};
use crate::components::frame_loop::{Frame, FrameLoop};

/// Wraps `children` in a block that gains `reveal-visible` the first time it
/// scrolls into view.
#[component]
pub fn Reveal(children: Children, #[prop(optional, into)] class: String) -> impl IntoView {
	let div_ref = NodeRef::<leptos::html::Div>::new();
	let (visible, set_visible) = signal(false);
	let observer: Rc<RefCell<Option<OnceObserver>>> = Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		let Some(div) = div_ref.get() else {
			return;
		};
		*observer.borrow_mut() = observe_once(&div, move || {
			let _ = set_visible.try_set(true);
		});
	});

	view! {
		<div node_ref=div_ref class=move || reveal_class(&class, visible.get())>
			{children()}
		</div>
	}
}

/// A section that drifts down at a fraction of the page scroll.
#[component]
pub fn Parallax(
	children: Children,
	#[prop(into)] id: String,
	#[prop(optional, into)] class: String,
) -> impl IntoView {
	let section_ref = NodeRef::<leptos::html::Section>::new();
	let (scroll_y, set_scroll_y) = signal(0.0f64);
	let scroll_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		let Some(section) = section_ref.get() else {
			return;
		};
		let Some(window) = web_sys::window() else {
			return;
		};
		let _ = set_scroll_y.try_set(window.scroll_y().unwrap_or(0.0));

		let frames: Rc<RefCell<FrameLoop<WindowListener>>> = Rc::default();
		let frames_inner = frames.clone();
		*scroll_cb.borrow_mut() = Some(Closure::new(move || {
			let frame = frames_inner.borrow_mut().frame(section.is_connected());
			match frame {
				Frame::Draw => {
					if let Some(win) = web_sys::window() {
						let _ = set_scroll_y.try_set(win.scroll_y().unwrap_or(0.0));
					}
				}
				Frame::Detach(listeners) => remove_window_listeners(listeners),
				Frame::Halted => {}
			}
		}));
		if let Some(listener) = scroll_cb
			.borrow()
			.as_ref()
			.and_then(|cb| add_window_listener(&window, "scroll", cb))
		{
			frames.borrow_mut().listen(listener);
		}
	});

	view! {
		<section
			node_ref=section_ref
			id=id
			class=class
			style:transform=move || parallax_transform(scroll_y.get())
		>
			{children()}
		</section>
	}
}
