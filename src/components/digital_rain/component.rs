use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::debug;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use super::render;
use super::state::{DigitalRain, RainConfig};
use crate::components::canvas::{
	add_window_listener, container_size, context_2d, fit_canvas, now_ms, random_seed,
	remove_window_listeners,
};
use crate::components::frame_loop::{Frame, FrameLoop};

struct RainState {
	rain: DigitalRain,
	rng: SmallRng,
}

#[component]
pub fn DigitalRainCanvas(
	#[prop(default = RainConfig::default())] config: RainConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<RainState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let Some(ctx) = context_2d(&canvas) else {
			return;
		};

		let (w, h) = container_size(&canvas, &window);
		fit_canvas(&canvas, w, h);
		let mut rng = SmallRng::seed_from_u64(random_seed());
		let rain = DigitalRain::new(config, w, h, &mut rng);
		*state.borrow_mut() = Some(RainState { rain, rng });

		let (state_resize, canvas_resize) = (state.clone(), canvas.clone());
		*resize_cb.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh) = container_size(&canvas_resize, &win);
			fit_canvas(&canvas_resize, nw, nh);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.rain.resize(nw, nh, &mut s.rng);
			}
		}));
		let mut frames = FrameLoop::default();
		if let Some(listener) = resize_cb
			.borrow()
			.as_ref()
			.and_then(|cb| add_window_listener(&window, "resize", cb))
		{
			frames.listen(listener);
		}

		let (state_anim, animate_inner) = (state.clone(), animate.clone());
		*animate.borrow_mut() = Some(Closure::new(move || {
			match frames.frame(canvas.is_connected()) {
				Frame::Draw => {}
				Frame::Detach(listeners) => {
					debug!("digital rain detached");
					remove_window_listeners(listeners);
					*state_anim.borrow_mut() = None;
					return;
				}
				Frame::Halted => return,
			}
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				if let Some(frame) = s.rain.advance(now_ms(), &mut s.rng) {
					render::render(&s.rain, &frame, &ctx);
				}
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="digital-rain"
			aria-hidden="true"
			style="display: block; position: absolute; inset: 0; pointer-events: none; opacity: 0.35;"
		/>
	}
}
