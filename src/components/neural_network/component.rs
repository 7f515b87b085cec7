use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use super::config::{NetworkConfig, NetworkVariant};
use super::render;
use super::state::NetworkState;
use super::surface::RenderSurface;
use crate::components::canvas::{
	add_window_listener, container_size, context_2d, fit_canvas, now_ms, random_seed,
	remove_window_listeners,
};
use crate::components::frame_loop::{Frame, FrameLoop};

#[component]
pub fn NeuralNetworkCanvas(
	#[prop(default = NetworkVariant::Hero)] variant: NetworkVariant,
	#[prop(optional, into)] class: String,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<NetworkState>>> = Rc::new(RefCell::new(None));
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
			debug!("no 2d context, {variant:?} network not started");
			return;
		};

		let (w, h) = container_size(&canvas, &window);
		fit_canvas(&canvas, w, h);
		*state.borrow_mut() = Some(NetworkState::new(
			NetworkConfig::for_variant(variant),
			w,
			h,
			random_seed(),
		));

		let (state_resize, canvas_resize) = (state.clone(), canvas.clone());
		*resize_cb.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh) = container_size(&canvas_resize, &win);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh, now_ms());
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
			let running = match *state_anim.borrow_mut() {
				Some(ref mut s) => {
					s.set_attached(canvas.is_connected());
					let running = s.tick(now_ms());
					if running {
						let region = s.scene.region();
						fit_canvas(&canvas, region.width, region.height);
						render::render(&s.scene, &ctx);
					}
					running
				}
				None => false,
			};
			match frames.frame(running) {
				Frame::Draw => {}
				Frame::Detach(listeners) => {
					remove_window_listeners(listeners);
					return;
				}
				Frame::Halted => return,
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
			class=format!("neural-network {class}")
			aria-hidden="true"
			style="display: block; position: absolute; inset: 0; pointer-events: none;"
		/>
	}
}
