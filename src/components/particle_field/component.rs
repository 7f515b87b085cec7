use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::debug;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent};

use super::render;
use super::state::{ParticleConfig, ParticleField};
use crate::components::canvas::{
	add_window_listener, context_2d, fit_canvas, random_seed, remove_window_listeners,
	viewport_size,
};
use crate::components::frame_loop::{Frame, FrameLoop};

#[component]
pub fn ParticleCanvas(
	#[prop(default = ParticleConfig::default())] config: ParticleConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let field: Rc<RefCell<Option<ParticleField>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let mouse_cb: Rc<RefCell<Option<Closure<dyn FnMut(MouseEvent)>>>> =
		Rc::new(RefCell::new(None));

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

		let (w, h) = viewport_size(&window);
		fit_canvas(&canvas, w, h);
		let mut rng = SmallRng::seed_from_u64(random_seed());
		*field.borrow_mut() = Some(ParticleField::new(config, w, h, &mut rng));

		let (field_resize, canvas_resize) = (field.clone(), canvas.clone());
		*resize_cb.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh) = viewport_size(&win);
			fit_canvas(&canvas_resize, nw, nh);
			if let Some(ref mut f) = *field_resize.borrow_mut() {
				f.resize(nw, nh);
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

		let field_mouse = field.clone();
		*mouse_cb.borrow_mut() = Some(Closure::new(move |ev: MouseEvent| {
			if let Some(ref mut f) = *field_mouse.borrow_mut() {
				f.mouse = Some((ev.client_x() as f64, ev.client_y() as f64));
			}
		}));
		if let Some(listener) = mouse_cb
			.borrow()
			.as_ref()
			.and_then(|cb| add_window_listener(&window, "mousemove", cb))
		{
			frames.listen(listener);
		}

		let (field_anim, animate_inner) = (field.clone(), animate.clone());
		*animate.borrow_mut() = Some(Closure::new(move || {
			match frames.frame(canvas.is_connected()) {
				Frame::Draw => {}
				Frame::Detach(listeners) => {
					debug!("particle field detached, removing {} listeners", listeners.len());
					remove_window_listeners(listeners);
					*field_anim.borrow_mut() = None;
					return;
				}
				Frame::Halted => return,
			}
			if let Some(ref mut f) = *field_anim.borrow_mut() {
				f.update();
				render::render(f, &ctx);
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
			class="particle-field"
			aria-hidden="true"
			style="display: block; position: fixed; inset: 0; pointer-events: none;"
		/>
	}
}
