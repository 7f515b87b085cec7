//! Browser glue shared by the canvas effects.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

pub fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

/// Size of the canvas' parent element, or the viewport when it has none.
pub fn container_size(canvas: &HtmlCanvasElement, window: &Window) -> (f64, f64) {
	match canvas.parent_element() {
		Some(p) if p.client_width() > 0 && p.client_height() > 0 => {
			(p.client_width() as f64, p.client_height() as f64)
		}
		_ => viewport_size(window),
	}
}

pub fn viewport_size(window: &Window) -> (f64, f64) {
	(
		window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0),
		window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0),
	)
}

pub fn fit_canvas(canvas: &HtmlCanvasElement, width: f64, height: f64) {
	let (w, h) = (width.max(0.0) as u32, height.max(0.0) as u32);
	if canvas.width() != w {
		canvas.set_width(w);
	}
	if canvas.height() != h {
		canvas.set_height(h);
	}
}

pub fn now_ms() -> f64 {
	js_sys::Date::now()
}

/// `Math.random` is the only entropy source on wasm32-unknown-unknown without getrandom.
pub fn random_seed() -> u64 {
	let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
	let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
	(hi << 32) | lo
}

/// A registered window listener: event name and the JS function behind it.
pub type WindowListener = (&'static str, js_sys::Function);

pub fn add_window_listener<T: ?Sized>(
	window: &Window,
	event: &'static str,
	callback: &Closure<T>,
) -> Option<WindowListener> {
	let function: &js_sys::Function = callback.as_ref().unchecked_ref();
	window.add_event_listener_with_callback(event, function).ok()?;
	Some((event, function.clone()))
}

pub fn remove_window_listeners(listeners: Vec<WindowListener>) {
	let Some(window) = web_sys::window() else {
		return;
	};
	for (event, function) in listeners {
		let _ = window.remove_event_listener_with_callback(event, &function);
	}
}
