/// Hero moves at half the scroll speed.
pub const PARALLAX_RATE: f64 = 0.5;
/// Fraction of an element that must be visible before it counts as seen.
pub const VISIBLE_THRESHOLD: f64 = 0.1;

pub fn parallax_offset(scroll_y: f64) -> f64 {
	if scroll_y.is_finite() {
		scroll_y.max(0.0) * PARALLAX_RATE
	} else {
		0.0
	}
}

pub fn parallax_transform(scroll_y: f64) -> String {
	format!("translate3d(0, {}px, 0)", parallax_offset(scroll_y))
}

/// Opens on the first intersecting observation and stays open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeenOnce {
	seen: bool,
}

impl SeenOnce {
	/// `true` exactly once: on the first observation that intersects.
	pub fn observe(&mut self, intersecting: bool) -> bool {
		if self.seen || !intersecting {
			return false;
		}
		self.seen = true;
		true
	}
}

pub fn reveal_class(extra: &str, visible: bool) -> String {
	let mut class = String::from("reveal");
	if visible {
		class.push_str(" reveal-visible");
	}
	if !extra.is_empty() {
		class.push(' ');
		class.push_str(extra);
	}
	class
}
