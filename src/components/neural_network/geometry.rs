#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance(self, other: Point) -> f64 {
		let (dx, dy) = (other.x - self.x, other.y - self.y);
		(dx * dx + dy * dy).sqrt()
	}
}

/// Width × height area that nodes are placed in, in region-local pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Region {
	pub width: f64,
	pub height: f64,
}

impl Region {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// NaN and non-positive sizes both count as empty.
	pub fn is_empty(&self) -> bool {
		!(self.width > 0.0 && self.height > 0.0)
	}

	/// Scale a fractional anchor (0..1 on each axis) into region coordinates.
	pub fn at_fraction(&self, fraction: Point) -> Point {
		Point::new(fraction.x * self.width, fraction.y * self.height)
	}

	/// Rectangle shrunk by `margin` on every side. The margin is capped at half the
	/// region so `min <= max` always holds.
	pub fn inset(&self, margin: f64) -> Rect {
		let mx = margin.max(0.0).min(self.width / 2.0);
		let my = margin.max(0.0).min(self.height / 2.0);
		Rect {
			min: Point::new(mx, my),
			max: Point::new(self.width - mx, self.height - my),
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
	pub min: Point,
	pub max: Point,
}

impl Rect {
	pub fn clamp(&self, p: Point) -> Point {
		Point::new(
			p.x.clamp(self.min.x, self.max.x),
			p.y.clamp(self.min.y, self.max.y),
		)
	}

	#[cfg(test)]
	pub fn contains(&self, p: Point) -> bool {
		(self.min.x..=self.max.x).contains(&p.x) && (self.min.y..=self.max.y).contains(&p.y)
	}
}
