use super::geometry::Region;

/// Collapses a burst of resize notifications into one regeneration, fired once
/// the container has been quiet for `quiet_ms`.
#[derive(Clone, Debug)]
pub struct Debouncer {
	quiet_ms: f64,
	pending: Option<(Region, f64)>,
}

impl Debouncer {
	pub fn new(quiet_ms: f64) -> Self {
		Self {
			quiet_ms,
			pending: None,
		}
	}

	/// Record a resize; restarts the quiet window.
	pub fn notify(&mut self, region: Region, now: f64) {
		self.pending = Some((region, now));
	}

	/// The settled region, once, when the quiet window has elapsed.
	pub fn poll(&mut self, now: f64) -> Option<Region> {
		match self.pending {
			Some((region, at)) if now - at >= self.quiet_ms => {
				self.pending = None;
				Some(region)
			}
			_ => None,
		}
	}

	#[cfg(test)]
	pub fn is_pending(&self) -> bool {
		self.pending.is_some()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn burst_inside_window_settles_once() {
		let mut debouncer = Debouncer::new(250.0);
		debouncer.notify(Region::new(800.0, 600.0), 0.0);
		assert_eq!(debouncer.poll(100.0), None);
		debouncer.notify(Region::new(900.0, 600.0), 120.0);
		assert_eq!(debouncer.poll(300.0), None);
		assert_eq!(debouncer.poll(370.0), Some(Region::new(900.0, 600.0)));
		assert_eq!(debouncer.poll(1000.0), None);
		assert!(!debouncer.is_pending());
	}

	#[test]
	fn separate_bursts_settle_separately() {
		let mut debouncer = Debouncer::new(250.0);
		debouncer.notify(Region::new(1.0, 1.0), 0.0);
		assert!(debouncer.poll(250.0).is_some());
		debouncer.notify(Region::new(2.0, 2.0), 600.0);
		assert_eq!(debouncer.poll(850.0), Some(Region::new(2.0, 2.0)));
	}
}
