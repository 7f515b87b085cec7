pub const COUNT_DURATION_MS: f64 = 2000.0;
pub const COUNT_STEP_MS: f64 = 16.0;

/// Counts from 0 up to `target` in fixed 16ms steps, starting when first shown.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CounterAnimation {
	pub target: u64,
	pub duration_ms: f64,
	pub step_ms: f64,
	started_at: Option<f64>,
}

impl CounterAnimation {
	pub fn new(target: u64) -> Self {
		Self {
			target,
			duration_ms: COUNT_DURATION_MS,
			step_ms: COUNT_STEP_MS,
			started_at: None,
		}
	}

	/// Start counting at `now`. Only the first call counts.
	pub fn start(&mut self, now: f64) -> bool {
		if self.started_at.is_some() {
			return false;
		}
		self.started_at = Some(now);
		true
	}

	/// Value to display at wall-clock `now`; 0 until started.
	pub fn value_now(&self, now: f64) -> u64 {
		self.started_at.map_or(0, |at| self.value_at(now - at))
	}

	pub fn is_done_at(&self, now: f64) -> bool {
		self.started_at.is_some_and(|at| self.is_done(now - at))
	}

	/// Value shown `elapsed_ms` after the count started.
	pub fn value_at(&self, elapsed_ms: f64) -> u64 {
		if self.step_ms <= 0.0 || self.duration_ms <= self.step_ms {
			return self.target;
		}
		let increment = self.target as f64 / (self.duration_ms / self.step_ms);
		let ticks = (elapsed_ms.max(0.0) / self.step_ms).floor();
		let current = ticks * increment;
		if current >= self.target as f64 {
			self.target
		} else {
			current.floor() as u64
		}
	}

	pub fn is_done(&self, elapsed_ms: f64) -> bool {
		self.value_at(elapsed_ms) >= self.target
	}
}
