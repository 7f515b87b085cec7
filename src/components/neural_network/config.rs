use rand::Rng;

use super::geometry::Point;

/// Quiet time after the last resize before the graph is rebuilt.
pub const RESIZE_DEBOUNCE_MS: f64 = 250.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NetworkVariant {
	/// Bounded to the hero section: clustered nodes, random walks and pulses.
	#[default]
	Hero,
	/// Full page height: sliced nodes and contiguous sweeps.
	Background,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PlacementPolicy {
	Clustered {
		count: usize,
		/// Cluster attractors as fractions of the region.
		centers: Vec<Point>,
		jitter: f64,
		inset: f64,
	},
	Sliced {
		slice_height: f64,
		per_slice: usize,
	},
}

/// Half-open `[min, max)` range for the per-node neighbour count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NeighborRange {
	pub min: usize,
	pub max: usize,
}

impl NeighborRange {
	pub const fn new(min: usize, max: usize) -> Self {
		Self { min, max }
	}

	pub fn sample(&self, rng: &mut impl Rng) -> usize {
		if self.max > self.min {
			rng.gen_range(self.min..self.max)
		} else {
			self.min
		}
	}
}

/// Uniform draw from `[min, max]`, tolerating swapped or equal bounds.
pub fn between(rng: &mut impl Rng, (min, max): (f64, f64)) -> f64 {
	if max > min { rng.gen_range(min..=max) } else { min }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseConfig {
	pub period_ms: f64,
	pub stagger_ms: f64,
	/// Number of round-robin node groups; one group flashes per period.
	pub groups: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WalkConfig {
	pub min_hops: usize,
	pub max_hops: usize,
	pub hop_delay_ms: f64,
	pub cooldown_ms: (f64, f64),
	pub pulse: Option<PulseConfig>,
}

impl WalkConfig {
	pub fn sample_hops(&self, rng: &mut impl Rng) -> usize {
		if self.max_hops > self.min_hops {
			rng.gen_range(self.min_hops..=self.max_hops)
		} else {
			self.max_hops
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepConfig {
	pub run_length: usize,
	pub step_delay_ms: f64,
	pub cooldown_ms: (f64, f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Strategy {
	Walk(WalkConfig),
	Sweep(SweepConfig),
}

#[derive(Clone, Debug, PartialEq)]
pub struct NetworkConfig {
	pub placement: PlacementPolicy,
	pub neighbors: NeighborRange,
	pub strategy: Strategy,
	pub resize_debounce_ms: f64,
}

impl NetworkConfig {
	pub fn hero() -> Self {
		Self {
			placement: PlacementPolicy::Clustered {
				count: 36,
				centers: vec![
					Point::new(0.22, 0.35),
					Point::new(0.5, 0.6),
					Point::new(0.78, 0.4),
				],
				jitter: 150.0,
				inset: 40.0,
			},
			neighbors: NeighborRange::new(3, 5),
			strategy: Strategy::Walk(WalkConfig {
				min_hops: 4,
				max_hops: 6,
				hop_delay_ms: 120.0,
				cooldown_ms: (1600.0, 2800.0),
				pulse: Some(PulseConfig {
					period_ms: 5000.0,
					stagger_ms: 150.0,
					groups: 4,
				}),
			}),
			resize_debounce_ms: RESIZE_DEBOUNCE_MS,
		}
	}

	pub fn background() -> Self {
		Self {
			placement: PlacementPolicy::Sliced {
				slice_height: 400.0,
				per_slice: 6,
			},
			neighbors: NeighborRange::new(2, 4),
			strategy: Strategy::Sweep(SweepConfig {
				run_length: 6,
				step_delay_ms: 100.0,
				cooldown_ms: (2400.0, 3600.0),
			}),
			resize_debounce_ms: RESIZE_DEBOUNCE_MS,
		}
	}

	pub fn for_variant(variant: NetworkVariant) -> Self {
		match variant {
			NetworkVariant::Hero => Self::hero(),
			NetworkVariant::Background => Self::background(),
		}
	}
}
