use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::animator::SignalAnimator;
use super::config::NetworkConfig;
use super::generator::NodeFieldGenerator;
use super::geometry::Region;
use super::resize::Debouncer;
use super::surface::{RenderSurface, Scene};

pub struct NetworkState {
	pub config: NetworkConfig,
	pub scene: Scene,
	pub animator: SignalAnimator<Scene>,
	pub regenerations: usize,
	resize: Debouncer,
	rng: SmallRng,
	last_tick: Option<f64>,
}

impl NetworkState {
	pub fn new(config: NetworkConfig, width: f64, height: f64, seed: u64) -> Self {
		let region = Region::new(width, height);
		let mut state = Self {
			animator: SignalAnimator::new(config.strategy),
			resize: Debouncer::new(config.resize_debounce_ms),
			scene: Scene::new(region),
			rng: SmallRng::seed_from_u64(seed),
			regenerations: 0,
			last_tick: None,
			config,
		};
		state.regenerate(region);
		state
	}

	/// Throw away the current graph and build a new one for `region`.
	pub fn regenerate(&mut self, region: Region) {
		self.scene.region = region;
		let graph = NodeFieldGenerator::generate(region, &self.config, &mut self.rng);
		info!(
			"network regenerated for {}x{}: {} nodes, {} edges",
			region.width,
			region.height,
			graph.node_count(),
			graph.edge_count()
		);
		self.animator.replace_graph(graph, &mut self.scene);
		self.regenerations += 1;
	}

	/// Queue a resize; the graph is rebuilt once resizing settles.
	pub fn resize(&mut self, width: f64, height: f64, now: f64) {
		self.resize.notify(Region::new(width, height), now);
	}

	pub fn set_attached(&mut self, attached: bool) {
		self.scene.attached = attached;
	}

	/// Advance by wall-clock `now` in ms. `false` once the animation has stopped for good.
	pub fn tick(&mut self, now: f64) -> bool {
		if let Some(region) = self.resize.poll(now) {
			if region != self.scene.region() {
				self.regenerate(region);
			}
		}
		let dt = self.last_tick.map_or(0.0, |t| (now - t).max(0.0) / 1000.0);
		self.last_tick = Some(now);
		self.scene.fade(dt);
		let running = self.animator.tick(now, &mut self.scene, &mut self.rng);
		if !running {
			debug!("network stopped after {} regenerations", self.regenerations);
		}
		running
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::neural_network::animator::Phase;

	#[test]
	fn starts_with_a_drawn_graph() {
		let state = NetworkState::new(NetworkConfig::hero(), 1200.0, 600.0, 7);
		assert_eq!(state.regenerations, 1);
		assert_eq!(state.scene.nodes.len(), 36);
		assert_eq!(state.scene.edges.len(), state.animator.graph().edge_count());
	}

	#[test]
	fn two_resizes_in_window_regenerate_once() {
		let mut state = NetworkState::new(NetworkConfig::hero(), 1200.0, 600.0, 7);
		state.tick(0.0);
		state.resize(1000.0, 600.0, 100.0);
		state.tick(116.0);
		state.resize(900.0, 500.0, 200.0);
		let mut t = 216.0;
		while t < 2000.0 {
			state.tick(t);
			t += 16.0;
		}
		assert_eq!(state.regenerations, 2);
		assert_eq!(state.scene.region(), Region::new(900.0, 500.0));
	}

	#[test]
	fn resize_back_to_same_size_keeps_graph() {
		let mut state = NetworkState::new(NetworkConfig::background(), 1280.0, 3000.0, 1);
		state.resize(1280.0, 3000.0, 10.0);
		state.tick(400.0);
		assert_eq!(state.regenerations, 1);
		assert_eq!(state.scene.region(), Region::new(1280.0, 3000.0));

		state.resize(1280.0, 2000.0, 500.0);
		state.tick(800.0);
		assert_eq!(state.regenerations, 2);
		assert_eq!(state.scene.region(), Region::new(1280.0, 2000.0));
	}

	#[test]
	fn regenerated_scene_matches_new_graph() {
		let mut state = NetworkState::new(NetworkConfig::background(), 1280.0, 2400.0, 3);
		for t in 0..40 {
			state.tick(t as f64 * 16.0);
		}
		state.resize(640.0, 800.0, 700.0);
		state.tick(1000.0);
		assert_eq!(state.scene.nodes.len(), state.animator.graph().node_count());
		assert_eq!(state.scene.edges.len(), state.animator.graph().edge_count());
		assert!(state.scene.edges.iter().all(|e| state.scene.endpoints(e).is_some()));
	}

	#[test]
	fn detaching_stops_the_loop() {
		let mut state = NetworkState::new(NetworkConfig::hero(), 1200.0, 600.0, 9);
		assert!(state.tick(0.0));
		state.set_attached(false);
		assert!(!state.tick(16.0));
		assert_eq!(state.animator.phase(), Phase::Stopped);
	}

	#[test]
	fn degenerate_region_animates_nothing() {
		let mut state = NetworkState::new(NetworkConfig::hero(), 0.0, 0.0, 9);
		for t in 0..200 {
			assert!(state.tick(t as f64 * 50.0));
		}
		assert!(state.scene.nodes.is_empty());
		assert_eq!(state.animator.activation().active_count(), 0);
	}
}
