//! Signal propagation over a generated graph.
//!
//! The animator is a small state machine advanced by an external ticker (the
//! frame loop in the browser, a fake clock in tests). Walk paths are decided
//! when a cycle starts; only the visual activations are deferred, through a
//! time-ordered queue.

use log::{debug, trace};
use rand::Rng;

use super::activation::ActivationState;
use super::adjacency::Adjacency;
use super::config::{PulseConfig, Strategy, SweepConfig, WalkConfig, between};
use super::surface::RenderSurface;
use super::types::{EdgeIdx, Graph, NodeIdx};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
	/// No cycle has started on the current graph yet.
	Idle,
	/// `hop` of `planned` activations have fired. Sweep steps count as hops.
	Walking {
		hop: usize,
		planned: usize,
		ends_at: f64,
		next_cycle: f64,
	},
	Cooldown {
		until: f64,
	},
	/// The surface went away; nothing runs again.
	Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
	Glow(NodeIdx),
	Edge(EdgeIdx),
	Flash(NodeIdx),
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Scheduled {
	at: f64,
	action: Activation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hop {
	pub edge: EdgeIdx,
	pub node: NodeIdx,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Walk {
	pub start: NodeIdx,
	pub hops: Vec<Hop>,
}

/// Random walk of at most `max_hops` steps. Stops early at a node without edges.
pub fn plan_walk(
	graph: &Graph,
	adjacency: &Adjacency,
	start: NodeIdx,
	max_hops: usize,
	rng: &mut impl Rng,
) -> Walk {
	let mut hops = Vec::with_capacity(max_hops);
	let mut current = start;
	for _ in 0..max_hops {
		let incident = adjacency.incident(current);
		if incident.is_empty() {
			break;
		}
		let edge = incident[rng.gen_range(0..incident.len())];
		let Some(next) = graph.edge(edge).and_then(|e| e.other(current)) else {
			break;
		};
		hops.push(Hop { edge, node: next });
		current = next;
	}
	Walk { start, hops }
}

/// `run_length` edge indices from `start`, wrapping, never repeating an edge.
pub fn plan_sweep(edge_count: usize, start: EdgeIdx, run_length: usize) -> Vec<EdgeIdx> {
	if edge_count == 0 {
		return Vec::new();
	}
	(0..run_length.min(edge_count))
		.map(|i| (start + i) % edge_count)
		.collect()
}

pub struct SignalAnimator<S: RenderSurface> {
	strategy: Strategy,
	graph: Graph,
	adjacency: Adjacency,
	node_handles: Vec<S::NodeHandle>,
	edge_handles: Vec<S::EdgeHandle>,
	activation: ActivationState,
	queue: Vec<Scheduled>,
	phase: Phase,
	next_pulse: Option<f64>,
	pulse_group: usize,
	last_walk: Option<Walk>,
}

impl<S: RenderSurface> SignalAnimator<S> {
	pub fn new(strategy: Strategy) -> Self {
		Self {
			strategy,
			graph: Graph::default(),
			adjacency: Adjacency::default(),
			node_handles: Vec::new(),
			edge_handles: Vec::new(),
			activation: ActivationState::default(),
			queue: Vec::new(),
			phase: Phase::Idle,
			next_pulse: None,
			pulse_group: 0,
			last_walk: None,
		}
	}

	/// Swap in a freshly generated graph. Everything tied to the old one
	/// (visual elements, flags, pending activations) goes with it.
	pub fn replace_graph(&mut self, graph: Graph, surface: &mut S) {
		surface.clear();
		self.node_handles = graph
			.nodes()
			.iter()
			.map(|n| surface.create_node(n.position))
			.collect();
		self.edge_handles = graph
			.edges()
			.iter()
			.map(|e| surface.create_edge(self.node_handles[e.a()], self.node_handles[e.b()]))
			.collect();
		self.adjacency = Adjacency::build(&graph);
		let isolated = (0..graph.node_count())
			.filter(|&i| self.adjacency.degree(i) == 0)
			.count();
		if isolated > 0 {
			debug!("{isolated} isolated nodes, walks starting there end at once");
		}
		self.activation = ActivationState::for_graph(&graph);
		self.graph = graph;
		self.queue.clear();
		self.last_walk = None;
		self.next_pulse = None;
		self.pulse_group = 0;
		if self.phase != Phase::Stopped {
			self.phase = Phase::Idle;
		}
	}

	/// Advance to `now` (milliseconds). Returns `false` once the animator has stopped.
	pub fn tick(&mut self, now: f64, surface: &mut S, rng: &mut impl Rng) -> bool {
		if self.phase == Phase::Stopped {
			return false;
		}
		if !surface.is_attached() {
			debug!("render surface detached, stopping signal animation");
			self.queue.clear();
			self.phase = Phase::Stopped;
			return false;
		}

		let strategy = self.strategy;
		if let Strategy::Walk(WalkConfig {
			pulse: Some(pulse), ..
		}) = strategy
		{
			self.schedule_pulse(now, pulse);
		}

		let phase = self.phase;
		match phase {
			Phase::Idle => self.start_cycle(now, surface, rng),
			Phase::Cooldown { until } if now >= until => self.start_cycle(now, surface, rng),
			_ => {}
		}

		self.fire_due(now, surface);

		if let Phase::Walking {
			hop,
			planned,
			ends_at,
			next_cycle,
		} = self.phase
		{
			if hop >= planned && now >= ends_at {
				if matches!(strategy, Strategy::Sweep(_)) {
					self.clear_activation(surface);
				}
				self.phase = Phase::Cooldown { until: next_cycle };
			}
		}
		true
	}

	pub fn clear_activation(&mut self, surface: &mut S) {
		let cleared = self.activation.clear();
		for node in cleared.nodes {
			if let Some(&h) = self.node_handles.get(node) {
				surface.set_glow(h, false);
			}
		}
		for edge in cleared.edges {
			if let Some(&h) = self.edge_handles.get(edge) {
				surface.set_active(h, false);
			}
		}
	}

	fn start_cycle(&mut self, now: f64, surface: &mut S, rng: &mut impl Rng) {
		self.clear_activation(surface);
		let strategy = self.strategy;
		let (planned, step, cooldown) = match strategy {
			Strategy::Walk(cfg) => (
				self.start_walk(now, cfg, surface, rng),
				cfg.hop_delay_ms,
				cfg.cooldown_ms,
			),
			Strategy::Sweep(cfg) => (
				self.start_sweep(now, cfg, rng),
				cfg.step_delay_ms,
				cfg.cooldown_ms,
			),
		};
		let ends_at = now + planned as f64 * step;
		let next_cycle = ends_at + between(rng, cooldown);
		trace!(
			"cycle at {now} from {:?}: {planned} activations, next at {next_cycle}",
			self.last_walk.as_ref().map(|w| w.start)
		);
		self.phase = if planned == 0 {
			Phase::Cooldown { until: next_cycle }
		} else {
			Phase::Walking {
				hop: 0,
				planned,
				ends_at,
				next_cycle,
			}
		};
	}

	fn start_walk(
		&mut self,
		now: f64,
		cfg: WalkConfig,
		surface: &mut S,
		rng: &mut impl Rng,
	) -> usize {
		if self.graph.is_empty() {
			return 0;
		}
		let start = rng.gen_range(0..self.graph.node_count());
		self.apply(Activation::Glow(start), surface);

		let max_hops = cfg.sample_hops(rng);
		let walk = plan_walk(&self.graph, &self.adjacency, start, max_hops, rng);
		for (i, hop) in walk.hops.iter().enumerate() {
			let at = now + i as f64 * cfg.hop_delay_ms;
			self.schedule(at, Activation::Edge(hop.edge));
			self.schedule(at, Activation::Glow(hop.node));
		}
		let planned = walk.hops.len();
		self.last_walk = Some(walk);
		planned
	}

	fn start_sweep(&mut self, now: f64, cfg: SweepConfig, rng: &mut impl Rng) -> usize {
		let m = self.graph.edge_count();
		if m == 0 {
			return 0;
		}
		let run = plan_sweep(m, rng.gen_range(0..m), cfg.run_length);
		for (i, &edge) in run.iter().enumerate() {
			self.schedule(now + i as f64 * cfg.step_delay_ms, Activation::Edge(edge));
		}
		run.len()
	}

	fn schedule_pulse(&mut self, now: f64, pulse: PulseConfig) {
		let due = *self.next_pulse.get_or_insert(now + pulse.period_ms);
		if now < due {
			return;
		}
		let groups = pulse.groups.max(1);
		let group = self.pulse_group % groups;
		let members: Vec<NodeIdx> = (0..self.graph.node_count())
			.filter(|i| i % groups == group)
			.collect();
		for (j, node) in members.into_iter().enumerate() {
			self.schedule(now + j as f64 * pulse.stagger_ms, Activation::Flash(node));
		}
		self.pulse_group = (group + 1) % groups;
		// a long pause (hidden tab) collapses into one pulse instead of a burst
		self.next_pulse = Some((due + pulse.period_ms).max(now));
	}

	fn schedule(&mut self, at: f64, action: Activation) {
		let pos = self.queue.partition_point(|s| s.at <= at);
		self.queue.insert(pos, Scheduled { at, action });
	}

	fn fire_due(&mut self, now: f64, surface: &mut S) {
		let due = self.queue.partition_point(|s| s.at <= now);
		let fired: Vec<Scheduled> = self.queue.drain(..due).collect();
		for s in fired {
			if let (Activation::Edge(_), Phase::Walking { hop, .. }) = (s.action, &mut self.phase) {
				*hop += 1;
			}
			self.apply(s.action, surface);
		}
	}

	fn apply(&mut self, action: Activation, surface: &mut S) {
		match action {
			Activation::Glow(node) => {
				if self.activation.glow(node) {
					if let Some(&h) = self.node_handles.get(node) {
						surface.set_glow(h, true);
					}
				}
			}
			Activation::Edge(edge) => {
				if self.activation.activate(edge) {
					if let Some(&h) = self.edge_handles.get(edge) {
						surface.set_active(h, true);
					}
				}
			}
			Activation::Flash(node) => {
				if let Some(&h) = self.node_handles.get(node) {
					surface.flash(h);
				}
			}
		}
	}
}

#[cfg(test)]
impl<S: RenderSurface> SignalAnimator<S> {
	pub fn phase(&self) -> Phase {
		self.phase
	}

	pub fn graph(&self) -> &Graph {
		&self.graph
	}

	pub fn activation(&self) -> &ActivationState {
		&self.activation
	}

	pub fn last_walk(&self) -> Option<&Walk> {
		self.last_walk.as_ref()
	}

	pub fn pending(&self) -> usize {
		self.queue.len()
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;
	use crate::components::neural_network::config::{NetworkConfig, PlacementPolicy};
	use crate::components::neural_network::generator::NodeFieldGenerator;
	use crate::components::neural_network::geometry::{Point, Region};
	use crate::components::neural_network::types::{Edge, Node};

	#[derive(Clone, Copy, Debug, PartialEq)]
	enum Call {
		Clear,
		Node,
		Edge,
		Active(usize, bool),
		Glow(usize, bool),
		Flash(usize),
	}

	struct Recorder {
		calls: Vec<Call>,
		attached: bool,
		nodes: usize,
		edges: usize,
	}

	impl Recorder {
		fn new() -> Self {
			Self {
				calls: Vec::new(),
				attached: true,
				nodes: 0,
				edges: 0,
			}
		}

		fn activations(&self) -> Vec<usize> {
			self.calls
				.iter()
				.filter_map(|c| match c {
					Call::Active(e, true) => Some(*e),
					_ => None,
				})
				.collect()
		}
	}

	impl RenderSurface for Recorder {
		type NodeHandle = usize;
		type EdgeHandle = usize;

		fn clear(&mut self) {
			self.calls.push(Call::Clear);
			self.nodes = 0;
			self.edges = 0;
		}

		fn create_node(&mut self, _position: Point) -> usize {
			self.calls.push(Call::Node);
			self.nodes += 1;
			self.nodes - 1
		}

		fn create_edge(&mut self, _a: usize, _b: usize) -> usize {
			self.calls.push(Call::Edge);
			self.edges += 1;
			self.edges - 1
		}

		fn set_active(&mut self, edge: usize, active: bool) {
			self.calls.push(Call::Active(edge, active));
		}

		fn set_glow(&mut self, node: usize, glow: bool) {
			self.calls.push(Call::Glow(node, glow));
		}

		fn flash(&mut self, node: usize) {
			self.calls.push(Call::Flash(node));
		}

		fn region(&self) -> Region {
			Region::new(1200.0, 600.0)
		}

		fn is_attached(&self) -> bool {
			self.attached
		}
	}

	fn graph_from(n: usize, pairs: &[(usize, usize)]) -> Graph {
		let nodes = (0..n)
			.map(|index| Node {
				index,
				position: Point::new(index as f64 * 10.0, 0.0),
			})
			.collect();
		let edges = pairs.iter().filter_map(|&(a, b)| Edge::new(a, b)).collect();
		Graph::new(nodes, edges)
	}

	fn hero_graph(seed: u64) -> Graph {
		let mut config = NetworkConfig::hero();
		config.placement = PlacementPolicy::Clustered {
			count: 36,
			centers: vec![
				Point::new(0.2, 0.5),
				Point::new(0.5, 0.5),
				Point::new(0.8, 0.5),
			],
			jitter: 150.0,
			inset: 40.0,
		};
		NodeFieldGenerator::generate(
			Region::new(1200.0, 600.0),
			&config,
			&mut SmallRng::seed_from_u64(seed),
		)
	}

	fn walk_only() -> WalkConfig {
		WalkConfig {
			min_hops: 4,
			max_hops: 6,
			hop_delay_ms: 120.0,
			cooldown_ms: (1600.0, 2800.0),
			pulse: None,
		}
	}

	fn sweep() -> SweepConfig {
		SweepConfig {
			run_length: 6,
			step_delay_ms: 100.0,
			cooldown_ms: (2400.0, 3600.0),
		}
	}

	#[test]
	fn walks_follow_graph_edges() {
		let graph = hero_graph(11);
		let adjacency = Adjacency::build(&graph);
		let mut rng = SmallRng::seed_from_u64(4);
		for start in 0..graph.node_count() {
			let walk = plan_walk(&graph, &adjacency, start, 6, &mut rng);
			assert!(walk.hops.len() <= 6);
			// every hero node has an edge, so the walk always moves
			assert!(!walk.hops.is_empty());
			let mut current = start;
			for hop in &walk.hops {
				let edge = graph.edge(hop.edge).unwrap();
				assert_eq!(edge.other(current), Some(hop.node));
				let linking = graph
					.edges()
					.iter()
					.filter(|e| e.other(current) == Some(hop.node))
					.count();
				assert_eq!(linking, 1);
				current = hop.node;
			}
		}
	}

	#[test]
	fn isolated_start_ends_immediately() {
		let graph = graph_from(1, &[]);
		let adjacency = Adjacency::build(&graph);
		let walk = plan_walk(&graph, &adjacency, 0, 6, &mut SmallRng::seed_from_u64(0));
		assert_eq!(walk.start, 0);
		assert!(walk.hops.is_empty());
	}

	#[test]
	fn single_node_cycle_activates_nothing() {
		let mut surface = Recorder::new();
		let mut animator = SignalAnimator::new(Strategy::Walk(walk_only()));
		let mut rng = SmallRng::seed_from_u64(1);
		animator.replace_graph(graph_from(1, &[]), &mut surface);

		assert!(animator.tick(0.0, &mut surface, &mut rng));
		assert!(surface.activations().is_empty());
		assert!(surface.calls.contains(&Call::Glow(0, true)));
		assert_eq!(animator.last_walk().map(|w| w.hops.len()), Some(0));
		assert!(matches!(animator.phase(), Phase::Cooldown { .. }));
	}

	#[test]
	fn empty_graph_is_silent() {
		let mut surface = Recorder::new();
		let mut animator = SignalAnimator::new(Strategy::Sweep(sweep()));
		let mut rng = SmallRng::seed_from_u64(1);
		animator.replace_graph(Graph::default(), &mut surface);
		for t in 0..100 {
			animator.tick(t as f64 * 100.0, &mut surface, &mut rng);
		}
		assert_eq!(surface.calls, vec![Call::Clear]);
	}

	#[test]
	fn hops_fire_in_order_at_fixed_offsets() {
		let mut surface = Recorder::new();
		let mut animator = SignalAnimator::new(Strategy::Walk(walk_only()));
		let mut rng = SmallRng::seed_from_u64(21);
		animator.replace_graph(hero_graph(3), &mut surface);

		animator.tick(1000.0, &mut surface, &mut rng);
		let walk = animator.last_walk().cloned().unwrap();
		assert!((4..=6).contains(&walk.hops.len()));
		// hop 0 lands with the cycle start
		assert_eq!(surface.activations(), vec![walk.hops[0].edge]);

		let mut t = 1000.0;
		while t < 1000.0 + 120.0 * walk.hops.len() as f64 {
			t += 16.0;
			animator.tick(t, &mut surface, &mut rng);
		}
		let fired = surface.activations();
		let mut expected: Vec<usize> = Vec::new();
		for hop in &walk.hops {
			if !expected.contains(&hop.edge) {
				expected.push(hop.edge);
			}
		}
		assert_eq!(fired, expected);
		assert!(fired.len() <= 6);
		assert!(matches!(animator.phase(), Phase::Cooldown { .. }));
	}

	#[test]
	fn next_cycle_clears_previous_walk() {
		let mut surface = Recorder::new();
		let mut animator = SignalAnimator::new(Strategy::Walk(walk_only()));
		let mut rng = SmallRng::seed_from_u64(5);
		animator.replace_graph(hero_graph(9), &mut surface);

		let mut t = 0.0;
		let mut cycles = 0;
		let mut was_cooling = false;
		while cycles < 3 && t < 60_000.0 {
			animator.tick(t, &mut surface, &mut rng);
			let cooling = matches!(animator.phase(), Phase::Cooldown { .. });
			if was_cooling && !cooling {
				cycles += 1;
				// only the new start node and at most hop 0 are lit
				assert!(animator.activation().glowing_count() <= 2);
				assert!(animator.activation().active_count() <= 1);
			}
			was_cooling = cooling;
			t += 16.0;
		}
		assert_eq!(cycles, 3);
	}

	#[test]
	fn cooldown_respects_bounds() {
		let mut surface = Recorder::new();
		let mut animator = SignalAnimator::new(Strategy::Walk(walk_only()));
		let mut rng = SmallRng::seed_from_u64(77);
		animator.replace_graph(hero_graph(1), &mut surface);
		animator.tick(0.0, &mut surface, &mut rng);
		let Phase::Walking {
			planned,
			ends_at,
			next_cycle,
			..
		} = animator.phase()
		else {
			panic!("expected a walk, got {:?}", animator.phase());
		};
		assert_eq!(ends_at, planned as f64 * 120.0);
		assert!((ends_at + 1600.0..=ends_at + 2800.0).contains(&next_cycle));
	}

	#[test]
	fn sweep_is_contiguous_and_clears() {
		let pairs: Vec<(usize, usize)> = (0..8).map(|i| (i, i + 1)).collect();
		let graph = graph_from(10, &pairs);
		let mut surface = Recorder::new();
		let mut animator = SignalAnimator::new(Strategy::Sweep(sweep()));
		let mut rng = SmallRng::seed_from_u64(2);
		animator.replace_graph(graph, &mut surface);

		let mut t = 0.0;
		while !matches!(animator.phase(), Phase::Cooldown { .. }) {
			animator.tick(t, &mut surface, &mut rng);
			t += 10.0;
		}
		let fired = surface.activations();
		assert_eq!(fired.len(), 6);
		for pair in fired.windows(2) {
			assert_eq!(pair[1], (pair[0] + 1) % 8);
		}
		// cleared on entering cooldown, and no node glow in a sweep
		assert_eq!(animator.activation().active_count(), 0);
		assert!(!surface.calls.iter().any(|c| matches!(c, Call::Glow(_, true))));
	}

	#[test]
	fn sweep_never_repeats_edges() {
		assert_eq!(plan_sweep(3, 2, 6), vec![2, 0, 1]);
		assert_eq!(plan_sweep(0, 0, 6), Vec::<usize>::new());
		assert_eq!(plan_sweep(10, 8, 4), vec![8, 9, 0, 1]);
	}

	#[test]
	fn detached_surface_stops_everything() {
		let mut surface = Recorder::new();
		let mut animator = SignalAnimator::new(Strategy::Walk(walk_only()));
		let mut rng = SmallRng::seed_from_u64(3);
		animator.replace_graph(hero_graph(2), &mut surface);
		animator.tick(0.0, &mut surface, &mut rng);
		assert!(animator.pending() > 0);

		surface.attached = false;
		let before = surface.calls.len();
		assert!(!animator.tick(50.0, &mut surface, &mut rng));
		surface.attached = true;
		assert!(!animator.tick(5000.0, &mut surface, &mut rng));
		assert_eq!(surface.calls.len(), before);
		assert_eq!(animator.pending(), 0);
		assert_eq!(animator.phase(), Phase::Stopped);
	}

	#[test]
	fn regeneration_drops_pending_work() {
		let mut surface = Recorder::new();
		let mut animator = SignalAnimator::new(Strategy::Walk(walk_only()));
		let mut rng = SmallRng::seed_from_u64(8);
		animator.replace_graph(hero_graph(4), &mut surface);
		animator.tick(0.0, &mut surface, &mut rng);
		assert!(animator.activation().glowing_count() > 0);

		animator.replace_graph(graph_from(2, &[(0, 1)]), &mut surface);
		assert_eq!(animator.pending(), 0);
		assert_eq!(animator.phase(), Phase::Idle);
		assert_eq!(animator.activation().glowing_count(), 0);
		assert_eq!(animator.graph().edge_count(), 1);

		animator.tick(10.0, &mut surface, &mut rng);
		let last_clear = surface.calls.iter().rposition(|c| *c == Call::Clear).unwrap();
		for call in &surface.calls[last_clear..] {
			match call {
				Call::Active(e, _) => assert_eq!(*e, 0),
				Call::Glow(n, _) => assert!(*n < 2),
				_ => {}
			}
		}
	}

	#[test]
	fn pulse_rotates_groups() {
		let mut cfg = walk_only();
		cfg.pulse = Some(PulseConfig {
			period_ms: 5000.0,
			stagger_ms: 150.0,
			groups: 4,
		});
		let mut surface = Recorder::new();
		let mut animator = SignalAnimator::new(Strategy::Walk(cfg));
		let mut rng = SmallRng::seed_from_u64(6);
		animator.replace_graph(graph_from(8, &[]), &mut surface);

		let mut t = 0.0;
		while t <= 10_600.0 {
			animator.tick(t, &mut surface, &mut rng);
			t += 50.0;
		}
		let flashed: Vec<usize> = surface
			.calls
			.iter()
			.filter_map(|c| match c {
				Call::Flash(n) => Some(*n),
				_ => None,
			})
			.collect();
		assert_eq!(flashed, vec![0, 4, 1, 5]);
		assert!(surface.activations().is_empty());
	}
}
