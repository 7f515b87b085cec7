//! Node placement and nearest-neighbour wiring.
//!
//! Node counts stay in the tens, so the all-pairs scan (sort every other node
//! by distance, per node) is kept instead of a spatial index.

use std::collections::HashSet;

use log::debug;
use rand::Rng;

use super::config::{NeighborRange, NetworkConfig, PlacementPolicy};
use super::geometry::{Point, Region};
use super::types::{Edge, Graph, Node};

pub struct NodeFieldGenerator;

impl NodeFieldGenerator {
	pub fn generate(region: Region, config: &NetworkConfig, rng: &mut impl Rng) -> Graph {
		if region.is_empty() {
			return Graph::default();
		}
		let positions = match &config.placement {
			PlacementPolicy::Clustered {
				count,
				centers,
				jitter,
				inset,
			} => place_clustered(region, *count, centers, *jitter, *inset, rng),
			PlacementPolicy::Sliced {
				slice_height,
				per_slice,
			} => place_sliced(region, *slice_height, *per_slice, rng),
		};
		let nodes: Vec<Node> = positions
			.into_iter()
			.enumerate()
			.map(|(index, position)| Node { index, position })
			.collect();
		let edges = nearest_neighbor_edges(&nodes, config.neighbors, rng);
		debug!(
			"generated {} nodes, {} edges in {}x{}",
			nodes.len(),
			edges.len(),
			region.width,
			region.height
		);
		Graph::new(nodes, edges)
	}
}

fn place_clustered(
	region: Region,
	count: usize,
	centers: &[Point],
	jitter: f64,
	inset: f64,
	rng: &mut impl Rng,
) -> Vec<Point> {
	let bounds = region.inset(inset);
	let jitter = jitter.abs();
	let fallback = [Point::new(0.5, 0.5)];
	let centers = if centers.is_empty() { &fallback[..] } else { centers };

	(0..count)
		.map(|i| {
			let center = region.at_fraction(centers[i % centers.len()]);
			let p = Point::new(
				center.x + rng.gen_range(-jitter..=jitter),
				center.y + rng.gen_range(-jitter..=jitter),
			);
			bounds.clamp(p)
		})
		.collect()
}

fn place_sliced(
	region: Region,
	slice_height: f64,
	per_slice: usize,
	rng: &mut impl Rng,
) -> Vec<Point> {
	let slice_height = if slice_height > 0.0 {
		slice_height.min(region.height)
	} else {
		region.height
	};
	let slices = (region.height / slice_height).ceil() as usize;
	let mut points = Vec::with_capacity(slices * per_slice);
	for s in 0..slices {
		let top = (s as f64 * slice_height).min(region.height);
		let bottom = (top + slice_height).min(region.height);
		for _ in 0..per_slice {
			points.push(Point::new(
				rng.gen_range(0.0..=region.width),
				rng.gen_range(top..=bottom),
			));
		}
	}
	points
}

/// Link every node to its `k` nearest others, `k` drawn per node from `neighbors`.
pub fn nearest_neighbor_edges(
	nodes: &[Node],
	neighbors: NeighborRange,
	rng: &mut impl Rng,
) -> Vec<Edge> {
	let mut seen = HashSet::new();
	let mut edges = Vec::new();
	for (i, node) in nodes.iter().enumerate() {
		let mut by_distance: Vec<(usize, f64)> = nodes
			.iter()
			.enumerate()
			.filter(|&(j, _)| j != i)
			.map(|(j, other)| (j, node.position.distance(other.position)))
			.collect();
		by_distance.sort_by(|a, b| a.1.total_cmp(&b.1));

		let k = neighbors.sample(rng);
		for &(j, _) in by_distance.iter().take(k) {
			if let Some(edge) = Edge::new(i, j) {
				if seen.insert(edge) {
					edges.push(edge);
				}
			}
		}
	}
	edges
}
