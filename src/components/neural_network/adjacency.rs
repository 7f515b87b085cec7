use super::types::{EdgeIdx, Graph, NodeIdx};

/// Incident-edge lists, one per node, built once per graph epoch.
#[derive(Clone, Debug, Default)]
pub struct Adjacency {
	incident: Vec<Vec<EdgeIdx>>,
}

impl Adjacency {
	pub fn build(graph: &Graph) -> Self {
		let mut incident = vec![Vec::new(); graph.node_count()];
		for (idx, edge) in graph.edges().iter().enumerate() {
			incident[edge.a()].push(idx);
			incident[edge.b()].push(idx);
		}
		Self { incident }
	}

	/// Empty for unknown nodes.
	pub fn incident(&self, node: NodeIdx) -> &[EdgeIdx] {
		self.incident.get(node).map(Vec::as_slice).unwrap_or(&[])
	}

	pub fn degree(&self, node: NodeIdx) -> usize {
		self.incident(node).len()
	}
}
