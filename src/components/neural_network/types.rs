use super::geometry::Point;

pub type NodeIdx = usize;
pub type EdgeIdx = usize;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
	pub index: NodeIdx,
	pub position: Point,
}

/// Undirected edge, stored with `a < b`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
	a: NodeIdx,
	b: NodeIdx,
}

impl Edge {
	/// `None` for self-edges.
	pub fn new(i: NodeIdx, j: NodeIdx) -> Option<Self> {
		match i.cmp(&j) {
			std::cmp::Ordering::Less => Some(Self { a: i, b: j }),
			std::cmp::Ordering::Greater => Some(Self { a: j, b: i }),
			std::cmp::Ordering::Equal => None,
		}
	}

	pub fn a(&self) -> NodeIdx {
		self.a
	}

	pub fn b(&self) -> NodeIdx {
		self.b
	}

	/// The far end as seen from `node`, if `node` is an endpoint.
	pub fn other(&self, node: NodeIdx) -> Option<NodeIdx> {
		if node == self.a {
			Some(self.b)
		} else if node == self.b {
			Some(self.a)
		} else {
			None
		}
	}
}

/// Nodes and edges of one generation epoch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
}

impl Graph {
	/// Edges pointing outside `nodes` are dropped.
	pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
		let n = nodes.len();
		let edges = edges.into_iter().filter(|e| e.b < n).collect();
		Self { nodes, edges }
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn edge(&self, idx: EdgeIdx) -> Option<&Edge> {
		self.edges.get(idx)
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}
