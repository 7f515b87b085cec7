use super::types::{EdgeIdx, Graph, NodeIdx};

/// Per-cycle lit state: `glow` per node, `active` per edge.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActivationState {
	glow: Vec<bool>,
	active: Vec<bool>,
}

/// Flags that were switched off by [`ActivationState::clear`].
#[derive(Debug, Default, PartialEq)]
pub struct Cleared {
	pub nodes: Vec<NodeIdx>,
	pub edges: Vec<EdgeIdx>,
}

impl Cleared {
	#[cfg(test)]
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.edges.is_empty()
	}
}

impl ActivationState {
	pub fn for_graph(graph: &Graph) -> Self {
		Self {
			glow: vec![false; graph.node_count()],
			active: vec![false; graph.edge_count()],
		}
	}

	/// `true` only when the flag actually flipped on. Unknown indices are ignored.
	pub fn glow(&mut self, node: NodeIdx) -> bool {
		match self.glow.get_mut(node) {
			Some(flag) if !*flag => {
				*flag = true;
				true
			}
			_ => false,
		}
	}

	pub fn activate(&mut self, edge: EdgeIdx) -> bool {
		match self.active.get_mut(edge) {
			Some(flag) if !*flag => {
				*flag = true;
				true
			}
			_ => false,
		}
	}

	pub fn clear(&mut self) -> Cleared {
		Cleared {
			nodes: take_set(&mut self.glow),
			edges: take_set(&mut self.active),
		}
	}

	#[cfg(test)]
	pub fn is_glowing(&self, node: NodeIdx) -> bool {
		self.glow.get(node).copied().unwrap_or(false)
	}

	#[cfg(test)]
	pub fn is_active(&self, edge: EdgeIdx) -> bool {
		self.active.get(edge).copied().unwrap_or(false)
	}

	#[cfg(test)]
	pub fn glowing_count(&self) -> usize {
		self.glow.iter().filter(|&&g| g).count()
	}

	#[cfg(test)]
	pub fn active_count(&self) -> usize {
		self.active.iter().filter(|&&a| a).count()
	}
}

fn take_set(flags: &mut [bool]) -> Vec<usize> {
	flags
		.iter_mut()
		.enumerate()
		.filter_map(|(i, flag)| std::mem::take(flag).then_some(i))
		.collect()
}
