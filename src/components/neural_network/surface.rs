use super::geometry::{Point, Region};

/// What the animator needs from whatever draws the network.
pub trait RenderSurface {
	type NodeHandle: Copy;
	type EdgeHandle: Copy;

	/// Drop every visual element created so far.
	fn clear(&mut self);
	fn create_node(&mut self, position: Point) -> Self::NodeHandle;
	fn create_edge(&mut self, a: Self::NodeHandle, b: Self::NodeHandle) -> Self::EdgeHandle;
	fn set_active(&mut self, edge: Self::EdgeHandle, active: bool);
	fn set_glow(&mut self, node: Self::NodeHandle, glow: bool);
	/// One-shot flash that decays on its own.
	fn flash(&mut self, _node: Self::NodeHandle) {}
	fn region(&self) -> Region;
	fn is_attached(&self) -> bool;
}

pub const FLASH_FADE_PER_SEC: f64 = 1.6;

#[derive(Clone, Debug, Default)]
pub struct NodeVisual {
	pub position: Point,
	pub glow: bool,
	/// 1.0 right after a flash, easing back to 0.
	pub flash_t: f64,
}

#[derive(Clone, Debug, Default)]
pub struct EdgeVisual {
	pub a: usize,
	pub b: usize,
	pub active: bool,
}

/// Retained model the canvas renderer paints every frame.
///
/// Handles are plain indices; anything out of range is ignored.
#[derive(Clone, Debug, Default)]
pub struct Scene {
	pub nodes: Vec<NodeVisual>,
	pub edges: Vec<EdgeVisual>,
	pub region: Region,
	pub attached: bool,
}

impl Scene {
	pub fn new(region: Region) -> Self {
		Self {
			region,
			attached: true,
			..Default::default()
		}
	}

	pub fn fade(&mut self, dt: f64) {
		for node in &mut self.nodes {
			node.flash_t = (node.flash_t - FLASH_FADE_PER_SEC * dt).max(0.0);
		}
	}

	pub fn endpoints(&self, edge: &EdgeVisual) -> Option<(Point, Point)> {
		Some((
			self.nodes.get(edge.a)?.position,
			self.nodes.get(edge.b)?.position,
		))
	}
}

impl RenderSurface for Scene {
	type NodeHandle = usize;
	type EdgeHandle = usize;

	fn clear(&mut self) {
		self.nodes.clear();
		self.edges.clear();
	}

	fn create_node(&mut self, position: Point) -> usize {
		self.nodes.push(NodeVisual {
			position,
			..Default::default()
		});
		self.nodes.len() - 1
	}

	fn create_edge(&mut self, a: usize, b: usize) -> usize {
		self.edges.push(EdgeVisual { a, b, active: false });
		self.edges.len() - 1
	}

	fn set_active(&mut self, edge: usize, active: bool) {
		if let Some(e) = self.edges.get_mut(edge) {
			e.active = active;
		}
	}

	fn set_glow(&mut self, node: usize, glow: bool) {
		if let Some(n) = self.nodes.get_mut(node) {
			n.glow = glow;
		}
	}

	fn flash(&mut self, node: usize) {
		if let Some(n) = self.nodes.get_mut(node) {
			n.flash_t = 1.0;
		}
	}

	fn region(&self) -> Region {
		self.region
	}

	fn is_attached(&self) -> bool {
		self.attached
	}
}
