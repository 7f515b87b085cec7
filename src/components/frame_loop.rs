//! Lifetime of a canvas animation loop and the window listeners it registered.

/// Decision for one animation frame.
#[derive(Debug, PartialEq)]
pub enum Frame<L> {
	Draw,
	/// The canvas left the document: drop these listeners and stop requesting frames.
	Detach(Vec<L>),
	Halted,
}

/// Collects the listeners a loop registers and hands them back exactly once, on
/// the first frame that finds its canvas gone.
#[derive(Debug)]
pub struct FrameLoop<L> {
	listeners: Vec<L>,
	halted: bool,
}

impl<L> Default for FrameLoop<L> {
	fn default() -> Self {
		Self {
			listeners: Vec::new(),
			halted: false,
		}
	}
}

impl<L> FrameLoop<L> {
	pub fn listen(&mut self, listener: L) {
		self.listeners.push(listener);
	}

	pub fn frame(&mut self, connected: bool) -> Frame<L> {
		if self.halted {
			return Frame::Halted;
		}
		if connected {
			return Frame::Draw;
		}
		self.halted = true;
		Frame::Detach(std::mem::take(&mut self.listeners))
	}
}
