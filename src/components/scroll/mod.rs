mod component;
mod observer;
mod state;

pub use component::{Parallax, Reveal};
pub use observer::{OnceObserver, observe_once};
