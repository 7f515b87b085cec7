mod activation;
mod adjacency;
mod animator;
mod component;
mod config;
mod generator;
mod geometry;
mod render;
mod resize;
mod state;
mod surface;
mod types;

pub use component::NeuralNetworkCanvas;
pub use config::NetworkVariant;
