pub mod canvas;
pub mod counter;
pub mod digital_rain;
pub mod frame_loop;
pub mod neural_network;
pub mod particle_field;
pub mod scroll;
