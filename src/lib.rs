pub mod config;
pub mod control;
pub mod error;
pub mod gpu;
pub mod input;
pub mod location;
pub mod quad;
pub mod render;
pub mod rng;
pub mod surface;
pub mod tile;
pub mod view;
pub mod world;
