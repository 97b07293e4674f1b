#![recursion_limit = "1024"]

//! **maze_mesh** carves seed reproducible mazes on a rectangular grid and turns their walls into
//! a 3D polygon mesh.
//!
//! `pipeline::generate` is the entry point; the modules below it can be driven individually.

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grids;
pub mod islands;
pub mod mesh;
pub mod operators;
pub mod pipeline;
pub mod units;
pub mod utils;

pub use crate::pipeline::{generate, GenerationParams, GenerationParamsBuilder};
