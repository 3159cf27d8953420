//! Conway's Game of Life core.
//!
//! A generic signed-index array and 2D grid, the fixed B3/S23 transition
//! engine, the plain-text world file format, and a `Simulation` session that
//! front ends drive one generation at a time.

pub mod array;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod simulation;
pub mod world;
pub mod world_file;

pub use array::GrowableArray;
pub use config::{ConfigError, LifeConfig};
pub use engine::{neighbor_count, step, step_parallel, Automaton, Generation};
pub use error::{Axis, ContainerError};
pub use grid::{Grid, Row, RowMut};
pub use simulation::{RunError, RunSummary, Simulation, SimulationError, StepMetrics};
pub use world::World;
pub use world_file::{WorldFile, WorldFileError};
