pub mod math;
pub mod objects;
pub mod integration;
pub mod shapes;
pub mod world;
pub mod common;
pub mod plot;

// Re-export key types for easier use
pub use math::vec2::Vec2;
pub use objects::phase_state::PhaseState;
pub use shapes::{Shape, ShapeKind, Circle, Triangle, Body};
pub use integration::Solver;
pub use world::{ForceFn, Scene, Simulation};
pub use common::{PlotError, ShapeError, SimulationError};
pub use plot::{plot, CsvPlotter, MotionPlots, Plotter, Series};
