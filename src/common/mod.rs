pub mod error;

pub use error::{PlotError, ShapeError, SimulationError};
