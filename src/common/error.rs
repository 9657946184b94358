//! Error types returned by shape construction, simulation and plotting.

use std::error::Error;
use std::fmt::{self, Display};

/// Returned when a shape cannot be built from the given physical parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// Total mass of a circle or triangle is zero, negative or NaN.
    NonPositiveMass(f64),
    /// Circle radius is zero, negative or NaN.
    NonPositiveRadius(f64),
    /// Triangle side length is zero, negative or NaN.
    NonPositiveSideLength(f64),
    /// The coordinate and mass sequences of a body differ in length.
    MismatchedLengths { x: usize, y: usize, masses: usize },
    /// A point mass of a body is zero, negative or NaN.
    NonPositivePointMass { index: usize, mass: f64 },
    /// A body needs at least one point mass.
    EmptyBody,
}

impl Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveMass(m) => write!(f, "mass must be positive, got {}", m),
            Self::NonPositiveRadius(r) => write!(f, "radius must be positive, got {}", r),
            Self::NonPositiveSideLength(s) => write!(f, "side length must be positive, got {}", s),
            Self::MismatchedLengths { x, y, masses } => write!(
                f,
                "body sequences differ in length: {} x-coordinates, {} y-coordinates, {} masses",
                x, y, masses
            ),
            Self::NonPositivePointMass { index, mass } => {
                write!(f, "point mass {} must be positive, got {}", index, mass)
            }
            Self::EmptyBody => write!(f, "body has no point masses"),
        }
    }
}

impl Error for ShapeError {}

/// Returned by [`Scene::simulate`](crate::world::Scene::simulate).
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// The time grid needs at least two points (start and end).
    TooFewSteps(usize),
    /// The simulation horizon is NaN or infinite.
    NonFiniteHorizon(f64),
    /// The solver configuration is unusable.
    InvalidSolver(&'static str),
    /// The state became NaN or infinite, usually from a force function.
    NonFiniteState { time: f64 },
    /// The adaptive solver used up its step budget for one grid interval.
    StepLimitExceeded { time: f64, steps: usize },
    /// The adaptive solver's step shrank below the resolution of the time axis.
    StepSizeUnderflow { time: f64 },
}

impl Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewSteps(n) => write!(f, "at least 2 time steps are required, got {}", n),
            Self::NonFiniteHorizon(t) => write!(f, "simulation horizon must be finite, got {}", t),
            Self::InvalidSolver(reason) => write!(f, "invalid solver configuration: {}", reason),
            Self::NonFiniteState { time } => write!(f, "state became non-finite at t = {}", time),
            Self::StepLimitExceeded { time, steps } => {
                write!(f, "solver exceeded {} steps near t = {}", steps, time)
            }
            Self::StepSizeUnderflow { time } => write!(f, "step size underflow near t = {}", time),
        }
    }
}

impl Error for SimulationError {}

/// Returned by the plot boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotError {
    /// Trajectory and time grid differ in length.
    LengthMismatch { states: usize, times: usize },
    /// The underlying writer failed.
    Io(String),
}

impl Display for PlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { states, times } => write!(
                f,
                "trajectory has {} states but time grid has {} points",
                states, times
            ),
            Self::Io(msg) => write!(f, "failed to write plot: {}", msg),
        }
    }
}

impl Error for PlotError {}

impl From<std::io::Error> for PlotError {
    fn from(err: std::io::Error) -> Self {
        PlotError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_error_display() {
        let err = ShapeError::MismatchedLengths { x: 2, y: 3, masses: 3 };
        assert_eq!(
            err.to_string(),
            "body sequences differ in length: 2 x-coordinates, 3 y-coordinates, 3 masses"
        );
        assert_eq!(
            ShapeError::NonPositiveRadius(0.0).to_string(),
            "radius must be positive, got 0"
        );
    }

    #[test]
    fn test_simulation_error_display() {
        assert_eq!(
            SimulationError::TooFewSteps(1).to_string(),
            "at least 2 time steps are required, got 1"
        );
        assert_eq!(
            SimulationError::StepSizeUnderflow { time: 0.5 }.to_string(),
            "step size underflow near t = 0.5"
        );
    }

    #[test]
    fn test_plot_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        assert_eq!(PlotError::from(io), PlotError::Io("disk full".to_string()));
    }
}
