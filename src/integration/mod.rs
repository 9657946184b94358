pub mod integrator;

pub use integrator::{rk4_step, Solver};
