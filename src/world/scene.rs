use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::common::SimulationError;
use crate::integration::integrator::Solver;
use crate::math::vec2::Vec2;
use crate::objects::phase_state::PhaseState;
use crate::shapes::{Shape, ShapeKind};

/// An unbalanced force component as a function of time.
pub type ForceFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// A single shape driven by time-dependent forces from a given initial velocity.
pub struct Scene {
    shape: ShapeKind,
    force_x: ForceFn,
    force_y: ForceFn,
    initial_velocity: Vec2,
    solver: Solver,
}

/// Output of [`Scene::simulate`]: a time grid and the phase state at each grid point.
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    pub times: Vec<f64>,
    pub states: Vec<PhaseState>,
}

impl Simulation {
    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// The trajectory as `(x, y, vx, vy)` rows.
    pub fn rows(&self) -> Vec<[f64; 4]> {
        self.states.iter().map(PhaseState::as_array).collect()
    }

    /// Iterates `(t, state)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &PhaseState)> + '_ {
        self.times.iter().copied().zip(self.states.iter())
    }
}

impl Scene {
    /// Creates a scene using the default adaptive solver.
    pub fn new<S, Fx, Fy>(shape: S, force_x: Fx, force_y: Fy, v_x: f64, v_y: f64) -> Self
    where
        S: Into<ShapeKind>,
        Fx: Fn(f64) -> f64 + Send + Sync + 'static,
        Fy: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self {
            shape: shape.into(),
            force_x: Arc::new(force_x),
            force_y: Arc::new(force_y),
            initial_velocity: Vec2::new(v_x, v_y),
            solver: Solver::default(),
        }
    }

    /// Builder-style solver override.
    pub fn with_solver(mut self, solver: Solver) -> Self {
        self.solver = solver;
        self
    }

    pub fn shape(&self) -> &ShapeKind {
        &self.shape
    }

    pub fn set_shape<S: Into<ShapeKind>>(&mut self, shape: S) {
        self.shape = shape.into();
    }

    /// The `(F_x, F_y)` pair.
    pub fn unbalanced_forces(&self) -> (&ForceFn, &ForceFn) {
        (&self.force_x, &self.force_y)
    }

    /// Replaces both force components.
    pub fn set_unbalanced_forces<Fx, Fy>(&mut self, force_x: Fx, force_y: Fy)
    where
        Fx: Fn(f64) -> f64 + Send + Sync + 'static,
        Fy: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        self.set_unbalanced_force_fns(Arc::new(force_x), Arc::new(force_y));
    }

    /// Replaces both force components with already shared functions.
    pub fn set_unbalanced_force_fns(&mut self, force_x: ForceFn, force_y: ForceFn) {
        self.force_x = force_x;
        self.force_y = force_y;
    }

    /// The `(v_x, v_y)` pair.
    pub fn initial_velocity(&self) -> (f64, f64) {
        (self.initial_velocity.x, self.initial_velocity.y)
    }

    pub fn set_initial_velocity(&mut self, v_x: f64, v_y: f64) {
        self.initial_velocity = Vec2::new(v_x, v_y);
    }

    pub fn solver(&self) -> Solver {
        self.solver
    }

    pub fn set_solver(&mut self, solver: Solver) {
        self.solver = solver;
    }

    /// Uniform grid of `n_steps` points from 0 to `t_final` inclusive.
    pub fn time_grid(t_final: f64, n_steps: usize) -> Result<Vec<f64>, SimulationError> {
        if n_steps < 2 {
            return Err(SimulationError::TooFewSteps(n_steps));
        }
        if !t_final.is_finite() {
            return Err(SimulationError::NonFiniteHorizon(t_final));
        }
        let intervals = (n_steps - 1) as f64;
        Ok((0..n_steps).map(|i| i as f64 * t_final / intervals).collect())
    }

    /// Phase state at t = 0: the shape's center of mass and the initial velocity.
    pub fn initial_state(&self) -> PhaseState {
        PhaseState::new(self.shape.center_of_mass(), self.initial_velocity)
    }

    /// Time derivative of `state` at `t` under Newton's second law.
    pub fn derivative(&self, t: f64, state: &PhaseState) -> PhaseState {
        let mass = self.shape.mass();
        let acceleration = Vec2::new((self.force_x)(t) / mass, (self.force_y)(t) / mass);
        PhaseState::new(state.velocity, acceleration)
    }

    /// Simulates the motion of the shape's center of mass from 0 to `t_final`,
    /// sampled at `n_steps` uniformly spaced instants.
    pub fn simulate(&self, t_final: f64, n_steps: usize) -> Result<Simulation, SimulationError> {
        let times = Self::time_grid(t_final, n_steps)?;
        debug!(
            "simulating {} points over [0, {}] with {:?}",
            n_steps, t_final, self.solver
        );

        let states = self
            .solver
            .integrate(self.initial_state(), &times, |t, w| self.derivative(t, w))?;

        if let Some(last) = states.last() {
            debug!("simulation finished at {:?}", last);
        }
        Ok(Simulation { times, states })
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("shape", &self.shape)
            .field("initial_velocity", &self.initial_velocity)
            .field("solver", &self.solver)
            .finish_non_exhaustive()
    }
}
