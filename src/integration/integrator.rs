//! Explicit Runge–Kutta integrators for the translational phase state.
//!
//! A [`Solver`] advances a [`PhaseState`] across a caller-supplied time grid,
//! returning the state at every grid point. Two schemes are available: the
//! classical fixed-step RK4, and the adaptive Dormand–Prince RK5(4) pair which
//! steps exactly onto each grid point.

use log::{trace, warn};
use serde::{Deserialize, Serialize};

use crate::common::SimulationError;
use crate::objects::phase_state::PhaseState;

/// Which integration scheme to use, and its parameters.
///
/// Deserializable so it can live in a scenario config:
///
/// ```json
/// { "method": "rk4", "substeps": 20 }
/// { "method": "dopri5", "relative_tolerance": 1e-8 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum Solver {
    /// Classical 4th-order Runge–Kutta with `substeps` equal steps per grid interval.
    #[serde(rename = "rk4")]
    RungeKutta4 {
        #[serde(default = "default_substeps")]
        substeps: usize,
    },

    /// Adaptive Dormand–Prince 5(4). `max_steps` bounds the attempted steps per grid interval.
    #[serde(rename = "dopri5")]
    DormandPrince {
        #[serde(default = "default_relative_tolerance")]
        relative_tolerance: f64,
        #[serde(default = "default_absolute_tolerance")]
        absolute_tolerance: f64,
        #[serde(default = "default_max_steps")]
        max_steps: usize,
    },
}

fn default_substeps() -> usize {
    Solver::DEFAULT_SUBSTEPS
}

fn default_relative_tolerance() -> f64 {
    Solver::DEFAULT_RELATIVE_TOLERANCE
}

fn default_absolute_tolerance() -> f64 {
    Solver::DEFAULT_ABSOLUTE_TOLERANCE
}

fn default_max_steps() -> usize {
    Solver::DEFAULT_MAX_STEPS
}

impl Default for Solver {
    fn default() -> Self {
        Solver::DormandPrince {
            relative_tolerance: Self::DEFAULT_RELATIVE_TOLERANCE,
            absolute_tolerance: Self::DEFAULT_ABSOLUTE_TOLERANCE,
            max_steps: Self::DEFAULT_MAX_STEPS,
        }
    }
}

impl Solver {
    pub const DEFAULT_SUBSTEPS: usize = 16;
    pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 1e-9;
    pub const DEFAULT_ABSOLUTE_TOLERANCE: f64 = 1e-12;
    pub const DEFAULT_MAX_STEPS: usize = 100_000;

    // Step-size controller constants.
    const SAFETY: f64 = 0.9;
    const MIN_SCALE: f64 = 0.2;
    const MAX_SCALE: f64 = 5.0;

    /// Fixed-step RK4 with the given number of substeps per grid interval.
    pub fn rk4(substeps: usize) -> Self {
        Solver::RungeKutta4 { substeps }
    }

    /// Adaptive Dormand–Prince with the given tolerances and the default step budget.
    pub fn dormand_prince(relative_tolerance: f64, absolute_tolerance: f64) -> Self {
        Solver::DormandPrince {
            relative_tolerance,
            absolute_tolerance,
            max_steps: Self::DEFAULT_MAX_STEPS,
        }
    }

    /// Checks the parameters are usable.
    pub fn validate(&self) -> Result<(), SimulationError> {
        match *self {
            Solver::RungeKutta4 { substeps } => {
                if substeps == 0 {
                    return Err(SimulationError::InvalidSolver("rk4 needs at least one substep"));
                }
            }
            Solver::DormandPrince { relative_tolerance, absolute_tolerance, max_steps } => {
                if !(relative_tolerance > 0.0 && relative_tolerance.is_finite()) {
                    return Err(SimulationError::InvalidSolver(
                        "relative tolerance must be positive",
                    ));
                }
                if !(absolute_tolerance > 0.0 && absolute_tolerance.is_finite()) {
                    return Err(SimulationError::InvalidSolver(
                        "absolute tolerance must be positive",
                    ));
                }
                if max_steps == 0 {
                    return Err(SimulationError::InvalidSolver("step budget must be positive"));
                }
            }
        }
        Ok(())
    }

    /// Integrates `derivative` from `initial` at `times[0]` across every point of `times`.
    ///
    /// The returned vector is parallel to `times`; its first entry is `initial`.
    pub fn integrate<F>(
        &self,
        initial: PhaseState,
        times: &[f64],
        derivative: F,
    ) -> Result<Vec<PhaseState>, SimulationError>
    where
        F: Fn(f64, &PhaseState) -> PhaseState,
    {
        self.validate()?;

        let mut states = Vec::with_capacity(times.len());
        if times.is_empty() {
            return Ok(states);
        }
        states.push(initial);

        let mut state = initial;
        let mut step_hint = 0.0;
        for window in times.windows(2) {
            let (t_start, t_end) = (window[0], window[1]);
            state = match *self {
                Solver::RungeKutta4 { substeps } => {
                    rk4_interval(&derivative, t_start, t_end, state, substeps)
                }
                Solver::DormandPrince { relative_tolerance, absolute_tolerance, max_steps } => {
                    let tolerance = Tolerance {
                        relative: relative_tolerance,
                        absolute: absolute_tolerance,
                    };
                    dormand_prince_interval(
                        &derivative,
                        t_start,
                        t_end,
                        state,
                        tolerance,
                        max_steps,
                        &mut step_hint,
                    )?
                }
            };
            if !state.is_finite() {
                warn!("integration produced a non-finite state at t = {}", t_end);
                return Err(SimulationError::NonFiniteState { time: t_end });
            }
            states.push(state);
        }
        Ok(states)
    }
}

/// Advances one classical RK4 step of size `h` from `(t, y)`.
pub fn rk4_step<F>(derivative: &F, t: f64, y: PhaseState, h: f64) -> PhaseState
where
    F: Fn(f64, &PhaseState) -> PhaseState,
{
    let half = 0.5 * h;
    let k1 = derivative(t, &y);
    let k2 = derivative(t + half, &(y + k1 * half));
    let k3 = derivative(t + half, &(y + k2 * half));
    let k4 = derivative(t + h, &(y + k3 * h));
    y + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (h / 6.0)
}

fn rk4_interval<F>(
    derivative: &F,
    t_start: f64,
    t_end: f64,
    y0: PhaseState,
    substeps: usize,
) -> PhaseState
where
    F: Fn(f64, &PhaseState) -> PhaseState,
{
    let h = (t_end - t_start) / substeps as f64;
    let mut y = y0;
    for i in 0..substeps {
        let t = t_start + i as f64 * h;
        y = rk4_step(derivative, t, y, h);
    }
    y
}

#[derive(Debug, Clone, Copy)]
struct Tolerance {
    relative: f64,
    absolute: f64,
}

// Dormand–Prince tableau.
const C2: f64 = 1.0 / 5.0;
const C3: f64 = 3.0 / 10.0;
const C4: f64 = 4.0 / 5.0;
const C5: f64 = 8.0 / 9.0;

const A21: f64 = 1.0 / 5.0;
const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;
const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;
const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;
const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;

// 5th-order weights (also the 7th stage row).
const B1: f64 = 35.0 / 384.0;
const B3: f64 = 500.0 / 1113.0;
const B4: f64 = 125.0 / 192.0;
const B5: f64 = -2187.0 / 6784.0;
const B6: f64 = 11.0 / 84.0;

// 5th-order minus embedded 4th-order weights.
const E1: f64 = 71.0 / 57600.0;
const E3: f64 = -71.0 / 16695.0;
const E4: f64 = 71.0 / 1920.0;
const E5: f64 = -17253.0 / 339200.0;
const E6: f64 = 22.0 / 525.0;
const E7: f64 = -1.0 / 40.0;

/// One Dormand–Prince step. Returns the 5th-order solution and the scaled RMS error norm.
fn dormand_prince_step<F>(
    derivative: &F,
    t: f64,
    y: PhaseState,
    h: f64,
    tolerance: Tolerance,
) -> (PhaseState, f64)
where
    F: Fn(f64, &PhaseState) -> PhaseState,
{
    let k1 = derivative(t, &y);
    let k2 = derivative(t + C2 * h, &(y + k1 * (A21 * h)));
    let k3 = derivative(t + C3 * h, &(y + (k1 * A31 + k2 * A32) * h));
    let k4 = derivative(t + C4 * h, &(y + (k1 * A41 + k2 * A42 + k3 * A43) * h));
    let k5 = derivative(t + C5 * h, &(y + (k1 * A51 + k2 * A52 + k3 * A53 + k4 * A54) * h));
    let k6 = derivative(t + h, &(y + (k1 * A61 + k2 * A62 + k3 * A63 + k4 * A64 + k5 * A65) * h));
    let y_next = y + (k1 * B1 + k3 * B3 + k4 * B4 + k5 * B5 + k6 * B6) * h;
    let k7 = derivative(t + h, &y_next);

    let error = (k1 * E1 + k3 * E3 + k4 * E4 + k5 * E5 + k6 * E6 + k7 * E7) * h;

    let before = y.as_array();
    let after = y_next.as_array();
    let sum_squares: f64 = error
        .as_array()
        .iter()
        .zip(before.iter().zip(after.iter()))
        .map(|(e, (a, b))| {
            let scale = tolerance.absolute + tolerance.relative * a.abs().max(b.abs());
            (e / scale).powi(2)
        })
        .sum();

    (y_next, (sum_squares / 4.0).sqrt())
}

/// Integrates adaptively from `t_start` to exactly `t_end`.
///
/// `step_hint` carries the last accepted step size between grid intervals; zero means unknown.
fn dormand_prince_interval<F>(
    derivative: &F,
    t_start: f64,
    t_end: f64,
    y0: PhaseState,
    tolerance: Tolerance,
    max_steps: usize,
    step_hint: &mut f64,
) -> Result<PhaseState, SimulationError>
where
    F: Fn(f64, &PhaseState) -> PhaseState,
{
    let span = t_end - t_start;
    if span == 0.0 {
        return Ok(y0);
    }
    let direction = span.signum();

    let mut t = t_start;
    let mut y = y0;
    let mut h = if *step_hint > 0.0 { step_hint.min(span.abs()) } else { span.abs() };
    let mut steps = 0;

    while (t_end - t) * direction > 0.0 {
        if steps >= max_steps {
            warn!("dopri5 used {} steps without reaching t = {}", steps, t_end);
            return Err(SimulationError::StepLimitExceeded { time: t, steps });
        }
        steps += 1;

        let remaining = (t_end - t).abs();
        let last = h >= remaining;
        let step = if last { remaining } else { h };

        let (y_next, error) = dormand_prince_step(derivative, t, y, step * direction, tolerance);
        if !error.is_finite() {
            warn!("dopri5 error estimate is not finite at t = {}", t);
            return Err(SimulationError::NonFiniteState { time: t });
        }

        let scale = if error == 0.0 {
            Solver::MAX_SCALE
        } else {
            (Solver::SAFETY * error.powf(-0.2)).clamp(Solver::MIN_SCALE, Solver::MAX_SCALE)
        };

        if error <= 1.0 {
            t = if last { t_end } else { t + step * direction };
            y = y_next;
            h = if last { h.max(step * scale) } else { step * scale };
        } else {
            trace!("dopri5 rejected step {} at t = {} (error {})", step, t, error);
            h = step * scale.min(1.0);
            // Compare against the interval, not an absolute floor, so very
            // short horizons still integrate.
            if h <= f64::EPSILON * t.abs().max(span.abs()) {
                warn!("dopri5 step size underflow at t = {}", t);
                return Err(SimulationError::StepSizeUnderflow { time: t });
            }
        }
    }

    *step_hint = h;
    Ok(y)
}
