use std::ops::{Add, Mul};

use crate::math::vec2::Vec2;

/// Planar position and velocity of a center of mass at one instant.
///
/// Also used for time derivatives, where `position` holds the velocity and
/// `velocity` holds the acceleration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhaseState {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl PhaseState {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self { position, velocity }
    }

    /// Components in the order `(x, y, vx, vy)`.
    pub fn as_array(&self) -> [f64; 4] {
        [self.position.x, self.position.y, self.velocity.x, self.velocity.y]
    }

    pub fn from_array(w: [f64; 4]) -> Self {
        Self::new(Vec2::new(w[0], w[1]), Vec2::new(w[2], w[3]))
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

impl Add for PhaseState {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            position: self.position + other.position,
            velocity: self.velocity + other.velocity,
        }
    }
}

impl Mul<f64> for PhaseState {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self {
            position: self.position * scalar,
            velocity: self.velocity * scalar,
        }
    }
}

impl From<PhaseState> for [f64; 4] {
    fn from(state: PhaseState) -> Self {
        state.as_array()
    }
}
