use crate::common::ShapeError;
use crate::math::vec2::Vec2;
use crate::shapes::Shape;

/// An equilateral triangle of uniform density, located by its centroid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    center: Vec2,
    side: f64,
    mass: f64,
}

impl Triangle {
    /// Creates a triangle with centroid `(x, y)` and side length `side`.
    ///
    /// Fails if `side` or `mass` is not strictly positive.
    pub fn new(x: f64, y: f64, side: f64, mass: f64) -> Result<Self, ShapeError> {
        if !(side > 0.0) {
            return Err(ShapeError::NonPositiveSideLength(side));
        }
        if !(mass > 0.0) {
            return Err(ShapeError::NonPositiveMass(mass));
        }
        Ok(Self { center: Vec2::new(x, y), side, mass })
    }

    pub fn side_length(&self) -> f64 {
        self.side
    }
}

impl Shape for Triangle {
    fn center_of_mass_x(&self) -> f64 {
        self.center.x
    }

    fn center_of_mass_y(&self) -> f64 {
        self.center.y
    }

    fn mass(&self) -> f64 {
        self.mass
    }

    fn moment_of_inertia(&self) -> f64 {
        self.mass * (self.side * self.side) / 12.0
    }
}
