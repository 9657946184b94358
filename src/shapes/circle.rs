use crate::common::ShapeError;
use crate::math::vec2::Vec2;
use crate::shapes::Shape;

/// A uniform disk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    center: Vec2,
    radius: f64,
    mass: f64,
}

impl Circle {
    /// Creates a circle centered at `(x, y)`.
    ///
    /// Fails if `radius` or `mass` is not strictly positive.
    pub fn new(x: f64, y: f64, radius: f64, mass: f64) -> Result<Self, ShapeError> {
        if !(radius > 0.0) {
            return Err(ShapeError::NonPositiveRadius(radius));
        }
        if !(mass > 0.0) {
            return Err(ShapeError::NonPositiveMass(mass));
        }
        Ok(Self { center: Vec2::new(x, y), radius, mass })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Shape for Circle {
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
        self.mass * (self.radius * self.radius) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_new() {
        let c = Circle::new(-289.0, 10454.0, 1.0, 1.0).unwrap();
        assert_eq!(c.center_of_mass_x(), -289.0);
        assert_eq!(c.center_of_mass_y(), 10454.0);
        assert_eq!(c.mass(), 1.0);
        assert_eq!(c.radius(), 1.0);
    }

    #[test]
    fn test_circle_origin() {
        let c = Circle::new(0.0, 0.0, 1.0, 1.0).unwrap();
        assert_eq!(c.center_of_mass_x(), 0.0);
        assert_eq!(c.center_of_mass_y(), 0.0);
        assert_eq!(c.moment_of_inertia(), 0.5);
    }

    #[test]
    fn test_circle_large_mass() {
        let c = Circle::new(0.0, 0.0, 1.0, 8930293400.0).unwrap();
        assert_eq!(c.mass(), 8930293400.0);
    }

    #[test]
    fn test_circle_moment_exact() {
        let c = Circle::new(-289.0, 10454.0, 289.0, 10454.0).unwrap();
        assert_eq!(c.moment_of_inertia(), 436564267.0);
    }

    #[test]
    fn test_circle_zero_radius() {
        assert_eq!(Circle::new(0.0, 0.0, 0.0, 1.0), Err(ShapeError::NonPositiveRadius(0.0)));
    }

    #[test]
    fn test_circle_zero_mass() {
        assert_eq!(Circle::new(0.0, 0.0, 1.0, 0.0), Err(ShapeError::NonPositiveMass(0.0)));
    }

    #[test]
    fn test_circle_nan_radius() {
        assert!(Circle::new(0.0, 0.0, f64::NAN, 1.0).is_err());
    }
}
