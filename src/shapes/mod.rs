pub mod body;
pub mod circle;
pub mod triangle;

pub use body::Body;
pub use circle::Circle;
pub use triangle::Triangle;

use crate::math::vec2::Vec2;

/// Mass-distribution properties shared by every planar shape.
///
/// The moment of inertia is always reported about the center of mass, for the
/// axis perpendicular to the plane.
pub trait Shape {
    fn center_of_mass_x(&self) -> f64;
    fn center_of_mass_y(&self) -> f64;
    fn mass(&self) -> f64;
    fn moment_of_inertia(&self) -> f64;

    /// Center of mass as a vector.
    fn center_of_mass(&self) -> Vec2 {
        Vec2::new(self.center_of_mass_x(), self.center_of_mass_y())
    }
}

/// Enum over the concrete shapes, so a scene can swap one variant for another.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Circle(Circle),
    Triangle(Triangle),
    Body(Body),
}

impl Shape for ShapeKind {
    fn center_of_mass_x(&self) -> f64 {
        match self {
            ShapeKind::Circle(c) => c.center_of_mass_x(),
            ShapeKind::Triangle(t) => t.center_of_mass_x(),
            ShapeKind::Body(b) => b.center_of_mass_x(),
        }
    }

    fn center_of_mass_y(&self) -> f64 {
        match self {
            ShapeKind::Circle(c) => c.center_of_mass_y(),
            ShapeKind::Triangle(t) => t.center_of_mass_y(),
            ShapeKind::Body(b) => b.center_of_mass_y(),
        }
    }

    fn mass(&self) -> f64 {
        match self {
            ShapeKind::Circle(c) => c.mass(),
            ShapeKind::Triangle(t) => t.mass(),
            ShapeKind::Body(b) => b.mass(),
        }
    }

    fn moment_of_inertia(&self) -> f64 {
        match self {
            ShapeKind::Circle(c) => c.moment_of_inertia(),
            ShapeKind::Triangle(t) => t.moment_of_inertia(),
            ShapeKind::Body(b) => b.moment_of_inertia(),
        }
    }
}

impl From<Circle> for ShapeKind {
    fn from(circle: Circle) -> Self {
        ShapeKind::Circle(circle)
    }
}

impl From<Triangle> for ShapeKind {
    fn from(triangle: Triangle) -> Self {
        ShapeKind::Triangle(triangle)
    }
}

impl From<Body> for ShapeKind {
    fn from(body: Body) -> Self {
        ShapeKind::Body(body)
    }
}
