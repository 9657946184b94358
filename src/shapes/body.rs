use crate::common::ShapeError;
use crate::math::vec2::Vec2;
use crate::shapes::Shape;

/// A rigid collection of point masses.
///
/// Only the aggregate properties are kept: the individual points are consumed
/// at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    center_of_mass: Vec2,
    mass: f64,
    moment: f64,
}

impl Body {
    /// Builds a body from parallel sequences of x-coordinates, y-coordinates
    /// and masses.
    ///
    /// Fails if the sequences differ in length, are empty, or any mass is not
    /// strictly positive.
    pub fn new(xs: &[f64], ys: &[f64], masses: &[f64]) -> Result<Self, ShapeError> {
        if xs.len() != ys.len() || ys.len() != masses.len() {
            return Err(ShapeError::MismatchedLengths {
                x: xs.len(),
                y: ys.len(),
                masses: masses.len(),
            });
        }
        if masses.is_empty() {
            return Err(ShapeError::EmptyBody);
        }
        if let Some((index, &mass)) = masses.iter().enumerate().find(|(_, m)| !(**m > 0.0)) {
            return Err(ShapeError::NonPositivePointMass { index, mass });
        }

        // Single left-to-right pass: total mass, first moments, second moment about the origin.
        let mut total_mass = 0.0;
        let mut weighted = Vec2::ZERO;
        let mut moment_about_origin = 0.0;
        for ((&x, &y), &m) in xs.iter().zip(ys).zip(masses) {
            let point = Vec2::new(x, y);
            total_mass += m;
            weighted += point * m;
            moment_about_origin += m * point.magnitude_squared();
        }

        let center_of_mass = weighted / total_mass;

        // Parallel axis theorem: shift from the origin to the centroid. The
        // subtraction can cancel to a tiny negative value.
        let moment =
            (moment_about_origin - total_mass * center_of_mass.magnitude_squared()).max(0.0);

        Ok(Self { center_of_mass, mass: total_mass, moment })
    }

    /// Builds a body from `(position, mass)` pairs.
    pub fn from_points<I>(points: I) -> Result<Self, ShapeError>
    where
        I: IntoIterator<Item = (Vec2, f64)>,
    {
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        let mut masses = Vec::new();
        for (p, m) in points {
            xs.push(p.x);
            ys.push(p.y);
            masses.push(m);
        }
        Self::new(&xs, &ys, &masses)
    }
}

impl Shape for Body {
    fn center_of_mass_x(&self) -> f64 {
        self.center_of_mass.x
    }

    fn center_of_mass_y(&self) -> f64 {
        self.center_of_mass.y
    }

    fn mass(&self) -> f64 {
        self.mass
    }

    fn moment_of_inertia(&self) -> f64 {
        self.moment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_body_single_point() {
        let b = Body::new(&[3.0], &[-4.0], &[2.5]).unwrap();
        assert_eq!(b.mass(), 2.5);
        assert_eq!(b.center_of_mass(), Vec2::new(3.0, -4.0));
        assert!(b.moment_of_inertia().abs() < EPSILON);
    }

    #[test]
    fn test_body_single_point_off_origin_is_non_negative() {
        let b = Body::new(&[0.4], &[-0.7], &[3.3]).unwrap();
        assert!(b.moment_of_inertia() >= 0.0);
        assert!(b.moment_of_inertia() < EPSILON);

        for i in 0..2000 {
            let x = 0.1 * i as f64 + 0.3;
            let y = -0.7 * i as f64;
            let b = Body::new(&[x], &[y], &[3.3]).unwrap();
            assert!(b.moment_of_inertia() >= 0.0, "negative moment at ({}, {})", x, y);
        }
    }

    #[test]
    fn test_body_symmetric_pair() {
        // Two unit masses at (-1, 0) and (1, 0): centroid at origin, I = 2.
        let b = Body::new(&[-1.0, 1.0], &[0.0, 0.0], &[1.0, 1.0]).unwrap();
        assert_eq!(b.mass(), 2.0);
        assert!(b.center_of_mass_x().abs() < EPSILON);
        assert!(b.center_of_mass_y().abs() < EPSILON);
        assert!((b.moment_of_inertia() - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_body_offset_square() {
        // Unit square of unit masses, offset from the origin.
        let xs = [10.0, 11.0, 11.0, 10.0];
        let ys = [-5.0, -5.0, -4.0, -4.0];
        let ms = [1.0; 4];
        let b = Body::new(&xs, &ys, &ms).unwrap();
        assert_eq!(b.mass(), 4.0);
        assert!((b.center_of_mass_x() - 10.5).abs() < EPSILON);
        assert!((b.center_of_mass_y() - -4.5).abs() < EPSILON);
        // Each corner is 0.5 from the centroid on both axes: 4 * 0.5 = 2.
        assert!((b.moment_of_inertia() - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_body_weighted_centroid() {
        let b = Body::new(&[0.0, 4.0], &[0.0, 0.0], &[3.0, 1.0]).unwrap();
        assert!((b.center_of_mass_x() - 1.0).abs() < EPSILON);
        // 3 * 1^2 + 1 * 3^2 = 12
        assert!((b.moment_of_inertia() - 12.0).abs() < EPSILON);
    }

    #[test]
    fn test_body_from_points() {
        let points = vec![(Vec2::new(1.0, 2.0), 1.0), (Vec2::new(3.0, 4.0), 2.0)];
        let a = Body::from_points(points).unwrap();
        let b = Body::new(&[1.0, 3.0], &[2.0, 4.0], &[1.0, 2.0]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_body_mismatched_lengths() {
        assert_eq!(
            Body::new(&[0.0, 1.0], &[0.0], &[1.0, 1.0]),
            Err(ShapeError::MismatchedLengths { x: 2, y: 1, masses: 2 })
        );
        assert!(Body::new(&[0.0], &[0.0], &[1.0, 1.0]).is_err());
    }

    #[test]
    fn test_body_non_positive_mass() {
        assert_eq!(
            Body::new(&[0.0, 1.0], &[0.0, 1.0], &[1.0, 0.0]),
            Err(ShapeError::NonPositivePointMass { index: 1, mass: 0.0 })
        );
        assert_eq!(
            Body::new(&[0.0], &[0.0], &[-2.0]),
            Err(ShapeError::NonPositivePointMass { index: 0, mass: -2.0 })
        );
    }

    #[test]
    fn test_body_empty() {
        assert_eq!(Body::new(&[], &[], &[]), Err(ShapeError::EmptyBody));
    }
}
