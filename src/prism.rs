//! Right-triangular prism used to model slopes, ramps and embankments.

use nalgebra::{Point3, Vector3};
use serde::Serialize;
use uom::si::angle::{degree, radian};
use uom::si::f64::{Angle, Length};
use uom::si::length::meter;

use crate::errors::GeometryError;
use crate::roof::{positive_length, slope_degrees};

/// Vertex pairs joined by the nine prism edges, indexing [`Prism::vertices`].
pub const PRISM_EDGES: [(usize, usize); 9] = [
    (0, 1),
    (1, 2),
    (2, 0),
    (3, 4),
    (4, 5),
    (5, 3),
    (0, 3),
    (1, 4),
    (2, 5),
];

/// Prism whose cross-section is a right triangle with legs `base` and `height`,
/// extruded by `depth`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Prism {
    /// Horizontal leg of the triangle.
    base: Length,
    /// Vertical leg of the triangle.
    height: Length,
    /// Extrusion length.
    depth: Length,
}

impl Prism {
    /// Create a prism from dimensions in metres.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidDimension`] when a dimension is not a
    /// positive length.
    ///
    /// # Examples
    /// ```
    /// use sitegeom::Prism;
    ///
    /// let prism = Prism::new(10.0, 7.0, 12.0).expect("valid prism");
    /// assert_eq!(prism.geometry().volume, 420.0);
    /// ```
    pub fn new(base: f64, height: f64, depth: f64) -> Result<Self, GeometryError> {
        Ok(Self {
            base: positive_length("base", Length::new::<meter>(base))?,
            height: positive_length("height", Length::new::<meter>(height))?,
            depth: positive_length("depth", Length::new::<meter>(depth))?,
        })
    }

    /// Create a prism whose height follows from a slope angle in degrees.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidAngle`] when the angle is not strictly
    /// between 0° and 90°, otherwise the errors of [`Prism::new`].
    pub fn from_slope(base: f64, angle: f64, depth: f64) -> Result<Self, GeometryError> {
        let height = height_from_angle(base, angle)?;
        Self::new(base, height, depth)
    }

    /// Derived lengths, angles and volume.
    #[must_use]
    pub fn geometry(&self) -> PrismGeometry {
        let base = self.base.get::<meter>();
        let height = self.height.get::<meter>();
        let depth = self.depth.get::<meter>();
        let base_angle = slope_degrees(height, base);
        PrismGeometry {
            base,
            height,
            depth,
            hypotenuse: base.hypot(height),
            space_diagonal: Vector3::new(base, height, depth).norm(),
            base_angle,
            top_angle: 90.0 - base_angle,
            volume: 0.5 * base * height * depth,
        }
    }

    /// Corner points for plotting.
    ///
    /// The front triangle `(0, 0, 0)`, `(base, 0, 0)`, `(0, height, 0)` comes
    /// first, followed by the same corners shifted by `depth` along Z.
    #[must_use]
    pub fn vertices(&self) -> [Point3<f64>; 6] {
        let base = self.base.get::<meter>();
        let height = self.height.get::<meter>();
        let front = [
            Point3::origin(),
            Point3::new(base, 0.0, 0.0),
            Point3::new(0.0, height, 0.0),
        ];
        let extrusion = Vector3::new(0.0, 0.0, self.depth.get::<meter>());
        [
            front[0],
            front[1],
            front[2],
            front[0] + extrusion,
            front[1] + extrusion,
            front[2] + extrusion,
        ]
    }
}

/// Height of a slope rising at `angle` degrees over `base` metres.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidAngle`] unless `0 < angle < 90` and
/// [`GeometryError::InvalidDimension`] when `base` is not a positive length.
///
/// # Examples
/// ```
/// use sitegeom::height_from_angle;
///
/// let height = height_from_angle(10.0, 45.0).expect("valid slope");
/// assert!((height - 10.0).abs() < 1e-9);
/// ```
pub fn height_from_angle(base: f64, angle: f64) -> Result<f64, GeometryError> {
    if !(angle.is_finite() && angle > 0.0 && angle < 90.0) {
        return Err(GeometryError::InvalidAngle(angle));
    }
    let base = positive_length("base", Length::new::<meter>(base))?;
    let slope = Angle::new::<degree>(angle).get::<radian>().tan();
    Ok(base.get::<meter>() * slope)
}

/// Derived properties of a [`Prism`]. Lengths in metres, angles in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PrismGeometry {
    /// Horizontal leg of the triangle.
    pub base: f64,
    /// Vertical leg of the triangle.
    pub height: f64,
    /// Extrusion length.
    pub depth: f64,
    /// Sloped face width.
    pub hypotenuse: f64,
    /// Diagonal from the front foot to the far top corner.
    pub space_diagonal: f64,
    /// Slope angle at the foot.
    pub base_angle: f64,
    /// Angle at the top of the slope.
    pub top_angle: f64,
    /// Enclosed volume in cubic metres.
    pub volume: f64,
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn derives_geometry() {
        let geometry = Prism::new(3.0, 4.0, 12.0).expect("valid prism").geometry();
        assert_relative_eq!(geometry.hypotenuse, 5.0);
        assert_relative_eq!(geometry.space_diagonal, 13.0, epsilon = 1e-12);
        assert_relative_eq!(geometry.volume, 72.0);
        assert_relative_eq!(geometry.base_angle + geometry.top_angle, 90.0, epsilon = 1e-12);
        assert_relative_eq!(geometry.base_angle, (4.0_f64 / 3.0).atan().to_degrees(), epsilon = 1e-12);
    }

    #[test]
    fn slope_sets_height() {
        let prism = Prism::from_slope(10.0, 45.0, 2.0).expect("valid prism");
        let geometry = prism.geometry();
        assert_relative_eq!(geometry.height, 10.0, epsilon = 1e-9);
        assert_relative_eq!(geometry.base_angle, 45.0, epsilon = 1e-9);
    }

    #[test]
    fn rejects_degenerate_slopes() {
        for angle in [0.0, 90.0, -5.0, f64::INFINITY] {
            let error = height_from_angle(10.0, angle).expect_err("angle rejected");
            assert!(matches!(error, GeometryError::InvalidAngle(_)));
        }
    }

    #[test]
    fn rejects_non_positive_depth() {
        let error = Prism::new(1.0, 1.0, -2.0).expect_err("negative depth rejected");
        assert_eq!(
            error,
            GeometryError::InvalidDimension {
                name: "depth",
                value: -2.0
            }
        );
    }

    #[test]
    fn vertices_span_the_box() {
        let prism = Prism::new(3.0, 4.0, 12.0).expect("valid prism");
        let vertices = prism.vertices();
        assert_eq!(vertices[4], Point3::new(3.0, 0.0, 12.0));
        assert_eq!(vertices[5], Point3::new(0.0, 4.0, 12.0));
        for (start, end) in PRISM_EDGES {
            assert!(start < vertices.len() && end < vertices.len());
        }
        let longest = PRISM_EDGES
            .iter()
            .map(|&(start, end)| (vertices[end] - vertices[start]).norm())
            .fold(0.0, f64::max);
        assert_relative_eq!(longest, 12.0);
    }
}
