//! Dimension solver for symmetric gable roof trusses.
//!
//! A gable truss splits into two right triangles that share the ridge post.
//! Each triangle has half the span as its base and the rise as its height, so
//! the rafter is the hypotenuse (<https://en.wikipedia.org/wiki/Pythagorean_theorem>)
//! and the pitch is the arctangent of rise over half span.

use serde::Serialize;
use tracing::debug;
use uom::si::angle::{degree, radian};
use uom::si::f64::{Angle, Length};
use uom::si::length::{centimeter, meter};

use crate::errors::GeometryError;

/// Reject lengths that are zero, negative or not finite.
pub(crate) fn positive_length(name: &'static str, value: Length) -> Result<Length, GeometryError> {
    let metres = value.get::<meter>();
    if metres.is_finite() && metres > 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::InvalidDimension {
            name,
            value: metres,
        })
    }
}

/// Angle in degrees whose tangent is `opposite / adjacent`.
pub(crate) fn slope_degrees(opposite: f64, adjacent: f64) -> f64 {
    Angle::new::<radian>((opposite / adjacent).atan()).get::<degree>()
}

/// Span and rise of a symmetric gable truss.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GableRoof {
    /// Full width between the eaves.
    span: Length,
    /// Height of the ridge above the eaves.
    rise: Length,
}

impl GableRoof {
    /// Create a roof from a span and rise in metres.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidDimension`] when either value is not a
    /// positive length.
    ///
    /// # Examples
    /// ```
    /// use sitegeom::GableRoof;
    ///
    /// let roof = GableRoof::new(40.0, 2.0).expect("valid roof");
    /// let solution = roof.solve();
    /// assert!((solution.rafter - 20.09975).abs() < 1e-5);
    /// ```
    pub fn new(span: f64, rise: f64) -> Result<Self, GeometryError> {
        Self::from_lengths(Length::new::<meter>(span), Length::new::<meter>(rise))
    }

    /// Create a roof from a span in metres and a rise in centimetres.
    ///
    /// Site crews usually measure the rafter rise in centimetres.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidDimension`] when either value is not a
    /// positive length.
    pub fn with_rise_in_centimetres(span: f64, rise: f64) -> Result<Self, GeometryError> {
        Self::from_lengths(
            Length::new::<meter>(span),
            Length::new::<centimeter>(rise),
        )
    }

    /// Create a roof from typed lengths.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidDimension`] when either value is not a
    /// positive length.
    pub fn from_lengths(span: Length, rise: Length) -> Result<Self, GeometryError> {
        Ok(Self {
            span: positive_length("span", span)?,
            rise: positive_length("rise", rise)?,
        })
    }

    /// Compute rafter lengths and cutting angles.
    #[must_use]
    pub fn solve(&self) -> TrussSolution {
        let span = self.span.get::<meter>();
        let rise = self.rise.get::<meter>();
        let half_span = span / 2.0;
        let rafter = half_span.hypot(rise);
        let pitch = slope_degrees(rise, half_span);
        let apex_angle = 180.0 - 2.0 * pitch;
        let solution = TrussSolution {
            span,
            rise,
            half_span,
            rafter,
            total_rafter: 2.0 * rafter,
            pitch,
            apex_angle,
            plumb_cut: apex_angle / 2.0,
        };
        debug!(?solution, "gable truss solved");
        solution
    }
}

/// Dimensions of a solved gable truss. Lengths in metres, angles in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TrussSolution {
    /// Full width between the eaves.
    pub span: f64,
    /// Height of the ridge above the eaves.
    pub rise: f64,
    /// Horizontal run of one rafter.
    pub half_span: f64,
    /// Length of one rafter (the hypotenuse).
    pub rafter: f64,
    /// Combined length of both rafters.
    pub total_rafter: f64,
    /// Angle between rafter and tie beam.
    pub pitch: f64,
    /// Angle between the two rafters at the ridge.
    pub apex_angle: f64,
    /// Head cut at the ridge, half the apex angle.
    pub plumb_cut: f64,
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn solves_default_truss() {
        let solution = GableRoof::new(40.0, 2.0).expect("valid roof").solve();
        assert_relative_eq!(solution.half_span, 20.0);
        assert_relative_eq!(solution.rafter, 404.0_f64.sqrt());
        assert_relative_eq!(solution.total_rafter, 2.0 * 404.0_f64.sqrt());
        assert_relative_eq!(solution.pitch, (0.1_f64).atan().to_degrees(), epsilon = 1e-12);
    }

    #[test]
    fn angles_sum_to_half_turn() {
        let solution = GableRoof::new(6.0, 3.0).expect("valid roof").solve();
        assert_relative_eq!(solution.pitch, 45.0, epsilon = 1e-12);
        assert_relative_eq!(solution.apex_angle, 90.0, epsilon = 1e-12);
        assert_relative_eq!(solution.plumb_cut, 45.0, epsilon = 1e-12);
        assert_relative_eq!(2.0 * solution.pitch + solution.apex_angle, 180.0, epsilon = 1e-12);
    }

    #[test]
    fn converts_rise_from_centimetres() {
        let metric = GableRoof::new(8.0, 1.5).expect("valid roof").solve();
        let site = GableRoof::with_rise_in_centimetres(8.0, 150.0)
            .expect("valid roof")
            .solve();
        assert_relative_eq!(site.rise, 1.5, epsilon = 1e-12);
        assert_relative_eq!(site.rafter, metric.rafter, epsilon = 1e-12);
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        let error = GableRoof::new(0.0, 2.0).expect_err("zero span rejected");
        assert_eq!(
            error,
            GeometryError::InvalidDimension {
                name: "span",
                value: 0.0
            }
        );
        let error = GableRoof::new(4.0, f64::NAN).expect_err("NaN rise rejected");
        assert!(matches!(
            error,
            GeometryError::InvalidDimension { name: "rise", .. }
        ));
    }
}
