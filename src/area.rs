//! Land-area estimation from boundary samples.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::boundary::Boundary;
use crate::config::EstimatorConfig;
use crate::errors::AreaError;
use crate::integrate::{adaptive_simpson_over, simpson, trapezoid, Quadrature};
use crate::interpolate::PiecewiseLinear;

/// Numerical method used to estimate an area.
///
/// Variants are ordered the way results are reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaMethod {
    /// Sum of trapezoids between consecutive samples.
    Trapezoidal,
    /// Composite Simpson's rule for uneven spacing.
    Simpson,
    /// Adaptive quadrature of the piecewise-linear width profile.
    AdaptiveQuadrature,
    /// Average width times length, segment by segment.
    SegmentAveraging,
}

impl AreaMethod {
    /// Every method in report order.
    pub const ALL: [AreaMethod; 4] = [
        AreaMethod::Trapezoidal,
        AreaMethod::Simpson,
        AreaMethod::AdaptiveQuadrature,
        AreaMethod::SegmentAveraging,
    ];

    /// Human readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            AreaMethod::Trapezoidal => "trapezoidal",
            AreaMethod::Simpson => "Simpson",
            AreaMethod::AdaptiveQuadrature => "adaptive quadrature",
            AreaMethod::SegmentAveraging => "segment averaging",
        }
    }
}

impl fmt::Display for AreaMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Areas computed from one boundary, one per [`AreaMethod`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AreaEstimate {
    /// Area in square metres keyed by method.
    areas: BTreeMap<AreaMethod, f64>,
    /// Details of the adaptive quadrature run.
    quadrature: Quadrature,
}

impl AreaEstimate {
    /// Area computed by `method` in square metres.
    #[must_use]
    pub fn area(&self, method: AreaMethod) -> f64 {
        self.areas[&method]
    }

    /// Method and area pairs in report order.
    pub fn iter(&self) -> impl Iterator<Item = (AreaMethod, f64)> + '_ {
        self.areas.iter().map(|(&method, &area)| (method, area))
    }

    /// Areas in report order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.areas.values().copied()
    }

    /// Mean of the four areas.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.values().sum::<f64>() / self.areas.len() as f64
    }

    /// Error estimate and convergence of the adaptive quadrature.
    #[must_use]
    pub fn quadrature(&self) -> Quadrature {
        self.quadrature
    }
}

/// Computes [`AreaEstimate`]s under a fixed configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AreaEstimator {
    /// Settings applied to every computation.
    config: EstimatorConfig,
}

impl AreaEstimator {
    /// Create an estimator with the supplied configuration.
    #[must_use]
    pub const fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    /// Return the active configuration.
    #[must_use]
    pub const fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Estimate the area enclosed between the baseline and the boundary.
    ///
    /// # Errors
    ///
    /// Returns [`AreaError::InvalidConfig`] when the configuration fails
    /// [`EstimatorConfig::validate`], and [`AreaError::UnsupportedSampleCount`]
    /// when Simpson's rule runs under the strict policy and the interval count
    /// is odd.
    ///
    /// # Examples
    /// ```
    /// use sitegeom::{AreaEstimator, AreaMethod, Boundary};
    ///
    /// let boundary = Boundary::parse("0, 13, 15, 20", "10, 10, 9, 9").expect("valid input");
    /// let estimate = AreaEstimator::default().compute(&boundary).expect("area computed");
    /// assert!((estimate.area(AreaMethod::Trapezoidal) - 194.0).abs() < 1e-9);
    /// ```
    pub fn compute(&self, boundary: &Boundary) -> Result<AreaEstimate, AreaError> {
        if let Some(reason) = self.config.invalid_reason() {
            return Err(AreaError::InvalidConfig(reason));
        }

        // Sample positions are the kinks of the profile, so each segment is
        // integrated on its own.
        let profile = PiecewiseLinear::new(boundary);
        let breakpoints: Vec<f64> = boundary.positions().collect();
        let quadrature = adaptive_simpson_over(
            |x| profile.value(x),
            &breakpoints,
            self.config.tolerance,
            self.config.max_depth,
        );

        let mut areas = BTreeMap::new();
        areas.insert(AreaMethod::Trapezoidal, trapezoid(boundary));
        areas.insert(AreaMethod::Simpson, simpson(boundary, self.config.simpson)?);
        areas.insert(AreaMethod::AdaptiveQuadrature, quadrature.value);
        areas.insert(AreaMethod::SegmentAveraging, segment_average(boundary));
        debug!(samples = boundary.len(), ?areas, "area estimate computed");

        Ok(AreaEstimate { areas, quadrature })
    }

    /// Validate raw position and width lists, then estimate the area.
    ///
    /// # Errors
    ///
    /// Returns [`AreaError::InvalidInput`] when the lists do not form a valid
    /// [`Boundary`], otherwise the errors of [`AreaEstimator::compute`].
    pub fn compute_series(&self, positions: &[f64], widths: &[f64]) -> Result<AreaEstimate, AreaError> {
        let boundary = Boundary::from_series(positions, widths)?;
        self.compute(&boundary)
    }
}

/// Estimate the area with the default configuration.
///
/// # Errors
///
/// See [`AreaEstimator::compute`].
pub fn compute(boundary: &Boundary) -> Result<AreaEstimate, AreaError> {
    AreaEstimator::default().compute(boundary)
}

/// Walk the segments, multiplying average width by segment length.
fn segment_average(boundary: &Boundary) -> f64 {
    let mut total = 0.0;
    for (lhs, rhs) in boundary.segments() {
        let average_width = (lhs.width + rhs.width) / 2.0;
        let segment_length = rhs.position - lhs.position;
        total += average_width * segment_length;
    }
    total
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::config::SimpsonPolicy;

    #[test]
    fn methods_iterate_in_report_order() {
        let boundary = Boundary::parse("0, 5, 10", "2, 2, 2").expect("valid input");
        let estimate = compute(&boundary).expect("area computed");
        let methods: Vec<AreaMethod> = estimate.iter().map(|(method, _)| method).collect();
        assert_eq!(methods, AreaMethod::ALL.to_vec());
    }

    #[test]
    fn adaptive_quadrature_matches_trapezoid_for_polyline() {
        let boundary = Boundary::parse("0, 13, 15, 20", "10, 10, 9, 9").expect("valid input");
        let estimate = compute(&boundary).expect("area computed");
        assert_relative_eq!(
            estimate.area(AreaMethod::AdaptiveQuadrature),
            194.0,
            epsilon = 1e-6
        );
        assert!(estimate.quadrature().converged);
        assert!(estimate.quadrature().error < 1e-6);
    }

    #[test]
    fn simpson_uses_cartwright_correction_by_default() {
        let boundary = Boundary::parse("0, 13, 15, 20", "10, 10, 9, 9").expect("valid input");
        let estimate = compute(&boundary).expect("area computed");
        // Parabola through (0, 10), (13, 10), (15, 9) bulges above the polyline.
        assert_relative_eq!(
            estimate.area(AreaMethod::Simpson),
            161.25 + 80.0 / 42.0 * 9.0 + 55.0 / 12.0 * 9.0 - 125.0 / 84.0 * 10.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn strict_estimator_propagates_simpson_error() {
        let estimator = AreaEstimator::new(EstimatorConfig::default().with_simpson(SimpsonPolicy::Strict));
        let boundary = Boundary::parse("0, 1", "1, 1").expect("valid input");
        let error = estimator.compute(&boundary).expect_err("odd intervals rejected");
        assert_eq!(error, AreaError::UnsupportedSampleCount { intervals: 1 });
    }

    #[test]
    fn builder_config_is_validated_before_integration() {
        let boundary = Boundary::parse("0, 5, 10", "1, 2, 3").expect("valid input");
        let zero_tolerance = AreaEstimator::new(EstimatorConfig::default().with_tolerance(0.0, 0.0));
        let error = zero_tolerance.compute(&boundary).expect_err("zero tolerance rejected");
        assert!(matches!(error, AreaError::InvalidConfig(_)));

        let no_depth = AreaEstimator::new(EstimatorConfig::default().with_max_depth(0));
        let error = no_depth.compute(&boundary).expect_err("zero depth rejected");
        assert!(matches!(error, AreaError::InvalidConfig(_)));
    }

    #[test]
    fn narrow_spike_is_integrated() {
        let boundary = Boundary::parse("0, 10, 10.01, 10.02, 100", "0, 0, 100, 0, 0").expect("valid input");
        let estimate = compute(&boundary).expect("area computed");
        assert!(estimate.quadrature().converged);
        assert_relative_eq!(
            estimate.area(AreaMethod::AdaptiveQuadrature),
            estimate.area(AreaMethod::Trapezoidal),
            epsilon = 1e-9
        );
    }

    #[test]
    fn invalid_series_is_rejected_before_computation() {
        let error = AreaEstimator::default()
            .compute_series(&[0.0, 5.0, 3.0, 10.0], &[1.0; 4])
            .expect_err("non-increasing positions rejected");
        assert!(matches!(error, AreaError::InvalidInput(_)));
    }
}
