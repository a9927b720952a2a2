//! Piecewise-linear width profile built from boundary samples.

use crate::boundary::Boundary;

/// Continuous width function joining boundary samples with straight lines.
///
/// Outside the sampled range the profile holds the first or last width.
#[derive(Clone, Debug)]
pub struct PiecewiseLinear<'a> {
    /// Source samples; positions strictly increase.
    boundary: &'a Boundary,
}

impl<'a> PiecewiseLinear<'a> {
    /// Build the profile over a validated boundary.
    #[must_use]
    pub fn new(boundary: &'a Boundary) -> Self {
        Self { boundary }
    }

    /// Lower end of the sampled range.
    #[must_use]
    pub fn min_x(&self) -> f64 {
        self.boundary.start()
    }

    /// Upper end of the sampled range.
    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.boundary.end()
    }

    /// Interpolated width at `x`.
    #[must_use]
    pub fn value(&self, x: f64) -> f64 {
        let samples = self.boundary.samples();
        let last = samples.len() - 1;
        if x <= samples[0].position {
            return samples[0].width;
        }
        if x >= samples[last].position {
            return samples[last].width;
        }
        // First sample strictly to the right of x; never 0 or past the end here.
        let right = samples.partition_point(|s| s.position <= x);
        let lhs = samples[right - 1];
        let rhs = samples[right];
        let slope = (rhs.width - lhs.width) / (rhs.position - lhs.position);
        lhs.width + slope * (x - lhs.position)
    }
}
