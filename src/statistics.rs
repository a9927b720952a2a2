//! Agreement statistics across area methods.

use serde::Serialize;

use crate::area::{AreaEstimate, AreaMethod};

/// Spread of the areas produced by the different methods.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SummaryStatistics {
    /// Smallest area in square metres.
    pub min: f64,
    /// Largest area in square metres.
    pub max: f64,
    /// Arithmetic mean in square metres.
    pub mean: f64,
    /// Population standard deviation in square metres.
    pub stddev: f64,
    /// `(max - min) / mean * 100`; `None` when the mean is zero.
    pub spread_ratio: Option<f64>,
}

impl SummaryStatistics {
    /// Summarise a list of values, or `None` when it is empty.
    ///
    /// # Examples
    /// ```
    /// use sitegeom::SummaryStatistics;
    ///
    /// let stats = SummaryStatistics::from_values(&[0.0, 0.0]).expect("non-empty");
    /// assert_eq!(stats.spread_ratio, None);
    /// ```
    #[must_use]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        (!values.is_empty()).then(|| Self::summarise(values))
    }

    /// Summary of a non-empty list.
    fn summarise(values: &[f64]) -> Self {
        let count = values.len() as f64;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / count;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;
        let spread_ratio = if mean == 0.0 {
            None
        } else {
            Some((max - min) / mean * 100.0)
        };
        Self {
            min,
            max,
            mean,
            stddev: variance.sqrt(),
            spread_ratio,
        }
    }
}

/// Summarise the areas of an estimate, one value per [`AreaMethod`].
#[must_use]
pub fn summary_statistics(estimate: &AreaEstimate) -> SummaryStatistics {
    SummaryStatistics::summarise(&AreaMethod::ALL.map(|method| estimate.area(method)))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn equal_values_have_no_spread() {
        let stats = SummaryStatistics::from_values(&[12.5; 4]).expect("non-empty");
        assert_eq!(stats.stddev, 0.0);
        assert_eq!(stats.spread_ratio, Some(0.0));
        assert_eq!(stats.mean, 12.5);
    }

    #[test]
    fn uses_population_standard_deviation() {
        let stats = SummaryStatistics::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0])
            .expect("non-empty");
        assert_relative_eq!(stats.mean, 5.0);
        assert_relative_eq!(stats.stddev, 2.0);
        assert_relative_eq!(stats.spread_ratio.expect("mean is non-zero"), 140.0);
    }

    #[test]
    fn estimate_summary_covers_every_method() {
        let boundary = crate::Boundary::parse("0, 1, 100", "10, 0, 10").expect("valid input");
        let estimate = crate::compute(&boundary).expect("area computed");
        let stats = summary_statistics(&estimate);
        assert_relative_eq!(stats.mean, estimate.mean(), epsilon = 1e-9);
        assert!(stats.min >= 0.0);
        assert!(stats.spread_ratio.expect("mean is non-zero") < 1e-6);
    }

    #[test]
    fn empty_input_has_no_summary() {
        assert_eq!(SummaryStatistics::from_values(&[]), None);
    }
}
