//! Boundary samples describing an irregular plot of land along a baseline.

use serde::{Deserialize, Serialize};

use crate::errors::InputError;

/// Width of the land measured perpendicular to the baseline at a position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundarySample {
    /// Distance along the baseline in metres.
    pub position: f64,
    /// Perpendicular extent of the land in metres.
    pub width: f64,
}

impl BoundarySample {
    /// Create a [`BoundarySample`] with explicit values.
    #[must_use]
    pub const fn new(position: f64, width: f64) -> Self {
        Self { position, width }
    }
}

/// Convenience helper for creating [`BoundarySample`] instances.
///
/// # Examples
/// ```
/// use sitegeom::sample;
///
/// let corner = sample(13.0, 10.0);
/// assert_eq!(corner.width, 10.0);
/// ```
#[must_use]
pub const fn sample(position: f64, width: f64) -> BoundarySample {
    BoundarySample::new(position, width)
}

/// Validated, ordered sequence of boundary samples.
///
/// A [`Boundary`] always holds at least two samples with strictly increasing,
/// non-negative positions and non-negative widths. Samples are never reordered.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Boundary {
    /// Samples in increasing position order.
    samples: Vec<BoundarySample>,
}

impl Boundary {
    /// Validate a list of samples.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] when fewer than two samples are supplied, a value is
    /// not finite, positions do not strictly increase, or a position or width is
    /// negative.
    ///
    /// # Examples
    /// ```
    /// use sitegeom::{sample, Boundary, InputError};
    ///
    /// let error = Boundary::new(vec![sample(0.0, 1.0), sample(5.0, 1.0), sample(3.0, 1.0)])
    ///     .expect_err("positions must increase");
    /// assert!(matches!(error, InputError::NonIncreasingPosition { index: 2, .. }));
    /// ```
    pub fn new(samples: Vec<BoundarySample>) -> Result<Self, InputError> {
        if samples.len() < 2 {
            return Err(InputError::TooFewSamples(samples.len()));
        }
        for (index, current) in samples.iter().enumerate() {
            if !current.position.is_finite() {
                return Err(InputError::NonFinite {
                    index,
                    value: current.position,
                });
            }
            if !current.width.is_finite() {
                return Err(InputError::NonFinite {
                    index,
                    value: current.width,
                });
            }
            if current.position < 0.0 {
                return Err(InputError::NegativePosition {
                    index,
                    position: current.position,
                });
            }
            if current.width < 0.0 {
                return Err(InputError::NegativeWidth {
                    index,
                    width: current.width,
                });
            }
            if index > 0 {
                let previous = samples[index - 1].position;
                if current.position <= previous {
                    return Err(InputError::NonIncreasingPosition {
                        index,
                        previous,
                        current: current.position,
                    });
                }
            }
        }
        Ok(Self { samples })
    }

    /// Pair up separate position and width lists.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::LengthMismatch`] before any other check when the lists
    /// differ in length, otherwise the same errors as [`Boundary::new`].
    pub fn from_series(positions: &[f64], widths: &[f64]) -> Result<Self, InputError> {
        if positions.len() != widths.len() {
            return Err(InputError::LengthMismatch {
                positions: positions.len(),
                widths: widths.len(),
            });
        }
        Self::new(
            positions
                .iter()
                .zip(widths)
                .map(|(&position, &width)| sample(position, width))
                .collect(),
        )
    }

    /// Parse comma separated positions and widths, e.g. `"0, 13, 15, 20"`.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidNumber`] for the first token that is not a
    /// number, then the errors of [`Boundary::from_series`].
    ///
    /// # Examples
    /// ```
    /// use sitegeom::Boundary;
    ///
    /// let boundary = Boundary::parse("0, 13, 15, 20", "10, 10, 9, 9").expect("valid input");
    /// assert_eq!(boundary.len(), 4);
    /// assert_eq!(boundary.span(), 20.0);
    /// ```
    pub fn parse(positions: &str, widths: &str) -> Result<Self, InputError> {
        let positions = parse_values(positions)?;
        let widths = parse_values(widths)?;
        Self::from_series(&positions, &widths)
    }

    /// Return the validated samples.
    #[must_use]
    pub fn samples(&self) -> &[BoundarySample] {
        &self.samples
    }

    /// Return the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`; a boundary holds at least two samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of intervals between consecutive samples.
    #[must_use]
    pub fn interval_count(&self) -> usize {
        self.samples.len() - 1
    }

    /// Positions in order.
    pub fn positions(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.position)
    }

    /// Widths in position order.
    pub fn widths(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.width)
    }

    /// Smallest position.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.samples[0].position
    }

    /// Largest position.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.samples[self.samples.len() - 1].position
    }

    /// Distance covered along the baseline.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.end() - self.start()
    }

    /// Consecutive sample pairs.
    pub fn segments(&self) -> impl Iterator<Item = (BoundarySample, BoundarySample)> + '_ {
        self.samples.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Closed outline of the plot for plotting.
    ///
    /// The outline runs along the width curve from the first to the last sample
    /// and returns along the baseline, so the first and last vertices coincide.
    #[must_use]
    pub fn outline(&self) -> Vec<[f64; 2]> {
        let mut vertices: Vec<[f64; 2]> = self
            .samples
            .iter()
            .map(|s| [s.position, s.width])
            .collect();
        vertices.push([self.end(), 0.0]);
        vertices.push([self.start(), 0.0]);
        vertices.push([self.start(), self.samples[0].width]);
        vertices
    }
}

/// Parse a comma separated list of numbers.
///
/// Whitespace around each token is ignored. Empty input yields an empty list so
/// the caller's sample-count check reports it.
///
/// # Errors
///
/// Returns [`InputError::InvalidNumber`] for a token that is not a number and
/// [`InputError::NonFinite`] for `inf` or `NaN`.
pub fn parse_values(text: &str) -> Result<Vec<f64>, InputError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    text.split(',')
        .enumerate()
        .map(|(index, token)| {
            let token = token.trim();
            let value: f64 = token.parse().map_err(|_| InputError::InvalidNumber {
                index,
                token: token.to_owned(),
            })?;
            if value.is_finite() {
                Ok(value)
            } else {
                Err(InputError::NonFinite { index, value })
            }
        })
        .collect()
}
