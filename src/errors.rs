//! Error types produced while parsing inputs or running the calculators.

use std::path::PathBuf;

use thiserror::Error;

/// Error returned when boundary samples cannot be parsed or validated.
///
/// Every variant carries the offending values so callers can point users at
/// the exact token or sample that was rejected.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum InputError {
    /// Returned when a token in delimited text is not a number.
    #[error("value {index} ({token:?}) is not a number")]
    InvalidNumber {
        /// Zero-based position of the token in the list.
        index: usize,
        /// The rejected token with surrounding whitespace removed.
        token: String,
    },
    /// Returned when a parsed value is infinite or NaN.
    #[error("value {index} is not finite (received {value})")]
    NonFinite {
        /// Zero-based position of the value in the list.
        index: usize,
        /// Rejected value.
        value: f64,
    },
    /// Returned when the position and width lists differ in length.
    #[error("{positions} positions were supplied for {widths} widths")]
    LengthMismatch {
        /// Number of positions.
        positions: usize,
        /// Number of widths.
        widths: usize,
    },
    /// Returned when fewer than two samples are supplied.
    #[error("at least two samples are required (received {0})")]
    TooFewSamples(usize),
    /// Returned when positions do not strictly increase.
    #[error("position {index} ({current}) does not exceed the previous position ({previous})")]
    NonIncreasingPosition {
        /// Zero-based index of the offending sample.
        index: usize,
        /// Position of the preceding sample.
        previous: f64,
        /// Position of the offending sample.
        current: f64,
    },
    /// Returned when a position lies before the baseline origin.
    #[error("position {index} must not be negative (received {position})")]
    NegativePosition {
        /// Zero-based index of the offending sample.
        index: usize,
        /// Rejected position in metres.
        position: f64,
    },
    /// Returned when a width is negative.
    #[error("width {index} must not be negative (received {width})")]
    NegativeWidth {
        /// Zero-based index of the offending sample.
        index: usize,
        /// Rejected width in metres.
        width: f64,
    },
}

/// Error returned when an area estimate cannot be produced.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AreaError {
    /// Returned when the boundary fails validation.
    #[error("invalid boundary: {0}")]
    InvalidInput(#[from] InputError),
    /// Returned when the estimator configuration is out of range.
    #[error("invalid estimator configuration: {0}")]
    InvalidConfig(String),
    /// Returned by Simpson's rule under the strict policy when the interval
    /// count is odd.
    #[error("Simpson's rule needs an even number of intervals (received {intervals})")]
    UnsupportedSampleCount {
        /// Number of intervals between samples.
        intervals: usize,
    },
}

/// Error returned when a truss or prism dimension is not physically meaningful.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum GeometryError {
    /// Returned when a length is zero, negative or not finite.
    #[error("{name} must be a positive length (received {value})")]
    InvalidDimension {
        /// Name of the rejected dimension.
        name: &'static str,
        /// Rejected value in metres.
        value: f64,
    },
    /// Returned when a slope angle lies outside the open interval (0°, 90°).
    #[error("slope angle must lie strictly between 0 and 90 degrees (received {0})")]
    InvalidAngle(f64),
}

/// Error returned when estimator configuration cannot be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when the configuration file cannot be read.
    #[error("failed to read configuration {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Returned when the configuration is not valid JSON for [`EstimatorConfig`](crate::EstimatorConfig).
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// Returned when a configuration value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
