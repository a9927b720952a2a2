//! Tunable settings for the area estimator.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Smallest usable relative tolerance, fifty machine epsilons.
///
/// Tighter bounds sit below rounding noise and keep every panel bisecting until
/// the depth limit.
pub const MIN_RELATIVE_TOLERANCE: f64 = 50.0 * f64::EPSILON;

/// How Simpson's rule treats an odd number of intervals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimpsonPolicy {
    /// Apply Cartwright's correction to the final interval.
    #[default]
    Cartwright,
    /// Refuse to integrate and report the interval count.
    Strict,
}

/// Error bounds for adaptive quadrature.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Absolute error bound in square metres.
    pub absolute: f64,
    /// Error bound relative to the magnitude of the result.
    pub relative: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            absolute: 1.49e-8,
            relative: 1.49e-8,
        }
    }
}

/// Settings shared by every area computation.
///
/// # Examples
/// ```
/// use sitegeom::{EstimatorConfig, SimpsonPolicy};
///
/// let config = EstimatorConfig::from_json(r#"{ "simpson": "strict", "max_depth": 20 }"#)
///     .expect("valid configuration");
/// assert_eq!(config.simpson, SimpsonPolicy::Strict);
/// assert_eq!(config.max_depth, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Handling of odd interval counts in Simpson's rule.
    pub simpson: SimpsonPolicy,
    /// Error bounds for adaptive quadrature.
    pub tolerance: Tolerance,
    /// Maximum bisection depth for adaptive quadrature.
    pub max_depth: u32,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            simpson: SimpsonPolicy::default(),
            tolerance: Tolerance::default(),
            max_depth: 50,
        }
    }
}

impl EstimatorConfig {
    /// Set the Simpson policy.
    #[must_use]
    pub fn with_simpson(mut self, simpson: SimpsonPolicy) -> Self {
        self.simpson = simpson;
        self
    }

    /// Set the quadrature tolerances.
    #[must_use]
    pub fn with_tolerance(mut self, absolute: f64, relative: f64) -> Self {
        self.tolerance = Tolerance { absolute, relative };
        self
    }

    /// Set the maximum bisection depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Check that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a tolerance is not a positive finite
    /// number, the relative tolerance is below [`MIN_RELATIVE_TOLERANCE`], or
    /// the depth is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.invalid_reason() {
            Some(reason) => Err(ConfigError::Invalid(reason)),
            None => Ok(()),
        }
    }

    /// Describe the first out-of-range value, if any.
    pub(crate) fn invalid_reason(&self) -> Option<String> {
        let Tolerance { absolute, relative } = self.tolerance;
        if !(absolute.is_finite() && absolute > 0.0) {
            return Some(format!("absolute tolerance must be positive (received {absolute})"));
        }
        if !(relative.is_finite() && relative >= MIN_RELATIVE_TOLERANCE) {
            return Some(format!(
                "relative tolerance must be at least {MIN_RELATIVE_TOLERANCE:e} (received {relative})"
            ));
        }
        if self.max_depth == 0 {
            return Some("max_depth must be at least 1".to_owned());
        }
        None
    }

    /// Parse and validate a JSON document. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise the
    /// errors of [`EstimatorConfig::from_json`].
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}
