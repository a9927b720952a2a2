#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_doc_code_examples)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

mod area;
mod boundary;
mod config;
mod errors;
mod integrate;
mod interpolate;
mod prism;
mod roof;
mod statistics;

pub use area::{compute, AreaEstimate, AreaEstimator, AreaMethod};
pub use boundary::{parse_values, sample, Boundary, BoundarySample};
pub use config::{EstimatorConfig, SimpsonPolicy, Tolerance, MIN_RELATIVE_TOLERANCE};
pub use errors::{AreaError, ConfigError, GeometryError, InputError};
pub use integrate::{adaptive_simpson, adaptive_simpson_over, simpson, trapezoid, Quadrature};
pub use interpolate::PiecewiseLinear;
pub use prism::{height_from_angle, Prism, PrismGeometry, PRISM_EDGES};
pub use roof::{GableRoof, TrussSolution};
pub use statistics::{summary_statistics, SummaryStatistics};
