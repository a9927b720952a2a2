//! Numerical integration rules used by the area estimator.
//!
//! The sampled rules (trapezoid, Simpson) work directly on boundary samples and
//! accept uneven spacing. The adaptive rule integrates any continuous function.

use serde::Serialize;
use tracing::{debug, warn};

use crate::boundary::Boundary;
use crate::config::{SimpsonPolicy, Tolerance};
use crate::errors::AreaError;

/// Bisection levels performed before the error estimate is trusted.
///
/// A three-point Simpson estimate can match by accident when kinks in a
/// piecewise-linear integrand fall between the sample points.
const MIN_DEPTH: u32 = 4;

/// Trapezoidal rule over the boundary samples.
#[must_use]
pub fn trapezoid(boundary: &Boundary) -> f64 {
    boundary
        .segments()
        .map(|(lhs, rhs)| (lhs.width + rhs.width) * (rhs.position - lhs.position) / 2.0)
        .sum()
}

/// Composite Simpson's rule for unevenly spaced samples.
///
/// Each pair of intervals is integrated with the parabola through its three
/// samples. With an odd number of intervals the final interval is handled
/// according to `policy`: [`SimpsonPolicy::Cartwright`] adds Cartwright's
/// quadratic correction (a lone interval falls back to a trapezoid) and
/// [`SimpsonPolicy::Strict`] refuses.
///
/// Widths are never negative, but a parabola through very unevenly spaced
/// samples can swing below the baseline. Any panel or end correction that comes
/// out negative is replaced by the trapezoid over the same intervals, so the
/// result is never negative.
///
/// # Errors
///
/// Returns [`AreaError::UnsupportedSampleCount`] under the strict policy when the
/// interval count is odd.
pub fn simpson(boundary: &Boundary, policy: SimpsonPolicy) -> Result<f64, AreaError> {
    let x: Vec<f64> = boundary.positions().collect();
    let y: Vec<f64> = boundary.widths().collect();
    let intervals = boundary.interval_count();

    if intervals % 2 == 0 {
        return Ok(simpson_pairs(&x, &y, intervals));
    }
    if policy == SimpsonPolicy::Strict {
        return Err(AreaError::UnsupportedSampleCount { intervals });
    }

    let n = x.len();
    if n == 2 {
        debug!("single interval, Simpson's rule reduces to a trapezoid");
        return Ok((y[0] + y[1]) * (x[1] - x[0]) / 2.0);
    }

    debug!(intervals, "odd interval count, applying Cartwright correction");
    let leading = simpson_pairs(&x, &y, intervals - 1);
    let h0 = x[n - 2] - x[n - 3];
    let h1 = x[n - 1] - x[n - 2];
    let alpha = (2.0 * h1 * h1 + 3.0 * h0 * h1) / (6.0 * (h0 + h1));
    let beta = (h1 * h1 + 3.0 * h0 * h1) / (6.0 * h0);
    let eta = h1 * h1 * h1 / (6.0 * h0 * (h0 + h1));
    let correction = alpha * y[n - 1] + beta * y[n - 2] - eta * y[n - 3];
    let last = if correction < 0.0 {
        let fallback = (y[n - 2] + y[n - 1]) * h1 / 2.0;
        warn!(
            start = x[n - 2],
            end = x[n - 1],
            correction,
            fallback,
            "negative Cartwright correction, using the trapezoid for the final interval"
        );
        fallback
    } else {
        correction
    };
    Ok(leading + last)
}

/// Sum Simpson panels over the first `intervals` intervals (an even count).
fn simpson_pairs(x: &[f64], y: &[f64], intervals: usize) -> f64 {
    (0..intervals).step_by(2).map(|i| simpson_panel(x, y, i)).sum()
}

/// Simpson panel over intervals `i` and `i + 1`, or their trapezoids when the
/// parabola encloses a negative area.
fn simpson_panel(x: &[f64], y: &[f64], i: usize) -> f64 {
    let h0 = x[i + 1] - x[i];
    let h1 = x[i + 2] - x[i + 1];
    let hsum = h0 + h1;
    let ratio = h0 / h1;
    let panel = hsum / 6.0
        * (y[i] * (2.0 - 1.0 / ratio)
            + y[i + 1] * (hsum * hsum / (h0 * h1))
            + y[i + 2] * (2.0 - ratio));
    if panel >= 0.0 {
        return panel;
    }
    let fallback = (y[i] + y[i + 1]) * h0 / 2.0 + (y[i + 1] + y[i + 2]) * h1 / 2.0;
    warn!(
        start = x[i],
        end = x[i + 2],
        panel,
        fallback,
        "negative Simpson panel, using the trapezoid rule"
    );
    fallback
}

/// Result of an adaptive quadrature run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Quadrature {
    /// Estimated integral.
    pub value: f64,
    /// Estimated absolute error of `value`.
    pub error: f64,
    /// Number of integrand evaluations.
    pub evaluations: usize,
    /// `false` when some subinterval hit the depth limit before meeting the tolerance.
    pub converged: bool,
}

/// Book-keeping carried through the recursion.
struct Progress {
    /// Accumulated error estimate.
    error: f64,
    /// Integrand evaluations so far.
    evaluations: usize,
    /// Cleared when a subinterval gives up.
    converged: bool,
}

/// Integrate `f` over `[a, b]` with adaptive Simpson quadrature.
///
/// Intervals are bisected until the Richardson error estimate of each piece
/// falls below its share of `max(absolute, relative * |estimate|)`, or until
/// `max_depth` bisections have been made. The result carries the summed error
/// estimate and whether every piece converged.
///
/// # Examples
/// ```
/// use sitegeom::{adaptive_simpson, Tolerance};
///
/// let result = adaptive_simpson(|x: f64| x.sin(), 0.0, std::f64::consts::PI, Tolerance::default(), 50);
/// assert!((result.value - 2.0).abs() < 1e-8);
/// assert!(result.converged);
/// ```
pub fn adaptive_simpson<F>(f: F, a: f64, b: f64, tolerance: Tolerance, max_depth: u32) -> Quadrature
where
    F: Fn(f64) -> f64,
{
    let fa = f(a);
    let fb = f(b);
    let m = (a + b) / 2.0;
    let fm = f(m);
    let whole = (b - a) / 6.0 * (fa + 4.0 * fm + fb);
    let eps = tolerance.absolute.max(tolerance.relative * whole.abs());

    let mut progress = Progress {
        error: 0.0,
        evaluations: 3,
        converged: true,
    };
    let value = refine(
        &f,
        Panel { a, b, fa, fm, fb, whole },
        eps,
        0,
        max_depth,
        &mut progress,
    );

    if !progress.converged {
        warn!(
            error = progress.error,
            max_depth, "adaptive quadrature stopped at the depth limit"
        );
    }
    debug!(value, error = progress.error, evaluations = progress.evaluations, "adaptive quadrature finished");

    Quadrature {
        value,
        error: progress.error,
        evaluations: progress.evaluations,
        converged: progress.converged,
    }
}

/// Integrate `f` piece by piece between consecutive `breakpoints`.
///
/// Each piece is refined on its own with [`adaptive_simpson`], so a feature
/// confined to one short piece is always sampled. Values, error estimates and
/// evaluation counts are summed; the result converged only if every piece did.
/// Fewer than two breakpoints give an empty integral.
///
/// # Examples
/// ```
/// use sitegeom::{adaptive_simpson_over, Tolerance};
///
/// let result = adaptive_simpson_over(|x: f64| (x - 1.0).abs(), &[0.0, 1.0, 3.0], Tolerance::default(), 50);
/// assert!((result.value - 2.5).abs() < 1e-12);
/// ```
pub fn adaptive_simpson_over<F>(f: F, breakpoints: &[f64], tolerance: Tolerance, max_depth: u32) -> Quadrature
where
    F: Fn(f64) -> f64,
{
    let empty = Quadrature {
        value: 0.0,
        error: 0.0,
        evaluations: 0,
        converged: true,
    };
    breakpoints
        .windows(2)
        .map(|piece| adaptive_simpson(&f, piece[0], piece[1], tolerance, max_depth))
        .fold(empty, |total, piece| Quadrature {
            value: total.value + piece.value,
            error: total.error + piece.error,
            evaluations: total.evaluations + piece.evaluations,
            converged: total.converged && piece.converged,
        })
}

/// Simpson panel over `[a, b]` with cached endpoint and midpoint values.
#[derive(Clone, Copy)]
struct Panel {
    /// Left end.
    a: f64,
    /// Right end.
    b: f64,
    /// Integrand at `a`.
    fa: f64,
    /// Integrand at the midpoint.
    fm: f64,
    /// Integrand at `b`.
    fb: f64,
    /// Simpson estimate over the whole panel.
    whole: f64,
}

/// Recursive bisection step of [`adaptive_simpson`].
fn refine<F>(f: &F, panel: Panel, eps: f64, depth: u32, max_depth: u32, progress: &mut Progress) -> f64
where
    F: Fn(f64) -> f64,
{
    let Panel { a, b, fa, fm, fb, whole } = panel;
    let m = (a + b) / 2.0;
    let lm = (a + m) / 2.0;
    let rm = (m + b) / 2.0;
    let flm = f(lm);
    let frm = f(rm);
    progress.evaluations += 2;

    let left = (m - a) / 6.0 * (fa + 4.0 * flm + fm);
    let right = (b - m) / 6.0 * (fm + 4.0 * frm + fb);
    let delta = left + right - whole;

    let settled = depth >= MIN_DEPTH.min(max_depth) && delta.abs() <= 15.0 * eps;
    if settled || depth >= max_depth {
        if !settled {
            progress.converged = false;
        }
        progress.error += delta.abs() / 15.0;
        return left + right + delta / 15.0;
    }

    let half = eps / 2.0;
    refine(
        f,
        Panel { a, b: m, fa, fm: flm, fb: fm, whole: left },
        half,
        depth + 1,
        max_depth,
        progress,
    ) + refine(
        f,
        Panel { a: m, b, fa: fm, fm: frm, fb, whole: right },
        half,
        depth + 1,
        max_depth,
        progress,
    )
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn trapezoid_handles_uneven_spacing() {
        let boundary = Boundary::parse("0, 13, 15, 20", "10, 10, 9, 9").expect("valid input");
        assert_relative_eq!(trapezoid(&boundary), 194.0, epsilon = 1e-12);
    }

    #[test]
    fn simpson_is_exact_for_quadratics_on_uneven_grid() {
        // Area under x^2 on [0, 3] is 9; exact for any spacing.
        let xs = [0.0, 0.5, 1.7, 2.2, 3.0];
        let ys: Vec<f64> = xs.iter().map(|x| x * x).collect();
        let boundary = Boundary::from_series(&xs, &ys).expect("valid input");
        assert_relative_eq!(
            simpson(&boundary, SimpsonPolicy::Strict).expect("even intervals"),
            9.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn cartwright_correction_is_exact_for_quadratics() {
        let xs = [0.0, 1.0, 1.5, 3.0];
        let ys: Vec<f64> = xs.iter().map(|x| x * x).collect();
        let boundary = Boundary::from_series(&xs, &ys).expect("valid input");
        assert_relative_eq!(
            simpson(&boundary, SimpsonPolicy::Cartwright).expect("correction applies"),
            9.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn strict_policy_rejects_odd_intervals() {
        let boundary = Boundary::parse("0, 13, 15, 20", "10, 10, 9, 9").expect("valid input");
        let error = simpson(&boundary, SimpsonPolicy::Strict).expect_err("odd intervals rejected");
        assert_eq!(error, AreaError::UnsupportedSampleCount { intervals: 3 });
    }

    #[test]
    fn lone_interval_is_a_trapezoid() {
        let boundary = Boundary::parse("2, 6", "3, 5").expect("valid input");
        assert_relative_eq!(
            simpson(&boundary, SimpsonPolicy::Cartwright).expect("fallback applies"),
            16.0
        );
    }

    #[test]
    fn adaptive_handles_kinks() {
        // |x - 1| on [0, 3] has area 0.5 + 2 = 2.5.
        let result = adaptive_simpson(|x: f64| (x - 1.0).abs(), 0.0, 3.0, Tolerance::default(), 50);
        assert!(result.converged);
        assert_relative_eq!(result.value, 2.5, epsilon = 1e-7);
        assert!(result.error < 1e-7);
    }

    #[test]
    fn negative_panel_falls_back_to_trapezoids() {
        // The parabola through (0, 10), (1, 0), (100, 10) dips far below zero.
        let boundary = Boundary::parse("0, 1, 100", "10, 0, 10").expect("valid input");
        let area = simpson(&boundary, SimpsonPolicy::Strict).expect("even intervals");
        assert_relative_eq!(area, trapezoid(&boundary), epsilon = 1e-12);
        assert_relative_eq!(area, 500.0, epsilon = 1e-12);
    }

    #[test]
    fn negative_end_correction_falls_back_to_trapezoid() {
        // Leading panel 40 / 3, Cartwright correction -10 / 12, final trapezoid 0.
        let boundary = Boundary::parse("0, 1, 2, 3", "0, 10, 0, 0").expect("valid input");
        let area = simpson(&boundary, SimpsonPolicy::Cartwright).expect("correction applies");
        assert_relative_eq!(area, 40.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn breakpoints_catch_narrow_features() {
        // A tent 0.02 wide inside a span of 100 sits between the sample points
        // of a single panel.
        let tent = |x: f64| (100.0 - 10_000.0 * (x - 10.01).abs()).max(0.0);
        let single = adaptive_simpson(tent, 0.0, 100.0, Tolerance::default(), 50);
        assert_eq!(single.value, 0.0);

        let split = adaptive_simpson_over(tent, &[0.0, 10.0, 10.01, 10.02, 100.0], Tolerance::default(), 50);
        assert!(split.converged);
        assert_relative_eq!(split.value, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn pieces_are_summed() {
        let result = adaptive_simpson_over(|x: f64| (x - 1.0).abs(), &[0.0, 1.0, 3.0], Tolerance::default(), 50);
        assert!(result.converged);
        assert_relative_eq!(result.value, 2.5, epsilon = 1e-12);
        // Linear pieces settle after the minimum bisection depth.
        assert_eq!(result.evaluations, 2 * (3 + 2 * ((1 << (MIN_DEPTH + 1)) - 1)));

        let empty = adaptive_simpson_over(|x: f64| x, &[4.0], Tolerance::default(), 50);
        assert_eq!(empty.value, 0.0);
        assert_eq!(empty.evaluations, 0);
    }

    #[test]
    fn depth_limit_is_reported() {
        let tight = Tolerance {
            absolute: 1e-300,
            relative: 1e-300,
        };
        let result = adaptive_simpson(|x: f64| x.sqrt(), 0.0, 1.0, tight, 6);
        assert!(!result.converged);
        assert!(result.error > 0.0);
        assert_eq!(result.evaluations, 3 + 2 * ((1 << 7) - 1));
    }
}
