use std::fmt::Write;

use serde::Serialize;
use sitegeom::{
    AreaEstimate, Boundary, Prism, PrismGeometry, SummaryStatistics, TrussSolution, PRISM_EDGES,
};

/// Truss figures selected on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrussView {
    /// Half span, rafter and pitch.
    Hypotenuse,
    /// Same as [`TrussView::Hypotenuse`], rise quoted in centimetres.
    Rafter,
    /// Pitch, apex and head-cut angles.
    Angles,
    /// Rafter and combined rafter length.
    Beam,
}

/// Everything the area command reports, ready for JSON output.
#[derive(Debug, Serialize)]
pub struct AreaReport<'a> {
    /// Validated input samples.
    pub boundary: &'a Boundary,
    /// Closed outline for plotting.
    pub outline: Vec<[f64; 2]>,
    /// Areas and quadrature details.
    pub estimate: &'a AreaEstimate,
    /// Agreement between methods.
    pub statistics: SummaryStatistics,
}

/// Format a list of values the way they were entered.
fn format_list(values: impl Iterator<Item = f64>) -> String {
    let values: Vec<String> = values.map(|value| value.to_string()).collect();
    format!("[{}]", values.join(", "))
}

/// Format a length with at most four decimals and no trailing zeros.
fn format_length(value: f64) -> String {
    let text = format!("{value:.4}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

/// Render the downloadable land-area report.
///
/// Inputs come first so the figures can be checked by hand, then one line per
/// method, then the statistics comparing them.
#[must_use]
pub fn render_area_report(report: &AreaReport<'_>) -> String {
    let mut output = String::new();
    let boundary = report.boundary;
    let estimate = report.estimate;
    let stats = &report.statistics;

    output.push_str("Land area report\n");
    output.push_str(&"=".repeat(50));
    output.push('\n');

    writeln!(&mut output, "Positions (m): {}", format_list(boundary.positions()))
        .expect("writing to string cannot fail");
    writeln!(&mut output, "Widths (m):    {}", format_list(boundary.widths()))
        .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "Samples: {}, from {} m to {} m",
        boundary.len(),
        boundary.start(),
        boundary.end()
    )
    .expect("writing to string cannot fail");

    output.push_str("\nArea by method:\n");
    for (method, area) in estimate.iter() {
        writeln!(&mut output, "- {:<20} {area:.4} m²", format!("{method}:"))
            .expect("writing to string cannot fail");
    }

    // The quadrature error bounds the adaptive figure only; the sampled rules
    // are exact for their own interpolants.
    let quadrature = estimate.quadrature();
    writeln!(
        &mut output,
        "  adaptive quadrature error estimate {:.1e} m² over {} evaluations{}",
        quadrature.error,
        quadrature.evaluations,
        if quadrature.converged {
            ""
        } else {
            " (did not converge)"
        }
    )
    .expect("writing to string cannot fail");

    writeln!(&mut output, "\nMean area: {:.4} m²", stats.mean)
        .expect("writing to string cannot fail");
    writeln!(&mut output, "Highest:   {:.4} m²", stats.max).expect("writing to string cannot fail");
    writeln!(&mut output, "Lowest:    {:.4} m²", stats.min).expect("writing to string cannot fail");
    writeln!(&mut output, "Std. dev.: {:.4} m²", stats.stddev)
        .expect("writing to string cannot fail");
    let spread = match stats.spread_ratio {
        Some(spread) => format!("{spread:.2}%"),
        None => "undefined (mean area is zero)".to_owned(),
    };
    writeln!(&mut output, "Spread:    {spread}").expect("writing to string cannot fail");

    output
}

/// Render the figures of one truss calculator.
#[must_use]
pub fn render_truss(view: TrussView, solution: &TrussSolution) -> String {
    let mut output = String::new();
    let TrussSolution {
        rafter,
        total_rafter,
        pitch,
        apex_angle,
        plumb_cut,
        ..
    } = *solution;
    let span = format_length(solution.span);
    let rise = format_length(solution.rise);
    let half_span = format_length(solution.half_span);

    let rise_text = if view == TrussView::Rafter {
        format!("{} cm", format_length(solution.rise * 100.0))
    } else {
        format!("{rise} m")
    };
    writeln!(&mut output, "Gable truss (span = {span} m, rise = {rise_text})")
        .expect("writing to string cannot fail");
    writeln!(&mut output, "Half span: {span} / 2 = {half_span} m")
        .expect("writing to string cannot fail");

    match view {
        TrussView::Hypotenuse | TrussView::Rafter => {
            writeln!(
                &mut output,
                "Rafter: sqrt({half_span}² + {rise}²) = {rafter:.3} m"
            )
            .expect("writing to string cannot fail");
            writeln!(
                &mut output,
                "Pitch: atan({rise} / {half_span}) = {pitch:.2}°"
            )
            .expect("writing to string cannot fail");
        }
        TrussView::Angles => {
            writeln!(
                &mut output,
                "Pitch: atan({rise} / {half_span}) = {pitch:.2}°"
            )
            .expect("writing to string cannot fail");
            writeln!(
                &mut output,
                "Apex angle: 180 - 2 × {pitch:.2} = {apex_angle:.2}°"
            )
            .expect("writing to string cannot fail");
            writeln!(
                &mut output,
                "Ridge head cut: {apex_angle:.2} / 2 = {plumb_cut:.2}°"
            )
            .expect("writing to string cannot fail");
        }
        TrussView::Beam => {
            writeln!(&mut output, "Rafter length: {rafter:.3} m")
                .expect("writing to string cannot fail");
            writeln!(&mut output, "Total length: 2 × {rafter:.3} = {total_rafter:.3} m")
                .expect("writing to string cannot fail");
            writeln!(&mut output, "Beam angle: {pitch:.2}°")
                .expect("writing to string cannot fail");
        }
    }

    output
}

/// Render prism properties followed by its corner points and edges.
#[must_use]
pub fn render_prism(prism: &Prism, geometry: &PrismGeometry) -> String {
    let mut output = String::new();

    writeln!(
        &mut output,
        "Triangular prism (base = {:.2} m, height = {:.2} m, depth = {:.2} m)",
        geometry.base, geometry.height, geometry.depth
    )
    .expect("writing to string cannot fail");
    writeln!(&mut output, "Hypotenuse:     {:.3} m", geometry.hypotenuse)
        .expect("writing to string cannot fail");
    writeln!(&mut output, "Space diagonal: {:.3} m", geometry.space_diagonal)
        .expect("writing to string cannot fail");
    writeln!(&mut output, "Base angle:     {:.2}°", geometry.base_angle)
        .expect("writing to string cannot fail");
    writeln!(&mut output, "Top angle:      {:.2}°", geometry.top_angle)
        .expect("writing to string cannot fail");
    writeln!(&mut output, "Volume:         {:.3} m³", geometry.volume)
        .expect("writing to string cannot fail");

    output.push_str("\nVertices (x, y, z):\n");
    for (index, vertex) in prism.vertices().iter().enumerate() {
        writeln!(
            &mut output,
            "  P{}: ({:.3}, {:.3}, {:.3})",
            index + 1,
            vertex.x,
            vertex.y,
            vertex.z
        )
        .expect("writing to string cannot fail");
    }
    let edges: Vec<String> = PRISM_EDGES
        .iter()
        .map(|(start, end)| format!("P{}-P{}", start + 1, end + 1))
        .collect();
    writeln!(&mut output, "Edges: {}", edges.join(" "))
        .expect("writing to string cannot fail");

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitegeom::{summary_statistics, AreaEstimator, GableRoof};

    #[test]
    fn area_report_lists_inputs_and_methods() {
        let boundary = Boundary::parse("0, 13, 15, 20", "10, 10, 9, 9").expect("valid input");
        let estimate = AreaEstimator::default()
            .compute(&boundary)
            .expect("area computed");
        let report = AreaReport {
            boundary: &boundary,
            outline: boundary.outline(),
            statistics: summary_statistics(&estimate),
            estimate: &estimate,
        };
        let text = render_area_report(&report);
        assert!(text.contains("Positions (m): [0, 13, 15, 20]"));
        assert!(text.contains("Widths (m):    [10, 10, 9, 9]"));
        assert!(text.contains("trapezoidal:         194.0000 m²"));
        assert!(text.contains("segment averaging:   194.0000 m²"));
        assert!(text.contains("Spread:"));
    }

    #[test]
    fn zero_mean_spread_is_undefined() {
        let boundary = Boundary::parse("0, 4", "0, 0").expect("valid input");
        let estimate = AreaEstimator::default()
            .compute(&boundary)
            .expect("area computed");
        let report = AreaReport {
            boundary: &boundary,
            outline: boundary.outline(),
            statistics: summary_statistics(&estimate),
            estimate: &estimate,
        };
        assert!(render_area_report(&report).contains("undefined"));
    }

    #[test]
    fn truss_views_report_their_figures() {
        let solution = GableRoof::new(40.0, 2.0).expect("valid roof").solve();
        let hypotenuse = render_truss(TrussView::Hypotenuse, &solution);
        assert!(hypotenuse.contains("Rafter: sqrt(20² + 2²) = 20.100 m"));
        let angles = render_truss(TrussView::Angles, &solution);
        assert!(angles.contains("Apex angle"));
        let beam = render_truss(TrussView::Beam, &solution);
        assert!(beam.contains("Total length: 2 × 20.100 = 40.200 m"));
    }

    #[test]
    fn prism_report_lists_vertices() {
        let prism = Prism::new(10.0, 7.0, 12.0).expect("valid prism");
        let text = render_prism(&prism, &prism.geometry());
        assert!(text.contains("Volume:         420.000 m³"));
        assert!(text.contains("P6: (0.000, 7.000, 12.000)"));
        assert!(text.contains("P3-P6"));
    }
}
