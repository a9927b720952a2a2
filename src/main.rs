mod cli;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{AreaArgs, Cli, Command, PrismArgs, TrussCommand};
use report::{render_area_report, render_prism, render_truss, AreaReport, TrussView};
use sitegeom::{summary_statistics, AreaEstimator, Boundary, EstimatorConfig, GableRoof, Prism, SimpsonPolicy};

fn main() -> Result<()> {
    // Results go to stdout; diagnostics go to stderr and stay quiet unless
    // RUST_LOG asks for more.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = match cli.command {
        Command::Area(args) => run_area(&args)?,
        Command::Truss { calculation } => run_truss(&calculation)?,
        Command::Prism(args) => run_prism(&args)?,
    };
    print!("{output}");

    Ok(())
}

/// Parse the samples, estimate the area and optionally save the report.
fn run_area(args: &AreaArgs) -> Result<String> {
    let mut config = match &args.config {
        Some(path) => EstimatorConfig::from_path(path)?,
        None => EstimatorConfig::default(),
    };
    if args.strict_simpson {
        config = config.with_simpson(SimpsonPolicy::Strict);
    }

    // Validation happens in full before any area is computed, so a bad token or
    // a mismatched list never yields a partial result.
    let boundary = Boundary::parse(&args.positions, &args.widths).context("invalid land samples")?;
    let estimate = AreaEstimator::new(config).compute(&boundary)?;
    let report = AreaReport {
        boundary: &boundary,
        outline: boundary.outline(),
        statistics: summary_statistics(&estimate),
        estimate: &estimate,
    };
    let text = render_area_report(&report);

    if let Some(path) = &args.report {
        std::fs::write(path, &text)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }

    if args.json {
        let mut json = serde_json::to_string_pretty(&report)?;
        json.push('\n');
        Ok(json)
    } else {
        Ok(text)
    }
}

/// Solve the truss and render the figures of the chosen calculator.
fn run_truss(calculation: &TrussCommand) -> Result<String> {
    let (view, roof) = match calculation {
        TrussCommand::Hypotenuse(args) => (TrussView::Hypotenuse, GableRoof::new(args.span, args.rise)?),
        TrussCommand::Rafter(args) => (
            TrussView::Rafter,
            GableRoof::with_rise_in_centimetres(args.span, args.rise)?,
        ),
        TrussCommand::Angles(args) => (TrussView::Angles, GableRoof::new(args.span, args.rise)?),
        TrussCommand::Beam(args) => (TrussView::Beam, GableRoof::new(args.span, args.rise)?),
    };
    Ok(render_truss(view, &roof.solve()))
}

/// Build the prism, deriving the height from the slope angle when one is given.
fn run_prism(args: &PrismArgs) -> Result<String> {
    let prism = match args.angle {
        Some(angle) => Prism::from_slope(args.base, angle, args.depth)?,
        None => Prism::new(args.base, args.height, args.depth)?,
    };
    let geometry = prism.geometry();
    if args.json {
        let vertices: Vec<[f64; 3]> = prism.vertices().iter().map(|v| [v.x, v.y, v.z]).collect();
        let document = serde_json::json!({
            "geometry": geometry,
            "vertices": vertices,
            "edges": sitegeom::PRISM_EDGES,
        });
        let mut json = serde_json::to_string_pretty(&document)?;
        json.push('\n');
        Ok(json)
    } else {
        Ok(render_prism(&prism, &geometry))
    }
}
