use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Geometry calculators for building sites
#[derive(Debug, Parser)]
#[command(name = "sitegeom")]
#[command(version)]
#[command(about = "Land areas, roof trusses and slope prisms", long_about = None)]
pub struct Cli {
    /// Calculator to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available calculators.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate the area of an irregular plot from widths along a baseline
    Area(AreaArgs),

    /// Solve a symmetric gable roof truss
    Truss {
        /// Figures to report.
        #[command(subcommand)]
        calculation: TrussCommand,
    },

    /// Describe a right-triangular prism (slope, ramp or embankment)
    Prism(PrismArgs),
}

/// Inputs for the land-area estimator.
#[derive(Debug, Args)]
pub struct AreaArgs {
    /// Comma separated positions along the baseline (metres)
    #[arg(short, long, default_value = "0, 13, 15, 20")]
    pub positions: String,

    /// Comma separated widths at each position (metres)
    #[arg(short, long, default_value = "10, 10, 9, 9")]
    pub widths: String,

    /// JSON estimator configuration
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Refuse Simpson's rule for an odd number of intervals
    #[arg(long)]
    pub strict_simpson: bool,

    /// Write the plain-text report to this file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Print the estimate as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Truss figures, one per calculator tab.
#[derive(Debug, Subcommand)]
pub enum TrussCommand {
    /// Rafter length from span and rise
    Hypotenuse(RoofArgs),

    /// Rafter length with the rise given in centimetres
    Rafter(RafterArgs),

    /// Pitch, apex angle and ridge head cut
    Angles(RoofArgs),

    /// Single and total rafter length for a tie beam
    Beam(RoofArgs),
}

/// Span and rise in metres.
#[derive(Debug, Args)]
pub struct RoofArgs {
    /// Full span between the eaves (metres)
    #[arg(short, long, default_value = "40")]
    pub span: f64,

    /// Ridge height above the eaves (metres)
    #[arg(short, long, default_value = "2")]
    pub rise: f64,
}

/// Span in metres, rise in centimetres.
#[derive(Debug, Args)]
pub struct RafterArgs {
    /// Full span between the eaves (metres)
    #[arg(short, long, default_value = "40")]
    pub span: f64,

    /// Ridge height above the eaves (centimetres)
    #[arg(short, long, default_value = "200")]
    pub rise: f64,
}

/// Prism dimensions.
#[derive(Debug, Args)]
pub struct PrismArgs {
    /// Horizontal leg (metres)
    #[arg(short, long, default_value = "10")]
    pub base: f64,

    /// Vertical leg (metres); ignored when --angle is given
    #[arg(long, default_value = "7")]
    pub height: f64,

    /// Extrusion length (metres)
    #[arg(short, long, default_value = "12")]
    pub depth: f64,

    /// Slope angle in degrees; derives the height from the base
    #[arg(short, long)]
    pub angle: Option<f64>,

    /// Print the geometry as JSON instead of text
    #[arg(long)]
    pub json: bool,
}
