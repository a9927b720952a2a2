use sitegeom::{summary_statistics, AreaEstimator, Boundary, EstimatorConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Widths measured every few metres along the road frontage
    let boundary = Boundary::parse("0, 6, 12, 18, 24, 30, 36", "21.5, 22.0, 24.3, 23.1, 19.8, 18.2, 18.0")?;

    // Tighter quadrature than the default
    let estimator = AreaEstimator::new(EstimatorConfig::default().with_tolerance(1e-10, 1e-12));
    let estimate = estimator.compute(&boundary)?;

    for (method, area) in estimate.iter() {
        println!("{method:>20}: {area:.4} m²");
    }

    // How well the methods agree
    let stats = summary_statistics(&estimate);
    match stats.spread_ratio {
        Some(spread) => println!("mean {:.4} m², spread {spread:.2}%", stats.mean),
        None => println!("mean {:.4} m², spread undefined", stats.mean),
    }

    Ok(())
}
