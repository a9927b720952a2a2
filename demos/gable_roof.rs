use sitegeom::{GableRoof, Prism};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A 9.6 m workshop with a 140 cm ridge
    let roof = GableRoof::with_rise_in_centimetres(9.6, 140.0)?;
    let truss = roof.solve();
    println!("Rafter: {:.3} m (cut {:.2}° at the ridge)", truss.rafter, truss.plumb_cut);
    println!("Pitch:  {:.2}°", truss.pitch);

    // Gable end fill modelled as a prism running the length of the building
    let fill = Prism::new(truss.half_span, truss.rise, 14.0)?.geometry();
    println!("Fill volume per side: {:.3} m³", fill.volume);

    Ok(())
}
