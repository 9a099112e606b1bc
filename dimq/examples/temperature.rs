//! Affine temperature scales: construction and conversion work, arithmetic does not.

use dimq::{Quantity, UnitError};

fn main() -> Result<(), UnitError> {
    for celsius in [-40.0, 0.0, 37.0, 100.0] {
        let t = Quantity::new(celsius, "Celsius")?;
        println!(
            "{:>6.1} Celsius = {:>7.2} Fahrenheit = {:>7.2} K",
            celsius,
            t.value_as("Fahrenheit")?,
            t.value_as("K")?
        );
    }

    let room = Quantity::new(20.0, "Celsius")?;
    match room * Quantity::parse("2 s")? {
        Err(UnitError::IncompatibleAffineUnit(expr)) => {
            println!("refused to multiply an affine quantity: {}", expr)
        }
        other => println!("unexpected: {:?}", other),
    }
    Ok(())
}
