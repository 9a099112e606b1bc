//! Minimal end-to-end example: parse quantities, combine them and read them back in other units.

use dimq::{Exponent, Quantity};

fn main() -> Result<(), dimq::UnitError> {
    let section = Quantity::parse("16600 mm**2")?;
    let density = Quantity::parse("2500 kg/m**3")?;

    let per_length = (section * density)?;
    println!("linear density: {} kg/m", per_length.value_as("kg/m")?);

    let beam = Quantity::new(12.0, "m")?;
    let mass = (per_length * beam)?;
    println!("beam mass: {} ({} lb)", mass, mass.value_as("lb")?);

    let area = Quantity::parse("2 hectare")?;
    let side = area.pow(Exponent::HALF)?;
    println!("side of a square plot: {:.2} ft", side.value_as("ft")?);

    println!("units like N: {:?}", Quantity::similar_units("N")?);
    Ok(())
}
