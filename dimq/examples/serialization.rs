//! Quantities serialize as `{ "value": <base magnitude>, "unit": [e1..e7, coefficient, offset?] }`.

use dimq::{constants, Quantity, QuantityRecord};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    for (name, q) in constants::constants() {
        let json = serde_json::to_string(&q)?;
        println!("{:>8}: {}", name, json);
    }

    let warm = Quantity::new(25.0, "Celsius")?;
    let json = serde_json::to_string_pretty(&warm)?;
    println!("{}", json);

    let record: QuantityRecord = serde_json::from_str(&json)?;
    let back = Quantity::from_record(&record)?;
    assert_eq!(back.value().to_bits(), warm.value().to_bits());
    assert!(back.dimension().is_identical(warm.dimension()));
    Ok(())
}
