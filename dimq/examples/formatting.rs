//! Rendering quantities with a TOML formatting configuration.

use dimq::{FormatConfig, Quantity};

const CONFIG: &str = r#"
[format]
precision = 3
named_units = false
"#;

fn main() -> Result<(), dimq::UnitError> {
    let force = Quantity::parse("2.5 kN")?;
    println!("default:   {}", force);
    println!("base repr: {}", force.basic_repr());

    let config = FormatConfig::from_toml_str(CONFIG)?;
    println!("configured: {}", force.format_with(&config));
    Ok(())
}
