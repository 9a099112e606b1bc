//! Named physical constants.
//!
//! Each constant is written as a `"value unit"` literal and parsed once, on
//! first access, through the same path as user input.
//!
//! ```rust
//! use dimq_core::constants;
//!
//! let c = constants::constant("c").unwrap();
//! assert_eq!(c.value_as("km/s").unwrap(), 299_792.458);
//! ```

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::quantity::Quantity;

/// `(name, "value unit")` pairs. `mnu0` and `mu0` both name the vacuum
/// permeability.
pub const DEFINITIONS: &[(&str, &str)] = &[
    ("mnu0", "1.2566370614e-6 N/A**2"),
    ("mu0", "1.2566370614e-6 N/A**2"),
    ("G", "6.6742e-11 N*m**2/kg**2"),
    ("h", "6.6260693e-34 J*s"),
    ("c", "299792458 m/s"),
    ("gravity", "9.80665 m/s**2"),
    ("e", "1.602176634e-19 C"),
    ("k_B", "1.380649e-23 J/K"),
    ("N_A", "6.02214076e23 1/mol"),
];

static CONSTANTS: Lazy<BTreeMap<&'static str, Quantity>> = Lazy::new(|| {
    let mut map = BTreeMap::new();
    for &(name, literal) in DEFINITIONS {
        let q = Quantity::parse(literal)
            .unwrap_or_else(|e| panic!("constant {} ({}) does not parse: {}", name, literal, e));
        map.insert(name, q);
    }
    log::debug!("built {} physical constants", map.len());
    map
});

/// Looks up a constant by name.
pub fn constant(name: &str) -> Option<Quantity> {
    CONSTANTS.get(name).copied()
}

/// All constants, ordered by name.
pub fn constants() -> impl Iterator<Item = (&'static str, Quantity)> {
    CONSTANTS.iter().map(|(name, q)| (*name, *q))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn every_literal_is_a_valid_quantity() {
        for (name, literal) in DEFINITIONS {
            assert!(Quantity::parse(literal).is_ok(), "{} = {}", name, literal);
        }
    }

    #[test]
    fn every_definition_parses() {
        assert_eq!(constants().count(), DEFINITIONS.len());
        for (name, _) in DEFINITIONS {
            assert!(constant(name).is_some(), "missing constant {}", name);
        }
    }

    #[test]
    fn permeability_has_both_names() {
        let mnu0 = constant("mnu0").unwrap();
        let mu0 = constant("mu0").unwrap();
        assert!(mnu0.try_eq(&mu0).unwrap());
        assert_relative_eq!(mu0.value_as("H/m").unwrap(), 1.2566370614e-6, max_relative = 1e-12);
    }

    #[test]
    fn unknown_constant() {
        assert!(constant("hbar").is_none());
    }

    #[test]
    fn values_in_their_own_units() {
        let gravity = constant("gravity").unwrap();
        assert_eq!(gravity.value_as("m/s**2").unwrap(), 9.80665);

        let g = constant("G").unwrap();
        assert_relative_eq!(
            g.value_as("N*m**2/kg**2").unwrap(),
            6.6742e-11,
            max_relative = 1e-12
        );

        let h = constant("h").unwrap();
        assert_relative_eq!(h.value_as("eV*s").unwrap(), 4.1357e-15, max_relative = 1e-4);
    }

    #[test]
    fn constants_combine() {
        // Weight of one tonne at standard gravity.
        let weight = (constant("gravity").unwrap() * crate::Quantity::parse("1 tonne").unwrap()).unwrap();
        assert_relative_eq!(weight.value_as("kN").unwrap(), 9.80665, max_relative = 1e-12);

        // R = N_A * k_B
        let r = (constant("N_A").unwrap() * constant("k_B").unwrap()).unwrap();
        assert_relative_eq!(r.value_as("J/(mol*K)").unwrap(), 8.314462618, max_relative = 1e-9);
    }
}
