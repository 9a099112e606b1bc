//! Formatting configuration.
//!
//! Controls how [`Quantity`](crate::Quantity) values are rendered. The settings
//! can be read from a TOML file:
//!
//! ```toml
//! [format]
//! precision = 3
//! named_units = false
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{UnitError, UnitResult};

/// Top-level layout of a configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    format: FormatConfig,
}

/// How quantities are turned into text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Fixed number of decimal places; `None` prints the shortest exact form.
    #[serde(default)]
    pub precision: Option<usize>,
    /// Print in the first table unit matching the dimension (`5 N`) instead of
    /// base symbols (`5000 m*g/s**2`).
    #[serde(default = "default_named_units")]
    pub named_units: bool,
}

fn default_named_units() -> bool {
    true
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            precision: None,
            named_units: default_named_units(),
        }
    }
}

impl FormatConfig {
    /// Parses a configuration from TOML text.
    ///
    /// Missing keys fall back to their defaults; a document without a
    /// `[format]` table yields [`FormatConfig::default`].
    pub fn from_toml_str(text: &str) -> UnitResult<Self> {
        let file: ConfigFile = toml::from_str(text).map_err(|e| {
            UnitError::Configuration(format!("Failed to parse config: {}", e))
        })?;
        Ok(file.format)
    }

    /// Loads a configuration from a TOML file.
    ///
    /// # Returns
    /// * `Ok(FormatConfig)` if successful
    /// * `Err(UnitError::Configuration)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> UnitResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            UnitError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let config = Self::from_toml_str(&content)?;
        log::debug!(
            "loaded format config from {}: {:?}",
            path.as_ref().display(),
            config
        );
        Ok(config)
    }

    pub(crate) fn format_number(&self, value: f64) -> String {
        match self.precision {
            Some(precision) => format!("{:.*}", precision, value),
            None => format!("{}", value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = FormatConfig::default();
        assert_eq!(config.precision, None);
        assert!(config.named_units);
    }

    #[test]
    fn parse_full_table() {
        let config = FormatConfig::from_toml_str("[format]\nprecision = 2\nnamed_units = false\n").unwrap();
        assert_eq!(config.precision, Some(2));
        assert!(!config.named_units);
    }

    #[test]
    fn missing_keys_use_defaults() {
        let config = FormatConfig::from_toml_str("[format]\nprecision = 4\n").unwrap();
        assert!(config.named_units);
        assert_eq!(FormatConfig::from_toml_str("").unwrap(), FormatConfig::default());
    }

    #[test]
    fn malformed_toml_is_a_configuration_error() {
        let err = FormatConfig::from_toml_str("[format\nprecision = ").unwrap_err();
        assert!(matches!(err, UnitError::Configuration(_)));
        let err = FormatConfig::from_toml_str("[format]\nprecision = \"three\"").unwrap_err();
        assert!(matches!(err, UnitError::Configuration(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[format]\nprecision = 1").unwrap();
        let config = FormatConfig::from_file(file.path()).unwrap();
        assert_eq!(config.precision, Some(1));
    }

    #[test]
    fn missing_file_is_a_configuration_error() {
        let err = FormatConfig::from_file("/definitely/not/here/dimq.toml").unwrap_err();
        assert!(matches!(err, UnitError::Configuration(_)));
    }

    #[test]
    fn number_formatting() {
        let mut config = FormatConfig::default();
        assert_eq!(config.format_number(2.5), "2.5");
        config.precision = Some(3);
        assert_eq!(config.format_number(2.5), "2.500");
    }
}
