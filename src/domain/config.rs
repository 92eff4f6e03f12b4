use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration for auditing.
///
/// This controls how the built-in rules interpret course codes. It is read
/// from an `audit.toml` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Versions", into = "Versions")]
pub struct Config {
    /// Whether a listed course without a catalog code is an error.
    ///
    /// This only matters for `credits` rules, which need a code to read the
    /// credit hours from. When `false`, such courses are skipped instead.
    pub strict_codes: bool,

    /// Which digit (0-based) of the four digit course number encodes the
    /// credit hours.
    ///
    /// With the default of `1`, `CS 2413` is a 4 credit course.
    credit_digit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strict_codes: true,
            credit_digit: default_credit_digit(),
        }
    }
}

impl Config {
    /// The name of the configuration file looked for next to a major.
    pub const FILE_NAME: &'static str = "audit.toml";

    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the digit of the course number holding credit hours.
    #[must_use]
    pub const fn credit_digit(&self) -> usize {
        self.credit_digit
    }

    /// Sets the credit digit.
    ///
    /// # Errors
    ///
    /// Returns an error if `digit` is not in `0..4`.
    pub fn set_credit_digit(&mut self, digit: usize) -> Result<(), String> {
        self.credit_digit = check_credit_digit(digit)?;
        Ok(())
    }
}

const fn default_credit_digit() -> usize {
    1
}

const fn default_strict_codes() -> bool {
    true
}

fn check_credit_digit(digit: usize) -> Result<usize, String> {
    if digit < 4 {
        Ok(digit)
    } else {
        Err(format!(
            "credit_digit must be between 0 and 3 (course numbers have four digits), got {digit}"
        ))
    }
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_strict_codes")]
        strict_codes: bool,

        #[serde(default = "default_credit_digit")]
        credit_digit: usize,
    },
}

impl TryFrom<Versions> for Config {
    type Error = String;

    fn try_from(versions: Versions) -> Result<Self, Self::Error> {
        match versions {
            Versions::V1 {
                strict_codes,
                credit_digit,
            } => Ok(Self {
                strict_codes,
                credit_digit: check_credit_digit(credit_digit)?,
            }),
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            strict_codes: config.strict_codes,
            credit_digit: config.credit_digit,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nstrict_codes = false\ncredit_digit = 3\n")
            .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert!(!config.strict_codes);
        assert_eq!(config.credit_digit(), 3);
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\ncredit_digit = \"one\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
    }

    #[test]
    fn out_of_range_credit_digit_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\ncredit_digit = 4\n").unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.contains("credit_digit must be between 0 and 3"));

        let mut config = Config::default();
        assert!(config.set_credit_digit(9).is_err());
        assert_eq!(config.credit_digit(), 1);
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(Config::FILE_NAME);

        let mut config = Config {
            strict_codes: false,
            ..Config::default()
        };
        config.set_credit_digit(2).unwrap();
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn empty_file_returns_default() {
        // Tests that deserialising an empty file returns the default configuration.
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }
}
