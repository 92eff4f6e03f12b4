use std::path::{Path, PathBuf};

use audit::Config;
use clap::Parser;
use tracing::instrument;

/// Command arguments for `audit init`.
#[derive(Debug, Parser)]
#[command(about = "Write an audit.toml configuration file")]
pub struct Init {
    /// Directory to write audit.toml into, usually next to the major
    #[arg(default_value = ".")]
    directory: PathBuf,

    /// Which digit (0-3) of the course number encodes credit hours
    #[arg(long, value_name = "DIGIT")]
    credit_digit: Option<usize>,

    /// Skip listed courses without a catalog code in credit rules, instead
    /// of failing the audit
    #[arg(long)]
    lenient: bool,
}

impl Init {
    /// Writes the configuration to `config` if given, or into the directory.
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, config: Option<&Path>) -> anyhow::Result<()> {
        let path = config.map_or_else(|| self.directory.join(Config::FILE_NAME), Path::to_path_buf);
        if path.exists() {
            anyhow::bail!("{} already exists", path.display());
        }

        let mut settings = Config::default();
        settings.strict_codes = !self.lenient;
        if let Some(digit) = self.credit_digit {
            settings
                .set_credit_digit(digit)
                .map_err(|e| anyhow::anyhow!(e))?;
        }

        settings
            .save(&path)
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", path.display()))?;

        println!("Created {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init(directory: &Path) -> Init {
        Init {
            directory: directory.to_path_buf(),
            credit_digit: None,
            lenient: false,
        }
    }

    #[test]
    fn writes_defaults_into_directory() {
        let tmp = tempfile::tempdir().unwrap();
        init(tmp.path()).run(None).unwrap();

        let config = Config::load(&tmp.path().join(Config::FILE_NAME)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn flags_are_written() {
        let tmp = tempfile::tempdir().unwrap();
        let command = Init {
            credit_digit: Some(3),
            lenient: true,
            ..init(tmp.path())
        };
        command.run(None).unwrap();

        let config = Config::load(&tmp.path().join(Config::FILE_NAME)).unwrap();
        assert!(!config.strict_codes);
        assert_eq!(config.credit_digit(), 3);
    }

    #[test]
    fn explicit_path_wins_over_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("custom.toml");
        init(&tmp.path().join("unused")).run(Some(&path)).unwrap();

        assert!(Config::load(&path).is_ok());
        assert!(!tmp.path().join("unused").exists());
    }

    #[test]
    fn refuses_to_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        init(tmp.path()).run(None).unwrap();
        assert!(init(tmp.path()).run(None).is_err());
    }

    #[test]
    fn rejects_out_of_range_credit_digit() {
        let tmp = tempfile::tempdir().unwrap();
        let command = Init {
            credit_digit: Some(4),
            ..init(tmp.path())
        };
        assert!(command.run(None).is_err());
        assert!(!tmp.path().join(Config::FILE_NAME).exists());
    }
}
