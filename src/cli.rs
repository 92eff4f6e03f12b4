use std::path::{Path, PathBuf};

mod check;
mod init;
mod list;
mod terminal;

use anyhow::Context;
use audit::Config;
use check::Check;
use clap::ArgAction;
use init::Init;
use list::List;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to an audit.toml configuration file
    ///
    /// Defaults to an audit.toml next to the major definition, if present.
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command.run(self.config.as_deref())
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Check completed courses against a major's requirements
    Check(Check),

    /// List the requirements of a major
    List(List),

    /// Write an audit.toml configuration file
    Init(Init),
}

impl Command {
    fn run(self, config: Option<&Path>) -> anyhow::Result<()> {
        match self {
            Self::Check(command) => command.run(config)?,
            Self::List(command) => command.run(config)?,
            Self::Init(command) => command.run(config)?,
        }
        Ok(())
    }
}

/// Resolve the configuration for a major.
///
/// An explicitly given file must load. Otherwise `audit.toml` next to the
/// major is used if it exists, falling back to the defaults.
fn load_config(explicit: Option<&Path>, major: &Path) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return Config::load(path)
            .map_err(|e| anyhow::anyhow!(e))
            .with_context(|| format!("failed to load {}", path.display()));
    }

    let path = major
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(Config::FILE_NAME);
    Ok(Config::load(&path).unwrap_or_else(|e| {
        tracing::debug!("Using default config: {e}");
        Config::default()
    }))
}
