use std::path::{Path, PathBuf};

use anyhow::Context;
use audit::Major;
use clap::{Parser, ValueEnum};
use serde_json::json;
use tracing::instrument;

use super::terminal::Colorize;

/// Command arguments for `audit list`.
#[derive(Debug, Parser)]
#[command(about = "List the requirements of a major")]
pub struct List {
    /// Major definition (YAML)
    #[arg(short, long, value_name = "FILE")]
    major: PathBuf,

    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl List {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, config: Option<&Path>) -> anyhow::Result<()> {
        let config = super::load_config(config, &self.major)?;
        let major = Major::load(&self.major, &config)
            .with_context(|| format!("failed to load major {}", self.major.display()))?;

        match self.output {
            OutputFormat::Table => Self::output_table(&major),
            OutputFormat::Json => Self::output_json(&major)?,
        }
        Ok(())
    }

    fn output_table(major: &Major) {
        println!("{}", major.name());
        if let Some(description) = major.description() {
            println!("{}", description.dim());
        }
        println!();

        for (i, entry) in major.requirements().iter().enumerate() {
            println!("{:>3}. {}: {}", i + 1, entry.title(), entry.rule());
            if let Some(description) = entry.description() {
                println!("     {}", description.dim());
            }
        }
    }

    fn output_json(major: &Major) -> anyhow::Result<()> {
        let requirements: Vec<_> = major
            .requirements()
            .iter()
            .map(|entry| {
                json!({
                    "title": entry.title(),
                    "description": entry.description(),
                    "rule": entry.rule().kind(),
                    "summary": entry.rule().to_string(),
                })
            })
            .collect();

        let output = json!({
            "major": major.name(),
            "description": major.description(),
            "requirements": requirements,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}
