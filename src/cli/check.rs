use std::{
    path::{Path, PathBuf},
    process,
};

use anyhow::Context;
use audit::{Major, Progress, Transcript, domain::term::Load};
use clap::Parser;
use serde_json::json;
use tracing::instrument;

use super::terminal::{Colorize, is_narrow, marker, paint};

/// Exit code when at least one requirement is not fulfilled.
const INCOMPLETE: i32 = 2;

#[derive(Debug, Parser)]
#[command(about = "Check completed courses against a major's requirements")]
pub struct Check {
    /// Major definition (YAML)
    #[arg(short, long, value_name = "FILE")]
    major: PathBuf,

    /// Completed courses, one per line, in the order they were taken
    #[arg(short, long, value_name = "FILE")]
    transcript: PathBuf,

    /// Transfer credits, applied before the transcript
    #[arg(long, value_name = "FILE")]
    transfer: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Only print a one-line summary
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Check {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, config: Option<&Path>) -> anyhow::Result<()> {
        let config = super::load_config(config, &self.major)?;

        let mut major = Major::load(&self.major, &config)
            .with_context(|| format!("failed to load major {}", self.major.display()))?;

        let mut transcript = Transcript::load(&self.transcript).with_context(|| {
            format!("failed to load transcript {}", self.transcript.display())
        })?;
        if let Some(path) = &self.transfer {
            let transfer = Transcript::load(path)
                .with_context(|| format!("failed to load transfer credits {}", path.display()))?;
            tracing::info!("Applying {} transfer credits first", transfer.len());
            transcript = transcript.after_transfer(transfer);
        }

        major
            .audit(transcript.courses())
            .context("failed to audit transcript")?;

        let loads = transcript
            .terms()
            .iter()
            .map(|term| {
                term.load(config.credit_digit())
                    .map(|load| (term.name(), load))
            })
            .collect::<Result<Vec<_>, _>>()
            .context("failed to total credit hours")?;

        match self.output {
            OutputFormat::Json => Self::output_json(&major, &loads)?,
            OutputFormat::Table if self.quiet => Self::output_quiet(&major),
            OutputFormat::Table => {
                Self::output_table(&major);
                Self::output_loads(&loads);
            }
        }

        if !major.is_complete() {
            process::exit(INCOMPLETE);
        }

        Ok(())
    }

    fn output_json(major: &Major, loads: &[(&str, Load)]) -> anyhow::Result<()> {
        let requirements: Vec<_> = major
            .requirements()
            .iter()
            .map(|entry| {
                json!({
                    "title": entry.title(),
                    "rule": entry.rule().kind(),
                    "fulfillment": entry.fulfillment(),
                    "matched": entry.matched(),
                })
            })
            .collect();

        let output = json!({
            "major": major.name(),
            "complete": major.is_complete(),
            "requirements": requirements,
            "terms": loads
                .iter()
                .map(|(name, load)| json!({ "name": name, "load": load }))
                .collect::<Vec<_>>(),
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_quiet(major: &Major) {
        let fulfilled = major
            .requirements()
            .iter()
            .filter(|entry| entry.fulfillment().is_satisfied())
            .count();
        println!("{fulfilled}/{}", major.requirements().len());
    }

    fn output_table(major: &Major) {
        println!("{}", major.name());
        println!();

        if major.requirements().is_empty() {
            println!("{}", "No requirements defined.".dim());
            return;
        }

        let width = major
            .requirements()
            .iter()
            .map(|entry| entry.title().len())
            .max()
            .unwrap_or(0);
        let narrow = is_narrow();

        for entry in major.requirements() {
            let state = entry.fulfillment();
            let line = format!(
                "{} {:<width$}  {}",
                marker(state),
                entry.title(),
                state,
            );
            println!("{}", paint(&line, state));

            if !narrow && !entry.matched().is_empty() {
                let matched: Vec<_> = entry.matched().iter().map(ToString::to_string).collect();
                println!("    {}", matched.join(", ").dim());
            }
        }

        println!();
        if major.is_complete() {
            println!("{}", "All requirements fulfilled.".success());
        } else {
            let outstanding = major
                .requirements()
                .iter()
                .filter(|entry| !entry.fulfillment().is_satisfied())
                .count();
            println!(
                "{}",
                format!("{outstanding} requirement(s) outstanding.").warning()
            );
        }
    }

    fn output_loads(loads: &[(&str, Load)]) {
        if loads.is_empty() {
            return;
        }

        println!();
        println!("Credit load");
        let width = loads.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        for (name, load) in loads {
            let mut line = format!("  {name:<width$}  {:>2} hours", load.hours);
            if !load.unrated.is_empty() {
                line.push_str(&format!(" (+{} unrated)", load.unrated.len()));
            }
            match load.warning {
                Some(warning) => println!("{}", format!("{line}  {warning}").warning()),
                None => println!("{line}"),
            }
        }
    }
}
