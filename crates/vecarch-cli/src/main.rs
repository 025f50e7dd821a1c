//! `vecarch` - inspect the SIMD capabilities the probe reports on this machine.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vecarch_core::ProbeConfig;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "vecarch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Report a tag (and everything built on it) as unavailable. Repeatable.
    #[arg(long = "disable", value_name = "TAG", global = true)]
    disable: Vec<String>,

    /// TOML probe configuration, e.g. `disabled = ["avx512f"]`
    #[arg(long, value_name = "FILE", global = true, env = "VECARCH_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Table of every architecture tag and whether it is usable
    List {
        /// Only show usable tags
        #[arg(long)]
        available: bool,
    },
    /// Print the feature snapshot as JSON
    Json,
    /// Exit with status 0 if TAG is usable, 1 otherwise
    Check {
        /// Tag name, e.g. `avx2` or `fma3+avx`
        tag: String,
    },
    /// Print the most capable usable tag
    Best,
}

fn load_config(cli: &Cli) -> anyhow::Result<ProbeConfig> {
    let mut config = match &cli.config {
        Some(path) => ProbeConfig::from_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => ProbeConfig::from_env().context("invalid VECARCH_* environment")?,
    };
    config.disabled.extend(cli.disable.iter().cloned());
    Ok(config)
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let snapshot = vecarch_core::initialize(&config)?;
    tracing::debug!(disabled = ?config.disabled, "Probe configured");

    match cli.command {
        Command::List { available } => commands::list(&snapshot, available),
        Command::Json => commands::json(&snapshot),
        Command::Check { tag } => commands::check(&snapshot, &tag),
        Command::Best => commands::best(&snapshot),
    }
}
