//! Command-line interface definitions.

pub mod output;
pub mod solve;
pub mod strategies;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Loopsmith - leveraged yield strategy resolution.
#[derive(Parser, Debug)]
#[command(name = "loopsmith")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the strategy book against a catalog snapshot
    Solve(SolveArgs),

    /// Inspect strategy shapes
    #[command(subcommand)]
    Strategies(StrategiesCommand),
}

/// Subcommands for `loopsmith strategies`
#[derive(Subcommand, Debug)]
pub enum StrategiesCommand {
    /// List available strategy shapes
    List,
}

/// Arguments for the `solve` subcommand.
#[derive(Parser, Debug)]
pub struct SolveArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Catalog snapshot: a JSON file path or an http(s) URL
    #[arg(long)]
    pub catalog: String,

    /// Override the configured principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Print the resolved action list for each solved strategy
    #[arg(long)]
    pub actions: bool,
}
