//! Command-line interface for the geozone safety-zone walkthrough.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};

mod demo;
mod error;

pub use error::CliError;

use demo::{DemoArgs, run_demo_with};

const ARG_PROJECTED_CRS: &str = "projected-crs";
const ARG_RADIUS_METERS: &str = "radius-meters";
const ARG_ZONE_NAME: &str = "zone-name";
const ARG_INDENT: &str = "indent";
const ENV_RADIUS_METERS: &str = "GEOZONE_CMDS_DEMO_RADIUS_METERS";
const ENV_INDENT: &str = "GEOZONE_CMDS_DEMO_INDENT";

/// Run the geozone CLI with the current process arguments and environment.
///
/// Logging is initialised here, once, before any work is done.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();
    let mut stdout = std::io::stdout().lock();
    run_with(cli.command, &mut stdout)
}

fn run_with(command: Option<Command>, writer: &mut dyn Write) -> Result<(), CliError> {
    match command.unwrap_or_default() {
        Command::Demo(args) => run_demo_with(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "geozone",
    about = "Build a metric safety zone around a landmark and publish it as GeoJSON",
    version
)]
struct Cli {
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the Yamashita Park walkthrough (the default).
    Demo(DemoArgs),
}

impl Default for Command {
    fn default() -> Self {
        Self::Demo(DemoArgs::default())
    }
}

#[cfg(test)]
mod tests;
