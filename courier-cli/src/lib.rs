//! Command-line interface for the courier route engine.
//!
//! `courier plan` loads a courier profile and a delivery point snapshot,
//! runs the exhaustive planner and prints the winning route for each
//! objective. `courier points` lists the snapshot.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

mod error;
mod fs;
mod input;
mod plan;
mod points;
mod report;

pub use error::CliError;
use plan::{PlanArgs, run_plan};
use points::{PointsArgs, run_points};

pub(crate) const ARG_PLAN_PROFILE: &str = "profile";
pub(crate) const ARG_POINTS: &str = "points";
pub(crate) const ARG_PLAN_PARALLEL: &str = "parallel";
pub(crate) const ARG_PLAN_MAX_CANDIDATES: &str = "max-candidates";
pub(crate) const ARG_PLAN_TIME_LIMIT: &str = "time-limit-secs";
pub(crate) const ARG_PLAN_SERVICE_TIME_BINDING: &str = "service-time-binding";
pub(crate) const ARG_PLAN_DIAGNOSTICS: &str = "diagnostics";
pub(crate) const ARG_FORMAT: &str = "format";
pub(crate) const ENV_PLAN_PROFILE: &str = "COURIER_CMDS_PLAN_PROFILE_PATH";
pub(crate) const ENV_PLAN_POINTS: &str = "COURIER_CMDS_PLAN_POINTS";
pub(crate) const ENV_POINTS_POINTS: &str = "COURIER_CMDS_POINTS_POINTS";

/// Run the courier CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    init_logging(cli.verbose);
    match cli.command {
        Command::Plan(args) => run_plan(args),
        Command::Points(args) => run_points(args),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    // The first subscriber installed stays in charge.
    if let Err(err) = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
    {
        log::debug!("keeping the existing log subscriber: {err}");
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "courier",
    about = "Plan single-courier delivery routes under time windows",
    version
)]
struct Cli {
    /// Log every rejected candidate tour.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Find the best tours by distance, waiting and finish time.
    Plan(PlanArgs),
    /// List the delivery points in a snapshot.
    Points(PointsArgs),
}

/// Output encoding shared by every subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

#[cfg(test)]
mod tests;
