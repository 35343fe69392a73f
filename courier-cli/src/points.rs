//! Points command: list the delivery point snapshot.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use courier_core::{DeliveryPoint, DeliveryPointStore};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::input::{DeliveryPointRecord, load_points};
use crate::plan::require_existing;
use crate::{ARG_FORMAT, ARG_POINTS, CliError, ENV_POINTS_POINTS, OutputFormat};

/// CLI arguments for the `points` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(name = "points", about = "List the delivery points in a snapshot")]
#[ortho_config(prefix = "COURIER")]
pub(crate) struct PointsArgs {
    /// Path to a JSON file containing the delivery point snapshot.
    #[arg(long = ARG_POINTS, value_name = "path")]
    #[serde(default)]
    pub(crate) points: Option<Utf8PathBuf>,
    /// Listing encoding.
    #[arg(long = ARG_FORMAT, value_enum)]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
}

pub(super) fn run_points(args: PointsArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_points_with(args, &mut stdout)
}

pub(super) fn run_points_with(args: PointsArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let path = merged.points.ok_or(CliError::MissingArgument {
        field: ARG_POINTS,
        env: ENV_POINTS_POINTS,
    })?;
    require_existing(&path, ARG_POINTS)?;
    let store = load_points(&path, ARG_POINTS)?;
    let points: Vec<DeliveryPoint> = store.list_all().collect();
    log::debug!("listing {} delivery point(s) from {path}", points.len());

    match merged.format.unwrap_or_default() {
        OutputFormat::Text => write_listing(writer, &points).map_err(CliError::WriteOutput),
        OutputFormat::Json => {
            let records: Vec<DeliveryPointRecord> =
                points.iter().map(DeliveryPointRecord::from).collect();
            let payload =
                serde_json::to_string_pretty(&records).map_err(CliError::SerializeReport)?;
            writeln!(writer, "{payload}").map_err(CliError::WriteOutput)
        }
    }
}

fn write_listing(writer: &mut dyn Write, points: &[DeliveryPoint]) -> std::io::Result<()> {
    if points.is_empty() {
        return writeln!(writer, "no delivery points");
    }
    for point in points {
        writeln!(writer, "{}", describe_point(point))?;
    }
    Ok(())
}

/// `[7] latitude 52.5, longitude 13.4, open 08:30:00-09:30:00`
pub(crate) fn describe_point(point: &DeliveryPoint) -> String {
    format!(
        "[{}] latitude {}, longitude {}, open {}-{}",
        point.id,
        point.latitude(),
        point.longitude(),
        point.window.from,
        point.window.to
    )
}
