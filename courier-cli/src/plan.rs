//! Plan command implementation for the courier CLI.

use std::io::Write;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use courier_core::{MemoryStore, RoutePlanner, ServiceTimeBinding};
use courier_solver_exhaustive::{DEFAULT_MAX_CANDIDATES, ExhaustivePlanner, ExhaustivePlannerConfig};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::input::{load_courier, load_points};
use crate::report::write_plan_report;
use crate::{
    ARG_PLAN_DIAGNOSTICS, ARG_FORMAT, ARG_PLAN_MAX_CANDIDATES, ARG_PLAN_PARALLEL,
    ARG_PLAN_PROFILE, ARG_PLAN_SERVICE_TIME_BINDING, ARG_PLAN_TIME_LIMIT, ARG_POINTS, CliError,
    ENV_PLAN_POINTS, ENV_PLAN_PROFILE, OutputFormat,
};

/// Which stop a `spend_time` entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum BindingArg {
    /// The i-th visited stop uses the i-th entry.
    Position,
    /// The k-th entry belongs to the k-th point in the snapshot.
    Point,
}

impl From<BindingArg> for ServiceTimeBinding {
    fn from(arg: BindingArg) -> Self {
        match arg {
            BindingArg::Position => Self::VisitPosition,
            BindingArg::Point => Self::PointIdentity,
        }
    }
}

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "plan",
    long_about = "Plan delivery routes for one courier by simulating every \
                 visiting order of the delivery points. The courier profile \
                 and the point snapshot are JSON files; tuning knobs can come \
                 from CLI flags, configuration files, or environment variables.",
    about = "Plan the best delivery routes for a courier"
)]
#[ortho_config(prefix = "COURIER")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing the courier profile.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) profile_path: Option<Utf8PathBuf>,
    /// Path to a JSON file containing the delivery point snapshot.
    #[arg(long = ARG_POINTS, value_name = "path")]
    #[serde(default)]
    pub(crate) points: Option<Utf8PathBuf>,
    /// Partition the search by first visited point and run it on all cores.
    #[arg(
        long = ARG_PLAN_PARALLEL,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) parallel: Option<bool>,
    /// Refuse to plan when the number of orderings exceeds this.
    #[arg(long = ARG_PLAN_MAX_CANDIDATES, value_name = "count")]
    #[serde(default)]
    pub(crate) max_candidates: Option<u64>,
    /// Abort planning after this many seconds.
    #[arg(long = ARG_PLAN_TIME_LIMIT, value_name = "seconds")]
    #[serde(default)]
    pub(crate) time_limit_secs: Option<u64>,
    /// How `spend_time` entries map onto stops.
    #[arg(long = ARG_PLAN_SERVICE_TIME_BINDING, value_enum)]
    #[serde(default)]
    pub(crate) service_time_binding: Option<BindingArg>,
    /// Print one line per rejected candidate tour.
    #[arg(
        long = ARG_PLAN_DIAGNOSTICS,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) diagnostics: Option<bool>,
    /// Report encoding.
    #[arg(long = ARG_FORMAT, value_enum)]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    /// Path to the courier profile JSON.
    pub(crate) profile_path: Utf8PathBuf,
    /// Path to the delivery point snapshot JSON.
    pub(crate) points: Utf8PathBuf,
    /// Planner knobs.
    pub(crate) planner: ExhaustivePlannerConfig,
    /// Whether rejected tours are listed.
    pub(crate) diagnostics: bool,
    pub(crate) format: OutputFormat,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.profile_path, ARG_PLAN_PROFILE)?;
        require_existing(&self.points, ARG_POINTS)?;
        Ok(())
    }
}

/// Checks that `path` names a regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match crate::fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let profile_path = args.profile_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_PROFILE,
            env: ENV_PLAN_PROFILE,
        })?;
        let points = args.points.ok_or(CliError::MissingArgument {
            field: ARG_POINTS,
            env: ENV_PLAN_POINTS,
        })?;
        let diagnostics = args.diagnostics.unwrap_or(false);
        let planner = ExhaustivePlannerConfig {
            max_candidates: args.max_candidates.unwrap_or(DEFAULT_MAX_CANDIDATES),
            parallel: args.parallel.unwrap_or(false),
            time_limit: args.time_limit_secs.map(Duration::from_secs),
            record_rejections: diagnostics,
            service_time_binding: args
                .service_time_binding
                .map(ServiceTimeBinding::from)
                .unwrap_or_default(),
        };

        Ok(Self {
            profile_path,
            points,
            planner,
            diagnostics,
            format: args.format.unwrap_or_default(),
        })
    }
}

/// Builds a planner for the current plan invocation.
pub(super) trait PlannerBuilder {
    fn build(&self, store: MemoryStore, config: &PlanConfig) -> Box<dyn RoutePlanner>;
}

pub(super) struct DefaultPlannerBuilder;

impl PlannerBuilder for DefaultPlannerBuilder {
    fn build(&self, store: MemoryStore, config: &PlanConfig) -> Box<dyn RoutePlanner> {
        Box::new(ExhaustivePlanner::with_config(store, config.planner.clone()))
    }
}

pub(super) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &DefaultPlannerBuilder, &mut stdout)
}

pub(super) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn PlannerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_plan_config(args)?;
    let courier = load_courier(&config.profile_path, ARG_PLAN_PROFILE)?;
    let store = load_points(&config.points, ARG_POINTS)?;
    log::info!(
        "planning {} delivery point(s) from {}",
        store.len(),
        config.points
    );
    let planner = builder.build(store, &config);
    let response = planner
        .plan(&courier)
        .map_err(|source| CliError::Plan { source })?;
    write_plan_report(writer, &response, config.format, config.diagnostics)
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
