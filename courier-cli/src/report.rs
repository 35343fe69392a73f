//! Rendering of plan results as text or JSON.

use std::io::{self, Write};

use courier_core::{Objective, PlanResponse, RouteSummary, Stop};

use crate::{CliError, OutputFormat};

const SECONDS_PER_MINUTE: u32 = 60;
const MINUTES_PER_HOUR: u32 = 60;

/// Shown in place of a route when every candidate was infeasible.
pub(crate) const NO_FEASIBLE_ROUTE: &str = "no feasible route found";

pub(crate) fn write_plan_report(
    writer: &mut dyn Write,
    response: &PlanResponse,
    format: OutputFormat,
    diagnostics: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Text => {
            write_text_report(writer, response, diagnostics).map_err(CliError::WriteOutput)
        }
        OutputFormat::Json => {
            let payload =
                serde_json::to_string_pretty(response).map_err(CliError::SerializeReport)?;
            writeln!(writer, "{payload}").map_err(CliError::WriteOutput)
        }
    }
}

fn write_text_report(
    writer: &mut dyn Write,
    response: &PlanResponse,
    diagnostics: bool,
) -> io::Result<()> {
    for objective in Objective::ALL {
        match response.best(objective) {
            Some(route) => writeln!(writer, "{objective}: {}", render_route(route))?,
            None => writeln!(writer, "{objective}: {NO_FEASIBLE_ROUTE}")?,
        }
    }
    if diagnostics {
        let counters = response.diagnostics;
        writeln!(
            writer,
            "Evaluated {} candidate tour(s), {} feasible, in {:.3}s",
            counters.candidates_evaluated,
            counters.feasible_candidates,
            counters.solve_time.as_secs_f64()
        )?;
        for rejection in &response.rejections {
            writeln!(writer, "{rejection}")?;
        }
    }
    Ok(())
}

/// One-line rendering of a retained tour.
///
/// `[origin] =12km=> [3] =4km=> [origin] | Distance: 16 km. Time on the
/// road: 0h 30m. Time waiting: 0h 10m. Time driving: 0h 20m. Work finished
/// 08:30:00`
pub(crate) fn render_route(route: &RouteSummary) -> String {
    let hops: String = route
        .legs
        .iter()
        .map(|leg| format!(" ={}km=> [{}]", leg.km, leg.to))
        .collect();
    format!(
        "[{}]{hops} | Distance: {} km. Time on the road: {}. Time waiting: {}. \
         Time driving: {}. Work finished {}",
        Stop::Origin,
        route.total_distance_km,
        hours_minutes(route.total_seconds),
        hours_minutes(route.wait_seconds),
        hours_minutes(route.drive_seconds),
        route.finish,
    )
}

/// Formats a duration as `Hh Mm`, rounded to the nearest minute.
pub(crate) fn hours_minutes(seconds: u32) -> String {
    let minutes = seconds.saturating_add(SECONDS_PER_MINUTE / 2) / SECONDS_PER_MINUTE;
    format!(
        "{}h {}m",
        minutes / MINUTES_PER_HOUR,
        minutes % MINUTES_PER_HOUR
    )
}
