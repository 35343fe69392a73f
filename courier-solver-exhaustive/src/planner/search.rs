//! The enumeration loop, serial or partitioned by first visited point.

use std::time::{Duration, Instant};

use courier_core::{DistanceMatrix, PlanError, PlanResponse, Rejection};
use log::{Level, debug, log_enabled};
use rayon::prelude::*;

use crate::{Outcome, Selector, Simulator, TourEnumerator};

/// Candidates simulated between deadline checks.
const DEADLINE_CHECK_INTERVAL: u64 = 1_024;

/// What one enumeration pass produced.
#[derive(Debug, Default)]
pub(super) struct Tally {
    selector: Selector,
    evaluated: u64,
    rejections: Vec<Rejection>,
}

impl Tally {
    pub(super) const fn evaluated(&self) -> u64 {
        self.evaluated
    }

    fn merge(&mut self, later: Self) {
        self.selector.merge(later.selector);
        self.evaluated = self.evaluated.saturating_add(later.evaluated);
        self.rejections.extend(later.rejections);
    }

    pub(super) fn into_response(self, solve_time: Duration) -> PlanResponse {
        let mut response = self.selector.into_response();
        response.diagnostics.solve_time = solve_time;
        response.diagnostics.candidates_evaluated = self.evaluated;
        response.rejections = self.rejections;
        response
    }
}

pub(super) struct Search<'a> {
    pub(super) matrix: &'a DistanceMatrix,
    pub(super) simulator: &'a Simulator,
    pub(super) started_at: Instant,
    pub(super) time_limit: Option<Duration>,
    pub(super) record_rejections: bool,
}

impl Search<'_> {
    /// One pass over every ordering.
    pub(super) fn serial(&self) -> Result<Tally, PlanError> {
        self.run(TourEnumerator::new(self.matrix))
    }

    /// One pass per first visited point on the rayon pool, merged in
    /// first-point order.
    ///
    /// When the deadline trips, the reported count covers every partition.
    pub(super) fn partitioned(&self) -> Result<Tally, PlanError> {
        let partials: Vec<Result<Tally, PlanError>> = (1..self.matrix.order())
            .into_par_iter()
            .map(|first| {
                TourEnumerator::starting_with(self.matrix, first)
                    .map_or_else(|| Ok(Tally::default()), |tours| self.run(tours))
            })
            .collect();
        let mut merged = Tally::default();
        let mut exceeded = None;
        for partial in partials {
            match partial {
                Ok(tally) => merged.merge(tally),
                Err(PlanError::TimeLimitExceeded { evaluated, limit }) => {
                    merged.evaluated = merged.evaluated.saturating_add(evaluated);
                    exceeded = Some(limit);
                }
                Err(other) => return Err(other),
            }
        }
        match exceeded {
            Some(limit) => Err(PlanError::TimeLimitExceeded {
                evaluated: merged.evaluated,
                limit,
            }),
            None => Ok(merged),
        }
    }

    fn run(&self, mut tours: TourEnumerator<'_>) -> Result<Tally, PlanError> {
        let mut tally = Tally::default();
        while let Some(tour) = tours.next_tour() {
            tally.evaluated = tally.evaluated.saturating_add(1);
            match self.simulator.simulate(&tour) {
                Outcome::Feasible(timeline) => tally
                    .selector
                    .offer(&timeline, || self.simulator.summarize(&tour, &timeline)),
                Outcome::Infeasible(violation) => {
                    if self.record_rejections || log_enabled!(Level::Debug) {
                        let rejection = self.simulator.rejection(&tour, violation);
                        debug!("rejected {rejection}");
                        if self.record_rejections {
                            tally.rejections.push(rejection);
                        }
                    }
                }
            }
            if tally.evaluated.is_multiple_of(DEADLINE_CHECK_INTERVAL) {
                self.check_deadline(tally.evaluated)?;
            }
        }
        Ok(tally)
    }

    fn check_deadline(&self, evaluated: u64) -> Result<(), PlanError> {
        match self.time_limit {
            Some(limit) if self.started_at.elapsed() > limit => {
                Err(PlanError::TimeLimitExceeded { evaluated, limit })
            }
            _ => Ok(()),
        }
    }
}
