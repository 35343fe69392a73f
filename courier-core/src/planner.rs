use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::{CourierProfile, Rejection, RouteSummary, TimeOfDay};

/// One of the three ranking criteria for feasible tours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Objective {
    /// Minimum total distance.
    Distance,
    /// Minimum waiting (idle plus service) time.
    Wait,
    /// Earliest return to the origin.
    Finish,
}

impl Objective {
    /// All objectives in report order.
    pub const ALL: [Self; 3] = [Self::Distance, Self::Wait, Self::Finish];

    /// Human-readable heading.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Distance => "Shortest distance",
            Self::Wait => "Least waiting",
            Self::Finish => "Earliest finish",
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Counters describing a planning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Diagnostics {
    /// Wall-clock time spent planning.
    pub solve_time: Duration,
    /// Candidate tours simulated.
    pub candidates_evaluated: u64,
    /// Candidate tours that were feasible.
    pub feasible_candidates: u64,
}

/// Result of a successful planning run.
///
/// Each objective's winner is `None` when no candidate was feasible.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PlanResponse {
    /// Feasible tour with the least total distance.
    pub best_distance: Option<RouteSummary>,
    /// Feasible tour with the least waiting time.
    pub best_wait: Option<RouteSummary>,
    /// Feasible tour that returns earliest.
    pub best_finish: Option<RouteSummary>,
    /// Run counters.
    pub diagnostics: Diagnostics,
    /// Rejected candidates, recorded only when requested.
    pub rejections: Vec<Rejection>,
}

impl PlanResponse {
    /// The winner for `objective`, if any.
    pub const fn best(&self, objective: Objective) -> Option<&RouteSummary> {
        match objective {
            Objective::Distance => self.best_distance.as_ref(),
            Objective::Wait => self.best_wait.as_ref(),
            Objective::Finish => self.best_finish.as_ref(),
        }
    }

    /// Whether at least one candidate was feasible.
    pub const fn has_feasible_route(&self) -> bool {
        self.best_distance.is_some()
    }
}

/// Configuration problems that abort a run before any candidate is
/// simulated, plus the guard that stops a run overrunning its time budget.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// The courier's speed was zero, negative or not a number.
    #[error("courier speed must be > 0 km/h (got {speed})")]
    InvalidSpeed {
        /// Offending speed.
        speed: f64,
    },
    /// The service-time list did not have one entry per point.
    #[error("expected {points} service time(s), one per delivery point, but got {service_times}")]
    ServiceTimeCountMismatch {
        /// Number of delivery points.
        points: usize,
        /// Number of service-time entries.
        service_times: usize,
    },
    /// A point's window closes before it opens.
    #[error("delivery window of point [{point_id}] closes at {to} before it opens at {from}")]
    InvertedWindow {
        /// Offending point.
        point_id: u64,
        /// Window opening.
        from: TimeOfDay,
        /// Window closing.
        to: TimeOfDay,
    },
    /// The shift ends before the point's window opens.
    #[error("shift ends at {shift_end}, before point [{point_id}] opens at {window_from}")]
    ShiftEndsBeforeWindow {
        /// Offending point.
        point_id: u64,
        /// End of the shift.
        shift_end: TimeOfDay,
        /// Window opening.
        window_from: TimeOfDay,
    },
    /// The shift starts after the point's window closes.
    #[error("shift starts at {shift_start}, after point [{point_id}] closes at {window_to}")]
    ShiftStartsAfterWindow {
        /// Offending point.
        point_id: u64,
        /// Start of the shift.
        shift_start: TimeOfDay,
        /// Window closing.
        window_to: TimeOfDay,
    },
    /// Driving to the point and straight back takes longer than the shift.
    #[error(
        "distance to [{point_id}] is too far: a round trip takes {round_trip_seconds}s \
         but the shift lasts {shift_seconds}s"
    )]
    PointTooFar {
        /// Offending point.
        point_id: u64,
        /// Round-trip drive time.
        round_trip_seconds: u64,
        /// Shift length.
        shift_seconds: u32,
    },
    /// `n!` exceeds the configured candidate ceiling.
    #[error("{points} delivery points exceed the enumeration limit of {limit} candidate tours")]
    TooManyCandidates {
        /// Number of delivery points.
        points: usize,
        /// Configured ceiling.
        limit: u64,
    },
    /// The configured time limit elapsed mid-search.
    #[error("time limit of {limit:?} exceeded after {evaluated} candidate tours")]
    TimeLimitExceeded {
        /// Candidates simulated before stopping.
        evaluated: u64,
        /// Configured limit.
        limit: Duration,
    },
}

/// Plan the courier's tour over a store of delivery points.
///
/// Implementations must return a [`PlanError`] for invalid configuration
/// rather than panicking. Planners must be `Send + Sync` to operate safely
/// across threads.
pub trait RoutePlanner: Send + Sync {
    /// Plan a tour for `courier`.
    fn plan(&self, courier: &CourierProfile) -> Result<PlanResponse, PlanError>;
}
