//! Summaries of simulated tours.
//!
//! A [`RouteSummary`] is what survives of a winning candidate once the
//! enumeration has moved on; a [`Rejection`] records why a candidate failed.

use std::fmt;

use crate::TimeOfDay;

/// A node on a tour: the courier's start or a delivery point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Stop {
    /// The courier's start, also the end of every tour.
    Origin,
    /// A delivery point, by identifier.
    Point(u64),
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Origin => f.write_str("origin"),
            Self::Point(id) => write!(f, "{id}"),
        }
    }
}

/// One directed edge of a tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Leg {
    /// Where the leg starts.
    pub from: Stop,
    /// Where the leg ends.
    pub to: Stop,
    /// Leg length in kilometres.
    pub km: u32,
}

/// A feasible tour's legs and timing.
///
/// `total_seconds` always equals `drive_seconds + wait_seconds`, and
/// `finish` is the shift start plus `total_seconds`.
///
/// # Examples
/// ```
/// use courier_core::{Leg, RouteSummary, Stop, TimeOfDay};
///
/// let summary = RouteSummary {
///     legs: vec![
///         Leg { from: Stop::Origin, to: Stop::Point(4), km: 10 },
///         Leg { from: Stop::Point(4), to: Stop::Origin, km: 10 },
///     ],
///     total_distance_km: 20,
///     drive_seconds: 1_200,
///     wait_seconds: 600,
///     total_seconds: 1_800,
///     finish: TimeOfDay::from_seconds(30_600),
/// };
/// assert_eq!(summary.visit_order().collect::<Vec<_>>(), vec![4]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RouteSummary {
    /// Every edge, return leg included.
    pub legs: Vec<Leg>,
    /// Sum of all leg lengths.
    pub total_distance_km: u32,
    /// Time spent driving.
    pub drive_seconds: u32,
    /// Time spent idle before windows opened plus service time.
    pub wait_seconds: u32,
    /// Time from leaving the origin to returning.
    pub total_seconds: u32,
    /// When the courier is back at the origin.
    pub finish: TimeOfDay,
}

impl RouteSummary {
    /// Delivery point identifiers in visit order.
    pub fn visit_order(&self) -> impl Iterator<Item = u64> + '_ {
        self.legs.iter().filter_map(|leg| match leg.to {
            Stop::Point(id) => Some(id),
            Stop::Origin => None,
        })
    }
}

/// Why a candidate tour was infeasible.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Rejection {
    /// The courier reached a point after its window closed.
    WindowMissed {
        /// Point identifiers in the candidate's visit order.
        visit_order: Vec<u64>,
        /// The point whose window was missed.
        point_id: u64,
        /// When the courier would have arrived.
        arrival: TimeOfDay,
        /// When the window closed.
        closes: TimeOfDay,
    },
    /// The courier would return to the origin after the shift ends.
    ShiftOverrun {
        /// Point identifiers in the candidate's visit order.
        visit_order: Vec<u64>,
        /// When the courier would be back.
        finish: TimeOfDay,
        /// End of the shift.
        shift_end: TimeOfDay,
    },
}

impl Rejection {
    /// Point identifiers of the rejected candidate, in visit order.
    pub fn visit_order(&self) -> &[u64] {
        match self {
            Self::WindowMissed { visit_order, .. } | Self::ShiftOverrun { visit_order, .. } => {
                visit_order
            }
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[origin]")?;
        for id in self.visit_order() {
            write!(f, " => [{id}]")?;
        }
        match self {
            Self::WindowMissed {
                point_id,
                arrival,
                closes,
                ..
            } => write!(
                f,
                ": arrived at point [{point_id}] at {arrival} instead of {closes}"
            ),
            Self::ShiftOverrun {
                finish, shift_end, ..
            } => write!(
                f,
                ": returned to origin at {finish} instead of {shift_end}"
            ),
        }
    }
}
