//! Time simulation of one candidate tour against windows and the shift.

use courier_core::{
    CourierProfile, DeliveryPoint, DistanceMatrix, Leg, Rejection, RouteSummary,
    ServiceTimeBinding, Shift, Stop, TimeOfDay, travel_seconds,
};

use crate::CandidateTour;

/// Timing of a feasible tour.
///
/// `finish` is the shift start plus `drive_seconds + wait_seconds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeline {
    /// Length of the whole loop in kilometres.
    pub total_km: u32,
    /// Sum of the truncated per-edge travel times.
    pub drive_seconds: u32,
    /// Idle time before windows opened plus service time.
    pub wait_seconds: u32,
    /// When the courier is back at the origin.
    pub finish: TimeOfDay,
}

impl Timeline {
    /// Time from leaving the origin to returning.
    #[must_use]
    pub const fn total_seconds(&self) -> u32 {
        self.drive_seconds.saturating_add(self.wait_seconds)
    }
}

/// The first constraint a candidate broke, in matrix-node terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// Arrived at `node` after its window closed.
    WindowMissed {
        /// Matrix node of the missed point.
        node: usize,
        /// Arrival instant.
        arrival: TimeOfDay,
        /// Window closing instant.
        closes: TimeOfDay,
    },
    /// Returned to the origin after the shift ended.
    ShiftOverrun {
        /// Return instant.
        finish: TimeOfDay,
        /// End of the shift.
        shift_end: TimeOfDay,
    },
}

/// Result of simulating one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every window was met and the courier returned within the shift.
    Feasible(Timeline),
    /// The simulation stopped at the first broken constraint.
    Infeasible(Violation),
}

#[derive(Debug, Clone, Copy)]
struct StopPlan {
    id: u64,
    opens: TimeOfDay,
    closes: TimeOfDay,
    service_seconds: u32,
}

/// Walks candidate tours through the courier's day.
///
/// Travel times are computed once per matrix cell on construction and
/// delivery windows are anchored on the shift's timeline, so
/// [`simulate`](Self::simulate) is integer-only.
#[derive(Debug, Clone)]
pub struct Simulator {
    shift: Shift,
    order: usize,
    travel: Vec<u32>,
    stops: Vec<StopPlan>,
    service_by_position: Vec<u32>,
    binding: ServiceTimeBinding,
}

impl Simulator {
    /// Prepare a simulator for `points`, which must be in matrix node order
    /// (point `k` is node `k + 1`).
    ///
    /// Missing service-time entries count as zero minutes.
    #[must_use]
    pub fn new(
        courier: &CourierProfile,
        points: &[DeliveryPoint],
        matrix: &DistanceMatrix,
        binding: ServiceTimeBinding,
    ) -> Self {
        let shift = courier.shift;
        let service_by_position: Vec<u32> = (0..points.len())
            .map(|index| courier.service_seconds(index).unwrap_or_default())
            .collect();
        let stops = points
            .iter()
            .zip(&service_by_position)
            .map(|(point, service_seconds)| {
                let (opens, closes) = shift.anchor_window(point.window);
                StopPlan {
                    id: point.id,
                    opens,
                    closes,
                    service_seconds: *service_seconds,
                }
            })
            .collect();
        Self {
            shift,
            order: matrix.order(),
            travel: matrix.map_cells(|km| travel_seconds(km, courier.speed_kmh)),
            stops,
            service_by_position,
            binding,
        }
    }

    /// Simulate `tour` from the start of the shift.
    ///
    /// Stops at the first missed window; otherwise drives home and checks
    /// the shift end.
    #[must_use]
    pub fn simulate(&self, tour: &CandidateTour<'_>) -> Outcome {
        let mut clock = self.shift.start();
        let mut drive_seconds = 0_u32;
        let mut wait_seconds = 0_u32;
        let mut from = 0;

        for (position, &node) in tour.order().iter().enumerate() {
            let leg = self.travel_seconds(from, node);
            drive_seconds = drive_seconds.saturating_add(leg);
            let arrival = clock.plus_seconds(leg);

            let Some(stop) = self.stop(node) else {
                return Outcome::Infeasible(Violation::WindowMissed {
                    node,
                    arrival,
                    closes: TimeOfDay::MIDNIGHT,
                });
            };
            if arrival > stop.closes {
                return Outcome::Infeasible(Violation::WindowMissed {
                    node,
                    arrival,
                    closes: stop.closes,
                });
            }

            let idle = arrival.seconds_until(stop.opens);
            let service = match self.binding {
                ServiceTimeBinding::VisitPosition => self
                    .service_by_position
                    .get(position)
                    .copied()
                    .unwrap_or_default(),
                ServiceTimeBinding::PointIdentity => stop.service_seconds,
            };
            let stay = idle.saturating_add(service);
            wait_seconds = wait_seconds.saturating_add(stay);
            clock = arrival.plus_seconds(stay);
            from = node;
        }

        let home = self.travel_seconds(from, 0);
        drive_seconds = drive_seconds.saturating_add(home);
        let finish = clock.plus_seconds(home);
        if finish > self.shift.end() {
            return Outcome::Infeasible(Violation::ShiftOverrun {
                finish,
                shift_end: self.shift.end(),
            });
        }
        Outcome::Feasible(Timeline {
            total_km: tour.total_km(),
            drive_seconds,
            wait_seconds,
            finish,
        })
    }

    /// Retain a feasible tour as a [`RouteSummary`].
    #[must_use]
    pub fn summarize(&self, tour: &CandidateTour<'_>, timeline: &Timeline) -> RouteSummary {
        RouteSummary {
            legs: tour
                .legs()
                .map(|(from, to, km)| Leg {
                    from: self.label(from),
                    to: self.label(to),
                    km,
                })
                .collect(),
            total_distance_km: timeline.total_km,
            drive_seconds: timeline.drive_seconds,
            wait_seconds: timeline.wait_seconds,
            total_seconds: timeline.total_seconds(),
            finish: timeline.finish,
        }
    }

    /// Describe why `tour` was rejected in point identifiers.
    #[must_use]
    pub fn rejection(&self, tour: &CandidateTour<'_>, violation: Violation) -> Rejection {
        let visit_order = self.visit_order(tour);
        match violation {
            Violation::WindowMissed {
                node,
                arrival,
                closes,
            } => Rejection::WindowMissed {
                visit_order,
                point_id: self.stop(node).map_or(0, |stop| stop.id),
                arrival,
                closes,
            },
            Violation::ShiftOverrun { finish, shift_end } => Rejection::ShiftOverrun {
                visit_order,
                finish,
                shift_end,
            },
        }
    }

    /// Point identifiers of `tour` in visit order.
    #[must_use]
    pub fn visit_order(&self, tour: &CandidateTour<'_>) -> Vec<u64> {
        tour.order()
            .iter()
            .filter_map(|node| self.stop(*node).map(|stop| stop.id))
            .collect()
    }

    fn stop(&self, node: usize) -> Option<&StopPlan> {
        node.checked_sub(1).and_then(|index| self.stops.get(index))
    }

    fn label(&self, node: usize) -> Stop {
        self.stop(node)
            .map_or(Stop::Origin, |stop| Stop::Point(stop.id))
    }

    fn travel_seconds(&self, from: usize, to: usize) -> u32 {
        self.travel
            .get(from.saturating_mul(self.order).saturating_add(to))
            .copied()
            .unwrap_or_else(|| {
                log::warn!(
                    "no travel time from node {from} to node {to}; treating the edge as unreachable"
                );
                debug_assert!(false, "no travel time from node {from} to node {to}");
                u32::MAX
            })
    }
}
