//! `ExhaustivePlanner`: validation, matrix construction and the search.

mod search;

use std::time::{Duration, Instant};

use courier_core::{
    CourierProfile, DeliveryPoint, DeliveryPointStore, DistanceModel, GraphBuilder, Haversine,
    PlanError, PlanResponse, RoutePlanner, ServiceTimeBinding,
};

use crate::{DEFAULT_MAX_CANDIDATES, Simulator, Validator};
use search::Search;

/// Configuration for [`ExhaustivePlanner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExhaustivePlannerConfig {
    /// Refuse to plan when `n!` exceeds this many candidate tours.
    pub max_candidates: u64,
    /// Spread the search over the rayon pool, one partition per first
    /// visited point.
    pub parallel: bool,
    /// Abort once planning has run this long.
    pub time_limit: Option<Duration>,
    /// Keep a [`Rejection`](courier_core::Rejection) for every infeasible
    /// candidate in the response.
    pub record_rejections: bool,
    /// How service times map onto stops.
    pub service_time_binding: ServiceTimeBinding,
}

impl Default for ExhaustivePlannerConfig {
    fn default() -> Self {
        Self {
            max_candidates: DEFAULT_MAX_CANDIDATES,
            parallel: false,
            time_limit: None,
            record_rejections: false,
            service_time_binding: ServiceTimeBinding::default(),
        }
    }
}

/// Plans by simulating every ordering of the delivery points.
///
/// The planner snapshots the store once per call, validates the courier
/// against it, builds the distance matrix and then enumerates all `n!`
/// candidate tours in lexicographic order. Winners are identical whether
/// the search runs serially or in parallel.
///
/// # Examples
/// ```
/// use courier_core::test_support::{courier, point_with_window};
/// use courier_core::{MemoryStore, RoutePlanner};
/// use courier_solver_exhaustive::ExhaustivePlanner;
///
/// let store = MemoryStore::with_point(point_with_window(1, 0.09, 0.0, (8, 30), (9, 30)));
/// let planner = ExhaustivePlanner::new(store);
/// let response = planner.plan(&courier(0.0, 0.0, 60.0, (8, 0), (18, 0), vec![10]))?;
///
/// let best = response.best_distance.expect("one feasible tour");
/// assert_eq!(best.total_distance_km, 20);
/// assert_eq!(best.drive_seconds, 1_200);
/// # Ok::<(), courier_core::PlanError>(())
/// ```
pub struct ExhaustivePlanner<S, M = Haversine>
where
    S: DeliveryPointStore,
    M: DistanceModel,
{
    store: S,
    graph: GraphBuilder<M>,
    config: ExhaustivePlannerConfig,
}

impl<S: DeliveryPointStore> ExhaustivePlanner<S> {
    /// Construct a planner using default configuration.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_config(store, ExhaustivePlannerConfig::default())
    }

    /// Construct a planner with explicit configuration.
    #[must_use]
    pub const fn with_config(store: S, config: ExhaustivePlannerConfig) -> Self {
        Self {
            store,
            graph: GraphBuilder::new(),
            config,
        }
    }
}

impl<S, M> ExhaustivePlanner<S, M>
where
    S: DeliveryPointStore,
    M: DistanceModel,
{
    /// Construct a planner measuring distances with `model`.
    #[must_use]
    pub const fn with_model(store: S, model: M, config: ExhaustivePlannerConfig) -> Self {
        Self {
            store,
            graph: GraphBuilder::with_model(model),
            config,
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &ExhaustivePlannerConfig {
        &self.config
    }
}

impl<S, M> RoutePlanner for ExhaustivePlanner<S, M>
where
    S: DeliveryPointStore + Send + Sync,
    M: DistanceModel + Send + Sync,
{
    fn plan(&self, courier: &CourierProfile) -> Result<PlanResponse, PlanError> {
        let started_at = Instant::now();
        let points: Vec<DeliveryPoint> = self.store.list_all().collect();

        let candidates = Validator::new(self.graph.model(), self.config.max_candidates)
            .check(courier, &points)
            .inspect_err(|err| log::warn!("planning aborted before enumeration: {err}"))?;
        log::debug!(
            "enumerating {candidates} candidate tours over {} delivery points",
            points.len()
        );

        let matrix = self.graph.build(courier.start, &points);
        let simulator = Simulator::new(
            courier,
            &points,
            &matrix,
            self.config.service_time_binding,
        );
        let search = Search {
            matrix: &matrix,
            simulator: &simulator,
            started_at,
            time_limit: self.config.time_limit,
            record_rejections: self.config.record_rejections,
        };
        let outcome = if self.config.parallel && points.len() > 1 {
            search.partitioned()
        } else {
            search.serial()
        };
        let tally = outcome.inspect_err(|err| log::warn!("planning aborted: {err}"))?;
        debug_assert_eq!(tally.evaluated(), candidates);

        let response = tally.into_response(started_at.elapsed());
        log::info!(
            "evaluated {} candidate tours in {:?}: {} feasible",
            response.diagnostics.candidates_evaluated,
            response.diagnostics.solve_time,
            response.diagnostics.feasible_candidates,
        );
        Ok(response)
    }
}
