#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

//! Behavioural tests for `ExhaustivePlanner` using rstest-bdd.

use std::cell::RefCell;

use courier_core::test_support::{courier, hm, point_with_window};
use courier_core::{
    CourierProfile, DeliveryPoint, MemoryStore, Objective, PlanError, PlanResponse, Rejection,
    RoutePlanner,
};
use courier_solver_exhaustive::{ExhaustivePlanner, ExhaustivePlannerConfig};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

const TEN_KM_EAST: f64 = 0.09;

#[derive(Debug)]
struct PlannerWorld {
    courier: RefCell<CourierProfile>,
    points: RefCell<Vec<DeliveryPoint>>,
    outcome: RefCell<Option<Result<PlanResponse, PlanError>>>,
}

impl PlannerWorld {
    fn new() -> Self {
        Self {
            courier: RefCell::new(courier(0.0, 0.0, 60.0, (8, 0), (18, 0), Vec::new())),
            points: RefCell::new(Vec::new()),
            outcome: RefCell::new(None),
        }
    }

    fn expect_outcome(&self) -> Result<PlanResponse, PlanError> {
        self.outcome
            .borrow()
            .as_ref()
            .cloned()
            .expect("outcome should be recorded before assertions")
    }

    fn add_point(&self, point: DeliveryPoint, service_minutes: u32) {
        self.points.borrow_mut().push(point);
        self.courier
            .borrow_mut()
            .service_minutes
            .push(service_minutes);
    }
}

#[fixture]
fn world() -> PlannerWorld {
    PlannerWorld::new()
}

#[given("a courier at the origin driving 60 km/h from 08:00 to 18:00")]
fn given_day_courier(world: &PlannerWorld) {
    world
        .courier
        .replace(courier(0.0, 0.0, 60.0, (8, 0), (18, 0), Vec::new()));
}

#[given("a courier at the origin who does not move")]
fn given_stationary_courier(world: &PlannerWorld) {
    world
        .courier
        .replace(courier(0.0, 0.0, 0.0, (8, 0), (18, 0), Vec::new()));
}

#[given("one delivery point 10 km away open from 08:30 to 09:30 needing 10 minutes")]
fn given_reachable_point(world: &PlannerWorld) {
    world.add_point(
        point_with_window(1, TEN_KM_EAST, 0.0, (8, 30), (9, 30)),
        10,
    );
}

#[given("one delivery point 10 km away open from 08:00 to 08:05 needing 10 minutes")]
fn given_tight_point(world: &PlannerWorld) {
    world.add_point(point_with_window(1, TEN_KM_EAST, 0.0, (8, 0), (8, 5)), 10);
}

#[given("no delivery points")]
fn given_no_points(world: &PlannerWorld) {
    world.points.replace(Vec::new());
}

#[when("the exhaustive planner runs")]
fn when_planner_runs(world: &PlannerWorld) {
    let store = MemoryStore::with_points(world.points.borrow().clone());
    let config = ExhaustivePlannerConfig {
        record_rejections: true,
        ..ExhaustivePlannerConfig::default()
    };
    let planner = ExhaustivePlanner::with_config(store, config);
    let outcome = planner.plan(&world.courier.borrow());
    world.outcome.replace(Some(outcome));
}

#[then("every objective picks the tour through that point")]
fn then_single_tour(world: &PlannerWorld) {
    let response = world.expect_outcome().expect("expected plan success");
    for objective in Objective::ALL {
        let best = response.best(objective).expect("feasible tour");
        assert_eq!(best.visit_order().collect::<Vec<_>>(), vec![1]);
    }
}

#[then("the tour drives for 1200 seconds")]
fn then_drive_time(world: &PlannerWorld) {
    let response = world.expect_outcome().expect("expected plan success");
    let best = response.best_finish.expect("feasible tour");
    assert_eq!(best.drive_seconds, 1_200);
    assert_eq!(best.wait_seconds, 1_800);
    assert_eq!(best.finish, hm(8, 50));
}

#[then("no objective has a feasible route")]
fn then_no_route(world: &PlannerWorld) {
    let response = world.expect_outcome().expect("expected plan success");
    assert!(!response.has_feasible_route());
    assert!(Objective::ALL.iter().all(|o| response.best(*o).is_none()));
}

#[then("the missed window is reported")]
fn then_window_reported(world: &PlannerWorld) {
    let response = world.expect_outcome().expect("expected plan success");
    let rejection = response.rejections.first().expect("one rejection");
    assert!(matches!(
        rejection,
        Rejection::WindowMissed { point_id: 1, .. }
    ));
    assert_eq!(
        rejection.to_string(),
        "[origin] => [1]: arrived at point [1] at 08:10:00 instead of 08:05:00"
    );
}

#[then("planning fails with an invalid speed")]
fn then_invalid_speed(world: &PlannerWorld) {
    let err = world
        .expect_outcome()
        .expect_err("expected InvalidSpeed error");
    assert!(matches!(err, PlanError::InvalidSpeed { .. }));
}

#[then("the only tour stays at the origin")]
fn then_trivial_tour(world: &PlannerWorld) {
    let response = world.expect_outcome().expect("expected plan success");
    assert_eq!(response.diagnostics.candidates_evaluated, 1);
    let best = response.best_distance.expect("trivial tour");
    assert!(best.legs.is_empty());
    assert_eq!(best.total_distance_km, 0);
    assert_eq!(best.wait_seconds, 0);
    assert_eq!(best.finish, hm(8, 0));
}

#[scenario(path = "tests/features/exhaustive_planner.feature", index = 0)]
fn reachable_point(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/exhaustive_planner.feature", index = 1)]
fn missed_window(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/exhaustive_planner.feature", index = 2)]
fn stationary_courier(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/exhaustive_planner.feature", index = 3)]
fn no_points(world: PlannerWorld) {
    let _ = world;
}
