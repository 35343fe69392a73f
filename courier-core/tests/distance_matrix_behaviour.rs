use courier_core::{
    DeliveryPoint, DeliveryPointStore, DeliveryWindow, DistanceMatrix, GraphBuilder, MemoryStore,
    TimeOfDay,
};
use geo::Coord;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

thread_local! {
    static STORE: RefCell<MemoryStore> = RefCell::new(MemoryStore::default());
    static MATRIX: RefCell<Option<DistanceMatrix>> = const { RefCell::new(None) };
}

const ORIGIN: Coord<f64> = Coord { x: 0.0, y: 0.0 };

fn point(id: u64, longitude: f64) -> DeliveryPoint {
    let window = DeliveryWindow::new(TimeOfDay::MIDNIGHT, TimeOfDay::from_seconds(86_399));
    DeliveryPoint::new(id, Coord { x: longitude, y: 0.0 }, window)
}

fn with_matrix<T>(check: impl FnOnce(&DistanceMatrix) -> T) -> T {
    MATRIX.with(|cell| {
        let matrix = cell.borrow();
        check(matrix.as_ref().expect("matrix built"))
    })
}

#[given("delivery points 10 km east and 10 km west of the origin")]
fn two_points() {
    let store = MemoryStore::with_points([point(1, 0.09), point(2, -0.09)]);
    STORE.with(|cell| cell.replace(store));
}

#[given("no delivery points")]
fn no_points() {
    STORE.with(|cell| cell.replace(MemoryStore::default()));
}

#[when("I build the distance matrix")]
fn build_matrix() {
    let points: Vec<DeliveryPoint> = STORE.with(|cell| cell.borrow().list_all().collect());
    let matrix = GraphBuilder::new().build(ORIGIN, &points);
    MATRIX.with(|cell| cell.replace(Some(matrix)));
}

#[then("the matrix covers the origin and both points")]
fn covers_both_points() {
    with_matrix(|matrix| {
        assert_eq!(matrix.order(), 3);
        assert_eq!(matrix.point_count(), 2);
    });
}

#[then("each point is 10 km from the origin")]
fn points_ten_km_out() {
    with_matrix(|matrix| {
        for node in 1..=2 {
            assert_eq!(matrix.get(0, node), Some(10));
            assert_eq!(matrix.get(node, 0), Some(10));
        }
    });
}

#[then("the points are 20 km apart")]
fn points_twenty_km_apart() {
    with_matrix(|matrix| {
        assert_eq!(matrix.get(1, 2), Some(20));
        assert_eq!(matrix.get(2, 1), Some(20));
    });
}

#[then("the matrix holds only the origin")]
fn only_origin() {
    with_matrix(|matrix| {
        assert_eq!(matrix.order(), 1);
        assert_eq!(matrix.point_count(), 0);
        assert_eq!(matrix.get(0, 0), Some(0));
    });
}

#[scenario(path = "tests/features/distance_matrix.feature", index = 0)]
fn points_either_side_of_origin() {}

#[scenario(path = "tests/features/distance_matrix.feature", index = 1)]
fn empty_snapshot() {}
