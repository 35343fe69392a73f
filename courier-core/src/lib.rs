//! Core domain types for the courier route engine.
//!
//! Times are seconds since midnight, distances are whole kilometres and
//! locations use `geo` coordinates with `x` as longitude and `y` as
//! latitude. Planning itself lives behind the [`RoutePlanner`] trait so
//! the search strategy can be swapped without touching callers.

mod courier;
pub mod distance;
mod planner;
mod point;
mod route;
mod store;
mod time;

pub use courier::{CourierProfile, ServiceTimeBinding};
pub use distance::{
    DistanceMatrix, DistanceModel, EARTH_RADIUS_METRES, GraphBuilder, Haversine, MatrixError,
    travel_seconds,
};
pub use planner::{Diagnostics, Objective, PlanError, PlanResponse, RoutePlanner};
pub use point::{DeliveryPoint, DeliveryWindow};
pub use route::{Leg, Rejection, RouteSummary, Stop};
pub use store::{DeliveryPointStore, MemoryStore};
pub use time::{SECONDS_PER_DAY, Shift, TimeOfDay, TimeOfDayError};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
