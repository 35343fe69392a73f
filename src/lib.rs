//! Facade crate for the courier route engine.
//!
//! This crate re-exports the core domain types and, behind the default
//! `solver-exhaustive` feature, the planner that simulates every visiting
//! order of the delivery points.

#![forbid(unsafe_code)]

pub use courier_core::{
    CourierProfile, DeliveryPoint, DeliveryPointStore, DeliveryWindow, Diagnostics,
    DistanceMatrix, DistanceModel, GraphBuilder, Haversine, Leg, MemoryStore, Objective,
    PlanError, PlanResponse, Rejection, RoutePlanner, RouteSummary, ServiceTimeBinding, Shift,
    Stop, TimeOfDay, TimeOfDayError,
};

#[cfg(feature = "solver-exhaustive")]
pub use courier_solver_exhaustive::{ExhaustivePlanner, ExhaustivePlannerConfig};
