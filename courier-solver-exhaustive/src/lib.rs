//! Exhaustive-search route planner for a single courier.
//!
//! This crate provides [`ExhaustivePlanner`], an implementation of the
//! [`RoutePlanner`](courier_core::RoutePlanner) trait that simulates every
//! ordering of the delivery points against their time windows and the
//! courier's shift, then keeps the best feasible tour for each
//! [`Objective`](courier_core::Objective).
//!
//! The building blocks are public so they can be benchmarked and reused:
//! [`TourEnumerator`] yields candidates without allocating per step,
//! [`Simulator`] walks one candidate through the day, [`Selector`] keeps the
//! running optima and [`Validator`] rejects hopeless configurations up front.
//! Enumeration is `O(n!)`; the default ceiling stops at eleven points.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod permutation;
mod planner;
mod select;
mod simulate;
mod validate;

pub use permutation::{CandidateTour, TourEnumerator, next_permutation};
pub use planner::{ExhaustivePlanner, ExhaustivePlannerConfig};
pub use select::Selector;
pub use simulate::{Outcome, Simulator, Timeline, Violation};
pub use validate::{DEFAULT_MAX_CANDIDATES, Validator, factorial};
