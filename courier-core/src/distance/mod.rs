//! Great-circle distances and the origin-plus-points distance matrix.
//!
//! [`DistanceModel`] abstracts the distance between two coordinates in whole
//! kilometres. [`GraphBuilder`] applies a model to the courier's start and
//! the delivery points to produce a [`DistanceMatrix`] where node `0` is the
//! origin and nodes `1..=n` are the points in store order.

mod error;
mod matrix;
mod model;

pub use error::MatrixError;
pub use matrix::{DistanceMatrix, GraphBuilder};
pub use model::{DistanceModel, EARTH_RADIUS_METRES, Haversine, travel_seconds};
