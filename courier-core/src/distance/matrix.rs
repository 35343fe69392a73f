//! Square distance matrix over the origin and the delivery points.

use geo::Coord;

use crate::DeliveryPoint;

use super::error::MatrixError;
use super::model::{DistanceModel, Haversine};

/// Symmetric matrix of whole-kilometre distances.
///
/// Node `0` is the courier's start; node `i` (for `i >= 1`) is the
/// `(i - 1)`-th delivery point in store order. Stored row-major in a single
/// buffer and immutable once built.
///
/// # Examples
/// ```
/// use courier_core::DistanceMatrix;
///
/// let matrix = DistanceMatrix::from_rows(vec![vec![0, 4], vec![4, 0]])?;
/// assert_eq!(matrix.order(), 2);
/// assert_eq!(matrix.point_count(), 1);
/// assert_eq!(matrix.get(0, 1), Some(4));
/// # Ok::<(), courier_core::MatrixError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    order: usize,
    cells: Vec<u32>,
}

impl DistanceMatrix {
    /// Build a matrix from explicit rows.
    ///
    /// Rows must form a non-empty square. Symmetry is not enforced here so
    /// callers can model one-way costs in tests.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self, MatrixError> {
        let order = rows.len();
        if order == 0 {
            return Err(MatrixError::Empty);
        }
        if let Some((row, cols)) = rows.iter().enumerate().find(|(_, r)| r.len() != order) {
            return Err(MatrixError::NotSquare {
                row,
                len: cols.len(),
                expected: order,
            });
        }
        Ok(Self {
            order,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Number of nodes, origin included.
    pub const fn order(&self) -> usize {
        self.order
    }

    /// Number of delivery points (nodes other than the origin).
    pub const fn point_count(&self) -> usize {
        self.order.saturating_sub(1)
    }

    /// Distance from node `from` to node `to`, if both exist.
    pub fn get(&self, from: usize, to: usize) -> Option<u32> {
        if from >= self.order || to >= self.order {
            return None;
        }
        self.cells.get(from * self.order + to).copied()
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> + '_ {
        self.cells.chunks(self.order)
    }

    /// Apply `f` to every cell, keeping the layout.
    ///
    /// Used to pre-compute per-edge travel times.
    pub fn map_cells<T, F>(&self, f: F) -> Vec<T>
    where
        F: FnMut(u32) -> T,
    {
        self.cells.iter().copied().map(f).collect()
    }
}

/// Builds the [`DistanceMatrix`] for a courier start and a set of points.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use courier_core::{DeliveryPoint, DeliveryWindow, GraphBuilder, TimeOfDay};
///
/// let window = DeliveryWindow::new(TimeOfDay::MIDNIGHT, TimeOfDay::from_seconds(3_600));
/// let points = [DeliveryPoint::new(1, Coord { x: 0.09, y: 0.0 }, window)];
/// let matrix = GraphBuilder::new().build(Coord { x: 0.0, y: 0.0 }, &points);
///
/// assert_eq!(matrix.order(), 2);
/// assert_eq!(matrix.get(0, 1), Some(10));
/// assert_eq!(matrix.get(1, 0), Some(10));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct GraphBuilder<M = Haversine> {
    model: M,
}

impl GraphBuilder<Haversine> {
    /// Use the [`Haversine`] model.
    pub const fn new() -> Self {
        Self { model: Haversine }
    }
}

impl<M: DistanceModel> GraphBuilder<M> {
    /// Use a specific distance model.
    pub const fn with_model(model: M) -> Self {
        Self { model }
    }

    /// The distance model used for every cell.
    pub const fn model(&self) -> &M {
        &self.model
    }

    /// Compute the `(n + 1) x (n + 1)` matrix.
    ///
    /// Only the upper triangle is evaluated; the lower triangle mirrors it
    /// and the diagonal is zero, so the result is symmetric by construction.
    /// An empty point set yields the `1 x 1` origin-only matrix.
    pub fn build(&self, origin: Coord<f64>, points: &[DeliveryPoint]) -> DistanceMatrix {
        let nodes: Vec<Coord<f64>> = std::iter::once(origin)
            .chain(points.iter().map(|p| p.location))
            .collect();
        let order = nodes.len();
        let mut cells = vec![0_u32; order * order];
        for (i, from) in nodes.iter().enumerate() {
            for (j, to) in nodes.iter().enumerate().skip(i + 1) {
                let km = self.model.distance_km(*from, *to);
                cells[i * order + j] = km;
                cells[j * order + i] = km;
            }
        }
        DistanceMatrix { order, cells }
    }
}
