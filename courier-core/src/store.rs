//! Read-only access to delivery points.
//!
//! The engine never writes points; it takes one ordered snapshot per run.
//! Store order matters: it fixes the matrix indices and therefore the
//! lexicographic enumeration order.

use crate::DeliveryPoint;

/// Ordered, read-only source of delivery points.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use courier_core::{DeliveryPoint, DeliveryPointStore, DeliveryWindow, MemoryStore, TimeOfDay};
///
/// let window = DeliveryWindow::new(TimeOfDay::MIDNIGHT, TimeOfDay::from_seconds(3_600));
/// let point = DeliveryPoint::new(1, Coord { x: 0.0, y: 0.0 }, window);
/// let store = MemoryStore::with_points([point.clone()]);
///
/// let snapshot: Vec<_> = store.list_all().collect();
/// assert_eq!(snapshot, vec![point]);
/// ```
pub trait DeliveryPointStore {
    /// Yield every delivery point in store order.
    fn list_all(&self) -> Box<dyn Iterator<Item = DeliveryPoint> + Send + '_>;
}

/// `DeliveryPointStore` backed by a vector.
///
/// Suitable for snapshots loaded from a file and for tests.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct MemoryStore {
    points: Vec<DeliveryPoint>,
}

impl MemoryStore {
    /// Create a store containing a single point.
    pub fn with_point(point: DeliveryPoint) -> Self {
        Self::with_points(std::iter::once(point))
    }

    /// Create a store from points, keeping their order.
    pub fn with_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = DeliveryPoint>,
    {
        Self {
            points: points.into_iter().collect(),
        }
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the store holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl DeliveryPointStore for MemoryStore {
    fn list_all(&self) -> Box<dyn Iterator<Item = DeliveryPoint> + Send + '_> {
        Box::new(self.points.iter().cloned())
    }
}
