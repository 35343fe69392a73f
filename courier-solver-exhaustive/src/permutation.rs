//! Lexicographic enumeration of candidate tours.
//!
//! The origin is node `0` and never moves; the enumerator permutes the
//! delivery nodes `1..=n` in place inside one buffer, so advancing to the
//! next candidate allocates nothing.

use courier_core::DistanceMatrix;

/// Rearrange `items` into the next lexicographically greater permutation.
///
/// Returns `false`, leaving `items` untouched, when `items` is already the
/// last permutation (sorted in non-increasing order).
///
/// # Examples
/// ```
/// use courier_solver_exhaustive::next_permutation;
///
/// let mut items = [1, 3, 2];
/// assert!(next_permutation(&mut items));
/// assert_eq!(items, [2, 1, 3]);
///
/// let mut last = [3, 2, 1];
/// assert!(!next_permutation(&mut last));
/// assert_eq!(last, [3, 2, 1]);
/// ```
pub fn next_permutation<T: Ord>(items: &mut [T]) -> bool {
    let Some(pivot) = items
        .windows(2)
        .rposition(|pair| matches!(pair, [left, right] if left < right))
    else {
        return false;
    };
    let (head, suffix) = items.split_at_mut(pivot + 1);
    let Some(pivot_item) = head.last_mut() else {
        return false;
    };
    // The suffix is non-increasing, so the rightmost larger item is the
    // smallest item that still exceeds the pivot.
    let Some(successor) = suffix.iter_mut().rev().find(|item| **item > *pivot_item) else {
        return false;
    };
    std::mem::swap(pivot_item, successor);
    suffix.reverse();
    true
}

/// One ordering of the delivery nodes, borrowed from the enumerator.
///
/// Valid until the enumerator advances.
#[derive(Debug, Clone, Copy)]
pub struct CandidateTour<'a> {
    matrix: &'a DistanceMatrix,
    order: &'a [usize],
    outbound_km: u32,
    return_km: u32,
}

impl<'a> CandidateTour<'a> {
    fn walk(matrix: &'a DistanceMatrix, order: &'a [usize]) -> Self {
        let mut outbound_km = 0_u32;
        let mut from = 0;
        for &to in order {
            outbound_km = outbound_km.saturating_add(edge_km(matrix, from, to));
            from = to;
        }
        Self {
            matrix,
            order,
            outbound_km,
            return_km: edge_km(matrix, from, 0),
        }
    }

    /// Matrix nodes in visit order, origin excluded.
    #[must_use]
    pub const fn order(&self) -> &'a [usize] {
        self.order
    }

    /// Kilometres from the origin through the last visited point.
    #[must_use]
    pub const fn outbound_km(&self) -> u32 {
        self.outbound_km
    }

    /// Kilometres of the closing edge back to the origin.
    #[must_use]
    pub const fn return_km(&self) -> u32 {
        self.return_km
    }

    /// Length of the whole loop.
    #[must_use]
    pub const fn total_km(&self) -> u32 {
        self.outbound_km.saturating_add(self.return_km)
    }

    /// Directed edges `(from, to, km)` in travel order, closing edge last.
    pub fn legs(&self) -> impl Iterator<Item = (usize, usize, u32)> + 'a {
        let matrix = self.matrix;
        let order = self.order;
        let froms = std::iter::once(0).chain(order.iter().copied());
        let tos = order.iter().copied().chain(std::iter::once(0));
        froms
            .zip(tos)
            .filter(|(from, to)| from != to)
            .map(move |(from, to)| (from, to, edge_km(matrix, from, to)))
    }
}

fn edge_km(matrix: &DistanceMatrix, from: usize, to: usize) -> u32 {
    matrix.get(from, to).unwrap_or_else(|| {
        log::warn!("matrix has no edge from node {from} to node {to}; treating it as unreachable");
        debug_assert!(false, "matrix has no edge from node {from} to node {to}");
        u32::MAX
    })
}

/// Lazily yields every ordering of the delivery nodes in lexicographic
/// order.
///
/// The sequence is finite and cannot be restarted. With `n` delivery nodes
/// it yields `n!` candidates; with zero or one node it yields exactly one.
///
/// # Examples
/// ```
/// use courier_core::DistanceMatrix;
/// use courier_solver_exhaustive::TourEnumerator;
///
/// let matrix = DistanceMatrix::from_rows(vec![
///     vec![0, 2, 3],
///     vec![2, 0, 4],
///     vec![3, 4, 0],
/// ])?;
/// let mut tours = TourEnumerator::new(&matrix);
/// let mut seen = Vec::new();
/// while let Some(tour) = tours.next_tour() {
///     seen.push((tour.order().to_vec(), tour.total_km()));
/// }
/// assert_eq!(seen, vec![(vec![1, 2], 9), (vec![2, 1], 9)]);
/// # Ok::<(), courier_core::MatrixError>(())
/// ```
#[derive(Debug)]
pub struct TourEnumerator<'m> {
    matrix: &'m DistanceMatrix,
    order: Vec<usize>,
    pinned: usize,
    started: bool,
    exhausted: bool,
}

impl<'m> TourEnumerator<'m> {
    /// Enumerate every ordering of the matrix's delivery nodes.
    #[must_use]
    pub fn new(matrix: &'m DistanceMatrix) -> Self {
        Self {
            matrix,
            order: (1..matrix.order()).collect(),
            pinned: 0,
            started: false,
            exhausted: false,
        }
    }

    /// Enumerate only the orderings that visit `first` before anything
    /// else, in lexicographic order of the remaining nodes.
    ///
    /// Returns `None` when `first` is not a delivery node of `matrix`.
    #[must_use]
    pub fn starting_with(matrix: &'m DistanceMatrix, first: usize) -> Option<Self> {
        if first == 0 || first >= matrix.order() {
            return None;
        }
        let order = std::iter::once(first)
            .chain((1..matrix.order()).filter(|node| *node != first))
            .collect();
        Some(Self {
            matrix,
            order,
            pinned: 1,
            started: false,
            exhausted: false,
        })
    }

    /// Advance to the next candidate, or `None` once every ordering has
    /// been produced.
    pub fn next_tour(&mut self) -> Option<CandidateTour<'_>> {
        if self.exhausted {
            return None;
        }
        if self.started {
            let free = self.order.get_mut(self.pinned..).unwrap_or_default();
            if !next_permutation(free) {
                self.exhausted = true;
                return None;
            }
        } else {
            self.started = true;
        }
        Some(CandidateTour::walk(self.matrix, &self.order))
    }
}
