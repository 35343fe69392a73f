use thiserror::Error;

/// Errors from [`crate::distance::DistanceMatrix::from_rows`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// No rows were provided.
    ///
    /// Every matrix holds at least the origin node.
    #[error("a distance matrix needs at least the origin row")]
    Empty,
    /// A row's length differed from the number of rows.
    #[error("row {row} has {len} columns but {expected} expected (matrix must be square)")]
    NotSquare {
        /// Index of the offending row.
        row: usize,
        /// Its length.
        len: usize,
        /// The matrix order.
        expected: usize,
    },
}
