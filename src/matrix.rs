//! A distance matrix is stored as a list of tip names together with a square
//! matrix of all pairwise distances.
//!
//! The distance engine only ever produces full square symmetric matrices
//! with a zero diagonal, so no triangular storage is offered.
//!
//! # Example
//!
//! ```
//! use treewick::matrix::DistanceMatrix;
//!
//! let mut m = DistanceMatrix::zeros(vec!["A".to_string(), "B".to_string()]);
//! m[(0, 1)] = 2.5;
//! m[(1, 0)] = 2.5;
//! assert_eq!(m[(1, 0)], 2.5);
//! assert_eq!(m.len(), 2);
//! ```

use std::ops::{Index, IndexMut};

/// A square matrix of pairwise distances, with one row/column per tip name.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    names: Vec<String>,
    distances: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    /// Creates an all-zero square matrix with one row and column per name.
    pub fn zeros(names: Vec<String>) -> Self {
        let n = names.len();
        DistanceMatrix {
            names,
            distances: vec![vec![0.0; n]; n],
        }
    }

    /// The number of rows (equivalently, columns) in the matrix.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The tip names labelling the rows and columns, in matrix order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Iterates over all entries in row-major order, diagonal included.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.distances.iter().flatten().copied()
    }
}

impl Index<(usize, usize)> for DistanceMatrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        &self.distances[i][j]
    }
}

impl IndexMut<(usize, usize)> for DistanceMatrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Self::Output {
        &mut self.distances[i][j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexing() {
        let mut m = DistanceMatrix::zeros(vec![
            "a".to_string(),
            "b".to_string(),
            "c".to_string(),
        ]);
        assert_eq!(m.len(), 3);
        assert_eq!(m[(0, 0)], 0.0);
        m[(1, 2)] = 5.0;
        m[(2, 1)] = 5.0;
        assert_eq!(m[(1, 2)], 5.0);
        assert_eq!(m[(2, 1)], 5.0);
    }

    #[test]
    fn values_are_row_major() {
        let mut m = DistanceMatrix::zeros(vec!["a".to_string(), "b".to_string()]);
        m[(0, 1)] = 1.0;
        m[(1, 0)] = 2.0;
        let flat: Vec<f64> = m.values().collect();
        assert_eq!(flat, vec![0.0, 1.0, 2.0, 0.0]);
    }

    #[test]
    fn empty_matrix() {
        let m = DistanceMatrix::zeros(Vec::new());
        assert!(m.is_empty());
        assert_eq!(m.values().count(), 0);
    }
}
