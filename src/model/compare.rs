//! Tree-to-tree comparison via tip-to-tip distance matrices.
//!
//! The similarity score is delegated to a caller-supplied metric over two
//! equal-shape matrices; [distance_from_r] is the default, mapping a
//! Pearson-type correlation into `[0, 1]` so perfectly correlated matrices
//! score 0 and perfectly anti-correlated ones score 1. Subsampling likewise
//! delegates the shuffle to the caller, keeping the random source outside
//! this crate.

use std::collections::HashMap;

use crate::error::TreeError;
use crate::matrix::DistanceMatrix;
use crate::model::node::{NodeId, NodeRef};
use crate::model::tree::Tree;

impl Tree {
    /// Compares the subtree at `start` to another tree's subtree using
    /// tip-to-tip distance matrices.
    ///
    /// Both trees are restricted to their common tip names (in this tree's
    /// tip order), each tree's pairwise tip-distance matrix is computed over
    /// that shared name order, and `dist_f` applied to the two matrices is
    /// returned. When `sample` is given, the common names are shuffled with
    /// `shuffle_f` and truncated to that count first.
    ///
    /// Trees sharing two or fewer tip names are defined to be maximally
    /// similar: the score is 1.0 by convention, not computed.
    ///
    /// # Errors
    /// [TreeError::NoCommonTips] if the trees share no tip names.
    pub fn compare_tip_distances<D, S>(
        &mut self,
        start: NodeId,
        other: &mut Tree,
        other_start: NodeId,
        sample: Option<usize>,
        dist_f: D,
        mut shuffle_f: S,
    ) -> Result<f64, TreeError>
    where
        D: Fn(&DistanceMatrix, &DistanceMatrix) -> f64,
        S: FnMut(&mut Vec<String>),
    {
        let self_tips = named_tips(self, start);
        let other_tips = named_tips(other, other_start);

        let mut common_names: Vec<String> = self
            .tips(start, false)
            .filter_map(|id| self[id].name())
            .filter(|name| other_tips.contains_key(*name))
            .map(str::to_string)
            .collect();

        if common_names.is_empty() {
            return Err(TreeError::NoCommonTips);
        }
        if common_names.len() <= 2 {
            return Ok(1.0);
        }

        if let Some(count) = sample {
            shuffle_f(&mut common_names);
            common_names.truncate(count);
        }

        // Endpoints resolved through the tip maps, so internal nodes that
        // happen to share a tip's name cannot interfere
        let self_refs: Vec<NodeRef<'_>> = common_names
            .iter()
            .map(|name| NodeRef::Id(self_tips[name]))
            .collect();
        let other_refs: Vec<NodeRef<'_>> = common_names
            .iter()
            .map(|name| NodeRef::Id(other_tips[name]))
            .collect();

        let (self_matrix, _) = self.tip_tip_distances(start, Some(&self_refs), 1.0)?;
        let (other_matrix, _) = other.tip_tip_distances(other_start, Some(&other_refs), 1.0)?;

        Ok(dist_f(&self_matrix, &other_matrix))
    }
}

/// Maps tip names below `start` to their nodes; unnamed tips are skipped
/// and a repeated name keeps its first occurrence.
fn named_tips(tree: &Tree, start: NodeId) -> HashMap<String, NodeId> {
    let mut map = HashMap::new();
    for id in tree.tips(start, false) {
        if let Some(name) = tree[id].name() {
            map.entry(name.to_string()).or_insert(id);
        }
    }
    map
}

// ============================================================================
// Default distance metric
// ============================================================================
/// Estimates distance between two matrices as `(1 - r) / 2`, where `r` is
/// the Pearson correlation of their flattened entries: full negative
/// correlation gives the maximum distance of 1, full positive correlation
/// gives 0.
///
/// # Panics
/// Panics if the matrices differ in shape.
pub fn distance_from_r(m1: &DistanceMatrix, m2: &DistanceMatrix) -> f64 {
    (1.0 - pearson_correlation(m1, m2)) / 2.0
}

/// Pearson correlation coefficient over the flattened matrix entries,
/// diagonal included. Returns 0.0 when either matrix is constant.
fn pearson_correlation(m1: &DistanceMatrix, m2: &DistanceMatrix) -> f64 {
    assert_eq!(m1.len(), m2.len(), "matrices must have the same shape");

    let n = (m1.len() * m1.len()) as f64;
    if n == 0.0 {
        return 0.0;
    }

    let mean1 = m1.values().sum::<f64>() / n;
    let mean2 = m2.values().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var1 = 0.0;
    let mut var2 = 0.0;
    for (x, y) in m1.values().zip(m2.values()) {
        let dx = x - mean1;
        let dy = y - mean2;
        covariance += dx * dy;
        var1 += dx * dx;
        var2 += dy * dy;
    }

    let denominator = (var1 * var2).sqrt();
    if denominator == 0.0 {
        return 0.0;
    }
    covariance / denominator
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(values: &[&[f64]]) -> DistanceMatrix {
        let names = (0..values.len()).map(|i| i.to_string()).collect();
        let mut m = DistanceMatrix::zeros(names);
        for (i, row) in values.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                m[(i, j)] = value;
            }
        }
        m
    }

    #[test]
    fn identical_matrices_have_zero_distance() {
        let m = matrix(&[&[0.0, 2.0], &[2.0, 0.0]]);
        assert!((distance_from_r(&m, &m)).abs() < 1e-12);
    }

    #[test]
    fn anticorrelated_matrices_have_max_distance() {
        let m1 = matrix(&[&[0.0, 1.0], &[2.0, 3.0]]);
        let m2 = matrix(&[&[3.0, 2.0], &[1.0, 0.0]]);
        assert!((distance_from_r(&m1, &m2) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_matrix_yields_neutral_score() {
        let m1 = matrix(&[&[1.0, 1.0], &[1.0, 1.0]]);
        let m2 = matrix(&[&[0.0, 1.0], &[1.0, 0.0]]);
        assert_eq!(distance_from_r(&m1, &m2), 0.5);
    }
}
