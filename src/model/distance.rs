//! Distance computations: path accumulation, pairwise distance, tip-to-tip
//! diameter, and the full tip-to-tip distance matrix.
//!
//! Per-node bookkeeping lives in call-local maps keyed by [NodeId], so no
//! derived state is ever written into the tree and nothing needs
//! invalidating afterwards.

use std::collections::HashMap;

use crate::error::TreeError;
use crate::matrix::DistanceMatrix;
use crate::model::node::{NodeId, NodeRef};
use crate::model::tree::Tree;

impl Tree {
    // ========================================================================
    // Path accumulation and pairwise distance
    // ========================================================================
    /// Sums the branch lengths walking from `node` up to, but not
    /// including, `ancestor`.
    ///
    /// # Errors
    /// [TreeError::NoParent] if the root is reached without encountering
    /// `ancestor` (the ancestor is not on this node's path), and
    /// [TreeError::NoLength] if any traversed edge lacks a branch length.
    pub fn accumulate_to_ancestor(
        &self,
        node: NodeId,
        ancestor: NodeId,
    ) -> Result<f64, TreeError> {
        let mut accum = 0.0;
        let mut curr = node;
        while curr != ancestor {
            let Some(parent) = self[curr].parent() else {
                return Err(TreeError::NoParent);
            };
            let Some(length) = self[curr].length() else {
                return Err(TreeError::NoLength);
            };
            accum += length;
            curr = parent;
        }
        Ok(accum)
    }

    /// Returns the distance between two nodes: zero for identical handles,
    /// otherwise the sum of both nodes' accumulation to their lowest common
    /// ancestor under the tree's root. Symmetric in its arguments.
    ///
    /// # Errors
    /// [TreeError::NoLength] if an edge on the connecting path lacks a
    /// branch length, [TreeError::NoParent] if the nodes do not share a
    /// root.
    pub fn distance(&self, a: NodeId, b: NodeId) -> Result<f64, TreeError> {
        if a == b {
            return Ok(0.0);
        }

        let root = self.root_of(a);
        let lca = self.lowest_common_ancestor_resolved(root, &[a, b]);
        Ok(self.accumulate_to_ancestor(a, lca)? + self.accumulate_to_ancestor(b, lca)?)
    }

    // ========================================================================
    // Tip-to-tip diameter
    // ========================================================================
    /// Returns the maximum tip-to-tip distance in the subtree rooted at
    /// `start`, together with the pair of tips achieving it, computed in
    /// one postorder sweep.
    ///
    /// Unlike [distance](Tree::distance), a missing branch length is
    /// treated as zero here, so diameter tracking tolerates partially
    /// annotated trees. When several children tie for a node's best
    /// tip-distance, the first in child order wins.
    ///
    /// # Returns
    /// `(0.0, None)` when the subtree has no tip pair with positive
    /// separation (for instance when `start` is itself a tip).
    pub fn max_distance(&self, start: NodeId) -> (f64, Option<(NodeId, NodeId)>) {
        // Two longest tip-distances reachable through distinct children,
        // with the tip achieving each
        let mut best: HashMap<NodeId, [(f64, NodeId); 2]> = HashMap::new();

        for id in self.postorder(start, true) {
            let children = self[id].children();
            if children.is_empty() {
                best.insert(id, [(0.0, id), (0.0, id)]);
            } else if children.len() == 1 {
                // Carry the only child's pair forward, stretched by its edge
                let child = children[0];
                let length = self[child].length().unwrap_or(0.0);
                let [a, b] = best[&child];
                best.insert(id, [(a.0 + length, a.1), (b.0 + length, b.1)]);
            } else {
                // (selection key, distance through the child, tip)
                let mut first: Option<(f64, f64, NodeId)> = None;
                let mut second: Option<(f64, f64, NodeId)> = None;
                for &child in children {
                    let pair = best[&child];
                    let top = if pair[0].0 >= pair[1].0 { pair[0] } else { pair[1] };
                    let length = self[child].length().unwrap_or(0.0);
                    // Selection compares the child's own best; the edge to
                    // the child is added only after selection
                    let candidate = (top.0, top.0 + length, top.1);
                    if first.is_none_or(|f| candidate.0 > f.0) {
                        second = first;
                        first = Some(candidate);
                    } else if second.is_none_or(|s| candidate.0 > s.0) {
                        second = Some(candidate);
                    }
                }
                let (_, dist_a, tip_a) = first.unwrap();
                let (_, dist_b, tip_b) = second.unwrap();
                best.insert(id, [(dist_a, tip_a), (dist_b, tip_b)]);
            }
        }

        let mut longest = 0.0;
        let mut tips = None;
        for id in self.non_tips(start, true) {
            let [a, b] = best[&id];
            let dist = a.0 + b.0;
            if dist > longest {
                longest = dist;
                tips = Some((a.1, b.1));
            }
        }
        (longest, tips)
    }

    // ========================================================================
    // Tip-to-tip distance matrix
    // ========================================================================
    /// Builds the symmetric pairwise-distance matrix among the requested
    /// tips (all tips below `start` if `endpoints` is `None`) in a single
    /// postorder sweep, O(tips^2) for the result plus linear bookkeeping.
    ///
    /// Each node tracks the contiguous index range of tips beneath it in a
    /// fixed all-tips order, together with a running tip-to-current-node
    /// distance array; at every node with two or more children, all cross
    /// pairs of tips between distinct children accumulate into the matrix.
    /// Missing branch lengths use `default_length`.
    ///
    /// # Returns
    /// The symmetric matrix (zero diagonal) and the ordered tip nodes
    /// corresponding to its rows and columns.
    ///
    /// # Errors
    /// [TreeError::MissingNode] if an endpoint does not resolve to a tip
    /// below `start`; name resolution errors propagate from
    /// [find](Tree::find).
    pub fn tip_tip_distances(
        &mut self,
        start: NodeId,
        endpoints: Option<&[NodeRef<'_>]>,
        default_length: f64,
    ) -> Result<(DistanceMatrix, Vec<NodeId>), TreeError> {
        let all_tips: Vec<NodeId> = self.tips(start, false).collect();
        let tip_order: Vec<NodeId> = match endpoints {
            None => all_tips.clone(),
            Some(refs) => refs
                .iter()
                .map(|&r| self.find(start, r))
                .collect::<Result<_, _>>()?,
        };

        // Linearize all tips; each node's tip range is a slice of this order
        let mut positions: HashMap<NodeId, usize> = HashMap::new();
        let mut ranges: HashMap<NodeId, (usize, usize)> = HashMap::new();
        for (i, &tip) in all_tips.iter().enumerate() {
            positions.insert(tip, i);
            ranges.insert(tip, (i, i + 1));
        }

        // Maps a linear tip position to its row in the result matrix
        let mut result_map: HashMap<usize, usize> = HashMap::new();
        for (row, &tip) in tip_order.iter().enumerate() {
            let Some(&pos) = positions.get(&tip) else {
                let label = self[tip]
                    .name()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("#{tip}"));
                return Err(TreeError::MissingNode(label));
            };
            result_map.insert(pos, row);
        }

        let names = tip_order
            .iter()
            .map(|&tip| self[tip].name().unwrap_or_default().to_string())
            .collect();
        let mut result = DistanceMatrix::zeros(names);
        // Distance from each tip to the node currently being processed
        let mut distances = vec![0.0; all_tips.len()];

        for id in self.postorder(start, true) {
            let children = self[id].children();
            if children.is_empty() {
                continue;
            }

            let mut lo = usize::MAX;
            let mut hi = 0;
            for &child in children {
                let length = self[child].length().unwrap_or(default_length);
                let (child_lo, child_hi) = ranges[&child];
                for dist in &mut distances[child_lo..child_hi] {
                    *dist += length;
                }
                lo = lo.min(child_lo);
                hi = hi.max(child_hi);
            }
            ranges.insert(id, (lo, hi));

            if children.len() > 1 {
                // Cross pairs between every two distinct child wedges
                for (i, &child1) in children.iter().enumerate() {
                    for &child2 in &children[i + 1..] {
                        let (lo1, hi1) = ranges[&child1];
                        let (lo2, hi2) = ranges[&child2];
                        for pos1 in lo1..hi1 {
                            let Some(&row1) = result_map.get(&pos1) else {
                                continue;
                            };
                            for pos2 in lo2..hi2 {
                                let Some(&row2) = result_map.get(&pos2) else {
                                    continue;
                                };
                                result[(row1, row2)] = distances[pos1] + distances[pos2];
                            }
                        }
                    }
                }
            }
        }

        // Each pair was written in one orientation at its joining node;
        // mirror to make the matrix symmetric
        let n = result.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let value = result[(i, j)] + result[(j, i)];
                result[(i, j)] = value;
                result[(j, i)] = value;
            }
        }

        Ok((result, tip_order))
    }
}
