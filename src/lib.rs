//! Treewick is a library for rooted, multifurcating phylogenetic trees.
//!
//! Core functionality provided:
//! - Tree model: arena-backed [Tree](model::Tree) whose nodes carry an
//!   optional name and an optional branch length, edited through an
//!   adoption path that keeps parent/child links consistent.
//! - Traversals: preorder, postorder, combined pre/postorder, level order,
//!   and tip/non-tip iteration, all iterative, so depth is bounded by
//!   memory rather than call-stack size.
//! - Queries: ancestry, siblings, multi-target lowest common ancestor, and
//!   a lazily built name-to-node cache that is invalidated by every
//!   structural edit.
//! - Distances: pairwise node distance, tip-to-tip diameter, and the full
//!   tip-to-tip distance matrix in a single postorder sweep.
//! - Output: Newick serialization (emission only, no parser) and ASCII-art
//!   rendering.
//! - Comparison: tree similarity scored over tip-distance matrices with a
//!   pluggable metric.
//!
//! Limitations:
//! - Single-threaded by design; mutation and cache rebuilds require `&mut`
//!   access, which is the crate's whole concurrency model.
//! - No file or stream I/O, and no Newick parsing.
//!
//! # Example
//!
//! Build the tree `(A:1,(B:1,C:1):1):0;` and query it:
//! ```
//! use treewick::model::Tree;
//! use treewick::newick::NewickOptions;
//!
//! let mut tree = Tree::new();
//! let root = tree.add_node(None, Some(0.0));
//! let a = tree.add_node(Some("A"), Some(1.0));
//! let inner = tree.add_node(None, Some(1.0));
//! let b = tree.add_node(Some("B"), Some(1.0));
//! let c = tree.add_node(Some("C"), Some(1.0));
//! tree.append(root, a);
//! tree.append(root, inner);
//! tree.extend(inner, &[b, c]);
//!
//! assert_eq!(tree.distance(a, b).unwrap(), 3.0);
//!
//! let options = NewickOptions::default().with_distances(true);
//! assert_eq!(tree.to_newick(root, &options), "(A:1,(B:1,C:1):1):0;");
//! ```

pub mod draw;
pub mod error;
pub mod matrix;
pub mod model;
pub mod newick;

pub use draw::ascii_art;
pub use error::TreeError;
pub use matrix::DistanceMatrix;
pub use model::Node;
pub use model::NodeId;
pub use model::NodeRef;
pub use model::Tree;
pub use model::distance_from_r;
pub use newick::NewickOptions;
pub use newick::to_newick;
