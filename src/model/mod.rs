//! Data model for rooted, multifurcating phylogenetic trees.
//!
//! # Tree representation
//! Trees are represented by [Tree], which uses the arena pattern to store
//! [Node] values referenced by [NodeId]. Parent links are plain back
//! references (handles, never owning), children are the sole ownership
//! edges, and child order is meaningful everywhere.
//!
//! Functionality is split by concern:
//! - [tree]: topology editing, the lazy name cache, path/ancestry queries
//!   (including the lowest common ancestor), deep copy.
//! - [traversal]: iterative preorder, postorder, combined pre/postorder,
//!   level order, and tip/non-tip iterators.
//! - [distance]: path accumulation, pairwise distance, tip-to-tip diameter,
//!   and the full tip-to-tip distance matrix.
//! - [compare]: tree-to-tree similarity over distance matrices.

pub mod compare;
pub mod distance;
pub mod node;
pub mod traversal;
pub mod tree;

pub use compare::distance_from_r;
pub use node::Node;
pub use node::NodeId;
pub use node::NodeRef;
pub use traversal::Traverse;
pub use tree::Tree;
