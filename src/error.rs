//! Error types for tree queries.
//!
//! This module provides [TreeError], covering the failures that name-cache
//! construction, lookup, distance accumulation, and tree comparison can
//! surface. Structural edits that find "nothing to do" (removing a non-child,
//! listing tips of a tip) are normal outcomes and do not produce errors.

use thiserror::Error;

// =#========================================================================#=
// TREE ERROR
// =#========================================================================#=
/// Errors raised by tree lookups and distance computations.
///
/// All errors are propagated synchronously to the immediate caller; nothing
/// is retried or suppressed internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Two nodes in the indexed subtree share the same name. Raised by name
    /// cache construction; the cache is left empty.
    #[error("node name '{0}' already exists in the indexed subtree")]
    DuplicateNode(String),

    /// A lookup by name found no node with that name.
    #[error("node '{0}' is not in the tree")]
    MissingNode(String),

    /// Distance accumulation walked to the root without reaching the
    /// expected ancestor, so the ancestor is not on this node's path.
    #[error("provided ancestor is not on the path to the root")]
    NoParent,

    /// Distance accumulation crossed an edge whose branch length is unknown.
    #[error("edge without branch length on the accumulation path")]
    NoLength,

    /// Two compared trees share no tip names.
    #[error("no tip names in common between the two trees")]
    NoCommonTips,
}
