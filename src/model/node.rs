//! Node type for multifurcating phylogenetic tree representation.

/// Index of a node in a tree (arena).
pub type NodeId = usize;

// =#========================================================================#=
// NODE
// =#========================================================================#=
/// A node in a rooted, multifurcating phylogenetic tree.
///
/// Nodes live in a [Tree](crate::model::Tree) arena and reference each other
/// by [NodeId], so the parent back reference is a plain relation and never an
/// ownership edge.
///
/// # Invariants
/// - `name` is optional; uniqueness is only required within the subtree a
///   name cache indexes, and only checked when that cache is built.
/// - `length` is the distance to the parent; non-negative and finite when
///   present. `None` means "unknown", which is distinct from zero.
/// - A non-root node appears exactly once in its parent's `children`; the
///   `children` order is meaningful and preserved by every operation.
/// - A node with no children is a tip; all others are internal.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) name: Option<String>,
    pub(crate) length: Option<f64>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    /// Creates a new detached node (no parent, no children).
    ///
    /// # Arguments
    /// * `name` - Optional node name
    /// * `length` - Optional distance to the parent (non-negative)
    ///
    /// # Panics
    /// Panics if `length` is negative or not finite.
    pub fn new(name: Option<String>, length: Option<f64>) -> Self {
        if let Some(length) = length {
            assert_length_valid(length);
        }
        Node {
            name,
            length,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Returns the name of this node, or `None` if it has none.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Sets or clears the name of this node.
    ///
    /// Note that renaming does not invalidate any name cache; callers that
    /// rename cached nodes should invalidate the cache themselves.
    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// Returns the branch length to the parent, or `None` if unknown.
    pub fn length(&self) -> Option<f64> {
        self.length
    }

    /// Sets or clears the branch length to the parent.
    ///
    /// # Panics
    /// Panics if `length` is negative or not finite.
    pub fn set_length(&mut self, length: Option<f64>) {
        if let Some(length) = length {
            assert_length_valid(length);
        }
        self.length = length;
    }

    /// Returns the index of the parent, or `None` for a root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the ordered child indices of this node.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns `true` if this node has no children.
    pub fn is_tip(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if this node has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

fn assert_length_valid(length: f64) {
    assert!(
        length >= 0.0,
        "Branch length must be non-negative, got {}",
        length
    );
    assert!(
        length.is_finite(),
        "Branch length must be finite, got {}",
        length
    );
}

// =#========================================================================#=
// NODE REF
// =#========================================================================#=
/// A reference to a node, either already resolved or by name.
///
/// Lookup methods such as [Tree::find](crate::model::Tree::find) accept
/// either form: an [Id](NodeRef::Id) is returned unchanged, while a
/// [Name](NodeRef::Name) goes through the name cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef<'a> {
    /// An already resolved node handle.
    Id(NodeId),
    /// A node name to look up.
    Name(&'a str),
}

impl From<NodeId> for NodeRef<'static> {
    fn from(id: NodeId) -> Self {
        NodeRef::Id(id)
    }
}

impl<'a> From<&'a str> for NodeRef<'a> {
    fn from(name: &'a str) -> Self {
        NodeRef::Name(name)
    }
}
