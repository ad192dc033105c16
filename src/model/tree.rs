//! Arena-based tree structure with topology editing, name lookup, and
//! ancestry queries.
//!
//! A [Tree] stores all its nodes in a contiguous vector and references them
//! by [NodeId], providing efficient memory layout and cache locality for
//! traversal operations while sidestepping ownership cycles between parent
//! and child links.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::error::TreeError;
use crate::model::node::{Node, NodeId, NodeRef};

// =#========================================================================#=
// TREE
// =#========================================================================#=
/// A rooted, multifurcating phylogenetic tree using the arena pattern
/// on [Node].
///
/// # Structure
/// - All nodes are stored in the arena and referenced by [NodeId].
/// - Nodes are created detached via [add_node](Tree::add_node) and attached
///   through the adoption path ([append](Tree::append) /
///   [extend](Tree::extend)), which keeps the parent/children invariant: a
///   node is never simultaneously a child of two parents.
/// - Removal detaches subtrees but never frees arena slots; detached
///   subtrees simply become unreachable. [copy](Tree::copy) produces a
///   compact arena.
/// - Most query methods take the [NodeId] of the subtree root they operate
///   on, so any node doubles as a handle to its subtree.
///
/// # Name cache
/// [find](Tree::find) builds a lazy name-to-node index over the subtree it
/// is scoped to. Every structural mutation invalidates the cache; the next
/// lookup rebuilds it.
///
/// # Example
/// ```
/// use treewick::model::Tree;
///
/// let mut tree = Tree::new();
/// let root = tree.add_node(None, None);
/// let a = tree.add_node(Some("A"), Some(1.0));
/// let b = tree.add_node(Some("B"), Some(2.0));
/// tree.append(root, a);
/// tree.append(root, b);
///
/// assert_eq!(tree[root].children(), &[a, b]);
/// assert_eq!(tree.find(root, "B").unwrap(), b);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Tree {
    /// Nodes of this tree (arena pattern)
    nodes: Vec<Node>,

    /// Lazy name-to-node index, tagged with the scope it was built from
    name_cache: Option<NameCache>,
}

#[derive(Debug, Clone)]
struct NameCache {
    scope: NodeId,
    by_name: HashMap<String, NodeId>,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl Tree {
    /// Creates a new, empty tree.
    pub fn new() -> Self {
        Tree::default()
    }

    /// Creates a new, empty tree with arena capacity for `num_nodes` nodes.
    pub fn with_capacity(num_nodes: usize) -> Self {
        Tree {
            nodes: Vec::with_capacity(num_nodes),
            name_cache: None,
        }
    }

    /// Adds a detached node to the arena, assigning a unique index, which
    /// gets returned. Attach it with [append](Tree::append) or
    /// [extend](Tree::extend).
    ///
    /// # Arguments
    /// * `name` - Optional node name
    /// * `length` - Optional branch length to the future parent (non-negative)
    ///
    /// # Panics
    /// Panics if `length` is negative or not finite.
    pub fn add_node(&mut self, name: Option<&str>, length: Option<f64>) -> NodeId {
        let index = self.nodes.len();
        self.nodes.push(Node::new(name.map(str::to_string), length));
        index
    }

    /// Returns a reference to the node at the given index, or `None` if the
    /// index is out of bounds.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Returns a mutable reference to the node at the given index, or `None`
    /// if the index is out of bounds.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Returns the number of arena slots, including detached nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the arena holds no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of nodes in the subtree rooted at `start`,
    /// the start node included.
    pub fn node_count(&self, start: NodeId) -> usize {
        self.preorder(start, true).count()
    }

    /// Returns the number of tips in the subtree rooted at `start`.
    pub fn tip_count(&self, start: NodeId) -> usize {
        self.tips(start, true).count()
    }

    /// Returns the number of internal nodes in the subtree rooted at `start`,
    /// the start node included if it is internal.
    pub fn internal_count(&self, start: NodeId) -> usize {
        self.non_tips(start, true).count()
    }
}

impl std::ops::Index<NodeId> for Tree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id]
    }
}

impl std::ops::IndexMut<NodeId> for Tree {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        &mut self.nodes[id]
    }
}

// ============================================================================
// Topology updates (pub)
// ============================================================================
impl Tree {
    /// Detaches `child` from its current parent, if any, and makes `parent`
    /// its parent. Single choke point for all structural changes: keeps the
    /// parent/children invariant and invalidates the name cache.
    fn adopt(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child].parent = Some(parent);
        self.invalidate_node_cache();
    }

    /// Removes `child` from its parent's children and clears its parent
    /// link. No-op for roots.
    fn detach(&mut self, child: NodeId) {
        if let Some(old_parent) = self.nodes[child].parent {
            if let Some(pos) = self.nodes[old_parent]
                .children
                .iter()
                .position(|&c| c == child)
            {
                self.nodes[old_parent].children.remove(pos);
            }
            self.nodes[child].parent = None;
            self.invalidate_node_cache();
        }
    }

    /// Appends `child` to the end of `parent`'s children, detaching it from
    /// any previous parent first.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        self.adopt(parent, child);
        self.nodes[parent].children.push(child);
    }

    /// Appends every node in `children` to `parent`, in order.
    pub fn extend(&mut self, parent: NodeId, children: &[NodeId]) {
        for &child in children {
            self.append(parent, child);
        }
    }

    /// Detaches and returns the last child of `parent`, or `None` if
    /// `parent` has no children.
    pub fn pop(&mut self, parent: NodeId) -> Option<NodeId> {
        match self.nodes[parent].children.len() {
            0 => None,
            n => self.pop_at(parent, n - 1),
        }
    }

    /// Detaches and returns the child of `parent` at position `index`, or
    /// `None` if the position is out of bounds.
    pub fn pop_at(&mut self, parent: NodeId, index: usize) -> Option<NodeId> {
        if index >= self.nodes[parent].children.len() {
            return None;
        }
        let child = self.nodes[parent].children.remove(index);
        self.nodes[child].parent = None;
        self.invalidate_node_cache();
        Some(child)
    }

    /// Detaches `child` if it is a direct child of `parent`.
    ///
    /// # Returns
    /// `true` if the node was found and detached, `false` if it is not a
    /// direct child (a normal outcome, not an error).
    pub fn remove(&mut self, parent: NodeId, child: NodeId) -> bool {
        let position = self.nodes[parent]
            .children
            .iter()
            .position(|&c| c == child);
        match position {
            Some(index) => {
                self.pop_at(parent, index);
                true
            }
            None => false,
        }
    }

    /// Detaches every proper descendant of `start` for which `predicate`
    /// holds.
    ///
    /// The predicate is evaluated over a stable snapshot taken before any
    /// removal, so removal never skips or duplicates visits.
    pub fn remove_deleted<F>(&mut self, start: NodeId, mut predicate: F)
    where
        F: FnMut(&Node) -> bool,
    {
        let snapshot: Vec<NodeId> = self.preorder(start, false).collect();
        for id in snapshot {
            if predicate(&self.nodes[id]) {
                self.detach(id);
            }
        }
    }

    /// Reconstructs a clean topology after removals by collapsing internal
    /// nodes that have exactly one child: the child is spliced into the
    /// grandparent's children and the single-child node detached.
    ///
    /// Offending nodes are collected before any edit begins, so the
    /// traversal never iterates a structure being mutated. The start node
    /// itself is never collapsed.
    pub fn prune(&mut self, start: NodeId) {
        let single_child_nodes: Vec<NodeId> = self
            .preorder(start, false)
            .filter(|&id| self.nodes[id].children.len() == 1)
            .collect();

        for node in single_child_nodes {
            let Some(parent) = self.nodes[node].parent else {
                continue;
            };
            let Some(&child) = self.nodes[node].children.first() else {
                continue;
            };
            self.append(parent, child);
            self.remove(parent, node);
        }

        self.invalidate_node_cache();
    }
}

// ============================================================================
// Name cache and lookup (pub)
// ============================================================================
impl Tree {
    /// Clears the name cache unconditionally.
    pub fn invalidate_node_cache(&mut self) {
        self.name_cache = None;
    }

    /// Constructs the name-to-node lookup over the subtree rooted at
    /// `scope`, keyed by node name. Nodes without a name are not cached.
    ///
    /// No-op if a non-empty cache for the same scope already exists. A cache
    /// built for a different scope is discarded and rebuilt.
    ///
    /// # Errors
    /// [TreeError::DuplicateNode] if two nodes in the subtree share a name;
    /// the cache is left empty in that case.
    pub fn create_node_cache(&mut self, scope: NodeId) -> Result<(), TreeError> {
        if let Some(cache) = &self.name_cache {
            if cache.scope == scope && !cache.by_name.is_empty() {
                return Ok(());
            }
        }

        let mut by_name = HashMap::new();
        let mut duplicate = None;
        for id in self.preorder(scope, true) {
            if let Some(name) = self[id].name() {
                if by_name.contains_key(name) {
                    duplicate = Some(name.to_string());
                    break;
                }
                by_name.insert(name.to_string(), id);
            }
        }

        if let Some(name) = duplicate {
            self.name_cache = None;
            return Err(TreeError::DuplicateNode(name));
        }

        self.name_cache = Some(NameCache { scope, by_name });
        Ok(())
    }

    /// Finds a node by reference within the subtree rooted at `scope`.
    ///
    /// An already resolved [NodeRef::Id] is returned unchanged. A
    /// [NodeRef::Name] builds the cache if needed and looks the name up.
    ///
    /// # Errors
    /// [TreeError::MissingNode] if no node with that name exists in the
    /// scope, [TreeError::DuplicateNode] if the cache rebuild discovers a
    /// name conflict.
    pub fn find<'a>(
        &mut self,
        scope: NodeId,
        key: impl Into<NodeRef<'a>>,
    ) -> Result<NodeId, TreeError> {
        match key.into() {
            NodeRef::Id(id) => Ok(id),
            NodeRef::Name(name) => {
                self.create_node_cache(scope)?;
                self.name_cache
                    .as_ref()
                    .and_then(|cache| cache.by_name.get(name))
                    .copied()
                    .ok_or_else(|| TreeError::MissingNode(name.to_string()))
            }
        }
    }
}

// ============================================================================
// Path and ancestry (pub)
// ============================================================================
impl Tree {
    /// Returns the ancestors of `id`: parent, grandparent, and so on up to
    /// the root. Empty for a root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut curr = self.nodes[id].parent;
        while let Some(node) = curr {
            result.push(node);
            curr = self.nodes[node].parent;
        }
        result
    }

    /// Returns the root of the tree `id` belongs to, found by walking
    /// parent links to termination.
    pub fn root_of(&self, id: NodeId) -> NodeId {
        let mut curr = id;
        while let Some(parent) = self.nodes[curr].parent {
            curr = parent;
        }
        curr
    }

    /// Returns the children of `id`'s parent, excluding `id` itself. Empty
    /// for a root.
    pub fn siblings(&self, id: NodeId) -> Vec<NodeId> {
        match self.nodes[id].parent {
            None => Vec::new(),
            Some(parent) => self.nodes[parent]
                .children
                .iter()
                .copied()
                .filter(|&c| c != id)
                .collect(),
        }
    }

    /// Returns the lowest common ancestor of the referenced nodes, resolved
    /// within the subtree rooted at `scope`.
    ///
    /// For a single reference this is the referenced node itself. Otherwise
    /// every target walks upward, marking newly visited ancestors in a
    /// transient hit list seeded with the child the walk came from; a walk
    /// that reaches an already marked ancestor records its arrival direction
    /// there and stops. The LCA is found by descending from `scope` along
    /// unique hits until a node has been reached from more than one
    /// direction. Runs in roughly O(height * sqrt(n)) for n targets on a
    /// balanced tree, and leaves the tree unmodified.
    ///
    /// # Panics
    /// Panics if `refs` is empty.
    ///
    /// # Errors
    /// Propagates [TreeError::MissingNode] / [TreeError::DuplicateNode] from
    /// name resolution.
    pub fn lowest_common_ancestor(
        &mut self,
        scope: NodeId,
        refs: &[NodeRef<'_>],
    ) -> Result<NodeId, TreeError> {
        assert!(
            !refs.is_empty(),
            "lowest_common_ancestor requires at least one node reference"
        );

        if refs.len() == 1 {
            return self.find(scope, refs[0]);
        }

        let targets = refs
            .iter()
            .map(|&r| self.find(scope, r))
            .collect::<Result<Vec<NodeId>, TreeError>>()?;

        Ok(self.lowest_common_ancestor_resolved(scope, &targets))
    }

    /// Hit-list LCA over already resolved node handles. All marks live in a
    /// call-local map, so the tree itself is never touched.
    pub(crate) fn lowest_common_ancestor_resolved(
        &self,
        scope: NodeId,
        targets: &[NodeId],
    ) -> NodeId {
        let mut hits: HashMap<NodeId, Vec<NodeId>> = HashMap::new();

        for &target in targets {
            let mut prev = target;
            let mut curr = self.nodes[target].parent;
            while let Some(node) = curr {
                match hits.entry(node) {
                    Entry::Occupied(mut entry) => {
                        // Reached from a second direction; any common
                        // ancestor further up is discovered through here.
                        entry.get_mut().push(prev);
                        break;
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(vec![prev]);
                        prev = node;
                        curr = self.nodes[node].parent;
                    }
                }
            }
        }

        let mut curr = scope;
        while let Some(node_hits) = hits.get(&curr) {
            if node_hits.len() == 1 {
                curr = node_hits[0];
            } else {
                break;
            }
        }
        curr
    }
}

// ============================================================================
// Copy and subset (pub)
// ============================================================================
impl Tree {
    /// Returns a deep structural copy of the subtree rooted at `start` as a
    /// new tree with a compact arena.
    ///
    /// Names and branch lengths are copied; parent/child links are rebuilt
    /// through the adoption path so all invariants hold in the copy. The
    /// name cache is never copied and must be rebuilt on first use. Uses an
    /// explicit stack, so arbitrarily deep trees copy without recursion.
    pub fn copy(&self, start: NodeId) -> Tree {
        let mut copied = Tree::with_capacity(self.node_count(start));
        let root = copied.add_node(self[start].name(), self[start].length());

        // (new node, old node, number of children left to visit)
        let mut stack: Vec<(NodeId, NodeId, usize)> =
            vec![(root, start, self[start].children.len())];

        while let Some(&(new_top, old_top, unvisited)) = stack.last() {
            if unvisited > 0 {
                stack.last_mut().unwrap().2 -= 1;
                let children = &self.nodes[old_top].children;
                let old_child = children[children.len() - unvisited];
                let new_child =
                    copied.add_node(self[old_child].name(), self[old_child].length());
                copied.append(new_top, new_child);
                stack.push((new_child, old_child, self[old_child].children.len()));
            } else {
                stack.pop();
            }
        }

        copied
    }

    /// Returns the set of tip names descending from `start`, in sorted
    /// order. Unnamed tips are skipped; a tip has an empty subset.
    pub fn subset(&self, start: NodeId) -> std::collections::BTreeSet<String> {
        self.tips(start, false)
            .filter_map(|id| self[id].name().map(str::to_string))
            .collect()
    }
}
