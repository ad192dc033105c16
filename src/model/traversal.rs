//! Iterative traversal iterators over [Tree].
//!
//! All traversal orders use explicit stacks or queues instead of recursion,
//! so depth is bounded only by memory, never by call-stack depth. This
//! matters for comb-shaped trees with thousands of levels.
//!
//! Every iterator here is lazy, finite, and single-pass: consuming it twice
//! requires calling the traversal method again. None of them mutate the
//! tree.

use std::collections::VecDeque;

use crate::model::node::NodeId;
use crate::model::tree::Tree;

// ============================================================================
// Traversal methods (pub)
// ============================================================================
impl Tree {
    /// Returns an iterator over the subtree rooted at `start` in preorder
    /// (node before its children).
    ///
    /// # Arguments
    /// * `start` - Root of the subtree to traverse
    /// * `include_self` - Whether `start` itself is yielded
    pub fn preorder(&self, start: NodeId, include_self: bool) -> Preorder<'_> {
        Preorder::new(self, start, include_self)
    }

    /// Returns an iterator over the subtree rooted at `start` in postorder
    /// (node after its children).
    ///
    /// Walks down into the deepest unvisited child and climbs back up the
    /// explicit parent chain, tracking a child-index counter per level; same
    /// asymptotic cost as the recursive version without its depth limit.
    pub fn postorder(&self, start: NodeId, include_self: bool) -> Postorder<'_> {
        Postorder::new(self, start, include_self)
    }

    /// Returns an iterator visiting each internal node twice (before its
    /// first child and after its last child) and each tip once.
    pub fn pre_and_postorder(&self, start: NodeId, include_self: bool) -> PreAndPostorder<'_> {
        PreAndPostorder::new(self, start, include_self)
    }

    /// Returns a breadth-first iterator over the subtree rooted at `start`.
    pub fn levelorder(&self, start: NodeId, include_self: bool) -> Levelorder<'_> {
        Levelorder::new(self, start, include_self)
    }

    /// Returns an iterator over the tips descending from `start`, in
    /// preorder. A tip `start` yields itself only if `include_self` is
    /// requested; otherwise the iterator is empty (not an error).
    pub fn tips(&self, start: NodeId, include_self: bool) -> Tips<'_> {
        Tips {
            inner: Preorder::new(self, start, include_self),
        }
    }

    /// Returns an iterator over the internal (non-tip) nodes descending
    /// from `start`; `include_self` admits `start` itself if it is internal.
    pub fn non_tips(&self, start: NodeId, include_self: bool) -> NonTips<'_> {
        NonTips {
            inner: Preorder::new(self, start, include_self),
        }
    }

    /// Dispatches to one of the traversal orders based on the
    /// `(self_before, self_after)` combination:
    ///
    /// | `self_before` | `self_after` | order |
    /// |---------------|--------------|-------|
    /// | `true` | `false` | [preorder](Tree::preorder) |
    /// | `false` | `true` | [postorder](Tree::postorder) |
    /// | `true` | `true` | [pre_and_postorder](Tree::pre_and_postorder) |
    /// | `false` | `false` | [tips](Tree::tips) only |
    pub fn traverse(
        &self,
        start: NodeId,
        self_before: bool,
        self_after: bool,
        include_self: bool,
    ) -> Traverse<'_> {
        match (self_before, self_after) {
            (true, false) => Traverse::Pre(self.preorder(start, include_self)),
            (false, true) => Traverse::Post(self.postorder(start, include_self)),
            (true, true) => Traverse::Both(self.pre_and_postorder(start, include_self)),
            (false, false) => Traverse::Tips(self.tips(start, include_self)),
        }
    }
}

// =#========================================================================#=
// PREORDER
// =#========================================================================#=
/// Iterator for preorder traversal (node before its children).
///
/// Children are pushed onto the explicit stack in reverse, so they pop in
/// their original order.
pub struct Preorder<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl<'a> Preorder<'a> {
    fn new(tree: &'a Tree, start: NodeId, include_self: bool) -> Self {
        let stack = if include_self {
            vec![start]
        } else {
            tree[start].children().iter().rev().copied().collect()
        };
        Preorder { tree, stack }
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree[id].children().iter().rev().copied());
        Some(id)
    }
}

// =#========================================================================#=
// POSTORDER
// =#========================================================================#=
/// Iterator for postorder traversal (node after its children).
///
/// Keeps a stack of child-index counters, one per level of the current
/// descent, and climbs back up via parent links; only the counters are
/// stored, never the nodes themselves.
pub struct Postorder<'a> {
    tree: &'a Tree,
    start: NodeId,
    curr: NodeId,
    child_index_stack: Vec<usize>,
    include_self: bool,
    done: bool,
}

impl<'a> Postorder<'a> {
    fn new(tree: &'a Tree, start: NodeId, include_self: bool) -> Self {
        Postorder {
            tree,
            start,
            curr: start,
            child_index_stack: vec![0],
            include_self,
            done: false,
        }
    }
}

impl<'a> Iterator for Postorder<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let curr_index = *self.child_index_stack.last().unwrap();
            let children = self.tree[self.curr].children();

            if curr_index < children.len() {
                let child = children[curr_index];
                if !self.tree[child].children().is_empty() {
                    // Descend into the child's subtree
                    self.child_index_stack.push(0);
                    self.curr = child;
                } else {
                    *self.child_index_stack.last_mut().unwrap() += 1;
                    return Some(child);
                }
            } else {
                // All children exhausted: emit curr and climb to its parent
                let emit = self.curr;
                if emit == self.start {
                    self.done = true;
                } else {
                    self.curr = self.tree[emit].parent().unwrap();
                    self.child_index_stack.pop();
                    *self.child_index_stack.last_mut().unwrap() += 1;
                }
                if self.include_self || emit != self.start {
                    return Some(emit);
                }
                if self.done {
                    return None;
                }
            }
        }
    }
}

// =#========================================================================#=
// PRE AND POSTORDER
// =#========================================================================#=
/// Iterator visiting each internal node twice (pre- and post-visit) and
/// each tip once.
///
/// A node is emitted when its child-index counter is first zero (pre-visit)
/// and again when the counter is exhausted (post-visit).
pub struct PreAndPostorder<'a> {
    tree: &'a Tree,
    start: NodeId,
    curr: NodeId,
    child_index_stack: Vec<usize>,
    include_self: bool,
    pending_pre: bool,
    done: bool,
}

impl<'a> PreAndPostorder<'a> {
    fn new(tree: &'a Tree, start: NodeId, include_self: bool) -> Self {
        // A tip start is the simple case: one visit at most, flagged by the
        // empty index stack.
        let is_tip = tree[start].children().is_empty();
        PreAndPostorder {
            tree,
            start,
            curr: start,
            child_index_stack: if is_tip { Vec::new() } else { vec![0] },
            include_self,
            pending_pre: !is_tip,
            done: false,
        }
    }
}

impl<'a> Iterator for PreAndPostorder<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.child_index_stack.is_empty() {
            // Tip start: visited exactly once, and only on request
            self.done = true;
            return self.include_self.then_some(self.start);
        }
        loop {
            if self.pending_pre {
                self.pending_pre = false;
                if self.include_self || self.curr != self.start {
                    return Some(self.curr);
                }
            }

            let curr_index = *self.child_index_stack.last().unwrap();
            let children = self.tree[self.curr].children();

            if curr_index < children.len() {
                let child = children[curr_index];
                if !self.tree[child].children().is_empty() {
                    self.child_index_stack.push(0);
                    self.curr = child;
                    self.pending_pre = true;
                } else {
                    *self.child_index_stack.last_mut().unwrap() += 1;
                    return Some(child);
                }
            } else {
                let emit = self.curr;
                if emit == self.start {
                    self.done = true;
                } else {
                    self.curr = self.tree[emit].parent().unwrap();
                    self.child_index_stack.pop();
                    *self.child_index_stack.last_mut().unwrap() += 1;
                }
                if self.include_self || emit != self.start {
                    return Some(emit);
                }
                if self.done {
                    return None;
                }
            }
        }
    }
}

// =#========================================================================#=
// LEVELORDER
// =#========================================================================#=
/// Iterator for breadth-first traversal using a FIFO queue.
pub struct Levelorder<'a> {
    tree: &'a Tree,
    queue: VecDeque<NodeId>,
}

impl<'a> Levelorder<'a> {
    fn new(tree: &'a Tree, start: NodeId, include_self: bool) -> Self {
        let queue = if include_self {
            VecDeque::from([start])
        } else {
            tree[start].children().iter().copied().collect()
        };
        Levelorder { tree, queue }
    }
}

impl<'a> Iterator for Levelorder<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.queue.pop_front()?;
        self.queue.extend(self.tree[id].children().iter().copied());
        Some(id)
    }
}

// =#========================================================================#=
// TIPS / NON-TIPS
// =#========================================================================#=
/// Iterator over tips only, in preorder.
pub struct Tips<'a> {
    inner: Preorder<'a>,
}

impl<'a> Iterator for Tips<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.inner.tree;
        self.inner.by_ref().find(|&id| tree[id].is_tip())
    }
}

/// Iterator over internal (non-tip) nodes only, in preorder.
pub struct NonTips<'a> {
    inner: Preorder<'a>,
}

impl<'a> Iterator for NonTips<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.inner.tree;
        self.inner.by_ref().find(|&id| !tree[id].is_tip())
    }
}

// =#========================================================================#=
// TRAVERSE DISPATCH
// =#========================================================================#=
/// Traversal order selected by [Tree::traverse].
pub enum Traverse<'a> {
    /// Preorder traversal.
    Pre(Preorder<'a>),
    /// Postorder traversal.
    Post(Postorder<'a>),
    /// Combined pre- and postorder traversal.
    Both(PreAndPostorder<'a>),
    /// Tips only.
    Tips(Tips<'a>),
}

impl<'a> Iterator for Traverse<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Traverse::Pre(iter) => iter.next(),
            Traverse::Post(iter) => iter.next(),
            Traverse::Both(iter) => iter.next(),
            Traverse::Tips(iter) => iter.next(),
        }
    }
}
