//! Newick string emission.

use crate::model::node::NodeId;
use crate::model::tree::Tree;
use crate::newick::escape::escape_name;

// =#========================================================================#=
// NEWICK OPTIONS
// =#========================================================================#=
/// Options controlling Newick emission.
///
/// The defaults match the common case: no branch lengths, a terminating
/// semicolon, and name escaping enabled.
#[derive(Debug, Clone, Copy)]
pub struct NewickOptions {
    /// Append `:length` after each node name where a branch length is known.
    pub with_distances: bool,
    /// Terminate the output with a semicolon.
    pub semicolon: bool,
    /// Escape names per [escape_name]; raw names are emitted otherwise.
    pub escape_name: bool,
}

impl Default for NewickOptions {
    fn default() -> Self {
        NewickOptions {
            with_distances: false,
            semicolon: true,
            escape_name: true,
        }
    }
}

impl NewickOptions {
    /// Enables or disables branch length emission.
    pub fn with_distances(mut self, with_distances: bool) -> Self {
        self.with_distances = with_distances;
        self
    }

    /// Enables or disables the terminating semicolon.
    pub fn semicolon(mut self, semicolon: bool) -> Self {
        self.semicolon = semicolon;
        self
    }

    /// Enables or disables name escaping.
    pub fn escape_name(mut self, escape_name: bool) -> Self {
        self.escape_name = escape_name;
        self
    }
}

// =#========================================================================#=
// WRITER
// =#========================================================================#=
/// Returns the Newick representation of the subtree rooted at `start`.
///
/// Emission is iterative, using an explicit stack of
/// `(node, unvisited children)` frames, so arbitrarily deep trees serialize
/// without recursion. Children are emitted in order, comma-joined, and each
/// internal node's children are wrapped in parentheses.
///
/// A lone node with no name and no children yields `;` (or the empty string
/// without the semicolon); a lone named node yields `name;`.
///
/// # Example
/// ```
/// use treewick::model::Tree;
/// use treewick::newick::{NewickOptions, to_newick};
///
/// let mut tree = Tree::new();
/// let root = tree.add_node(None, None);
/// let a = tree.add_node(Some("A"), Some(1.0));
/// let b = tree.add_node(Some("B"), Some(2.0));
/// tree.append(root, a);
/// tree.append(root, b);
///
/// assert_eq!(to_newick(&tree, root, &NewickOptions::default()), "(A,B);");
/// let with_lengths = NewickOptions::default().with_distances(true);
/// assert_eq!(to_newick(&tree, root, &with_lengths), "(A:1,B:2);");
/// ```
pub fn to_newick(tree: &Tree, start: NodeId, options: &NewickOptions) -> String {
    let mut result: Vec<String> = vec!["(".to_string()];
    let mut stack: Vec<(NodeId, usize)> = vec![(start, tree[start].children().len())];

    while let Some(&(node, unvisited)) = stack.last() {
        if unvisited > 0 {
            // Descend into the next unvisited child, in original order
            stack.last_mut().unwrap().1 -= 1;
            let children = tree[node].children();
            let child = children[children.len() - unvisited];
            if !tree[child].children().is_empty() {
                result.push("(".to_string());
            }
            stack.push((child, tree[child].children().len()));
        } else {
            // Post-visit: close the group and emit name and length
            stack.pop();
            if !tree[node].children().is_empty() {
                *result.last_mut().unwrap() = ")".to_string();
            }

            let mut label = match tree[node].name() {
                None => String::new(),
                Some(name) if options.escape_name => escape_name(name),
                Some(name) => name.to_string(),
            };
            if options.with_distances {
                if let Some(length) = tree[node].length() {
                    label = format!("{}:{}", label, length);
                }
            }
            result.push(label);
            result.push(",".to_string());
        }
    }

    match result.len() {
        // single node, no name
        2 => {
            if options.semicolon {
                ";".to_string()
            } else {
                String::new()
            }
        }
        // single node with name
        3 => {
            if options.semicolon {
                format!("{};", result[1])
            } else {
                result[1].clone()
            }
        }
        _ => {
            if options.semicolon {
                *result.last_mut().unwrap() = ";".to_string();
            } else {
                result.pop();
            }
            result.concat()
        }
    }
}

impl Tree {
    /// Convenience method for [to_newick].
    pub fn to_newick(&self, start: NodeId, options: &NewickOptions) -> String {
        to_newick(self, start, options)
    }
}
