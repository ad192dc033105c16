//! ASCII-art rendering of trees.
//!
//! Renders each subtree's children fanned out with connecting bars:
//!
//! ```text
//!           /-A
//! ---------|
//!          |          /-B
//!           \--------|
//!                     \-C
//! ```
//!
//! (Tree `(A,(B,C));`, internal names hidden.)
//!
//! Rendering is recursive and therefore not safe for very deep trees; every
//! other algorithm in this crate is iterative, but a drawing that overflows
//! a terminal has no use case at that scale.

use crate::model::node::NodeId;
use crate::model::tree::Tree;

/// Width of one horizontal connector column.
const LEN: usize = 10;

/// Returns an ASCII drawing of the subtree rooted at `start`.
///
/// # Arguments
/// * `show_internal` - Overlay internal node names onto their connectors
/// * `compact` - Use exactly one text line per tip, no blank spacer lines
pub fn ascii_art(tree: &Tree, start: NodeId, show_internal: bool, compact: bool) -> String {
    let (lines, _) = ascii_art_lines(tree, start, "-", show_internal, compact);
    lines.join("\n")
}

/// Renders one subtree, returning its lines and the row index its parent
/// connector should attach to.
fn ascii_art_lines(
    tree: &Tree,
    id: NodeId,
    connector: &str,
    show_internal: bool,
    compact: bool,
) -> (Vec<String>, usize) {
    let pad = " ".repeat(LEN);
    let pad_short = " ".repeat(LEN - 1);
    let namestr = tree[id].name().unwrap_or("");
    let children = tree[id].children();

    if children.is_empty() {
        return (vec![format!("{}-{}", connector, namestr)], 0);
    }

    let mut mids = Vec::new();
    let mut result: Vec<String> = Vec::new();
    for (i, &child) in children.iter().enumerate() {
        let child_connector = if i == 0 {
            "/"
        } else if i == children.len() - 1 {
            "\\"
        } else {
            "-"
        };
        let (child_lines, child_mid) =
            ascii_art_lines(tree, child, child_connector, show_internal, compact);
        mids.push(child_mid + result.len());
        result.extend(child_lines);
        if !compact {
            result.push(String::new());
        }
    }
    if !compact {
        result.pop();
    }

    let lo = mids[0];
    let hi = *mids.last().unwrap();
    let end = result.len();
    let mid = (lo + hi) / 2;

    let mut prefixes: Vec<String> = Vec::with_capacity(end);
    for row in 0..end {
        if row > lo && row < hi {
            prefixes.push(format!("{}|", pad_short));
        } else {
            prefixes.push(pad.clone());
        }
    }
    let tail = prefixes[mid].chars().last().unwrap();
    prefixes[mid] = format!("{}{}{}", connector, "-".repeat(LEN - 2), tail);

    let mut result: Vec<String> = prefixes
        .into_iter()
        .zip(result)
        .map(|(prefix, line)| format!("{}{}", prefix, line))
        .collect();

    if show_internal && !namestr.is_empty() {
        // Overlay the name onto the connector row, after its first column
        let stem: Vec<char> = result[mid].chars().collect();
        let mut line = String::new();
        line.push(stem[0]);
        line.push_str(namestr);
        line.extend(stem.iter().skip(1 + namestr.chars().count()));
        result[mid] = line;
    }

    (result, mid)
}

impl Tree {
    /// Convenience method for [ascii_art].
    pub fn ascii_art(&self, start: NodeId, show_internal: bool, compact: bool) -> String {
        ascii_art(self, start, show_internal, compact)
    }
}
