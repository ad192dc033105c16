//! Newick format serialization for trees.
//!
//! Only emission is provided here; constructing trees from Newick text is
//! outside this crate's scope. The emitted grammar is:
//!
//! ```text
//! Tree     ::= Subtree ';'
//! Subtree  ::= Leaf | Internal
//! Internal ::= '(' Subtree (',' Subtree)* ')' [Name] [':' Length]
//! Leaf     ::= [Name] [':' Length]
//! ```
//!
//! Names are escaped per [escape::escape_name]: wrapped in single quotes
//! (with embedded quotes doubled) when they contain structural characters,
//! otherwise spaces become underscores.

pub mod escape;
pub mod writer;

pub use escape::escape_name;
pub use escape::is_quoted;
pub use writer::NewickOptions;
pub use writer::to_newick;
