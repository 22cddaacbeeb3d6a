//! Whitespace-preserving stylesheet tree.

mod block;
mod node;
mod root;

pub use block::Block;
pub use node::{AtRule, Comment, Declaration, Node, NodeKind, Rule};
pub use root::Root;
