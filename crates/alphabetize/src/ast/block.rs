//! Ordered node sequences.

use super::Node;

/// The children of a rule, an at-rule body, or the stylesheet root.
///
/// Insertion order is source order until a reordering pass runs over the
/// block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    /// Child nodes in order.
    pub nodes: Vec<Node>,
    /// Whitespace after the last child, before the closing brace.
    pub after: String,
    /// Whether the last declaration in the source ended with `;`.
    pub semicolon: bool,
}

impl Block {
    /// Create an empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a block from nodes, with every declaration terminated.
    pub fn from_nodes(nodes: Vec<Node>, after: impl Into<String>) -> Self {
        Self {
            nodes,
            after: after.into(),
            semicolon: true,
        }
    }

    /// Append a node.
    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Get the number of children.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the block has no children.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over children.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Property names in order, skipping nameless children.
    pub fn props(&self) -> Vec<&str> {
        self.nodes.iter().filter_map(Node::prop).collect()
    }

    /// Index of the last child that is not a comment.
    ///
    /// The serializer leaves the semicolon off this child when
    /// [`semicolon`](Self::semicolon) is false.
    pub fn last_non_comment_index(&self) -> Option<usize> {
        self.nodes.iter().rposition(|node| !node.is_comment())
    }
}
