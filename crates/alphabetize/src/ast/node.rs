//! Individual block children.

use super::Block;

/// One child of a block, together with the whitespace that precedes it.
///
/// `before` holds exactly the source text between the previous sibling (or
/// the opening brace) and this node, so a parsed tree renders back to the
/// original input byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Leading whitespace before the node. Also holds stray semicolons at
    /// the very start of a block.
    pub before: String,
    /// What the node is.
    pub kind: NodeKind,
    /// Stray semicolons following the node, which move along with it.
    pub after: String,
}

/// The different kinds of block children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A `property: value` pair.
    Declaration(Declaration),
    /// A nested rule such as `&:hover { ... }`.
    Rule(Rule),
    /// An at-rule such as `@include mixin;` or `@media print { ... }`.
    AtRule(AtRule),
    /// A `/* ... */` or `// ...` comment standing on its own.
    Comment(Comment),
}

/// A declaration, e.g. `color: red`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Property name exactly as written (`color`, `$gutter`, `--accent`).
    pub prop: String,
    /// Text between property and value, including the colon.
    pub between: String,
    /// Raw value, annotations such as `!important` or `!ignore` included.
    pub value: String,
    /// Whitespace between the value and the terminating semicolon.
    pub after: String,
}

/// A rule with a selector and a block body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Selector text, without trailing whitespace.
    pub selector: String,
    /// Whitespace between the selector and `{`.
    pub between: String,
    /// Children of the rule.
    pub body: Block,
}

/// An at-rule, with or without a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtRule {
    /// Name without the `@`.
    pub name: String,
    /// Whitespace between the name and the parameters.
    pub after_name: String,
    /// Parameters, e.g. `screen and (min-width: 10px)`.
    pub params: String,
    /// Whitespace between the parameters and `{` or `;`.
    pub between: String,
    /// Body, if the at-rule has one.
    pub body: Option<Block>,
}

/// A comment; `text` excludes the delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    /// `// ...` comment running to the end of the line.
    pub inline: bool,
}

impl Node {
    /// Create a node with no trailing text.
    pub fn new(before: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            before: before.into(),
            kind,
            after: String::new(),
        }
    }

    /// Create a declaration node with the conventional `: ` separator.
    pub fn declaration(
        before: impl Into<String>,
        prop: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::new(
            before,
            NodeKind::Declaration(Declaration {
                prop: prop.into(),
                between: ": ".to_string(),
                value: value.into(),
                after: String::new(),
            }),
        )
    }

    /// Create a nested rule node.
    pub fn rule(before: impl Into<String>, selector: impl Into<String>, body: Block) -> Self {
        Self::new(
            before,
            NodeKind::Rule(Rule {
                selector: selector.into(),
                between: " ".to_string(),
                body,
            }),
        )
    }

    /// Create a `/* ... */` comment node.
    pub fn comment(before: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(
            before,
            NodeKind::Comment(Comment {
                text: text.into(),
                inline: false,
            }),
        )
    }

    /// Create a `// ...` comment node.
    pub fn line_comment(before: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(
            before,
            NodeKind::Comment(Comment {
                text: text.into(),
                inline: true,
            }),
        )
    }

    /// Property name, for declarations only.
    pub fn prop(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Declaration(decl) => Some(&decl.prop),
            _ => None,
        }
    }

    /// Raw value, for declarations only.
    pub fn value(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Declaration(decl) => Some(&decl.value),
            _ => None,
        }
    }

    /// Whether this node is a comment.
    pub fn is_comment(&self) -> bool {
        matches!(self.kind, NodeKind::Comment(_))
    }

    /// Whether this node is a `//` comment, which must be followed by a line
    /// break.
    pub fn is_line_comment(&self) -> bool {
        matches!(self.kind, NodeKind::Comment(Comment { inline: true, .. }))
    }

    /// Whether the serializer terminates this node with a semicolon.
    pub(crate) fn takes_semicolon(&self) -> bool {
        match &self.kind {
            NodeKind::Declaration(_) => true,
            NodeKind::AtRule(at_rule) => at_rule.body.is_none(),
            NodeKind::Rule(_) | NodeKind::Comment(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_accessors() {
        let node = Node::declaration("\n  ", "color", "red !ignore");

        assert_eq!(node.prop(), Some("color"));
        assert_eq!(node.value(), Some("red !ignore"));
        assert!(!node.is_comment());
        assert!(node.takes_semicolon());
    }

    #[test]
    fn nameless_nodes() {
        let comment = Node::comment("\n", " note ");
        let rule = Node::rule("\n", "&:hover", Block::new());

        assert_eq!(comment.prop(), None);
        assert_eq!(rule.value(), None);
        assert!(comment.is_comment());
        assert!(!comment.is_line_comment());
        assert!(!rule.takes_semicolon());
    }

    #[test]
    fn line_comment() {
        let comment = Node::line_comment("\n  ", " note");

        assert!(comment.is_comment());
        assert!(comment.is_line_comment());
        assert_eq!(comment.prop(), None);
        assert!(!comment.takes_semicolon());
    }
}
