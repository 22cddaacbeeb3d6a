//! Rendering trees back to stylesheet text.
//!
//! Every raw whitespace field is written out verbatim, so rendering a freshly
//! parsed tree reproduces its input exactly. Semicolons are not stored per
//! node: declarations and body-less at-rules are terminated unless they are
//! the last non-comment child of a block whose source omitted the final `;`.

use std::fmt;

use crate::ast::{AtRule, Block, Node, NodeKind, Root};

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.body)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = self.last_non_comment_index();

        for (i, node) in self.nodes.iter().enumerate() {
            write!(f, "{}", node)?;
            if node.takes_semicolon() && (Some(i) != last || self.semicolon) {
                f.write_str(";")?;
            }
            f.write_str(&node.after)?;
        }

        f.write_str(&self.after)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.before)?;

        match &self.kind {
            NodeKind::Declaration(decl) => {
                write!(f, "{}{}{}{}", decl.prop, decl.between, decl.value, decl.after)
            }
            NodeKind::Rule(rule) => {
                write!(f, "{}{}{{{}}}", rule.selector, rule.between, rule.body)
            }
            NodeKind::AtRule(at_rule) => write_at_rule(f, at_rule),
            NodeKind::Comment(comment) if comment.inline => write!(f, "//{}", comment.text),
            NodeKind::Comment(comment) => write!(f, "/*{}*/", comment.text),
        }
    }
}

fn write_at_rule(f: &mut fmt::Formatter<'_>, at_rule: &AtRule) -> fmt::Result {
    write!(
        f,
        "@{}{}{}{}",
        at_rule.name, at_rule.after_name, at_rule.params, at_rule.between
    )?;

    match &at_rule.body {
        Some(body) => write!(f, "{{{}}}", body),
        None => Ok(()),
    }
}
