//! Stylesheet root and rule traversal.

use std::path::{Path, PathBuf};

use super::{AtRule, Block, NodeKind};
use crate::{Error, Result};

/// A parsed stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Root {
    /// Top-level children.
    pub body: Block,
    /// Source file path, when loaded from disk.
    pub source_path: Option<PathBuf>,
}

impl Root {
    /// Create an empty stylesheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a stylesheet from CSS or SCSS text.
    pub fn from_css(css: &str) -> Result<Self> {
        crate::parser::parse(css)
    }

    /// Load a stylesheet from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        let mut root = Self::from_css(&content)?;
        root.source_path = Some(path.to_path_buf());
        Ok(root)
    }

    /// Call `visitor` once for the body of every rule, at any depth.
    ///
    /// Rules nested inside at-rule bodies are visited too. The root block and
    /// at-rule bodies themselves are not handed to the visitor. A rule's body
    /// is visited before the rules nested inside it.
    ///
    /// Returns the number of rule bodies visited.
    pub fn walk_rules<F>(&mut self, mut visitor: F) -> usize
    where
        F: FnMut(&mut Block),
    {
        walk_block(&mut self.body, &mut visitor)
    }
}

fn walk_block<F>(block: &mut Block, visitor: &mut F) -> usize
where
    F: FnMut(&mut Block),
{
    let mut visited = 0;

    for node in &mut block.nodes {
        match &mut node.kind {
            NodeKind::Rule(rule) => {
                visitor(&mut rule.body);
                visited += 1 + walk_block(&mut rule.body, visitor);
            }
            NodeKind::AtRule(AtRule {
                body: Some(body), ..
            }) => {
                visited += walk_block(body, visitor);
            }
            _ => {}
        }
    }

    visited
}
