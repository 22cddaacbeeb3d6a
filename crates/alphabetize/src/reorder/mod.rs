//! Alphabetical property reordering.
//!
//! [`RuleReorderer`] handles one rule block; [`alphabetize`] walks a whole
//! tree and runs it on every rule, nested rules included.

mod classifier;
mod reorderer;
mod sort;
mod whitespace;

pub use classifier::{Classification, IGNORE_MARKER, classify, is_variable};
pub use reorderer::{ReorderSummary, RuleReorderer};
pub use sort::compare_props;
pub use whitespace::{collapse_blank_runs, ensure_one_blank_line, has_blank_line};

pub(crate) use sort::sort_entries;

use crate::Result;
use crate::ast::{Block, Node, Root};
use crate::config::AlphabetizeConfig;
use crate::logging::targets;

/// A block child together with its classification and source index.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub index: usize,
    pub class: Classification,
    pub node: Node,
}

/// Build a rule visitor from a configuration.
///
/// The returned closure is meant to be handed to [`Root::walk_rules`], which
/// calls it once per rule block.
pub fn plugin(config: AlphabetizeConfig) -> impl Fn(&mut Block) {
    let reorderer = RuleReorderer::new(config);
    move |block: &mut Block| {
        reorderer.reorder(block);
    }
}

/// Alphabetize every rule in `root`. Returns the number of rules visited.
pub fn alphabetize(root: &mut Root, config: &AlphabetizeConfig) -> usize {
    let rules = root.walk_rules(plugin(*config));

    tracing::debug!(
        target: targets::CRATE,
        rules,
        path = ?root.source_path,
        "alphabetized stylesheet"
    );
    rules
}

/// Parse, alphabetize and render a stylesheet.
pub fn alphabetize_css(css: &str, config: &AlphabetizeConfig) -> Result<String> {
    let mut root = Root::from_css(css)?;
    alphabetize(&mut root, config);
    Ok(root.to_string())
}
