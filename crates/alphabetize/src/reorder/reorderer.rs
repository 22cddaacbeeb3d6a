//! The per-block reordering pipeline.

use super::whitespace::{break_after_line_comments, separate_variables, strip_blank_lines};
use super::{Classification, Entry, classify, sort_entries};
use crate::ast::Block;
use crate::config::AlphabetizeConfig;
use crate::logging::targets;

/// What a single [`RuleReorderer::reorder`] call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReorderSummary {
    /// Number of children in the block.
    pub nodes: usize,
    /// Number of variable declarations.
    pub variables: usize,
    /// Number of children that changed position.
    pub moved: usize,
    /// Whether a blank line was inserted after the variables.
    pub gap_inserted: bool,
}

/// Alphabetizes the children of one rule block at a time.
///
/// Each call runs the whole pipeline on one block's direct children:
///
/// 1. classify every child
/// 2. collapse blank-line runs
/// 3. sort the eligible children
/// 4. start a new line after every `//` comment
/// 5. separate the variable group with one blank line
///
/// Nested blocks are not touched; the tree walk hands them over separately.
#[derive(Debug, Clone, Default)]
pub struct RuleReorderer {
    config: AlphabetizeConfig,
}

impl RuleReorderer {
    /// Create a reorderer with the given configuration.
    pub fn new(config: AlphabetizeConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &AlphabetizeConfig {
        &self.config
    }

    /// Reorder `block` in place.
    ///
    /// The number of children never changes; only their order and the
    /// whitespace around them do.
    pub fn reorder(&self, block: &mut Block) -> ReorderSummary {
        let mut entries: Vec<Entry> = std::mem::take(&mut block.nodes)
            .into_iter()
            .enumerate()
            .map(|(index, node)| {
                let class = classify(&node);
                tracing::trace!(target: targets::REORDER, index, ?class, prop = node.prop(), "classified");
                Entry { index, class, node }
            })
            .collect();

        strip_blank_lines(&mut entries, &mut block.after);

        let mut entries = sort_entries(entries, &self.config);
        break_after_line_comments(&mut entries);

        let variables = entries
            .iter()
            .filter(|entry| entry.class == Classification::Variable)
            .count();
        let gap_inserted = if self.config.no_new_line_after_vars {
            false
        } else {
            separate_variables(&mut entries)
        };

        let summary = ReorderSummary {
            nodes: entries.len(),
            variables,
            moved: entries
                .iter()
                .enumerate()
                .filter(|(position, entry)| entry.index != *position)
                .count(),
            gap_inserted,
        };

        block.nodes = entries.into_iter().map(|entry| entry.node).collect();

        tracing::debug!(
            target: targets::REORDER,
            nodes = summary.nodes,
            variables = summary.variables,
            moved = summary.moved,
            gap_inserted = summary.gap_inserted,
            "reordered block"
        );

        summary
    }
}
