//! Declaration classification.

use std::sync::OnceLock;

use regex::Regex;

use crate::ast::Node;

/// Annotation that pins a declaration in place.
pub const IGNORE_MARKER: &str = "!ignore";

/// How the reordering pass treats a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// A simple `$name` variable declaration.
    Variable,
    /// A declaration whose value carries [`IGNORE_MARKER`].
    Ignored,
    /// Everything else, nameless nodes included.
    Sortable,
}

fn variable_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\$[A-Za-z0-9_-]+$").expect("variable pattern is valid"))
}

/// Whether `prop` names a simple variable: `$` followed by word or hyphen
/// characters only. Namespaced names such as `$theme.accent` do not count.
pub fn is_variable(prop: &str) -> bool {
    variable_pattern().is_match(prop)
}

/// Classify a node from its current property name and value.
///
/// The ignore marker wins over the variable check.
pub fn classify(node: &Node) -> Classification {
    if node.value().is_some_and(|value| value.contains(IGNORE_MARKER)) {
        Classification::Ignored
    } else if node.prop().is_some_and(is_variable) {
        Classification::Variable
    } else {
        Classification::Sortable
    }
}
