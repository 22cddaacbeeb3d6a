//! Alphabetical property ordering for CSS and SCSS rule blocks.
//!
//! This crate rewrites every rule block of a stylesheet so that its
//! declarations appear in alphabetical order, featuring:
//!
//! - **Lossless parsing**: whitespace and comments round-trip exactly
//! - **Variables**: `$name` declarations stay put and get a blank line after them
//! - **Pinning**: declarations whose value contains `!ignore` never move
//! - **Nesting**: nested rules are reordered independently, at any depth
//! - **Configuration**: TOML or JSON option files
//!
//! # Example
//!
//! ```ignore
//! use alphabetize::prelude::*;
//!
//! let css = ".sel {\n  z-index: 10;\n  display: block;\n}";
//! let sorted = alphabetize_css(css, &AlphabetizeConfig::default())?;
//! assert_eq!(sorted, ".sel {\n  display: block;\n  z-index: 10;\n}");
//! ```

pub mod ast;
pub mod config;
pub mod logging;
pub mod parser;
pub mod reorder;

mod error;
mod stringify;

pub use error::{Error, Result};
pub use reorder::{alphabetize, alphabetize_css, plugin};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::ast::{Block, Node, NodeKind, Root};
    pub use crate::config::AlphabetizeConfig;
    pub use crate::reorder::{
        Classification, ReorderSummary, RuleReorderer, alphabetize, alphabetize_css, classify,
        plugin,
    };
}
