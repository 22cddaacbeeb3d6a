//! Logging facilities for alphabetize.
//!
//! The crate is instrumented with the `tracing` crate. Nothing is printed
//! unless the host installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//!
//! let css = alphabetize::alphabetize_css(source, &AlphabetizeConfig::default())?;
//! ```
//!
//! The target constants below can be used in `RUST_LOG` style directives to
//! narrow output to one stage, e.g. `alphabetize::reorder=trace`.

/// Target names for log filtering.
pub mod targets {
    /// Crate-wide target.
    pub const CRATE: &str = "alphabetize";
    /// Parser target.
    pub const PARSER: &str = "alphabetize::parser";
    /// Reordering pipeline target.
    pub const REORDER: &str = "alphabetize::reorder";
    /// Configuration loading target.
    pub const CONFIG: &str = "alphabetize::config";
}

#[cfg(test)]
mod tests {
    use super::targets;

    #[test]
    fn targets_are_nested_under_crate() {
        for target in [targets::PARSER, targets::REORDER, targets::CONFIG] {
            assert!(target.starts_with(targets::CRATE));
        }
    }
}
