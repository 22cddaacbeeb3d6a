//! Reordering options and configuration files.
//!
//! Options are a flat record. Files may be TOML or JSON and use the camelCase
//! key names:
//!
//! ```toml
//! # alphabetize.toml
//! sortVariables = true
//! noNewLineAfterVars = false
//! ```
//!
//! ```json
//! { "sortVariables": true }
//! ```
//!
//! Missing keys fall back to their defaults and unknown keys are ignored, but
//! a known key with a non-boolean value is rejected.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::logging::targets;
use crate::{Error, Result};

/// File names searched by [`AlphabetizeConfig::discover`], in order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["alphabetize.toml", ".alphabetizerc.json"];

/// Options for the reordering pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlphabetizeConfig {
    /// Sort `$variable` declarations alphabetically alongside properties
    /// instead of leaving them where they are.
    pub sort_variables: bool,
    /// Do not insert a blank line after the variable group.
    pub no_new_line_after_vars: bool,
}

impl AlphabetizeConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether variables are sorted.
    pub fn with_sort_variables(mut self, sort_variables: bool) -> Self {
        self.sort_variables = sort_variables;
        self
    }

    /// Set whether the blank line after variables is suppressed.
    pub fn with_no_new_line_after_vars(mut self, no_new_line_after_vars: bool) -> Self {
        self.no_new_line_after_vars = no_new_line_after_vars;
        self
    }

    /// Parse options from TOML text.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        toml::from_str(toml).map_err(|e| Error::config(e.message().to_string()))
    }

    /// Parse options from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::config(e.to_string()))
    }

    /// Load options from a file, choosing the format by extension.
    ///
    /// `.json` files (and `.alphabetizerc`) are read as JSON, everything else
    /// as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        let is_json = path.extension().is_some_and(|ext| ext == "json")
            || path.file_name().is_some_and(|name| name == ".alphabetizerc");

        let config = if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
        .map_err(|e| e.with_config_path(path))?;

        tracing::debug!(target: targets::CONFIG, path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    /// Find the nearest configuration file in `dir` or its ancestors.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        dir.as_ref().ancestors().find_map(|ancestor| {
            CONFIG_FILE_NAMES
                .iter()
                .map(|name| ancestor.join(name))
                .find(|candidate| candidate.is_file())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AlphabetizeConfig::new();
        assert!(!config.sort_variables);
        assert!(!config.no_new_line_after_vars);
    }

    #[test]
    fn builder() {
        let config = AlphabetizeConfig::new()
            .with_sort_variables(true)
            .with_no_new_line_after_vars(true);
        assert!(config.sort_variables);
        assert!(config.no_new_line_after_vars);
    }

    #[test]
    fn parse_toml() {
        let config = AlphabetizeConfig::from_toml_str("sortVariables = true\nunknown = 3\n").unwrap();
        assert_eq!(config, AlphabetizeConfig::new().with_sort_variables(true));
    }

    #[test]
    fn parse_json() {
        let config = AlphabetizeConfig::from_json_str(r#"{"noNewLineAfterVars": true, "extra": "x"}"#).unwrap();
        assert_eq!(config, AlphabetizeConfig::new().with_no_new_line_after_vars(true));
    }

    #[test]
    fn reject_non_boolean_values() {
        assert!(matches!(
            AlphabetizeConfig::from_toml_str("sortVariables = \"yes\""),
            Err(Error::Config { .. })
        ));
        assert!(matches!(
            AlphabetizeConfig::from_json_str(r#"{"sortVariables": 1}"#),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("alphabetize.toml");
        std::fs::write(&toml_path, "noNewLineAfterVars = true").unwrap();
        assert!(AlphabetizeConfig::load(&toml_path).unwrap().no_new_line_after_vars);

        let json_path = dir.path().join("options.json");
        std::fs::write(&json_path, r#"{"sortVariables": true}"#).unwrap();
        assert!(AlphabetizeConfig::load(&json_path).unwrap().sort_variables);
    }

    #[test]
    fn load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alphabetize.toml");
        std::fs::write(&path, "sortVariables = 1").unwrap();

        let err = AlphabetizeConfig::load(&path).unwrap_err();
        assert!(matches!(err, Error::Config { path: Some(ref p), .. } if p == &path));
    }

    #[test]
    fn discover_in_ancestors() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("styles/components");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".alphabetizerc.json"), "{}").unwrap();

        assert_eq!(
            AlphabetizeConfig::discover(&nested),
            Some(dir.path().join(".alphabetizerc.json"))
        );
    }
}
