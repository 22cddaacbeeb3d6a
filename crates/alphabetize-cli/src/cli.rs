use std::path::PathBuf;

use alphabetize::config::AlphabetizeConfig;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "alphabetize", version)]
#[command(about = "Sort CSS and SCSS declarations alphabetically")]
pub struct Cli {
    /// Stylesheets to process. Standard input is used when none are given.
    pub files: Vec<PathBuf>,

    /// Configuration file (TOML or JSON). Defaults to the nearest
    /// alphabetize.toml or .alphabetizerc.json.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Sort $variable declarations too.
    #[arg(long)]
    pub sort_variables: bool,

    /// Do not insert a blank line after variable declarations.
    #[arg(long)]
    pub no_new_line_after_vars: bool,

    /// Rewrite files in place.
    #[arg(short, long, conflicts_with = "check")]
    pub write: bool,

    /// Only report files that are not alphabetized.
    #[arg(long)]
    pub check: bool,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Resolve options: configuration file first, flags on top.
    pub fn resolve_config(&self) -> alphabetize::Result<AlphabetizeConfig> {
        let path = self.config.clone().or_else(|| {
            std::env::current_dir()
                .ok()
                .and_then(AlphabetizeConfig::discover)
        });

        let base = match path {
            Some(path) => {
                tracing::info!(path = %path.display(), "using configuration file");
                AlphabetizeConfig::load(path)?
            }
            None => AlphabetizeConfig::default(),
        };

        Ok(base
            .with_sort_variables(base.sort_variables || self.sort_variables)
            .with_no_new_line_after_vars(base.no_new_line_after_vars || self.no_new_line_after_vars))
    }

    /// Default log directive for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use super::*;

    #[test]
    fn parse_flags() {
        let cli = Cli::try_parse_from([
            "alphabetize",
            "a.scss",
            "b.scss",
            "--sort-variables",
            "-w",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.files, vec![PathBuf::from("a.scss"), PathBuf::from("b.scss")]);
        assert!(cli.sort_variables);
        assert!(!cli.no_new_line_after_vars);
        assert!(cli.write);
        assert_eq!(cli.log_level(), "debug");
    }

    #[test]
    fn write_conflicts_with_check() {
        assert!(Cli::try_parse_from(["alphabetize", "--write", "--check", "a.css"]).is_err());
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alphabetize.toml");
        std::fs::write(&path, "sortVariables = true").unwrap();

        let cli = Cli::try_parse_from([
            OsString::from("alphabetize"),
            OsString::from("--config"),
            path.clone().into_os_string(),
            OsString::from("--no-new-line-after-vars"),
        ])
        .unwrap();
        let config = cli.resolve_config().unwrap();

        assert!(config.sort_variables);
        assert!(config.no_new_line_after_vars);
    }
}
