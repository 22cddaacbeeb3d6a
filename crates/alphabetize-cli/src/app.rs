//! File processing for the command line front end.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use alphabetize::config::AlphabetizeConfig;
use rayon::prelude::*;

use crate::cli::Cli;

/// Errors that end a run early.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Alphabetize(#[from] alphabetize::Error),

    #[error("Failed to read standard input: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("Failed to write output: {0}")]
    Stdout(#[source] std::io::Error),

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Everything was alphabetized (or already was).
    Success,
    /// `--check` found input that is not alphabetized.
    Unsorted,
    /// At least one input could not be processed.
    Failed,
}

impl Status {
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Unsorted => 1,
            Self::Failed => 2,
        }
    }
}

/// The original and alphabetized text of one input.
struct Formatted {
    input: String,
    output: String,
}

impl Formatted {
    fn changed(&self) -> bool {
        self.input != self.output
    }
}

fn format_source(input: String, config: &AlphabetizeConfig) -> alphabetize::Result<Formatted> {
    let output = alphabetize::alphabetize_css(&input, config)?;
    Ok(Formatted { input, output })
}

fn format_file(path: &Path, config: &AlphabetizeConfig) -> alphabetize::Result<Formatted> {
    let input = std::fs::read_to_string(path).map_err(|e| alphabetize::Error::io(path, e))?;
    let span = tracing::debug_span!("file", path = %path.display());
    let _enter = span.enter();
    format_source(input, config)
}

/// Run the command line front end.
pub fn run(cli: &Cli, stdin: impl Read, stdout: impl Write) -> Result<Status, AppError> {
    let config = cli.resolve_config()?;
    tracing::debug!(?config, files = cli.files.len(), "starting");

    if cli.files.is_empty() {
        return run_stdin(cli, &config, stdin, stdout);
    }

    let results: Vec<_> = cli
        .files
        .par_iter()
        .map(|path| format_file(path, &config))
        .collect();

    emit_all(cli, cli.files.iter().map(PathBuf::as_path).zip(results), stdout)
}

/// Check, write or print every formatted file, in order.
///
/// A file that failed to read, parse or write is reported and marks the run
/// as failed; the remaining files are still handled.
fn emit_all<'a>(
    cli: &Cli,
    results: impl IntoIterator<Item = (&'a Path, alphabetize::Result<Formatted>)>,
    mut stdout: impl Write,
) -> Result<Status, AppError> {
    let mut status = Status::Success;

    for (path, result) in results {
        let formatted = match result {
            Ok(formatted) => formatted,
            Err(e) => {
                eprintln!("error: {}: {}", path.display(), e);
                status = Status::Failed;
                continue;
            }
        };

        if cli.check {
            if formatted.changed() {
                eprintln!("{}: not alphabetized", path.display());
                if status == Status::Success {
                    status = Status::Unsorted;
                }
            }
        } else if cli.write {
            if formatted.changed() {
                if let Err(e) = write_file(path, &formatted) {
                    eprintln!("error: {e}");
                    status = Status::Failed;
                    continue;
                }
                tracing::info!(path = %path.display(), "rewrote file");
            }
        } else {
            stdout
                .write_all(formatted.output.as_bytes())
                .map_err(AppError::Stdout)?;
        }
    }

    Ok(status)
}

fn write_file(path: &Path, formatted: &Formatted) -> Result<(), AppError> {
    std::fs::write(path, &formatted.output).map_err(|source| AppError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn run_stdin(
    cli: &Cli,
    config: &AlphabetizeConfig,
    mut stdin: impl Read,
    mut stdout: impl Write,
) -> Result<Status, AppError> {
    let mut input = String::new();
    stdin.read_to_string(&mut input).map_err(AppError::Stdin)?;

    let formatted = format_source(input, config)?;

    if cli.check {
        if formatted.changed() {
            eprintln!("<stdin>: not alphabetized");
            return Ok(Status::Unsorted);
        }
        return Ok(Status::Success);
    }

    stdout
        .write_all(formatted.output.as_bytes())
        .map_err(AppError::Stdout)?;
    Ok(Status::Success)
}
