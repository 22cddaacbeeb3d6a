//! Stylesheet syntax errors.

use std::fmt;

use cssparser::{ParseError as CssParseError, ParseErrorKind};

/// Syntax errors detected on top of the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxError {
    /// A statement that is neither a declaration, a rule nor an at-rule.
    UnknownWord,
    /// A declaration with nothing before its colon.
    MissingProperty,
    /// A `}` with no matching `{`.
    UnexpectedCloseBrace,
    /// A `{` never closed before the end of input.
    UnclosedBlock,
    /// Any error reported by the tokenizer itself.
    UnexpectedToken,
}

impl SyntaxError {
    /// Human readable description.
    pub fn message(self) -> &'static str {
        match self {
            Self::UnknownWord => "Unknown word",
            Self::MissingProperty => "Missing property name before ':'",
            Self::UnexpectedCloseBrace => "Unexpected '}'",
            Self::UnclosedBlock => "Unclosed block",
            Self::UnexpectedToken => "Unexpected token",
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A syntax error and where it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseError {
    pub kind: SyntaxError,
    /// 1-indexed line.
    pub line: u32,
    /// 1-indexed column.
    pub column: u32,
}

impl ParseError {
    pub fn new(kind: SyntaxError, line: u32, column: u32) -> Self {
        Self { kind, line, column }
    }
}

impl From<CssParseError<'_, SyntaxError>> for ParseError {
    fn from(error: CssParseError<'_, SyntaxError>) -> Self {
        let kind = match error.kind {
            ParseErrorKind::Custom(kind) => kind,
            ParseErrorKind::Basic(_) => SyntaxError::UnexpectedToken,
        };

        // cssparser lines are 0-indexed, columns 1-indexed.
        Self::new(kind, error.location.line + 1, error.location.column)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.kind)
    }
}

impl std::error::Error for ParseError {}
