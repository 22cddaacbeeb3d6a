//! Stylesheet parsing module.

mod error;
mod scss_parser;

pub use error::{ParseError, SyntaxError};
pub use scss_parser::parse;
