//! Errors surfaced to callers of the parsing layer

use std::fmt;
use std::path::PathBuf;

use crate::cxx::lexing::Token;

/// A hard parse failure, carrying the position of the offending token.
/// Lexical anomalies never raise this; only structural violations at the
/// declaration layer do.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub file: Option<PathBuf>,
    pub line: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        ParseError {
            file: None,
            line: 0,
            message: message.into(),
        }
    }

    /// An error positioned at `token`.
    pub fn at(token: &Token, message: impl Into<String>) -> Self {
        ParseError {
            file: token.file.clone(),
            line: token.line,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{} ({}:{})", self.message, file.display(), self.line),
            None => write!(f, "{} (line {})", self.message, self.line),
        }
    }
}

impl std::error::Error for ParseError {}
