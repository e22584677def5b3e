//! Tokenizer for C/C++ header text
//!
//! Assembles raw scanner spans into [`Token`]s: whitespace runs become the
//! following token's `spacing`, numbers arrive pre-classified, and every
//! token records the file and line it started on. Newlines are normalized
//! to `\n` up front; the original separator style is remembered but plays
//! no further role.
//!
//! The stream is lazy and restartable only from the start. After the end
//! of input, `next_token` keeps returning the EOF sentinel; a trailing run
//! of whitespace yields one last EOF-kind token carrying that whitespace
//! so reconstruction stays lossless.

use super::raw::{self, RawToken};
use super::tokens::{Token, TokenKind};
use std::iter::Peekable;
use std::ops::Range;
use std::path::{Path, PathBuf};

pub struct Tokenizer {
    file: Option<PathBuf>,
    source: String,
    line_separator: Option<&'static str>,
    pieces: Peekable<std::vec::IntoIter<(RawToken, Range<usize>)>>,
    line: usize,
}

impl Tokenizer {
    pub fn new(source: &str) -> Self {
        let (normalized, separator) = normalize_newlines(source);
        let pieces = raw::scan(&normalized).into_iter().peekable();
        Tokenizer {
            file: None,
            source: normalized,
            line_separator: separator,
            pieces,
            line: 1,
        }
    }

    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut tokenizer = Tokenizer::new(&text);
        tokenizer.file = Some(path.to_path_buf());
        Ok(tokenizer)
    }

    /// The line separator style the input used, once one has been seen
    pub fn line_separator(&self) -> Option<&'static str> {
        self.line_separator
    }

    pub fn next_token(&mut self) -> Token {
        let mut spacing = String::new();
        while let Some((RawToken::Whitespace, span)) = self.pieces.peek() {
            let slice = &self.source[span.clone()];
            spacing.push_str(slice);
            self.line += slice.matches('\n').count();
            self.pieces.next();
        }
        let line = self.line;

        let mut token = match self.pieces.next() {
            None => Token::eof(),
            Some((piece, span)) => {
                let slice = &self.source[span.clone()];
                self.line += slice.matches('\n').count();
                match piece {
                    RawToken::Identifier => Token::identifier(slice),
                    RawToken::Number((kind, text)) => Token::new(kind, text),
                    RawToken::Str(text) => Token::new(TokenKind::String, text),
                    RawToken::LineComment(text) | RawToken::BlockComment(text) => {
                        Token::comment(text)
                    }
                    RawToken::LineSplice => Token::comment("\n"),
                    RawToken::DoubleColon => Token::symbol("::"),
                    RawToken::DoublePound => Token::symbol("##"),
                    RawToken::Other => {
                        let c = slice.chars().next().unwrap_or('\0');
                        Token::character(c)
                    }
                    RawToken::Whitespace => unreachable!("consumed above"),
                }
            }
        };
        token.spacing = spacing;
        token.file = self.file.clone();
        token.line = line;
        token
    }

    /// Drain the stream into a vector, stopping at the first completely
    /// empty token. A final spacing-only token at EOF is kept.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            if token.is_empty() {
                break;
            }
            tokens.push(token);
        }
        tokens
    }
}

/// Reduce `\r\n` and bare `\r` to `\n`, reporting the first separator
/// style seen (None for input without line breaks).
fn normalize_newlines(source: &str) -> (String, Option<&'static str>) {
    let separator = source.find(['\r', '\n']).map(|i| {
        if source[i..].starts_with("\r\n") {
            "\r\n"
        } else if source[i..].starts_with('\r') {
            "\r"
        } else {
            "\n"
        }
    });
    if separator == Some("\n") || separator.is_none() {
        return (source.to_string(), separator);
    }
    (source.replace("\r\n", "\n").replace('\r', "\n"), separator)
}
