//! Token definitions for C/C++ header text
//!
//! Tokens carry their preceding whitespace verbatim in `spacing` so that
//! `spacing + text`, concatenated over a stream, reconstructs the source.
//! Equality compares kind and text only; spacing and position are metadata.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Lexical class of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Integer,
    Float,
    String,
    Comment,
    Identifier,
    /// Two-character symbols: `::` and `##`
    Symbol,
    /// Any other single character, typed by the character itself
    Char(char),
    /// End-of-input sentinel; may still carry trailing spacing
    Eof,
}

/// A minimal lexical unit with preserved spacing and source position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Whitespace (and nothing else) that preceded this token, verbatim
    /// except for newline normalization
    pub spacing: String,
    pub file: Option<PathBuf>,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
            spacing: String::new(),
            file: None,
            line: 0,
        }
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Token::new(TokenKind::Identifier, name)
    }

    pub fn symbol(text: impl Into<String>) -> Self {
        Token::new(TokenKind::Symbol, text)
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Token::new(TokenKind::Comment, text)
    }

    pub fn character(c: char) -> Self {
        Token::new(TokenKind::Char(c), c.to_string())
    }

    pub fn eof() -> Self {
        Token::new(TokenKind::Eof, "")
    }

    /// True when there is nothing left at all: the EOF sentinel without
    /// even trailing spacing. A final whitespace-only token at EOF is not
    /// empty, so trailing spacing survives reconstruction.
    pub fn is_empty(&self) -> bool {
        self.kind == TokenKind::Eof && self.spacing.is_empty()
    }

    pub fn is_kind(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_char(&self, c: char) -> bool {
        self.kind == TokenKind::Char(c)
    }

    /// Identifier with exactly this name
    pub fn is_id(&self, name: &str) -> bool {
        self.kind == TokenKind::Identifier && self.text == name
    }

    /// Identifier matching any of these names
    pub fn is_any_id(&self, names: &[&str]) -> bool {
        self.kind == TokenKind::Identifier && names.iter().any(|n| *n == self.text)
    }

    /// Text comparison regardless of kind; used where the preprocessor
    /// matches literal token text (line-splice comments, `##`)
    pub fn text_is(&self, text: &str) -> bool {
        self.text == text
    }

    /// Source position for diagnostics, `file:line` style
    pub fn position(&self) -> String {
        match &self.file {
            Some(f) => format!("{}:{}", f.display(), self.line),
            None => format!("<input>:{}", self.line),
        }
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.text == other.text
    }
}

impl Eq for Token {}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Interned keyword tokens matched by the preprocessor and declaration
/// machinery. All are plain identifiers; interning keeps match sites free
/// of repeated allocations.
pub mod kw {
    use super::Token;
    use once_cell::sync::Lazy;

    macro_rules! keyword {
        ($name:ident, $text:expr) => {
            pub static $name: Lazy<Token> = Lazy::new(|| Token::identifier($text));
        };
    }

    keyword!(CONST, "const");
    keyword!(DEFINE, "define");
    keyword!(IF, "if");
    keyword!(IFDEF, "ifdef");
    keyword!(IFNDEF, "ifndef");
    keyword!(ELIF, "elif");
    keyword!(ELSE, "else");
    keyword!(ENDIF, "endif");
    keyword!(ENUM, "enum");
    keyword!(EXPLICIT, "explicit");
    keyword!(EXTERN, "extern");
    keyword!(FRIEND, "friend");
    keyword!(INLINE, "inline");
    keyword!(STATIC, "static");
    keyword!(CLASS, "class");
    keyword!(STRUCT, "struct");
    keyword!(UNION, "union");
    keyword!(TEMPLATE, "template");
    keyword!(TYPEDEF, "typedef");
    keyword!(TYPENAME, "typename");
    keyword!(USING, "using");
    keyword!(NAMESPACE, "namespace");
    keyword!(OPERATOR, "operator");
    keyword!(PRIVATE, "private");
    keyword!(PROTECTED, "protected");
    keyword!(PUBLIC, "public");
    keyword!(VIRTUAL, "virtual");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_spacing_and_position() {
        let mut a = Token::identifier("foo");
        a.spacing = "  \n".to_string();
        a.line = 12;
        let b = Token::identifier("foo");
        assert_eq!(a, b);
    }

    #[test]
    fn equality_requires_matching_kind() {
        let id = Token::identifier("if");
        let sym = Token::new(TokenKind::String, "if");
        assert_ne!(id, sym);
        assert_eq!(id, *kw::IF);
    }

    #[test]
    fn char_tokens_carry_their_character_as_text() {
        let t = Token::character('#');
        assert!(t.is_char('#'));
        assert_eq!(t.text, "#");
        assert!(!t.is_char('*'));
    }

    #[test]
    fn empty_means_eof_without_spacing() {
        assert!(Token::eof().is_empty());
        let mut trailing = Token::eof();
        trailing.spacing = "\n".to_string();
        assert!(!trailing.is_empty());
    }
}
