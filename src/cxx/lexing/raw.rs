//! Raw character-class scanner for C/C++ header text
//!
//! This is the logos layer: it cuts normalized source (newlines already
//! reduced to `\n`) into spans, using callbacks for the scans that need
//! character-by-character state (numbers, strings, comments). Spacing
//! accumulation and token assembly happen in the tokenizer on top.
//!
//! The scanner is deliberately permissive: unterminated strings and
//! comments run to end of input, and the number scan accepts anything the
//! number character set can reach, classifying best-effort. Malformed
//! input never fails to produce a token.

use super::tokens::TokenKind;
use logos::{Lexer, Logos};

/// One raw span of normalized source text
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum RawToken {
    /// A run of whitespace; becomes the next token's `spacing`
    #[regex(r"[ \t\x0b\x0c\r\n]+")]
    Whitespace,

    /// Line continuation: backslash immediately before a newline. Emitted
    /// as an effectively invisible comment token with text `"\n"`.
    #[regex(r"\\\n")]
    LineSplice,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,

    /// Number scan starting from a digit, `.`, `+` or `-`; the callback
    /// consumes the rest and yields the classified kind plus the token
    /// text with `l/L/u/U` suffixes dropped and 64-bit promotion applied.
    #[regex(r"[0-9.+-]", scan_number)]
    Number((TokenKind, String)),

    /// Double-quoted string; backslash-escaped quotes do not terminate.
    /// The yielded text always carries a closing quote, even at EOF.
    #[token("\"", scan_string)]
    Str(String),

    /// `//` comment, continued across backslash-ended lines; the
    /// terminating newline stays in the stream.
    #[token("//", scan_line_comment)]
    LineComment(String),

    /// `/* ... */` comment, to matching close or end of input
    #[token("/*", scan_block_comment)]
    BlockComment(String),

    #[token("::")]
    DoubleColon,

    #[token("##")]
    DoublePound,

    /// Any other single character
    #[regex(r".", priority = 1)]
    Other,
}

fn number_char(c: char) -> bool {
    c.is_ascii_digit()
        || matches!(c, '.' | '-' | '+')
        || ('a'..='f').contains(&c)
        || ('A'..='F').contains(&c)
        || matches!(c, 'l' | 'L' | 'u' | 'U' | 'x' | 'X')
}

fn scan_number(lex: &mut Lexer<RawToken>) -> (TokenKind, String) {
    let first = lex.slice().chars().next().unwrap();
    let mut text = String::new();
    text.push(first);
    let mut kind = if first == '.' {
        TokenKind::Float
    } else {
        TokenKind::Integer
    };
    let mut prevc = '\0';
    let mut exp = false;
    let mut large = false;
    let mut unsigned = false;
    let mut hex = false;
    let mut consumed = 0;
    for c in lex.remainder().chars() {
        if !number_char(c) {
            break;
        }
        match c {
            '.' => kind = TokenKind::Float,
            'e' | 'E' => exp = true,
            'l' | 'L' => large = true,
            'u' | 'U' => unsigned = true,
            'x' | 'X' => hex = true,
            _ => {}
        }
        if !matches!(c, 'l' | 'L' | 'u' | 'U') {
            text.push(c);
        }
        prevc = c;
        consumed += c.len_utf8();
    }
    lex.bump(consumed);
    if !hex && (exp || prevc == 'f' || prevc == 'F') {
        kind = TokenKind::Float;
    }
    if kind == TokenKind::Integer && !large {
        if let Some(value) = decode_integer(&text) {
            let high = value >> 32;
            large = high != 0 && high != -1;
        }
    }
    if kind == TokenKind::Integer && (large || (unsigned && !hex)) {
        text.push('L');
    }
    (kind, text)
}

/// Decode an integer literal the way the number scan needs it: optional
/// sign, then hex (`0x`), octal (leading `0`) or decimal digits. Returns
/// None for anything unparsable, including overflow.
fn decode_integer(text: &str) -> Option<i64> {
    let (negative, rest) = match text.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (radix, digits) = if let Some(h) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        (16, h)
    } else if rest.len() > 1 && rest.starts_with('0') {
        (8, &rest[1..])
    } else {
        (10, rest)
    };
    if digits.is_empty() {
        return None;
    }
    let value = i64::from_str_radix(digits, radix).ok()?;
    Some(if negative { -value } else { value })
}

fn scan_string(lex: &mut Lexer<RawToken>) -> String {
    let mut text = String::from("\"");
    let mut prevc = '\0';
    let mut consumed = 0;
    for c in lex.remainder().chars() {
        consumed += c.len_utf8();
        if prevc != '\\' && c == '"' {
            break;
        }
        text.push(c);
        prevc = c;
    }
    lex.bump(consumed);
    text.push('"');
    text
}

fn scan_line_comment(lex: &mut Lexer<RawToken>) -> String {
    let mut text = String::from("//");
    let mut prevc = '\0';
    let mut consumed = 0;
    for c in lex.remainder().chars() {
        if prevc != '\\' && c == '\n' {
            break;
        }
        text.push(c);
        prevc = c;
        consumed += c.len_utf8();
    }
    lex.bump(consumed);
    text
}

fn scan_block_comment(lex: &mut Lexer<RawToken>) -> String {
    let mut text = String::from("/*");
    let mut prevc = '\0';
    let mut consumed = 0;
    for c in lex.remainder().chars() {
        consumed += c.len_utf8();
        if prevc == '*' && c == '/' {
            break;
        }
        text.push(c);
        prevc = c;
    }
    lex.bump(consumed);
    // the '*' was already pushed; close the comment even at EOF
    text.push('/');
    text
}

/// Scan normalized source into raw spans. Never fails: the catch-all
/// single-character rule absorbs anything the other rules don't claim.
pub fn scan(source: &str) -> Vec<(RawToken, std::ops::Range<usize>)> {
    let mut lexer = RawToken::lexer(source);
    let mut pieces = Vec::new();
    while let Some(result) = lexer.next() {
        let piece = result.unwrap_or(RawToken::Other);
        pieces.push((piece, lexer.span()));
    }
    pieces
}
