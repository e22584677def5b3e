//! Detokenizer: turn a token stream back into text
//!
//! Because every token carries its preceding whitespace in `spacing`,
//! reconstruction is a plain concatenation. This is the property the rest
//! of the crate leans on when it rebuilds declaration text from tokens.

use super::tokens::Token;

/// Concatenate `spacing + text` over the stream
pub fn detokenize(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push_str(&token.spacing);
        out.push_str(&token.text);
    }
    out
}
