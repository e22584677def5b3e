//! Lexing pipeline for C/C++ header text
//!
//! Structure:
//! 1. Newline normalization (`\r\n`/`\r` -> `\n`), separator remembered
//! 2. Raw character-class scan using logos (`raw`)
//! 3. Token assembly: whitespace runs fold into the next token's
//!    `spacing`, numbers arrive classified, positions attached
//!    (`tokenizer`)
//! 4. `detokenize` concatenates `spacing + text` back into source text
//!
//! Spacing is captured verbatim rather than discarded so that declaration
//! text extracted downstream reproduces the original header formatting.
//! The preprocessor (`super::preprocess`) operates on the token vector
//! this module produces.

pub mod detokenizer;
pub mod raw;
pub mod tokenizer;
pub mod tokens;

pub use detokenizer::detokenize;
pub use tokenizer::Tokenizer;
pub use tokens::{kw, Token, TokenKind};
