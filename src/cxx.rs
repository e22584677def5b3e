//! C/C++ header processing core
//!
//! Raw header text flows through three stages: [`lexing`] turns characters
//! into spacing-preserving tokens, [`preprocess`] resolves conditionals
//! and macros lazily as a cursor moves over them, and [`declarations`]
//! assembles the extracted declarations into their final order. The
//! [`info`] symbol table steers both of the later stages and is supplied
//! by user configuration.

pub mod declarations;
pub mod error;
pub mod info;
pub mod lexing;
pub mod preprocess;

pub use declarations::{Context, DeclArena, Declaration, DeclarationList};
pub use error::ParseError;
pub use info::{Info, InfoTable};
pub use lexing::{detokenize, Token, TokenKind, Tokenizer};
pub use preprocess::TokenIndex;
