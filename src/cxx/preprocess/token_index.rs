//! Preprocessing token cursor
//!
//! Wraps a token buffer with a cursor whose every movement lazily runs the
//! preprocessor over the tokens it is about to step across. Rewrites
//! replace the whole buffer, so positions before the cursor never change
//! and already-consumed tokens stay consumed.

use crate::cxx::info::InfoTable;
use crate::cxx::lexing::{Token, TokenKind};
use crate::cxx::preprocess::conditionals::resolve_conditional;
use crate::cxx::preprocess::macros::expand_macro;

pub struct TokenIndex<'a> {
    /// Disables preprocessing while set, for lookahead over raw input.
    pub raw: bool,
    table: &'a InfoTable,
    tokens: Vec<Token>,
    index: usize,
}

impl<'a> TokenIndex<'a> {
    pub fn new(table: &'a InfoTable, tokens: Vec<Token>) -> Self {
        TokenIndex {
            raw: false,
            table,
            tokens,
            index: 0,
        }
    }

    /// Run conditional resolution and macro expansion starting at `index`
    /// until `count` non-comment tokens have been stepped over, and return
    /// the position reached.
    fn preprocess(&mut self, index: usize, count: usize) -> usize {
        let mut index = index;
        let mut count = count as i64;
        while index < self.tokens.len() {
            if let Some(rewritten) = resolve_conditional(&self.tokens, index, self.table) {
                self.tokens = rewritten;
            }
            if let Some(rewritten) = expand_macro(&self.tokens, index, self.table) {
                self.tokens = rewritten;
            }
            // a skipped expansion at the tail can leave nothing at the cursor
            if index >= self.tokens.len() {
                break;
            }
            if self.tokens[index].kind != TokenKind::Comment {
                count -= 1;
                if count < 0 {
                    break;
                }
            }
            index += 1;
        }
        if let Some(rewritten) = resolve_conditional(&self.tokens, index, self.table) {
            self.tokens = rewritten;
        }
        if let Some(rewritten) = expand_macro(&self.tokens, index, self.table) {
            self.tokens = rewritten;
        }
        index
    }

    /// Returns the token at the cursor without moving it.
    pub fn get(&mut self) -> Token {
        self.peek(0)
    }

    /// Returns the token `offset` non-comment tokens past the cursor.
    pub fn peek(&mut self, offset: usize) -> Token {
        let k = if self.raw {
            self.index + offset
        } else {
            let index = self.index;
            self.preprocess(index, offset)
        };
        self.tokens.get(k).cloned().unwrap_or_else(Token::eof)
    }

    /// Moves the cursor to the next non-comment token and returns it.
    pub fn advance(&mut self) -> Token {
        self.index = if self.raw {
            self.index + 1
        } else {
            let index = self.index;
            self.preprocess(index, 1)
        };
        self.tokens
            .get(self.index)
            .cloned()
            .unwrap_or_else(Token::eof)
    }

    /// The tokens remaining at and after the cursor, as currently rewritten.
    pub fn remaining(&self) -> &[Token] {
        &self.tokens[self.index.min(self.tokens.len())..]
    }

    /// Drains the whole buffer through the preprocessor.
    pub fn drain(mut self) -> Vec<Token> {
        while !self.get().is_empty() {
            self.advance();
        }
        self.tokens
    }
}
