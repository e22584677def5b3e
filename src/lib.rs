//! # cxxlex
//!
//! A miniature C/C++ preprocessor and declaration toolkit: a lossless
//! tokenizer, a lazy macro-and-conditional preprocessor driven by a
//! user-supplied symbol table, and a deduplicating declaration list for
//! binding generators built on top of them.
//!
//! Tokens keep the whitespace and comments that precede them, so any
//! token sequence can be turned back into text exactly as it appeared in
//! the header it came from.

pub mod cxx;
