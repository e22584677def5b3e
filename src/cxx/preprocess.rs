//! Lazy, cursor-driven preprocessing
//!
//! Instead of a separate pass over the whole file, preprocessing happens
//! as a side effect of moving a [`TokenIndex`] cursor: conditionals
//! resolve and macros expand just ahead of the position being read.
//! Directive lines are preserved as comment tokens so extracted text
//! keeps its shape.

pub mod conditionals;
pub mod macros;
pub mod token_index;

pub use conditionals::ASSUME_DEFINED_WHEN_UNRESOLVED;
pub use token_index::TokenIndex;
