//! Declaration assembly
//!
//! The parser hands each declaration it extracts to a [`DeclarationList`],
//! which settles ordering, duplicates, and user-driven filtering before
//! the sequence reaches a code generator. [`Context`] resolves bare names
//! against the enclosing scopes while that happens.

pub mod context;
pub mod list;
pub mod model;
pub mod templates;

pub use context::{Context, TemplateMap};
pub use list::{better_of, DeclarationList};
pub use model::{DeclArena, Declaration, Declarator, DeclaratorId, Type, TypeId, OPAQUE_POINTER};
