//! Declaration data model
//!
//! Types and declarators reference each other freely in C++ (a declarator
//! has a type, a function type has parameter declarators, a parameter may
//! carry an anonymous definition). They are stored in an arena and refer
//! to one another by handle, so the model stays acyclic and cheap to
//! clone.

/// Handle of a [`Type`] in a [`DeclArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeId(usize);

/// Handle of a [`Declarator`] in a [`DeclArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DeclaratorId(usize);

/// Output-language name of the generic opaque pointer base type. A type
/// mapped to it without template arguments carries no information of its
/// own.
pub const OPAQUE_POINTER: &str = "Pointer";

/// A parsed C++ type reference.
#[derive(Clone, Debug, Default)]
pub struct Type {
    pub cpp_name: String,
    /// Name the type maps to in generated bindings.
    pub target_name: String,
    pub const_value: bool,
    pub const_pointer: bool,
    pub virtual_function: bool,
    /// Resolved template arguments, empty for plain types.
    pub arguments: Vec<TypeId>,
}

impl Type {
    pub fn new(cpp_name: impl Into<String>) -> Self {
        Type {
            cpp_name: cpp_name.into(),
            ..Type::default()
        }
    }
}

/// A declarator: a named slot of some type, possibly a function with
/// parameters, possibly carrying an anonymous nested definition that must
/// be emitted before anything that uses it.
#[derive(Clone, Debug, Default)]
pub struct Declarator {
    pub cpp_name: String,
    pub type_id: Option<TypeId>,
    /// Function parameters; a hole marks a parameter that did not parse.
    pub parameters: Vec<Option<DeclaratorId>>,
    pub definition: Option<Box<Declaration>>,
}

impl Declarator {
    pub fn new(cpp_name: impl Into<String>) -> Self {
        Declarator {
            cpp_name: cpp_name.into(),
            ..Declarator::default()
        }
    }
}

/// One extracted declaration, carrying its reconstructed source text and
/// the flags the declaration list filters on.
#[derive(Clone, Debug, Default)]
pub struct Declaration {
    /// Reconstructed source text, re-indented on insertion.
    pub text: String,
    /// Deduplication identity; empty means never deduplicate.
    pub signature: String,
    pub const_member: bool,
    pub inaccessible: bool,
    /// Forward declaration lacking a definition.
    pub incomplete: bool,
    /// User-injected declarations bypass the automatic filters.
    pub custom: bool,
    pub type_id: Option<TypeId>,
    pub declarator: Option<DeclaratorId>,
}

impl Declaration {
    pub fn new(text: impl Into<String>, signature: impl Into<String>) -> Self {
        Declaration {
            text: text.into(),
            signature: signature.into(),
            ..Declaration::default()
        }
    }
}

/// Arena owning every [`Type`] and [`Declarator`] of a parsing pass.
#[derive(Debug, Default)]
pub struct DeclArena {
    types: Vec<Type>,
    declarators: Vec<Declarator>,
}

impl DeclArena {
    pub fn new() -> Self {
        DeclArena::default()
    }

    pub fn add_type(&mut self, ty: Type) -> TypeId {
        self.types.push(ty);
        TypeId(self.types.len() - 1)
    }

    pub fn add_declarator(&mut self, declarator: Declarator) -> DeclaratorId {
        self.declarators.push(declarator);
        DeclaratorId(self.declarators.len() - 1)
    }

    pub fn ty(&self, id: TypeId) -> &Type {
        &self.types[id.0]
    }

    pub fn ty_mut(&mut self, id: TypeId) -> &mut Type {
        &mut self.types[id.0]
    }

    pub fn declarator(&self, id: DeclaratorId) -> &Declarator {
        &self.declarators[id.0]
    }

    pub fn declarator_mut(&mut self, id: DeclaratorId) -> &mut Declarator {
        &mut self.declarators[id.0]
    }
}
