//! Lexical context and name qualification
//!
//! While scanning a header the parser carries a [`Context`] describing
//! where it stands: the enclosing namespace chain, active `using`
//! directives, whether the scope is inaccessible, and the template
//! parameter bindings in force. [`Context::qualify`] turns a bare name
//! into the ordered list of fully qualified spellings to try against the
//! symbol table, most specific first.

use crate::cxx::declarations::model::{DeclArena, DeclaratorId, TypeId};
use crate::cxx::info::InfoTable;

/// Template parameter bindings of one enclosing `template<...>` scope,
/// chained to the scopes outside it. Insertion order is the declaration
/// order of the parameters.
#[derive(Clone, Debug, Default)]
pub struct TemplateMap {
    entries: Vec<(String, Option<String>)>,
    pub parent: Option<Box<TemplateMap>>,
    /// The templated type or declarator this map belongs to, once known.
    pub type_id: Option<TypeId>,
    pub declarator: Option<DeclaratorId>,
}

impl TemplateMap {
    pub fn new(parent: Option<TemplateMap>) -> Self {
        TemplateMap {
            parent: parent.map(Box::new),
            ..TemplateMap::default()
        }
    }

    /// The qualified name of the templated construct this map belongs to.
    pub fn name<'a>(&self, arena: &'a DeclArena) -> Option<&'a str> {
        if let Some(id) = self.type_id {
            Some(&arena.ty(id).cpp_name)
        } else {
            self.declarator.map(|id| arena.declarator(id).cpp_name.as_str())
        }
    }

    /// Declares a parameter without binding it yet.
    pub fn declare(&mut self, key: impl Into<String>) {
        self.entries.push((key.into(), None));
    }

    /// Binds a parameter, declaring it first if needed.
    pub fn define(&mut self, key: &str, value: impl Into<String>) {
        for (k, v) in &mut self.entries {
            if k == key {
                *v = Some(value.into());
                return;
            }
        }
        self.entries.push((key.to_string(), Some(value.into())));
    }

    /// True once every declared parameter has a binding. An empty map is
    /// full.
    pub fn full(&self) -> bool {
        self.entries.iter().all(|(_, v)| v.is_some())
    }

    /// Looks a parameter up, falling back to enclosing scopes.
    pub fn get(&self, key: &str) -> Option<&str> {
        for (k, v) in &self.entries {
            if k == key {
                return v.as_deref();
            }
        }
        self.parent.as_ref().and_then(|p| p.get(key))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &Option<String>> {
        self.entries.iter().map(|(_, v)| v)
    }
}

/// The lexical surroundings of the declaration being parsed.
#[derive(Clone, Debug, Default)]
pub struct Context {
    pub namespace: Option<String>,
    pub inaccessible: bool,
    /// Private scope being flattened; its virtual members stay reachable.
    pub virtualize: bool,
    pub template_map: Option<TemplateMap>,
    pub using_list: Vec<String>,
}

impl Context {
    pub fn new() -> Self {
        Context::default()
    }

    /// All likely combinations of namespaces and template arguments for
    /// `cpp_name`, innermost scope first, widening out to the global
    /// namespace and then the `using` directives in force.
    pub fn qualify(&self, arena: &DeclArena, cpp_name: &str) -> Vec<String> {
        if cpp_name.is_empty() {
            return Vec::new();
        }
        if let Some(stripped) = cpp_name.strip_prefix("::") {
            // explicitly global, nothing to widen
            return vec![stripped.to_string()];
        }
        let mut names = Vec::new();
        let mut ns = Some(self.namespace.clone().unwrap_or_default());
        while let Some(current) = ns {
            let name = if current.is_empty() {
                cpp_name.to_string()
            } else {
                format!("{}::{}", current, cpp_name)
            };
            let mut map = self.template_map.as_ref();
            while let Some(m) = map {
                if m.name(arena) == Some(name.as_str()) {
                    let mut args = String::from("<");
                    let mut separator = "";
                    for value in m.values() {
                        args.push_str(separator);
                        args.push_str(value.as_deref().unwrap_or(""));
                        separator = ",";
                    }
                    let close = if args.ends_with('>') { " >" } else { ">" };
                    names.push(format!("{}{}{}", name, args, close));
                    break;
                }
                map = m.parent.as_deref();
            }
            names.push(name);

            let normalized = InfoTable::normalize(&current, false, true);
            ns = match normalized.rfind("::") {
                Some(i) => Some(normalized[..i].to_string()),
                None if !normalized.is_empty() => Some(String::new()),
                None => None,
            };
        }
        for directive in &self.using_list {
            let prefix = InfoTable::normalize(cpp_name, false, true);
            let i = directive.rfind("::").map(|i| i + 2).unwrap_or(0);
            let (scope, suffix) = directive.split_at(i);
            if suffix.is_empty() || prefix == suffix {
                names.push(format!("{}{}", scope, cpp_name));
            }
        }
        names
    }
}
