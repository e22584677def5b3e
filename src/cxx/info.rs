//! User-supplied symbol table driving preprocessing and declaration
//! filtering
//!
//! An [`Info`] entry describes how one or more C++ names should be treated:
//! whether the name counts as defined for `#if` purposes, whether it should
//! be skipped outright, what `#define` text to expand it from, and which
//! binding-side names and types it maps to. The [`InfoTable`] is an ordered
//! multimap from name to entries: several entries may bind the same name,
//! and the first inserted wins wherever a single entry is needed.
//!
//! The table is read-only during a parse and passed by reference; it is
//! never global state.

use crate::cxx::lexing::{kw, Tokenizer};
use std::collections::HashMap;

/// Configuration for one or more C++ names
#[derive(Debug, Clone, Default)]
pub struct Info {
    pub cpp_names: Vec<String>,
    /// Binding-side name overrides, in order of preference
    pub target_names: Vec<String>,
    pub annotations: Vec<String>,
    pub cpp_types: Vec<String>,
    pub value_types: Vec<String>,
    pub pointer_types: Vec<String>,
    pub cast: bool,
    /// Whether this name counts as defined for `#if`/`#ifdef` purposes
    pub define: bool,
    pub translate: bool,
    /// Suppress this construct entirely
    pub skip: bool,
    pub base: Option<String>,
    /// Preprocessor text; `#define` bodies here drive macro expansion
    pub cpp_text: Option<String>,
    pub target_text: Option<String>,
}

impl Info {
    pub fn new(cpp_names: &[&str]) -> Self {
        Info {
            cpp_names: cpp_names.iter().map(|s| s.to_string()).collect(),
            ..Info::default()
        }
    }

    pub fn target_names(mut self, names: &[&str]) -> Self {
        self.target_names = names.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn annotations(mut self, annotations: &[&str]) -> Self {
        self.annotations = annotations.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn cpp_types(mut self, types: &[&str]) -> Self {
        self.cpp_types = types.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn value_types(mut self, types: &[&str]) -> Self {
        self.value_types = types.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn pointer_types(mut self, types: &[&str]) -> Self {
        self.pointer_types = types.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn cast(mut self, cast: bool) -> Self {
        self.cast = cast;
        self
    }

    pub fn define(mut self, define: bool) -> Self {
        self.define = define;
        self
    }

    pub fn translate(mut self, translate: bool) -> Self {
        self.translate = translate;
        self
    }

    pub fn skip(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }

    pub fn base(mut self, base: &str) -> Self {
        self.base = Some(base.to_string());
        self
    }

    pub fn cpp_text(mut self, text: &str) -> Self {
        self.cpp_text = Some(text.to_string());
        self
    }

    pub fn target_text(mut self, text: &str) -> Self {
        self.target_text = Some(text.to_string());
        self
    }
}

/// Type names that normalize by sorting rather than lookup
const SIMPLE_TYPES: &[&str] = &[
    "bool", "char", "double", "float", "int", "long", "short", "signed", "unsigned",
];

/// Ordered multimap from C++ name to [`Info`] entries, optionally chained
/// to a parent table whose entries come after the child's.
#[derive(Debug, Clone, Default)]
pub struct InfoTable {
    map: HashMap<String, Vec<Info>>,
    parent: Option<Box<InfoTable>>,
}

impl InfoTable {
    pub fn new() -> Self {
        InfoTable::default()
    }

    pub fn with_parent(parent: InfoTable) -> Self {
        InfoTable {
            map: HashMap::new(),
            parent: Some(Box::new(parent)),
        }
    }

    /// Canonicalize a C++ type name for lookup. Strips `const` (tracking
    /// whether one was found), sorts runs of simple type keywords into a
    /// stable order, and with `untemplate` removes a single top-level
    /// template argument list ending the name.
    pub fn normalize(name: &str, unconst: bool, untemplate: bool) -> String {
        if name.is_empty() {
            return String::new();
        }
        let mut tokens = Tokenizer::new(name).tokenize();
        let mut found_const = false;
        let mut simple = true;
        let mut i = 0;
        while i < tokens.len() {
            if tokens[i] == *kw::CONST {
                found_const = true;
                tokens.remove(i);
            } else if !SIMPLE_TYPES.contains(&tokens[i].text.as_str()) {
                simple = false;
                break;
            } else {
                i += 1;
            }
        }
        let mut name = name.to_string();
        if simple {
            let mut texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
            texts.sort_unstable();
            name = if found_const {
                format!("const {}", texts.join(" "))
            } else {
                texts.join(" ")
            };
        } else if untemplate {
            let mut depth = 0;
            let mut template = None;
            for (k, token) in tokens.iter().enumerate() {
                if token.is_char('<') {
                    if depth == 0 {
                        template = Some(k);
                    }
                    depth += 1;
                } else if token.is_char('>') {
                    depth -= 1;
                    if depth == 0 && k + 1 != tokens.len() {
                        template = None;
                    }
                }
            }
            if let Some(template) = template {
                let mut stripped = if found_const {
                    String::from("const ")
                } else {
                    String::new()
                };
                for token in &tokens[..template] {
                    stripped.push_str(&token.text);
                }
                name = stripped;
            }
        }
        if unconst && found_const {
            if let Some(p) = name.find("const") {
                name = name[p + 5..].to_string();
            }
        }
        name.trim().to_string()
    }

    /// All entries bound to this name, child entries before parent
    /// entries. Lookup retries with const stripped, then with template
    /// arguments stripped.
    pub fn get(&self, cpp_name: &str) -> Vec<Info> {
        self.get_partial(cpp_name, true)
    }

    pub fn get_partial(&self, cpp_name: &str, partial: bool) -> Vec<Info> {
        let mut list = self
            .map
            .get(&Self::normalize(cpp_name, false, false))
            .or_else(|| self.map.get(&Self::normalize(cpp_name, true, false)))
            .or_else(|| {
                if partial {
                    self.map.get(&Self::normalize(cpp_name, true, true))
                } else {
                    None
                }
            })
            .cloned()
            .unwrap_or_default();
        if let Some(parent) = &self.parent {
            list.extend(parent.get_partial(cpp_name, partial));
        }
        list
    }

    /// First matching entry, by insertion order
    pub fn first(&self, cpp_name: &str) -> Option<Info> {
        self.get(cpp_name).into_iter().next()
    }

    /// Raw key presence in this table only: no normalization, no parent.
    /// The macro expander uses this as its cheap entry check.
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Append an entry under each of its names (both the exact and the
    /// untemplated normalization of each name).
    pub fn put(&mut self, info: Info) -> &mut Self {
        self.insert(info, false)
    }

    /// Like `put`, but the entry goes in front and wins `first()` lookups
    pub fn put_first(&mut self, info: Info) -> &mut Self {
        self.insert(info, true)
    }

    fn insert(&mut self, info: Info, front: bool) -> &mut Self {
        for cpp_name in &info.cpp_names {
            let exact = Self::normalize(cpp_name, false, false);
            let untemplated = Self::normalize(cpp_name, false, true);
            let mut keys = vec![exact];
            if untemplated != keys[0] {
                keys.push(untemplated);
            }
            for key in keys {
                let list = self.map.entry(key).or_default();
                if front {
                    list.insert(0, info.clone());
                } else {
                    list.push(info.clone());
                }
            }
        }
        self
    }
}
