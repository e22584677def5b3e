//! Ordered, deduplicating declaration collection
//!
//! Declarations arrive in source order and leave in emission order:
//! nested definitions are spliced in ahead of whatever needs them,
//! duplicates resolve in favor of the non-const, accessible, complete
//! version, and user-driven skip rules drop entries outright. Template
//! declarations whose parameters are still unbound are withheld and their
//! symbol-table entries queued so the caller can reprocess them once per
//! requested instantiation.

use std::collections::VecDeque;

use crate::cxx::declarations::context::{Context, TemplateMap};
use crate::cxx::declarations::model::{DeclArena, Declaration, OPAQUE_POINTER};
use crate::cxx::declarations::templates;
use crate::cxx::info::{Info, InfoTable};

/// Picks the declaration worth keeping out of two sharing a signature.
/// `a` loses only when it is strictly worse: const where `b` is not,
/// inaccessible where `b` is not, or incomplete where `b` is not, checked
/// in that order.
pub fn better_of<'d>(a: &'d Declaration, b: &'d Declaration) -> &'d Declaration {
    if strictly_worse(a, b) {
        b
    } else {
        a
    }
}

fn strictly_worse(a: &Declaration, b: &Declaration) -> bool {
    (a.const_member && !b.const_member)
        || (a.inaccessible && !b.inaccessible)
        || (a.incomplete && !b.incomplete)
}

#[derive(Default)]
pub struct DeclarationList<'a> {
    decls: Vec<Declaration>,
    /// Indentation context applied to the text of retained declarations.
    pub spacing: Option<String>,
    pub template_map: Option<TemplateMap>,
    pub context: Option<Context>,
    inherited: Option<&'a DeclarationList<'a>>,
    pending: VecDeque<Info>,
}

impl<'a> DeclarationList<'a> {
    pub fn new() -> Self {
        DeclarationList::default()
    }

    /// A list whose forward declarations defer to `parent`.
    pub fn with_inherited(parent: &'a DeclarationList<'a>) -> Self {
        DeclarationList {
            inherited: Some(parent),
            ..DeclarationList::default()
        }
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Declaration> {
        self.decls.iter()
    }

    /// Symbol-table entries queued for reprocessing by rules that withhold
    /// or double a declaration. Draining is the caller's cue to run the
    /// declaration again once per entry.
    pub fn take_pending_infos(&mut self) -> VecDeque<Info> {
        std::mem::take(&mut self.pending)
    }

    /// Re-indents `lines` to the list's current spacing context,
    /// consuming the context line by line.
    fn rescan(&mut self, lines: &str) -> String {
        let Some(spacing) = self.spacing.as_mut() else {
            return lines.to_string();
        };
        let mut text = String::new();
        for line in lines.lines() {
            text.push_str(spacing);
            text.push_str(line);
            *spacing = match spacing.rfind('\n') {
                Some(i) => spacing[i..].to_string(),
                None => "\n".to_string(),
            };
        }
        text
    }

    /// Offers a declaration to the list. Returns whether it was newly
    /// retained; false means it was withheld, skipped, or dropped as a
    /// duplicate.
    pub fn add(
        &mut self,
        table: &InfoTable,
        arena: &DeclArena,
        decl: Declaration,
        full_name: Option<&str>,
    ) -> bool {
        let mut add = true;
        if !decl.custom {
            add = self.accept(table, arena, &decl, full_name);
        }
        if !add {
            return false;
        }

        // splice nested definitions in ahead of their users
        let mut stack: Vec<Declaration> = vec![decl];
        let mut i = 0;
        while i < stack.len() {
            if let Some(dcl_id) = stack[i].declarator {
                let dcl = arena.declarator(dcl_id);
                if let Some(definition) = &dcl.definition {
                    stack.insert(i + 1, (**definition).clone());
                }
                for param in dcl.parameters.iter().flatten() {
                    if let Some(definition) = &arena.declarator(*param).definition {
                        stack.insert(i + 1, (**definition).clone());
                    }
                }
            }
            i += 1;
        }

        let mut retained = false;
        while let Some(mut decl) = stack.pop() {
            let original = stack.is_empty();
            if let Some(context) = &self.context {
                let member_virtual = decl
                    .type_id
                    .map_or(false, |t| arena.ty(t).virtual_function);
                decl.inaccessible =
                    context.inaccessible && !(context.virtualize && member_virtual);
            }
            if decl.text.is_empty() {
                decl.inaccessible = true;
            }
            let mut found = false;
            if !decl.signature.is_empty() {
                let mut k = 0;
                while k < self.decls.len() {
                    if self.decls[k].signature == decl.signature {
                        if strictly_worse(&self.decls[k], &decl) {
                            self.decls.remove(k);
                            continue;
                        }
                        found = true;
                    }
                    k += 1;
                }
                if !found && decl.incomplete {
                    if let Some(parent) = self.inherited {
                        // a forward declaration the parent scope already completed
                        found = parent
                            .iter()
                            .any(|d| !d.incomplete && d.signature == decl.signature);
                    }
                }
            }
            if !found {
                decl.text = self.rescan(&decl.text);
                self.decls.push(decl);
                if original {
                    retained = true;
                }
            }
        }
        retained
    }

    /// The filters of the fast path: withheld templates, const/unconst
    /// doubling, skip entries, and bare opaque pointers.
    fn accept(
        &mut self,
        table: &InfoTable,
        arena: &DeclArena,
        decl: &Declaration,
        full_name: Option<&str>,
    ) -> bool {
        if let Some(map) = &self.template_map {
            if !map.full() && (decl.type_id.is_some() || decl.declarator.is_some()) {
                let eager = full_name
                    .and_then(|n| table.first(n))
                    .map_or(false, |info| !info.target_names.is_empty());
                if !eager {
                    if self.pending.is_empty() {
                        let name = decl
                            .declarator
                            .map(|d| arena.declarator(d).cpp_name.as_str())
                            .or_else(|| decl.type_id.map(|t| arena.ty(t).cpp_name.as_str()));
                        if let Some(name) = name {
                            self.pending.extend(table.get(name));
                        }
                    }
                    return false;
                }
            }
        }
        if let Some(full_name) = full_name {
            let unconst = InfoTable::normalize(full_name, true, false);
            let const_name = format!("const {}", unconst);
            if let (Some(plain), Some(constant)) =
                (table.first(&unconst), table.first(&const_name))
            {
                if !plain.target_names.is_empty()
                    && !constant.target_names.is_empty()
                    && plain.target_names != constant.target_names
                {
                    // distinct names requested for the const and unconst
                    // forms, reprocess once for each
                    self.pending.push_back(plain);
                    self.pending.push_back(constant);
                    return false;
                }
            }
        }
        if let Some(dcl_id) = decl.declarator {
            let dcl = arena.declarator(dcl_id);
            if let Some(type_id) = dcl.type_id {
                if unconditionally_skipped(table, &arena.ty(type_id).cpp_name) {
                    return false;
                }
            }
            for param in dcl.parameters.iter().flatten() {
                if let Some(type_id) = arena.declarator(*param).type_id {
                    if unconditionally_skipped(table, &arena.ty(type_id).cpp_name) {
                        return false;
                    }
                }
            }
        }
        if let Some(type_id) = decl.type_id {
            let ty = arena.ty(type_id);
            if ty.target_name == OPAQUE_POINTER
                && ty.arguments.is_empty()
                && !templates::has_template_args(&ty.cpp_name)
            {
                return false;
            }
        }
        true
    }
}

/// A skip entry with no compensating replacement types drops the
/// declaration outright.
fn unconditionally_skipped(table: &InfoTable, cpp_name: &str) -> bool {
    table.first(cpp_name).map_or(false, |info| {
        info.skip && info.value_types.is_empty() && info.pointer_types.is_empty()
    })
}

impl<'a, 'b> IntoIterator for &'b DeclarationList<'a> {
    type Item = &'b Declaration;
    type IntoIter = std::slice::Iter<'b, Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cxx::declarations::model::{Declarator, Type};

    fn plain(text: &str, signature: &str) -> Declaration {
        Declaration::new(text, signature)
    }

    #[test]
    fn better_of_prefers_non_const_accessible_complete() {
        let good = plain("void f();", "f()");
        let mut bad = good.clone();
        bad.const_member = true;
        assert!(std::ptr::eq(better_of(&bad, &good), &good));
        assert!(std::ptr::eq(better_of(&good, &bad), &good));

        bad = good.clone();
        bad.inaccessible = true;
        assert!(std::ptr::eq(better_of(&bad, &good), &good));

        bad = good.clone();
        bad.incomplete = true;
        assert!(std::ptr::eq(better_of(&bad, &good), &good));

        // a tie keeps the first argument
        let tie = good.clone();
        assert!(std::ptr::eq(better_of(&good, &tie), &good));
    }

    #[test]
    fn complete_wins_over_incomplete_in_either_order() {
        let table = InfoTable::new();
        let arena = DeclArena::new();
        let mut forward = plain("class A;", "A");
        forward.incomplete = true;
        let full = plain("class A { };", "A");

        let mut list = DeclarationList::new();
        assert!(list.add(&table, &arena, forward.clone(), None));
        assert!(list.add(&table, &arena, full.clone(), None));
        assert_eq!(list.len(), 1);
        assert!(!list.iter().next().unwrap().incomplete);

        let mut list = DeclarationList::new();
        assert!(list.add(&table, &arena, full, None));
        assert!(!list.add(&table, &arena, forward, None));
        assert_eq!(list.len(), 1);
        assert!(!list.iter().next().unwrap().incomplete);
    }

    #[test]
    fn empty_signatures_never_deduplicate() {
        let table = InfoTable::new();
        let arena = DeclArena::new();
        let mut list = DeclarationList::new();
        assert!(list.add(&table, &arena, plain("// a", ""), None));
        assert!(list.add(&table, &arena, plain("// a", ""), None));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn exact_duplicates_are_dropped() {
        let table = InfoTable::new();
        let arena = DeclArena::new();
        let mut list = DeclarationList::new();
        assert!(list.add(&table, &arena, plain("void f();", "f()"), None));
        assert!(!list.add(&table, &arena, plain("void f();", "f()"), None));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn inherited_complete_entry_suppresses_forward_declarations() {
        let table = InfoTable::new();
        let arena = DeclArena::new();
        let mut parent = DeclarationList::new();
        assert!(parent.add(&table, &arena, plain("class A { };", "A"), None));

        let mut child = DeclarationList::with_inherited(&parent);
        let mut forward = plain("class A;", "A");
        forward.incomplete = true;
        assert!(!child.add(&table, &arena, forward, None));
        assert!(child.is_empty());

        // a complete redefinition is not suppressed
        assert!(child.add(&table, &arena, plain("class A { };", "A"), None));
    }

    #[test]
    fn skip_entries_drop_declarations_and_their_parameters() {
        let mut table = InfoTable::new();
        table.put(Info::new(&["Hidden"]).skip(true));
        let mut arena = DeclArena::new();

        let hidden = arena.add_type(Type::new("Hidden"));
        let dcl = arena.add_declarator(Declarator {
            cpp_name: "f".to_string(),
            type_id: Some(hidden),
            ..Declarator::default()
        });
        let mut decl = plain("Hidden f();", "f()");
        decl.declarator = Some(dcl);
        let mut list = DeclarationList::new();
        assert!(!list.add(&table, &arena, decl, None));

        let int_t = arena.add_type(Type::new("int"));
        let param = arena.add_declarator(Declarator {
            cpp_name: "x".to_string(),
            type_id: Some(hidden),
            ..Declarator::default()
        });
        let dcl = arena.add_declarator(Declarator {
            cpp_name: "g".to_string(),
            type_id: Some(int_t),
            parameters: vec![Some(param)],
            ..Declarator::default()
        });
        let mut decl = plain("int g(Hidden x);", "g(Hidden)");
        decl.declarator = Some(dcl);
        assert!(!list.add(&table, &arena, decl, None));
        assert!(list.is_empty());
    }

    #[test]
    fn skip_with_replacement_types_is_not_a_drop() {
        let mut table = InfoTable::new();
        table.put(Info::new(&["Wrapped"]).skip(true).pointer_types(&["WrappedRef"]));
        let mut arena = DeclArena::new();
        let ty = arena.add_type(Type::new("Wrapped"));
        let dcl = arena.add_declarator(Declarator {
            cpp_name: "f".to_string(),
            type_id: Some(ty),
            ..Declarator::default()
        });
        let mut decl = plain("Wrapped f();", "f()");
        decl.declarator = Some(dcl);
        let mut list = DeclarationList::new();
        assert!(list.add(&table, &arena, decl, None));
    }

    #[test]
    fn custom_declarations_bypass_the_filters() {
        let mut table = InfoTable::new();
        table.put(Info::new(&["Hidden"]).skip(true));
        let mut arena = DeclArena::new();
        let hidden = arena.add_type(Type::new("Hidden"));
        let dcl = arena.add_declarator(Declarator {
            cpp_name: "f".to_string(),
            type_id: Some(hidden),
            ..Declarator::default()
        });
        let mut decl = plain("Hidden f();", "f()");
        decl.declarator = Some(dcl);
        decl.custom = true;
        let mut list = DeclarationList::new();
        assert!(list.add(&table, &arena, decl, None));
    }

    #[test]
    fn bare_opaque_pointer_types_are_dropped() {
        let table = InfoTable::new();
        let mut arena = DeclArena::new();
        let mut ty = Type::new("SomeOpaque");
        ty.target_name = OPAQUE_POINTER.to_string();
        let id = arena.add_type(ty);
        let mut decl = plain("class SomeOpaque;", "SomeOpaque");
        decl.type_id = Some(id);
        let mut list = DeclarationList::new();
        assert!(!list.add(&table, &arena, decl, None));
    }

    #[test]
    fn templated_opaque_pointer_types_survive() {
        let table = InfoTable::new();
        let mut arena = DeclArena::new();
        let mut ty = Type::new("Box<int>");
        ty.target_name = OPAQUE_POINTER.to_string();
        let id = arena.add_type(ty);
        let mut decl = plain("class Box<int>;", "Box<int>");
        decl.type_id = Some(id);
        let mut list = DeclarationList::new();
        assert!(list.add(&table, &arena, decl, None));
    }

    #[test]
    fn unbound_templates_are_withheld_and_queue_their_infos() {
        let mut table = InfoTable::new();
        table.put(Info::new(&["Box"]).target_names(&["IntBox"]));
        let mut arena = DeclArena::new();
        let id = arena.add_type(Type::new("Box"));
        let mut map = TemplateMap::new(None);
        map.declare("T");
        let mut list = DeclarationList::new();
        list.template_map = Some(map);
        let mut decl = plain("template<class T> class Box { };", "Box");
        decl.type_id = Some(id);
        assert!(!list.add(&table, &arena, decl, None));
        assert!(list.is_empty());
        let pending = list.take_pending_infos();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].cpp_names, vec!["Box"]);
    }

    #[test]
    fn const_and_unconst_overrides_double_the_entry() {
        let mut table = InfoTable::new();
        table.put(Info::new(&["Thing"]).target_names(&["Thing"]));
        table.put(Info::new(&["const Thing"]).target_names(&["ConstThing"]));
        let arena = DeclArena::new();
        let mut list = DeclarationList::new();
        let decl = plain("class Thing { };", "Thing");
        assert!(!list.add(&table, &arena, decl, Some("Thing")));
        let pending = list.take_pending_infos();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].target_names, vec!["Thing"]);
        assert_eq!(pending[1].target_names, vec!["ConstThing"]);
    }

    #[test]
    fn nested_definitions_precede_their_users() {
        let table = InfoTable::new();
        let mut arena = DeclArena::new();
        let nested = plain("struct anon { int x; };", "anon");
        let dcl = arena.add_declarator(Declarator {
            cpp_name: "f".to_string(),
            definition: Some(Box::new(nested)),
            ..Declarator::default()
        });
        let mut decl = plain("anon f();", "f()");
        decl.declarator = Some(dcl);
        let mut list = DeclarationList::new();
        assert!(list.add(&table, &arena, decl, None));
        let texts: Vec<&str> = list.iter().map(|d| d.text.as_str()).collect();
        assert_eq!(texts, vec!["struct anon { int x; };", "anon f();"]);
    }

    #[test]
    fn parameter_definitions_are_spliced_in_too() {
        let table = InfoTable::new();
        let mut arena = DeclArena::new();
        let nested = plain("enum mode { A, B };", "mode");
        let param = arena.add_declarator(Declarator {
            cpp_name: "m".to_string(),
            definition: Some(Box::new(nested)),
            ..Declarator::default()
        });
        let dcl = arena.add_declarator(Declarator {
            cpp_name: "g".to_string(),
            parameters: vec![Some(param)],
            ..Declarator::default()
        });
        let mut decl = plain("void g(mode m);", "g(mode)");
        decl.declarator = Some(dcl);
        let mut list = DeclarationList::new();
        assert!(list.add(&table, &arena, decl, None));
        let texts: Vec<&str> = list.iter().map(|d| d.text.as_str()).collect();
        assert_eq!(texts, vec!["enum mode { A, B };", "void g(mode m);"]);
    }

    #[test]
    fn inaccessible_contexts_mark_declarations() {
        let table = InfoTable::new();
        let arena = DeclArena::new();
        let mut list = DeclarationList::new();
        list.context = Some(Context {
            inaccessible: true,
            ..Context::default()
        });
        assert!(list.add(&table, &arena, plain("void f();", "f()"), None));
        assert!(list.iter().next().unwrap().inaccessible);
    }

    #[test]
    fn virtualized_contexts_keep_virtual_members_reachable() {
        let table = InfoTable::new();
        let mut arena = DeclArena::new();
        let mut ty = Type::new("void");
        ty.virtual_function = true;
        let id = arena.add_type(ty);
        let mut list = DeclarationList::new();
        list.context = Some(Context {
            inaccessible: true,
            virtualize: true,
            ..Context::default()
        });
        let mut decl = plain("virtual void f();", "f()");
        decl.type_id = Some(id);
        assert!(list.add(&table, &arena, decl, None));
        assert!(!list.iter().next().unwrap().inaccessible);
    }

    #[test]
    fn empty_text_forces_inaccessible() {
        let table = InfoTable::new();
        let arena = DeclArena::new();
        let mut list = DeclarationList::new();
        assert!(list.add(&table, &arena, plain("", "f()"), None));
        assert!(list.iter().next().unwrap().inaccessible);
    }

    #[test]
    fn rescan_reindents_to_the_spacing_context() {
        let table = InfoTable::new();
        let arena = DeclArena::new();
        let mut list = DeclarationList::new();
        list.spacing = Some("\n        ".to_string());
        assert!(list.add(&table, &arena, plain("int a;\nint b;", "a"), None));
        assert_eq!(
            list.iter().next().unwrap().text,
            "\n        int a;\n        int b;"
        );
    }
}
