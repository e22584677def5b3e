//! Name qualification against realistic header scopes

use cxxlex::cxx::declarations::{Context, DeclArena, TemplateMap, Type};
use cxxlex::cxx::{Info, InfoTable};

#[test]
fn candidates_resolve_against_the_symbol_table_most_specific_first() {
    let mut table = InfoTable::new();
    table.put(Info::new(&["cv::Mat"]).target_names(&["Mat"]));
    table.put(Info::new(&["Mat"]).target_names(&["GlobalMat"]));

    let arena = DeclArena::new();
    let context = Context {
        namespace: Some("cv::detail".to_string()),
        ..Context::default()
    };
    let first = context
        .qualify(&arena, "Mat")
        .into_iter()
        .find_map(|candidate| table.first(&candidate))
        .unwrap();
    assert_eq!(first.target_names, vec!["Mat"]);
}

#[test]
fn using_directive_makes_an_unqualified_name_resolvable() {
    let mut table = InfoTable::new();
    table.put(Info::new(&["std::string"]).target_names(&["BytePointer"]));

    let arena = DeclArena::new();
    let context = Context {
        using_list: vec!["std::string".to_string()],
        ..Context::default()
    };
    let resolved = context
        .qualify(&arena, "string")
        .into_iter()
        .find_map(|candidate| table.first(&candidate));
    assert!(resolved.is_some());

    // without the directive the bare name stays unresolved
    let bare = Context::new();
    assert!(bare
        .qualify(&arena, "string")
        .into_iter()
        .find_map(|candidate| table.first(&candidate))
        .is_none());
}

#[test]
fn template_bindings_produce_the_instantiated_candidate() {
    let mut arena = DeclArena::new();
    let id = arena.add_type(Type::new("ns::Array"));
    let mut map = TemplateMap::new(None);
    map.define("T", "float");
    map.define("N", "4");
    map.type_id = Some(id);
    let context = Context {
        namespace: Some("ns".to_string()),
        template_map: Some(map),
        ..Context::default()
    };
    assert_eq!(
        context.qualify(&arena, "Array"),
        vec!["ns::Array<float,4>", "ns::Array", "Array"]
    );
}

#[test]
fn global_scope_prefix_skips_the_namespace_walk() {
    let arena = DeclArena::new();
    let context = Context {
        namespace: Some("deeply::nested::scope".to_string()),
        using_list: vec!["std::".to_string()],
        ..Context::default()
    };
    assert_eq!(context.qualify(&arena, "::size_t"), vec!["size_t"]);
}
