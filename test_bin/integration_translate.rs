use std::sync::Arc;

use xlate_core::container::ServiceContainer;
use xlate_core::engine::session::Session;
use xlate_core::expr::Expression;
use xlate_error::ErrorKind;
use xlate_ext_default::DefaultSessionBuilderExt;
use xlate_ext_default::xlate_ext_geometry::GeometrySessionBuilderExt;
use xlate_ext_default::xlate_ext_trigrams::{TrigramsSessionBuilderExt, register_trigrams};

fn parse(json: &str) -> Expression {
    serde_json::from_str(json).unwrap()
}

fn compile_all(json: &str) -> String {
    let session = Session::builder().use_all().build().unwrap();
    session.compile(parse(json)).unwrap().sql
}

const COVERS: &str = r#"{
    "kind": "method_call",
    "declaring_type": "geometry",
    "method": "Covers",
    "receiver": {"kind": "column", "name": "shape", "datatype": "geometry"},
    "args": [{"kind": "column", "name": "other", "datatype": "geometry"}]
}"#;

const OVERLAPS: &str = r#"{
    "kind": "method_call",
    "declaring_type": "geometry",
    "method": "Overlaps",
    "receiver": {"kind": "column", "name": "shape", "datatype": "geometry"},
    "args": [{"kind": "column", "name": "other", "datatype": "geometry"}]
}"#;

#[test]
fn covers_end_to_end() {
    logutil::init_test();
    assert_eq!("ST_Covers(shape, other)", compile_all(COVERS));
}

#[test]
fn overlaps_untranslatable() {
    let session = Session::builder().use_all().build().unwrap();
    let err = session.compile(parse(OVERLAPS)).unwrap_err();
    assert_eq!(ErrorKind::Untranslatable, err.kind());
    assert_eq!(Some("Geometry.Overlaps"), err.field("method"));
}

#[test]
fn overlaps_non_strict() {
    let session = Session::builder()
        .use_all()
        .with_setting("strict_translation", false)
        .unwrap()
        .build()
        .unwrap();

    let compiled = session.compile(parse(OVERLAPS)).unwrap();
    assert_eq!(vec!["Geometry.Overlaps".to_string()], compiled.untranslated);
}

#[test]
fn trigram_operator_inside_predicate() {
    let json = r#"{
        "kind": "binary_operator",
        "op": "AND",
        "left": {
            "kind": "method_call",
            "declaring_type": "db_functions",
            "method": "TrigramsAreSimilar",
            "args": [
                {"kind": "column", "name": "title", "datatype": "text"},
                {"kind": "literal", "value": {"text": "postgres"}}
            ]
        },
        "right": {
            "kind": "method_call",
            "declaring_type": "ltree",
            "method": "IsDescendantOf",
            "receiver": {"kind": "column", "name": "path", "datatype": "ltree"},
            "args": [{"kind": "literal", "value": {"text": "Top.Science"}}]
        }
    }"#;

    assert_eq!(
        "((title % 'postgres') AND (path <@ 'Top.Science'))",
        compile_all(json)
    );
}

#[test]
fn geometry_n_with_index_and_cast() {
    let json = r#"{
        "kind": "cast",
        "to": {"id": "text", "max_length": 64},
        "expr": {
            "kind": "method_call",
            "declaring_type": "geometry",
            "method": "AsText",
            "receiver": {
                "kind": "method_call",
                "declaring_type": "geometry",
                "method": "GetGeometryN",
                "receiver": {"kind": "column", "name": "shape", "datatype": "geometry"},
                "args": [{"kind": "literal", "value": {"int32": 0}}]
            }
        }
    }"#;

    assert_eq!(
        "CAST(ST_AsText(ST_GeometryN(shape, 1)) AS character varying(64))",
        compile_all(json)
    );
}

#[test]
fn fuzzy_and_unaccent_nested() {
    let json = r#"{
        "kind": "method_call",
        "declaring_type": "db_functions",
        "method": "Levenshtein",
        "args": [
            {
                "kind": "method_call",
                "declaring_type": "db_functions",
                "method": "Unaccent",
                "args": [{"kind": "column", "name": "name", "datatype": "text"}]
            },
            {"kind": "literal", "value": {"text": "Jose"}}
        ]
    }"#;

    assert_eq!("levenshtein(unaccent(name), 'Jose')", compile_all(json));
}

#[test]
fn array_index_lowered() {
    let json = r#"{
        "kind": "index",
        "array": {"kind": "column", "name": "scores", "datatype": "collection"},
        "indices": [{"kind": "literal", "value": {"int64": 0}}]
    }"#;

    assert_eq!("scores[1]", compile_all(json));
}

#[test]
fn mismatched_containers() {
    // Trigrams registered in one container, session handed another.
    let mut registered = ServiceContainer::new();
    register_trigrams(&mut registered);

    let err = Session::builder()
        .use_trigrams()
        .with_service_container(Arc::new(ServiceContainer::new()))
        .build()
        .unwrap_err();

    assert_eq!(ErrorKind::Configuration, err.kind());
    assert_eq!(Some("Trigrams"), err.field("module"));
    assert_eq!(Some("use_trigrams"), err.field("use_method"));
    assert_eq!(Some("register_trigrams"), err.field("register_method"));

    // Same builder, the registered container.
    Session::builder()
        .use_trigrams()
        .with_service_container(Arc::new(registered))
        .build()
        .unwrap();
}

#[test]
fn only_requested_modules_translate() {
    let session = Session::builder().use_geometry().build().unwrap();
    assert_eq!(
        "ST_Covers(shape, other)",
        session.compile(parse(COVERS)).unwrap().sql
    );

    let json = r#"{
        "kind": "method_call",
        "declaring_type": "db_functions",
        "method": "TrigramsShow",
        "args": [{"kind": "literal", "value": {"text": "word"}}]
    }"#;
    let err = session.compile(parse(json)).unwrap_err();
    assert_eq!(ErrorKind::Untranslatable, err.kind());
}

#[test]
fn repeated_compilation_identical() {
    let session = Session::builder().use_all().build().unwrap();
    let first = session.compile(parse(COVERS)).unwrap();
    for _ in 0..5 {
        assert_eq!(first, session.compile(parse(COVERS)).unwrap());
    }
}
