use apiview::base::constants::UNRESOLVED_TARGET;
use apiview::{BuildError, CodeFile, DeclarationGraph, DocumentBuilder, LanguageProfile};
use rstest::rstest;
use serde_json::Value;
use tempfile::TempDir;

use crate::helpers::graph_fixtures::{build, storage_graph};

fn storage_json() -> Value {
    let file = build(&storage_graph(), &LanguageProfile::kotlin());
    serde_json::from_str(&file.to_json().unwrap()).unwrap()
}

#[test]
fn test_document_fields_are_pascal_case() {
    let json = storage_json();
    assert_eq!(json["PackageName"], "test-package");
    assert_eq!(json["PackageVersion"], "1.0.0");
    assert_eq!(json["Language"], "Kotlin");
    assert!(json["ReviewLines"].is_array());
    assert!(json["Navigation"].is_array());
    assert!(json.get("ParserVersion").is_none());
}

#[test]
fn test_line_and_token_fields() {
    let json = storage_json();
    let ns = &json["ReviewLines"][0];
    assert_eq!(ns["LineId"], "Azure.Storage.Blobs");
    assert!(ns["Children"].is_array());

    let tokens = ns["Tokens"].as_array().unwrap();
    assert_eq!(tokens[0]["Kind"], "Keyword");
    assert_eq!(tokens[0]["Value"], "package");
    // Suffix space is only written when it is turned off.
    assert!(tokens[0].get("HasSuffixSpace").is_none());
    assert_eq!(tokens[2]["HasSuffixSpace"], false);
}

#[test]
fn test_no_placeholder_or_internal_fields_serialized() {
    let text = build(&storage_graph(), &LanguageProfile::kotlin())
        .to_json()
        .unwrap();
    assert!(!text.contains(UNRESOLVED_TARGET));
    assert!(!text.contains("DefinitionId"));
    assert!(!text.contains("Pending"));
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("review.json");

    let graph = storage_graph();
    let profile = LanguageProfile::kotlin();
    let file = DocumentBuilder::new(&graph, &profile)
        .package("azure-storage-blob", "12.0.0")
        .parser_version("1.4.2")
        .cross_language_package_id("Azure.Storage.Blobs")
        .build()
        .unwrap();
    file.save(&path).unwrap();

    let loaded = CodeFile::load(&path).unwrap();
    assert_eq!(loaded.parser_version.as_deref(), Some("1.4.2"));
    assert_eq!(loaded.cross_language_package_id.as_deref(), Some("Azure.Storage.Blobs"));
    assert_eq!(loaded.to_json().unwrap(), file.to_json().unwrap());
}

#[test]
fn test_graph_json_drives_a_build() {
    let json = r#"{"declarations":[
        {"id":"ns","kind":"Namespace","name":"Contoso.Widgets"},
        {"id":"w","kind":"Class","name":"Widget","containerId":"ns","modifiers":["public"]},
        {"id":"p","kind":"Property","name":"size","containerId":"w",
         "type":{"name":"Int","nullable":true}}
    ]}"#;
    let graph = DeclarationGraph::from_json(json).unwrap();
    let file = build(&graph, &LanguageProfile::kotlin());
    let size = file.find_line("Contoso.Widgets.Widget.size").unwrap();
    assert_eq!(size.text(), "var size: Int?");
}

#[rstest]
#[case::missing_kind(r#"{"declarations":[{"id":"a","name":"A"}]}"#)]
#[case::missing_name(r#"{"declarations":[{"id":"a","kind":"Class"}]}"#)]
#[case::unknown_kind(r#"{"declarations":[{"id":"a","kind":"Trait","name":"A"}]}"#)]
#[case::not_json("declarations: []")]
fn test_malformed_graph_rejected(#[case] json: &str) {
    let err = DeclarationGraph::from_json(json).unwrap_err();
    assert!(matches!(err, BuildError::MalformedInput(_)));
    assert!(!err.is_integrity_error());
}

#[test]
fn test_profile_loaded_from_json() {
    let profile = LanguageProfile::from_json(
        r#"{"language":"Kotlin","keywords":{"namespace":"package","class":"class",
            "interface":"interface","enum":"enum class","struct":"data class",
            "annotation":"annotation class","method":"fun"}}"#,
    )
    .unwrap();
    let file = build(&storage_graph(), &profile);
    assert!(file.find_line("Azure.Storage.Blobs.BlobClient").is_some());
}
