use apiview::builder::codes;
use apiview::model::{Declaration, GenericParam};
use apiview::{DeclarationGraph, DeclarationKind::*, DocumentBuilder, LanguageProfile, TokenKind, TypeRef};
use rstest::rstest;

use crate::helpers::graph_fixtures::{build, storage_graph};
use crate::helpers::line_assertions::{assert_no_placeholders, line};

fn target<'a>(file: &'a apiview::CodeFile, line_id: &str, value: &str) -> Option<&'a str> {
    line(file, line_id)
        .tokens
        .iter()
        .find(|t| t.value == value)
        .unwrap_or_else(|| panic!("no token '{value}' on '{line_id}'"))
        .navigate_to_id
        .as_deref()
}

#[test]
fn test_forward_reference_resolved() {
    let file = build(&storage_graph(), &LanguageProfile::kotlin());
    assert_no_placeholders(&file);
    assert_eq!(
        target(&file, "Azure.Storage.Blobs.BlobClient.download()", "BlobDownloadResult"),
        Some("Azure.Storage.Blobs.BlobDownloadResult")
    );
}

fn type_target<'a>(file: &'a apiview::CodeFile, line_id: &str, value: &str) -> Option<&'a str> {
    line(file, line_id)
        .tokens
        .iter()
        .find(|t| t.kind == TokenKind::TypeName && t.value == value)
        .unwrap_or_else(|| panic!("no type token '{value}' on '{line_id}'"))
        .navigate_to_id
        .as_deref()
}

#[test]
fn test_property_named_like_its_type_links_to_the_type() {
    let graph = DeclarationGraph::new()
        .with(Declaration::new("ns", Namespace, "Azure.Storage.Blobs"))
        .with(Declaration::new("props", Class, "BlobProperties").in_container("ns"))
        .with(
            Declaration::new("p", Property, "BlobType")
                .in_container("props")
                .with_type(TypeRef::new("BlobType")),
        )
        .with(Declaration::new("t", Enum, "BlobType").in_container("ns"));
    let file = build(&graph, &LanguageProfile::csharp());

    assert_no_placeholders(&file);
    assert_eq!(
        type_target(&file, "Azure.Storage.Blobs.BlobProperties.BlobType", "BlobType"),
        Some("Azure.Storage.Blobs.BlobType")
    );
}

#[test]
fn test_unknown_type_never_links_to_a_same_named_member() {
    let graph = DeclarationGraph::new()
        .with(Declaration::new("ns", Namespace, "Azure.Storage.Blobs"))
        .with(Declaration::new("client", Class, "BlobClient").in_container("ns"))
        .with(
            Declaration::new("m", Method, "GetETag")
                .in_container("client")
                .with_type(TypeRef::new("ETag")),
        )
        .with(Declaration::new("item", Class, "BlobItem").in_container("ns"))
        .with(
            Declaration::new("e", Property, "ETag")
                .in_container("item")
                .with_type(TypeRef::new("string")),
        );
    let file = build(&graph, &LanguageProfile::csharp());

    assert_no_placeholders(&file);
    assert_eq!(type_target(&file, "Azure.Storage.Blobs.BlobClient.GetETag()", "ETag"), None);
}

#[rstest]
#[case::kotlin(LanguageProfile::kotlin(), "String")]
#[case::csharp(LanguageProfile::csharp(), "string")]
#[case::typespec(LanguageProfile::typespec(), "string")]
fn test_primitives_are_not_linked(#[case] profile: LanguageProfile, #[case] primitive: &str) {
    let graph = DeclarationGraph::new()
        .with(Declaration::new("ns", Namespace, "N"))
        .with(Declaration::new("c", Class, "C").in_container("ns"))
        .with(
            Declaration::new("p", Property, "name")
                .in_container("c")
                .with_type(TypeRef::new(primitive)),
        );
    let file = build(&graph, &profile);
    assert_eq!(target(&file, "N.C.name", primitive), None);
}

#[test]
fn test_unknown_type_left_as_plain_text() {
    let graph = DeclarationGraph::new()
        .with(Declaration::new("ns", Namespace, "N"))
        .with(Declaration::new("c", Class, "C").in_container("ns"))
        .with(
            Declaration::new("p", Property, "timeout")
                .in_container("c")
                .with_type(TypeRef::new("java.time.Duration")),
        );
    let profile = LanguageProfile::kotlin();
    let file = DocumentBuilder::new(&graph, &profile)
        .report_unresolved(true)
        .build()
        .unwrap();

    assert_no_placeholders(&file);
    assert_eq!(target(&file, "N.C.timeout", "java.time.Duration"), None);
    let diagnostic = &file.diagnostics[0];
    assert_eq!(diagnostic.diagnostic_id, codes::UNRESOLVED_REFERENCE);
    assert_eq!(diagnostic.target_id, "N.C.timeout");
}

#[test]
fn test_generic_arguments_linked_individually() {
    let graph = DeclarationGraph::new()
        .with(Declaration::new("ns", Namespace, "N"))
        .with(
            Declaration::new("pager", Class, "Pager")
                .in_container("ns")
                .with_generic(GenericParam::new("T")),
        )
        .with(
            Declaration::new("list", Method, "list")
                .in_container("pager")
                .with_type(TypeRef::new("Page").with_argument(TypeRef::new("T"))),
        )
        .with(Declaration::new("page", Class, "Page").in_container("ns"))
        .with(
            Declaration::new("client", Class, "Client")
                .in_container("ns"),
        )
        .with(
            Declaration::new("items", Method, "items")
                .in_container("client")
                .with_type(TypeRef::new("Pager").with_argument(TypeRef::new("Page"))),
        );
    let file = build(&graph, &LanguageProfile::kotlin());
    assert_no_placeholders(&file);

    let items = line(&file, "N.Client.items()");
    let links: Vec<_> = items
        .tokens
        .iter()
        .filter_map(|t| t.navigate_to_id.as_deref())
        .collect();
    assert_eq!(links, vec!["N.Pager`1", "N.Page"]);

    // `T` is a type parameter of the enclosing type, never a link.
    let list = line(&file, "N.Pager`1.list()");
    let t = list.tokens.iter().find(|t| t.value == "T").unwrap();
    assert!(t.navigate_to_id.is_none());
    assert_eq!(list.text(), "fun list(): Page<T>");
}

#[test]
fn test_nested_type_resolves_from_inner_scope() {
    let graph = DeclarationGraph::new()
        .with(Declaration::new("ns", Namespace, "N"))
        .with(Declaration::new("outer", Class, "Outer").in_container("ns"))
        .with(
            Declaration::new("m", Method, "options")
                .in_container("outer")
                .with_type(TypeRef::new("Options")),
        )
        .with(Declaration::new("inner", Class, "Options").in_container("outer"));
    let file = build(&graph, &LanguageProfile::kotlin());
    assert_eq!(
        target(&file, "N.Outer.options()", "Options"),
        Some("N.Outer.Options")
    );
}
