use apiview::model::{Attribute, Declaration, Documentation};
use apiview::review::{RenderOptions, render_text};
use apiview::{DeclarationGraph, DeclarationKind::*, LanguageProfile, ObsoleteLinkRule, TypeRef};
use rstest::rstest;

use crate::helpers::graph_fixtures::{build, storage_graph};
use crate::helpers::line_assertions::{line, related_lines, rendered};

const CURRENT: &str = "Azure.Storage.Blobs.BlobClient.download()";
const OLD: &str = "Azure.Storage.Blobs.BlobClient.download(Int)";

#[test]
fn test_type_close_line_follows_opener() {
    let file = build(&storage_graph(), &LanguageProfile::kotlin());
    let ns = line(&file, "Azure.Storage.Blobs");
    let at = ns
        .children
        .iter()
        .position(|l| l.line_id.as_deref() == Some("Azure.Storage.Blobs.BlobClient"))
        .unwrap();
    let close = &ns.children[at + 1];
    assert!(close.is_context_end_line);
    assert_eq!(close.text(), "}");
    assert_eq!(close.related_to_line.as_deref(), Some("Azure.Storage.Blobs.BlobClient"));
    assert!(ns.children[at + 2].is_blank());
}

#[test]
fn test_documentation_precedes_declaration() {
    let file = build(&storage_graph(), &LanguageProfile::kotlin());
    let ns = line(&file, "Azure.Storage.Blobs");
    let doc = &ns.children[0];
    assert!(doc.line_id.is_none());
    assert_eq!(doc.related_to_line.as_deref(), Some("Azure.Storage.Blobs.BlobClient"));
    assert!(doc.tokens.iter().all(|t| t.is_documentation));
    assert_eq!(doc.text(), "// Client for a single blob.");
}

#[test]
fn test_documentation_left_out_of_rendering_on_request() {
    let file = build(&storage_graph(), &LanguageProfile::kotlin());
    let options = RenderOptions {
        include_documentation: false,
        ..RenderOptions::default()
    };
    let text = render_text(&file, &options);
    assert!(!text.contains("Client for a single blob."));
    assert!(rendered(&file).contains("Client for a single blob."));
}

#[test]
fn test_obsolete_name_marked_deprecated() {
    let file = build(&storage_graph(), &LanguageProfile::kotlin());
    let old = line(&file, OLD);
    let name = old.tokens.iter().find(|t| t.value == "download").unwrap();
    assert!(name.is_deprecated);
    assert!(old.tokens.iter().filter(|t| t.value != "download").all(|t| !t.is_deprecated));
}

#[rstest]
#[case::name_only(ObsoleteLinkRule::NameOnly, true)]
#[case::different_signature(ObsoleteLinkRule::NameAndDifferentSignature, true)]
#[case::same_signature(ObsoleteLinkRule::NameAndSameSignature, false)]
#[case::disabled(ObsoleteLinkRule::Disabled, false)]
fn test_obsolete_overload_linkage(#[case] rule: ObsoleteLinkRule, #[case] linked: bool) {
    let mut profile = LanguageProfile::kotlin();
    profile.obsolete_link_rule = rule;
    let file = build(&storage_graph(), &profile);

    let old = line(&file, OLD);
    assert_eq!(old.is_hidden, linked);
    assert_eq!(old.related_to_line.as_deref() == Some(CURRENT), linked);

    // The annotation line travels with its declaration.
    let annotation = related_lines(&file, OLD)
        .into_iter()
        .find(|l| l.text() == "@Deprecated")
        .unwrap();
    assert_eq!(annotation.is_hidden, linked);
    assert!(!line(&file, CURRENT).is_hidden);
}

#[test]
fn test_hidden_type_hides_its_whole_group() {
    let graph = DeclarationGraph::new()
        .with(Declaration::new("ns", Namespace, "N"))
        .with(Declaration::new("shown", Class, "Shown").in_container("ns"))
        .with(Declaration::new("internal", Class, "Internals").in_container("ns").hidden())
        .with(
            Declaration::new("f", Property, "state")
                .in_container("internal")
                .with_type(TypeRef::new("Int")),
        );
    let file = build(&graph, &LanguageProfile::kotlin());

    let hidden = line(&file, "N.Internals");
    assert!(hidden.is_hidden);
    assert!(hidden.children.iter().all(|l| l.is_hidden));
    for attached in related_lines(&file, "N.Internals") {
        assert!(attached.is_hidden);
    }
    assert!(!line(&file, "N.Shown").is_hidden);
    assert!(!line(&file, "N").is_hidden);

    let text = rendered(&file);
    assert!(!text.contains("Internals"));
    assert!(text.contains("Shown"));
}

#[test]
fn test_namespace_hidden_when_every_type_is_hidden() {
    let graph = DeclarationGraph::new()
        .with(Declaration::new("ns", Namespace, "N.Implementation"))
        .with(Declaration::new("a", Class, "A").in_container("ns").hidden())
        .with(Declaration::new("b", Class, "B").in_container("ns").hidden());
    let file = build(&graph, &LanguageProfile::kotlin());
    assert!(line(&file, "N.Implementation").is_hidden);
    assert!(rendered(&file).is_empty());
}

#[test]
fn test_noise_annotations_dropped() {
    let graph = DeclarationGraph::new()
        .with(Declaration::new("ns", Namespace, "N"))
        .with(
            Declaration::new("c", Class, "C")
                .in_container("ns")
                .with_attribute(Attribute::new("Suppress"))
                .with_attribute(Attribute::new("Serializable")),
        );
    let file = build(&graph, &LanguageProfile::kotlin());
    let texts: Vec<_> = related_lines(&file, "N.C").into_iter().map(|l| l.text()).collect();
    assert!(texts.contains(&"@Serializable".to_string()));
    assert!(!texts.iter().any(|t| t.contains("Suppress")));
}

#[test]
fn test_multi_paragraph_documentation_is_one_range() {
    let graph = DeclarationGraph::new()
        .with(Declaration::new("ns", Namespace, "N"))
        .with(
            Declaration::new("c", Class, "C")
                .in_container("ns")
                .with_doc(Documentation::text("First line.\nSecond line.")),
        );
    let file = build(&graph, &LanguageProfile::csharp());
    let docs: Vec<_> = related_lines(&file, "N.C")
        .into_iter()
        .filter(|l| l.tokens.iter().any(|t| t.is_documentation))
        .collect();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].text(), "/// First line.");
    assert_eq!(docs[1].text(), "/// Second line.");
}
