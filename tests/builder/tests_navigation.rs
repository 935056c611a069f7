use apiview::model::Declaration;
use apiview::review::NavigationNode;
use apiview::{DeclarationGraph, DeclarationKind, DeclarationKind::*, DocumentBuilder, LanguageProfile};

use crate::helpers::graph_fixtures::{build, storage_graph};

fn navigation(file: &apiview::CodeFile) -> &[NavigationNode] {
    file.navigation.as_deref().unwrap()
}

fn hidden_graph() -> DeclarationGraph {
    DeclarationGraph::new()
        .with(Declaration::new("ns", Namespace, "N"))
        .with(Declaration::new("shown", Class, "Shown").in_container("ns"))
        .with(Declaration::new("internal", Class, "Internals").in_container("ns").hidden())
        .with(Declaration::new("m", Method, "reset").in_container("internal"))
}

#[test]
fn test_namespace_node_lists_types() {
    let file = build(&storage_graph(), &LanguageProfile::kotlin());
    let roots = navigation(&file);
    assert_eq!(roots.len(), 1);

    let ns = &roots[0];
    assert_eq!(ns.label, "Azure.Storage.Blobs");
    assert_eq!(ns.kind, DeclarationKind::Namespace);
    let labels: Vec<_> = ns.children.iter().map(|n| n.label.as_str()).collect();
    assert_eq!(labels, vec!["BlobClient", "BlobDownloadResult", "BlobListener"]);
}

#[test]
fn test_members_flattened_under_type() {
    let file = build(&storage_graph(), &LanguageProfile::kotlin());
    let client = navigation(&file)[0]
        .find("Azure.Storage.Blobs.BlobClient")
        .unwrap();
    let kinds: Vec<_> = client.children.iter().map(|n| n.kind).collect();
    assert_eq!(kinds, vec![Property, Constructor, Method, Method, Method]);
    assert!(client.children.iter().all(|n| n.children.is_empty()));
    assert_eq!(client.children[2].label, "download");
}

#[test]
fn test_linked_obsolete_member_not_visible() {
    let file = build(&storage_graph(), &LanguageProfile::kotlin());
    let ns = &navigation(&file)[0];
    let old = ns.find("Azure.Storage.Blobs.BlobClient.download(Int)").unwrap();
    assert!(!old.visible);
    assert!(ns.find("Azure.Storage.Blobs.BlobClient.download()").unwrap().visible);
}

#[test]
fn test_inner_navigation_marks_ancestors_of_link_targets() {
    let file = build(&storage_graph(), &LanguageProfile::kotlin());
    let ns = &navigation(&file)[0];
    // BlobClient.download links to BlobDownloadResult.
    assert!(ns.has_inner_navigation);
    assert!(!ns.find("Azure.Storage.Blobs.BlobClient").unwrap().has_inner_navigation);
}

#[test]
fn test_hidden_type_invisible_by_default() {
    let file = build(&hidden_graph(), &LanguageProfile::kotlin());
    let ns = &navigation(&file)[0];
    let internals = ns.find("N.Internals").unwrap();
    assert!(!internals.visible);
    assert!(!internals.children[0].visible);
    assert!(ns.find("N.Shown").unwrap().visible);
}

#[test]
fn test_show_hidden_under_namespace() {
    let mut profile = LanguageProfile::kotlin();
    profile.navigation.show_hidden_under = vec!["N".into()];
    let file = build(&hidden_graph(), &profile);
    let internals = navigation(&file)[0].find("N.Internals").unwrap();
    assert!(internals.visible);
    assert!(internals.children[0].visible);
}

#[test]
fn test_always_show_hidden() {
    let mut profile = LanguageProfile::kotlin();
    profile.navigation.always_show_hidden = true;
    let file = build(&hidden_graph(), &profile);
    let internals = navigation(&file)[0].find("N.Internals").unwrap();
    assert!(internals.visible);
    assert!(internals.children[0].visible);
}

#[test]
fn test_global_declarations_precede_namespaces() {
    let graph = DeclarationGraph::new()
        .with(Declaration::new("g", Class, "Global"))
        .with(Declaration::new("ns", Namespace, "N"))
        .with(Declaration::new("c", Class, "C").in_container("ns"));
    let file = build(&graph, &LanguageProfile::csharp());
    let ids: Vec<_> = navigation(&file).iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["Global", "N"]);
}

#[test]
fn test_navigation_can_be_turned_off() {
    let graph = storage_graph();
    let profile = LanguageProfile::kotlin();
    let file = DocumentBuilder::new(&graph, &profile)
        .navigation(false)
        .build()
        .unwrap();
    assert!(file.navigation.is_none());
}
