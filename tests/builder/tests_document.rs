use apiview::builder::{BuildJob, Dependency, build_many};
use apiview::model::Declaration;
use apiview::{BuildError, DeclarationGraph, DeclarationKind::*, DocumentBuilder, LanguageProfile};
use rstest::rstest;

use crate::helpers::graph_fixtures::{build, single_class, storage_graph, three_namespaces};
use crate::helpers::line_assertions::{
    assert_links_land_on_lines, assert_unique_line_ids, line, rendered, token_values,
};

#[test]
fn test_render_single_class_kotlin() {
    let file = build(&single_class("BlobClient"), &LanguageProfile::kotlin());
    assert_eq!(
        rendered(&file),
        "package N {\n    public class BlobClient {\n        fun run()\n    }\n\n}\n\n"
    );
}

#[rstest]
#[case::kotlin(LanguageProfile::kotlin(), "class")]
#[case::csharp(LanguageProfile::csharp(), "class")]
#[case::swift(LanguageProfile::swift(), "class")]
#[case::typespec(LanguageProfile::typespec(), "model")]
fn test_class_line_tokens(#[case] profile: LanguageProfile, #[case] keyword: &str) {
    let file = build(&single_class("BlobClient"), &profile);
    let class = line(&file, "N.BlobClient");
    assert_eq!(token_values(class), vec!["public", keyword, "BlobClient", "{"]);
    let name = &class.tokens[2];
    assert_eq!(name.navigation_display_name.as_deref(), Some("BlobClient"));
    assert!(!class.tokens[3].has_suffix_space);
}

#[test]
fn test_namespaces_sorted_and_grouped() {
    let file = build(&three_namespaces(), &LanguageProfile::csharp());
    assert_eq!(file.review_lines.len(), 9);

    let opened: Vec<_> = file
        .review_lines
        .iter()
        .filter_map(|l| l.line_id.as_deref())
        .collect();
    assert_eq!(opened, vec!["Contoso.A", "Contoso.B", "Contoso.C"]);

    for chunk in file.review_lines.chunks(3) {
        assert!(!chunk[0].children.is_empty());
        assert!(chunk[1].is_context_end_line);
        assert_eq!(chunk[1].related_to_line, chunk[0].line_id);
        assert!(chunk[2].is_blank());
    }
}

#[test]
fn test_namespace_without_declarations_is_skipped() {
    let graph = DeclarationGraph::new()
        .with(Declaration::new("outer", Namespace, "Contoso"))
        .with(Declaration::new("inner", Namespace, "Contoso.Widgets").in_container("outer"))
        .with(Declaration::new("w", Class, "Widget").in_container("inner"));
    let file = build(&graph, &LanguageProfile::csharp());
    assert!(file.find_line("Contoso").is_none());
    assert!(file.find_line("Contoso.Widgets").is_some());
    assert!(file.find_line("Contoso.Widgets.Widget").is_some());
}

#[test]
fn test_dependency_header() {
    let graph = single_class("BlobClient");
    let profile = LanguageProfile::kotlin();
    let file = DocumentBuilder::new(&graph, &profile)
        .package("azure-storage-blob", "12.0.0")
        .dependencies(vec![
            Dependency::new("azure-core", "1.2.0"),
            Dependency::new("jackson", "2.15.0"),
        ])
        .build()
        .unwrap();

    let header = &file.review_lines[0];
    assert_eq!(header.line_id.as_deref(), Some("Dependencies"));
    assert_eq!(token_values(header), vec!["Dependencies:"]);

    let core = line(&file, "Dependencies.azure-core");
    assert_eq!(token_values(core), vec!["azure-core", "-1.2.0"]);
    assert!(!core.tokens[0].skip_diff);
    assert!(core.tokens[1].skip_diff);

    let separator = &file.review_lines[3];
    assert!(separator.is_blank());
    assert_eq!(separator.related_to_line.as_deref(), Some("Dependencies"));
}

#[test]
fn test_storage_document_is_consistent() {
    let file = build(&storage_graph(), &LanguageProfile::kotlin());
    assert_unique_line_ids(&file);
    assert_links_land_on_lines(&file);
}

#[test]
fn test_members_ordered_values_constructors_methods() {
    let file = build(&storage_graph(), &LanguageProfile::kotlin());
    let client = line(&file, "Azure.Storage.Blobs.BlobClient");
    let ids: Vec<_> = client
        .children
        .iter()
        .filter_map(|l| l.line_id.as_deref())
        .collect();
    assert_eq!(
        ids,
        vec![
            "Azure.Storage.Blobs.BlobClient.url",
            "Azure.Storage.Blobs.BlobClient.BlobClient(String)",
            "Azure.Storage.Blobs.BlobClient.download()",
            "Azure.Storage.Blobs.BlobClient.download(Int)",
            "Azure.Storage.Blobs.BlobClient.upload(String)",
        ]
    );
}

#[test]
fn test_empty_interface_comment() {
    let file = build(&storage_graph(), &LanguageProfile::kotlin());
    let listener = line(&file, "Azure.Storage.Blobs.BlobListener");
    assert_eq!(listener.children.len(), 1);
    assert!(listener.children[0].text().contains("does not declare any API"));
}

#[test]
fn test_building_twice_is_identical() {
    let graph = storage_graph();
    let profile = LanguageProfile::kotlin();
    let first = build(&graph, &profile).to_json().unwrap();
    let second = build(&graph, &profile).to_json().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_parallel_builds_match_serial() {
    let jobs: Vec<_> = (0..8)
        .map(|i| BuildJob::new(storage_graph(), LanguageProfile::kotlin(), format!("pkg-{i}"), "1.0.0"))
        .collect();
    let parallel = build_many(&jobs);
    for (job, result) in jobs.iter().zip(parallel) {
        let serial = job.build().unwrap().to_json().unwrap();
        assert_eq!(result.unwrap().to_json().unwrap(), serial);
    }
}

#[test]
fn test_duplicate_definition_id_aborts() {
    let graph = DeclarationGraph::new()
        .with(Declaration::new("ns", Namespace, "N"))
        .with(Declaration::new("a", Class, "Widget").in_container("ns"))
        .with(Declaration::new("b", Class, "Widget").in_container("ns"));
    let err = DocumentBuilder::new(&graph, &LanguageProfile::csharp())
        .build()
        .unwrap_err();
    assert!(matches!(err, BuildError::DuplicateDefinitionId { .. }));
    assert!(err.is_integrity_error());
}

#[test]
fn test_containment_cycle_aborts() {
    let graph = DeclarationGraph::new()
        .with(Declaration::new("a", Class, "A").in_container("b"))
        .with(Declaration::new("b", Class, "B").in_container("a"));
    let err = DocumentBuilder::new(&graph, &LanguageProfile::csharp())
        .build()
        .unwrap_err();
    assert!(matches!(err, BuildError::ContainmentCycle(_)));
}

#[test]
fn test_overloads_get_distinct_ids() {
    let graph = DeclarationGraph::new()
        .with(Declaration::new("ns", Namespace, "N"))
        .with(Declaration::new("c", Class, "C").in_container("ns"))
        .with(Declaration::new("m1", Method, "run").in_container("c"))
        .with(Declaration::new("m2", Method, "run").in_container("c"));
    let file = build(&graph, &LanguageProfile::csharp());
    assert!(file.find_line("N.C.run()").is_some());
    assert!(file.find_line("N.C.run()#2").is_some());
    assert_unique_line_ids(&file);
}
