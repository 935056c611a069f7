//! Declaration graphs used across the integration tests.

use apiview::model::{Attribute, Documentation};
use apiview::{
    CodeFile, Declaration, DeclarationGraph, DeclarationKind::*, DocumentBuilder, LanguageProfile,
    Modifier, TypeRef,
};

/// A small storage client package:
///
/// ```text
/// namespace Azure.Storage.Blobs
///   class BlobClient
///     constructor(endpoint: String)
///     download(): BlobDownloadResult     (forward reference)
///     download(range: Int): BlobDownloadResult   [Deprecated]
///     upload(data: String)
///     val url: String
///   class BlobDownloadResult
///     val content: String
///   interface BlobListener               (empty)
/// ```
pub fn storage_graph() -> DeclarationGraph {
    DeclarationGraph::new()
        .with(Declaration::new("ns", Namespace, "Azure.Storage.Blobs"))
        .with(
            Declaration::new("client", Class, "BlobClient")
                .in_container("ns")
                .with_modifier(Modifier::Public)
                .with_doc(Documentation::text("Client for a single blob.")),
        )
        .with(Declaration::new("ctor", Constructor, "BlobClient").in_container("client"))
        .with(
            Declaration::new("ctor.endpoint", Parameter, "endpoint")
                .in_container("ctor")
                .with_type(TypeRef::new("String")),
        )
        .with(
            Declaration::new("download", Method, "download")
                .in_container("client")
                .with_type(TypeRef::new("BlobDownloadResult")),
        )
        .with(
            Declaration::new("download.old", Method, "download")
                .in_container("client")
                .with_type(TypeRef::new("BlobDownloadResult"))
                .with_attribute(Attribute::new("Deprecated")),
        )
        .with(
            Declaration::new("download.old.range", Parameter, "range")
                .in_container("download.old")
                .with_type(TypeRef::new("Int")),
        )
        .with(
            Declaration::new("upload", Method, "upload")
                .in_container("client")
                .with_type(TypeRef::new("Unit")),
        )
        .with(
            Declaration::new("upload.data", Parameter, "data")
                .in_container("upload")
                .with_type(TypeRef::new("String")),
        )
        .with(
            Declaration::new("url", Property, "url")
                .in_container("client")
                .with_modifier(Modifier::Readonly)
                .with_type(TypeRef::new("String")),
        )
        .with(Declaration::new("result", Class, "BlobDownloadResult").in_container("ns"))
        .with(
            Declaration::new("content", Property, "content")
                .in_container("result")
                .with_modifier(Modifier::Readonly)
                .with_type(TypeRef::new("String")),
        )
        .with(Declaration::new("listener", Interface, "BlobListener").in_container("ns"))
}

/// Three namespaces with one class each, added out of order.
pub fn three_namespaces() -> DeclarationGraph {
    let mut graph = DeclarationGraph::new();
    for (ns, class) in [("Contoso.C", "Gamma"), ("Contoso.A", "Alpha"), ("Contoso.B", "Beta")] {
        graph.add(Declaration::new(ns, Namespace, ns));
        graph.add(Declaration::new(class, Class, class).in_container(ns));
    }
    graph
}

/// One class with a single public method in namespace `N`.
pub fn single_class(name: &str) -> DeclarationGraph {
    DeclarationGraph::new()
        .with(Declaration::new("ns", Namespace, "N"))
        .with(
            Declaration::new("c", Class, name)
                .in_container("ns")
                .with_modifier(Modifier::Public),
        )
        .with(Declaration::new("m", Method, "run").in_container("c"))
}

/// Build with package defaults, panicking on error.
pub fn build(graph: &DeclarationGraph, profile: &LanguageProfile) -> CodeFile {
    DocumentBuilder::new(graph, profile)
        .package("test-package", "1.0.0")
        .build()
        .unwrap_or_else(|e| panic!("build failed: {e}"))
}
