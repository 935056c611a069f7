//! Document builder: runs the pipeline from a validated declaration graph
//! to a finished [`CodeFile`].
//!
//! ```text
//! DeclarationGraph::validate
//!   → TokenEmitter (registers ids as it goes)
//!   → ReviewLineBuilder
//!   → ReferenceResolver
//!   → NavigationTreeBuilder
//!   → CodeFile
//! ```
//!
//! A build either returns the whole document or an error; nothing partial
//! escapes. Every build owns its registry, so independent builds can run on
//! separate threads (see [`build_many`]).

pub mod diagnostics;
pub mod emission;
pub mod emit;
pub mod lines;
pub mod navigation;
pub mod registry;
pub mod resolve;

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::error::{BuildError, Result};
use crate::model::DeclarationGraph;
use crate::profile::LanguageProfile;
use crate::review::{CodeDiagnostic, CodeFile, ReviewLine};

pub use diagnostics::{DiagnosticCollector, codes};
pub use emission::{Emission, GroupContext, LineMeta, SiblingKey};
pub use emit::{EmitContext, EmitOutput, TokenEmitter};
pub use lines::{BuilderState, LineTree, ReviewLineBuilder};
pub use navigation::{NavigationStubs, NavigationTreeBuilder};
pub use registry::{NameRegistry, RegistryEntry};
pub use resolve::{ReferenceResolver, ResolveReport, ResolveStats, UnresolvedName};

/// A package the reviewed package depends on, listed in the header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dependency {
    pub name: SmolStr,
    pub version: String,
}

impl Dependency {
    pub fn new(name: impl Into<SmolStr>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Package-level information written on the document.
#[derive(Clone, Debug, Default)]
struct PackageInfo {
    name: String,
    version: String,
    parser_version: Option<String>,
    cross_language_package_id: Option<String>,
    dependencies: Vec<Dependency>,
}

/// Builds one [`CodeFile`] from a declaration graph.
pub struct DocumentBuilder<'a> {
    graph: &'a DeclarationGraph,
    profile: &'a LanguageProfile,
    package: PackageInfo,
    front_end: Vec<CodeDiagnostic>,
    report_unresolved: bool,
    navigation: bool,
}

impl<'a> DocumentBuilder<'a> {
    pub fn new(graph: &'a DeclarationGraph, profile: &'a LanguageProfile) -> Self {
        Self {
            graph,
            profile,
            package: PackageInfo::default(),
            front_end: Vec::new(),
            report_unresolved: false,
            navigation: true,
        }
    }

    pub fn package(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.package.name = name.into();
        self.package.version = version.into();
        self
    }

    pub fn parser_version(mut self, version: impl Into<String>) -> Self {
        self.package.parser_version = Some(version.into());
        self
    }

    pub fn cross_language_package_id(mut self, id: impl Into<String>) -> Self {
        self.package.cross_language_package_id = Some(id.into());
        self
    }

    pub fn dependencies(mut self, dependencies: Vec<Dependency>) -> Self {
        self.package.dependencies = dependencies;
        self
    }

    /// Diagnostics produced by the front end, copied into the document.
    pub fn diagnostics(mut self, diagnostics: impl IntoIterator<Item = CodeDiagnostic>) -> Self {
        self.front_end.extend(diagnostics);
        self
    }

    /// Add an info diagnostic for every reference left unlinked.
    pub fn report_unresolved(mut self, enabled: bool) -> Self {
        self.report_unresolved = enabled;
        self
    }

    /// Whether to build the navigation tree.
    pub fn navigation(mut self, enabled: bool) -> Self {
        self.navigation = enabled;
        self
    }

    /// Run the whole pipeline.
    pub fn build(self) -> Result<CodeFile> {
        let _span = tracing::debug_span!("build", package = %self.package.name).entered();
        self.graph.validate()?;

        let mut registry = NameRegistry::new();
        let output = TokenEmitter::new(self.graph, self.profile, &mut registry)
            .emit(&self.package.dependencies)?;
        tracing::debug!(
            declarations = self.graph.len(),
            registered = registry.len(),
            "declarations registered"
        );

        let tree = ReviewLineBuilder::new(self.profile.obsolete_link_rule).build_tree(output.emissions)?;
        let mut lines = tree.lines;
        let report = ReferenceResolver::new(&registry).resolve(&mut lines);
        check_unique_line_ids(&lines)?;

        let navigation = self
            .navigation
            .then(|| NavigationTreeBuilder::new(&registry, self.profile).build(&lines, &output.stubs));

        let mut diagnostics = DiagnosticCollector::new();
        diagnostics.extend(self.front_end);
        diagnostics.extend(tree.diagnostics);
        if self.report_unresolved {
            for miss in &report.unresolved {
                diagnostics.unresolved_reference(miss.anchor.as_deref().unwrap_or_default(), &miss.name);
            }
        }

        let mut file = CodeFile::new(self.package.name, self.package.version, self.profile.language);
        file.parser_version = self.package.parser_version;
        file.cross_language_package_id = self.package.cross_language_package_id;
        file.review_lines = lines;
        file.diagnostics = diagnostics.into_vec();
        file.navigation = navigation;

        tracing::info!(
            lines = file.all_lines().len(),
            diagnostics = file.diagnostics.len(),
            unresolved = report.stats.cleared,
            "document built"
        );
        Ok(file)
    }
}

/// Line ids are the anchors comments attach to; two lines must never share one.
fn check_unique_line_ids(lines: &[ReviewLine]) -> Result<()> {
    let mut seen: FxHashMap<&str, &ReviewLine> = FxHashMap::default();
    for line in lines.iter().flat_map(|l| l.walk()) {
        let Some(id) = line.line_id.as_deref() else {
            continue;
        };
        if let Some(first) = seen.insert(id, line) {
            return Err(BuildError::duplicate_id(
                id,
                format!("'{}'", first.text()),
                format!("'{}'", line.text()),
            ));
        }
    }
    Ok(())
}

// ============================================================================
// BATCH BUILDS
// ============================================================================

/// Everything needed to build one document independently of any other.
#[derive(Clone, Debug)]
pub struct BuildJob {
    pub graph: DeclarationGraph,
    pub profile: LanguageProfile,
    pub package_name: String,
    pub package_version: String,
    pub dependencies: Vec<Dependency>,
}

impl BuildJob {
    pub fn new(
        graph: DeclarationGraph,
        profile: LanguageProfile,
        package_name: impl Into<String>,
        package_version: impl Into<String>,
    ) -> Self {
        Self {
            graph,
            profile,
            package_name: package_name.into(),
            package_version: package_version.into(),
            dependencies: Vec::new(),
        }
    }

    pub fn with_dependencies(mut self, dependencies: Vec<Dependency>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn build(&self) -> Result<CodeFile> {
        DocumentBuilder::new(&self.graph, &self.profile)
            .package(self.package_name.as_str(), self.package_version.as_str())
            .dependencies(self.dependencies.clone())
            .build()
    }
}

/// Build independent documents in parallel. Results are in job order.
pub fn build_many(jobs: &[BuildJob]) -> Vec<Result<CodeFile>> {
    jobs.par_iter().map(BuildJob::build).collect()
}
