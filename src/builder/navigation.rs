//! Navigation tree builder: the collapsible outline beside a review.

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::base::DefinitionId;
use crate::model::DeclarationKind;
use crate::profile::LanguageProfile;
use crate::review::{NavigationNode, ReviewLine};

use super::registry::NameRegistry;

/// Navigation entries recorded by the emitter for declarations sitting
/// directly in a namespace (or at global scope).
#[derive(Clone, Debug, Default)]
pub struct NavigationStubs {
    pub global: Vec<NavigationNode>,
    /// Namespace id -> stubs, in emission order.
    pub namespaces: IndexMap<DefinitionId, Vec<NavigationNode>>,
}

impl NavigationStubs {
    /// Stubs of one namespace, created on first use.
    pub fn namespace(&mut self, id: &DefinitionId) -> &mut Vec<NavigationNode> {
        self.namespaces.entry(id.clone()).or_default()
    }

    pub fn len(&self) -> usize {
        self.global.len() + self.namespaces.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builds navigation nodes from the finished line tree.
pub struct NavigationTreeBuilder<'a> {
    registry: &'a NameRegistry,
    profile: &'a LanguageProfile,
}

impl<'a> NavigationTreeBuilder<'a> {
    pub fn new(registry: &'a NameRegistry, profile: &'a LanguageProfile) -> Self {
        Self { registry, profile }
    }

    /// Global declarations first, then one node per namespace line.
    pub fn build(&self, lines: &[ReviewLine], stubs: &NavigationStubs) -> Vec<NavigationNode> {
        let mut by_id: FxHashMap<&str, &ReviewLine> = FxHashMap::default();
        let mut targets: FxHashSet<&str> = FxHashSet::default();
        for line in lines.iter().flat_map(|l| l.walk()) {
            if let Some(id) = &line.line_id {
                by_id.insert(id.as_str(), line);
            }
            targets.extend(line.tokens.iter().filter_map(|t| t.navigate_to_id.as_deref()));
        }

        let mut nodes: Vec<NavigationNode> = stubs
            .global
            .iter()
            .map(|stub| self.node_from_stub(stub, &by_id, false))
            .collect();

        for line in lines {
            let Some(id) = line.line_id.as_deref() else {
                continue;
            };
            if self.registry.kind_of(id) != Some(DeclarationKind::Namespace) {
                continue;
            }
            let show = self.profile.shows_hidden_under(id);
            let mut node = NavigationNode::new(id, id, DeclarationKind::Namespace);
            node.visible = !line.is_hidden || self.profile.navigation.always_show_hidden;
            if let Some(children) = stubs.namespaces.get(id) {
                node.children = children
                    .iter()
                    .map(|stub| self.node_from_stub(stub, &by_id, show))
                    .collect();
            }
            nodes.push(node);
        }

        for node in &mut nodes {
            mark_inner_navigation(node, &targets);
        }
        tracing::debug!(
            roots = nodes.len(),
            total = nodes.iter().map(NavigationNode::count).sum::<usize>(),
            "navigation built"
        );
        nodes
    }

    fn node_from_stub(
        &self,
        stub: &NavigationNode,
        by_id: &FxHashMap<&str, &ReviewLine>,
        show_hidden: bool,
    ) -> NavigationNode {
        match by_id.get(stub.id.as_str()) {
            Some(line) => self.fill(stub.clone(), line, show_hidden),
            None => stub.clone(),
        }
    }

    /// Set visibility and, for types, collect members and nested types.
    fn fill(&self, mut node: NavigationNode, line: &ReviewLine, show_hidden: bool) -> NavigationNode {
        let show_hidden = show_hidden || self.profile.navigation.always_show_hidden;
        node.visible = !line.is_hidden || show_hidden;
        if !node.kind.is_type() {
            return node;
        }

        let show_below = show_hidden || self.profile.shows_hidden_under(&node.id);
        for child in &line.children {
            let Some(id) = child.line_id.as_deref() else {
                continue;
            };
            let Some(entry) = self.registry.entry(id) else {
                continue;
            };
            let label = declared_label(child, id).unwrap_or(entry.name.as_str());
            let mut child_node = NavigationNode::new(label, id, entry.kind);
            if entry.kind.is_type() {
                child_node = self.fill(child_node, child, show_below);
            } else {
                child_node.visible = !child.is_hidden || show_below;
            }
            node.children.push(child_node);
        }
        node
    }
}

/// Text of the token declaring `id` on `line`.
fn declared_label<'l>(line: &'l ReviewLine, id: &str) -> Option<&'l str> {
    line.tokens
        .iter()
        .find(|t| t.definition_id.as_ref().is_some_and(|d| d.as_str() == id))
        .map(|t| t.value.as_str())
}

/// Set `has_inner_navigation`; returns whether anything in the subtree is a
/// navigation target.
fn mark_inner_navigation(node: &mut NavigationNode, targets: &FxHashSet<&str>) -> bool {
    let mut inner = false;
    for child in &mut node.children {
        inner |= mark_inner_navigation(child, targets);
    }
    node.has_inner_navigation = inner;
    inner || targets.contains(node.id.as_str())
}
