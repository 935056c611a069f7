//! The declaration graph handed over by a language front end.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::declaration::{Declaration, DeclarationKind};
use crate::base::DeclId;
use crate::error::{BuildError, Result};

/// Declarations keyed by front-end key, in the order the front end produced them.
///
/// Insertion order is significant: it is the "declaration order" used when
/// emitting fields, properties and enum members.
#[derive(Clone, Debug, Default)]
pub struct DeclarationGraph {
    declarations: IndexMap<DeclId, Declaration>,
    /// Container key -> child keys, in insertion order.
    children: FxHashMap<DeclId, Vec<DeclId>>,
    /// Keys added more than once. Reported by `validate`.
    duplicates: Vec<DeclId>,
}

#[derive(Serialize, Deserialize)]
struct GraphRepr {
    declarations: Vec<Declaration>,
}

impl DeclarationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration. A repeated key replaces nothing and is reported by `validate`.
    pub fn add(&mut self, declaration: Declaration) {
        if self.declarations.contains_key(&declaration.id) {
            tracing::warn!(id = %declaration.id, "duplicate declaration key");
            self.duplicates.push(declaration.id.clone());
            return;
        }
        if let Some(container) = &declaration.container {
            self.children
                .entry(container.clone())
                .or_default()
                .push(declaration.id.clone());
        }
        self.declarations.insert(declaration.id.clone(), declaration);
    }

    /// Builder-style [`add`](Self::add).
    pub fn with(mut self, declaration: Declaration) -> Self {
        self.add(declaration);
        self
    }

    pub fn get(&self, id: &DeclId) -> Option<&Declaration> {
        self.declarations.get(id)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// All declarations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.values()
    }

    /// Declarations without a container, in insertion order.
    pub fn roots(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.values().filter(|d| d.container.is_none())
    }

    /// Direct children of a declaration, in insertion order.
    pub fn children(&self, id: &DeclId) -> impl Iterator<Item = &Declaration> {
        self.children
            .get(id)
            .into_iter()
            .flatten()
            .filter_map(|child| self.declarations.get(child))
    }

    /// Children that are not parameters.
    pub fn members(&self, id: &DeclId) -> impl Iterator<Item = &Declaration> {
        self.children(id)
            .filter(|d| d.kind != DeclarationKind::Parameter)
    }

    /// Parameters of a method or constructor, in declaration order.
    pub fn parameters(&self, id: &DeclId) -> impl Iterator<Item = &Declaration> {
        self.children(id)
            .filter(|d| d.kind == DeclarationKind::Parameter)
    }

    /// The container of a declaration, if it has one in this graph.
    pub fn container_of(&self, declaration: &Declaration) -> Option<&Declaration> {
        declaration
            .container
            .as_ref()
            .and_then(|c| self.declarations.get(c))
    }

    /// Walk container links from `id` outward, nearest first. Stops at a
    /// missing container and never visits more nodes than the graph holds.
    pub fn ancestors<'a>(&'a self, id: &DeclId) -> impl Iterator<Item = &'a Declaration> + 'a {
        let mut current = self.declarations.get(id).and_then(|d| self.container_of(d));
        let mut remaining = self.declarations.len();
        std::iter::from_fn(move || {
            if remaining == 0 {
                return None;
            }
            remaining -= 1;
            let decl = current?;
            current = self.container_of(decl);
            Some(decl)
        })
    }

    /// Check that the graph is a well-formed containment tree.
    ///
    /// Fails on the first problem found, in this order: duplicate keys,
    /// missing names, unknown containers, containment cycles.
    pub fn validate(&self) -> Result<()> {
        if let Some(dup) = self.duplicates.first() {
            return Err(BuildError::DuplicateDeclaration(dup.to_string()));
        }

        for decl in self.declarations.values() {
            if decl.name.trim().is_empty() {
                return Err(BuildError::MissingName(decl.id.to_string()));
            }
            if let Some(container) = &decl.container {
                if !self.declarations.contains_key(container) {
                    return Err(BuildError::UnknownContainer {
                        declaration: decl.id.to_string(),
                        container: container.to_string(),
                    });
                }
            }
        }

        for decl in self.declarations.values() {
            let mut current = decl.container.as_ref();
            let mut steps = 0;
            while let Some(container) = current {
                if container == &decl.id || steps > self.declarations.len() {
                    return Err(BuildError::ContainmentCycle(decl.id.to_string()));
                }
                steps += 1;
                current = self
                    .declarations
                    .get(container)
                    .and_then(|d| d.container.as_ref());
            }
        }

        tracing::debug!(declarations = self.declarations.len(), "declaration graph validated");
        Ok(())
    }

    /// Decode a graph from `{ "declarations": [ ... ] }` JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let repr: GraphRepr =
            serde_json::from_str(json).map_err(|e| BuildError::malformed(e.to_string()))?;
        Ok(repr.declarations.into_iter().fold(Self::new(), Self::with))
    }

    /// Encode the graph as `{ "declarations": [ ... ] }` JSON.
    pub fn to_json(&self) -> Result<String> {
        let repr = GraphRepr {
            declarations: self.declarations.values().cloned().collect(),
        };
        Ok(serde_json::to_string_pretty(&repr)?)
    }
}

impl FromIterator<Declaration> for DeclarationGraph {
    fn from_iter<I: IntoIterator<Item = Declaration>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Self::with)
    }
}
