//! Name registry: canonical definition ids and their lookup tables.
//!
//! Ids are built from the containment chain, never from presentation order
//! or object identity, so two builds of the same graph agree on every id.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::constants::{GENERIC_ARITY_SEPARATOR, ID_SEPARATOR, OVERLOAD_ORDINAL_SEPARATOR};
use crate::base::{DeclId, DefinitionId};
use crate::error::{BuildError, Result};
use crate::model::{Declaration, DeclarationGraph, DeclarationKind, TypeRef};

/// What the registry knows about one registered declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryEntry {
    pub id: DefinitionId,
    pub decl: DeclId,
    pub kind: DeclarationKind,
    pub name: SmolStr,
    /// Container key, for overload detection.
    pub container: Option<DeclId>,
}

type EntryIdx = usize;

/// Registry of definition ids for one document build.
#[derive(Clone, Debug, Default)]
pub struct NameRegistry {
    entries: Vec<RegistryEntry>,
    /// Definition id -> entry (IndexMap keeps registration order).
    by_id: IndexMap<DefinitionId, EntryIdx>,
    by_decl: FxHashMap<DeclId, EntryIdx>,
    /// Declaration name -> entries, parameters excluded.
    by_short_name: FxHashMap<SmolStr, Vec<EntryIdx>>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register a declaration and return its id.
    ///
    /// Idempotent. Unregistered ancestors are registered first, outermost
    /// first. Fails with [`BuildError::DuplicateDefinitionId`] when a
    /// non-overload declaration collides with an existing id.
    pub fn register(&mut self, graph: &DeclarationGraph, decl: &Declaration) -> Result<DefinitionId> {
        if let Some(id) = self.id_of(&decl.id) {
            return Ok(id.clone());
        }

        let mut pending: Vec<&Declaration> = graph
            .ancestors(&decl.id)
            .take_while(|a| !self.by_decl.contains_key(&a.id))
            .collect();
        pending.reverse();
        for ancestor in pending {
            self.register_one(graph, ancestor)?;
        }
        self.register_one(graph, decl)
    }

    /// Register every declaration of the graph, in graph order.
    pub fn register_all(&mut self, graph: &DeclarationGraph) -> Result<()> {
        for decl in graph.iter() {
            self.register(graph, decl)?;
        }
        Ok(())
    }

    fn register_one(&mut self, graph: &DeclarationGraph, decl: &Declaration) -> Result<DefinitionId> {
        let parent = decl.container.as_ref().and_then(|c| self.id_of(c)).cloned();
        let segment = local_segment(graph, decl);
        let mut id = match (&parent, decl.kind) {
            // Namespaces already named by their full dotted path keep it.
            (Some(p), DeclarationKind::Namespace) if segment.starts_with(&format!("{p}{ID_SEPARATOR}")) => {
                DefinitionId::new(segment)
            }
            (Some(p), _) => p.child(&segment),
            (None, _) => DefinitionId::new(segment),
        };

        if let Some(&existing) = self.by_id.get(&id) {
            let first = &self.entries[existing];
            if !is_overload_of(first, decl) {
                return Err(BuildError::duplicate_id(
                    id.as_str(),
                    first.decl.as_str(),
                    decl.id.as_str(),
                ));
            }
            let base = id.clone();
            let mut ordinal = 2;
            while self.by_id.contains_key(format!("{base}{OVERLOAD_ORDINAL_SEPARATOR}{ordinal}").as_str()) {
                ordinal += 1;
            }
            id = DefinitionId::new(format!("{base}{OVERLOAD_ORDINAL_SEPARATOR}{ordinal}"));
            tracing::debug!(id = %id, "overload id collision, ordinal assigned");
        }

        let idx = self.entries.len();
        self.entries.push(RegistryEntry {
            id: id.clone(),
            decl: decl.id.clone(),
            kind: decl.kind,
            name: decl.name.clone(),
            container: decl.container.clone(),
        });
        self.by_id.insert(id.clone(), idx);
        self.by_decl.insert(decl.id.clone(), idx);
        if decl.kind != DeclarationKind::Parameter {
            self.by_short_name
                .entry(decl.name.clone())
                .or_default()
                .push(idx);
        }
        tracing::trace!(id = %id, decl = %decl.id, "registered");
        Ok(id)
    }

    /// Exact lookup of a definition id.
    pub fn lookup(&self, id: &str) -> Option<DefinitionId> {
        self.by_id.get(id).map(|&idx| self.entries[idx].id.clone())
    }

    /// First registered id whose declaration is named `name`.
    pub fn lookup_by_short_name(&self, name: &str) -> Option<DefinitionId> {
        self.by_short_name
            .get(name)
            .and_then(|indices| indices.first())
            .map(|&idx| self.entries[idx].id.clone())
    }

    /// Exact lookup restricted to declarations a type reference can name.
    pub fn lookup_type(&self, id: &str) -> Option<DefinitionId> {
        self.entry(id)
            .filter(|e| is_type_target(e.kind))
            .map(|e| e.id.clone())
    }

    /// First registered type or namespace named `name`; members are skipped.
    pub fn lookup_type_by_short_name(&self, name: &str) -> Option<DefinitionId> {
        self.by_short_name
            .get(name)?
            .iter()
            .map(|&idx| &self.entries[idx])
            .find(|e| is_type_target(e.kind))
            .map(|e| e.id.clone())
    }

    /// Id assigned to a declaration key.
    pub fn id_of(&self, decl: &DeclId) -> Option<&DefinitionId> {
        self.by_decl.get(decl).map(|&idx| &self.entries[idx].id)
    }

    pub fn entry(&self, id: &str) -> Option<&RegistryEntry> {
        self.by_id.get(id).map(|&idx| &self.entries[idx])
    }

    pub fn kind_of(&self, id: &str) -> Option<DeclarationKind> {
        self.entry(id).map(|e| e.kind)
    }

    /// All entries in registration order.
    pub fn entries(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.by_id.values().map(|&idx| &self.entries[idx])
    }

    /// Resolve `name` as seen from inside `scopes` (outermost first).
    ///
    /// Tries, in order: `name` itself, `scope.name` for each scope from the
    /// innermost outward, then `prefix.name` for each dotted prefix of the
    /// outermost scope. Every step is an exact lookup.
    pub fn resolve_scoped(&self, name: &str, scopes: &[DefinitionId]) -> Option<DefinitionId> {
        self.resolve_scoped_where(name, scopes, |_| true)
    }

    /// [`resolve_scoped`](Self::resolve_scoped) accepting only types and
    /// namespaces, so a property named like its type never shadows it.
    pub fn resolve_scoped_type(&self, name: &str, scopes: &[DefinitionId]) -> Option<DefinitionId> {
        self.resolve_scoped_where(name, scopes, |e| is_type_target(e.kind))
    }

    /// Resolve a type reference, trying the generic-arity form first.
    pub fn resolve_type(&self, ty: &TypeRef, scopes: &[DefinitionId]) -> Option<DefinitionId> {
        lookup_keys(ty)
            .iter()
            .find_map(|key| self.resolve_scoped_type(key, scopes))
    }

    fn resolve_scoped_where(
        &self,
        name: &str,
        scopes: &[DefinitionId],
        accept: impl Fn(&RegistryEntry) -> bool,
    ) -> Option<DefinitionId> {
        let find = |candidate: &str| {
            self.entry(candidate)
                .filter(|e| accept(e))
                .map(|e| e.id.clone())
        };
        if let Some(id) = find(name) {
            return Some(id);
        }
        for scope in scopes.iter().rev() {
            if let Some(id) = find(&format!("{scope}{ID_SEPARATOR}{name}")) {
                return Some(id);
            }
        }
        let outermost = scopes.first()?.as_str();
        let mut prefix = outermost;
        while let Some(pos) = prefix.rfind(ID_SEPARATOR) {
            prefix = &prefix[..pos];
            if let Some(id) = find(&format!("{prefix}{ID_SEPARATOR}{name}")) {
                return Some(id);
            }
        }
        None
    }
}

fn is_type_target(kind: DeclarationKind) -> bool {
    kind.is_type() || kind == DeclarationKind::Namespace
}

/// Keys a type reference may be registered under, most specific first.
pub fn lookup_keys(ty: &TypeRef) -> Vec<SmolStr> {
    if ty.arguments.is_empty() {
        vec![ty.name.clone()]
    } else {
        vec![
            SmolStr::new(format!("{}{GENERIC_ARITY_SEPARATOR}{}", ty.name, ty.arguments.len())),
            ty.name.clone(),
        ]
    }
}

/// Normalized parameter-type signature, `(T1,T2)`.
pub fn signature(graph: &DeclarationGraph, decl: &Declaration) -> String {
    let params: Vec<String> = graph
        .parameters(&decl.id)
        .map(|p| p.type_ref.as_ref().map(TypeRef::normalized).unwrap_or_default())
        .collect();
    format!("({})", params.join(","))
}

fn local_segment(graph: &DeclarationGraph, decl: &Declaration) -> String {
    match decl.kind {
        DeclarationKind::Class
        | DeclarationKind::Interface
        | DeclarationKind::Enum
        | DeclarationKind::Struct
        | DeclarationKind::Annotation
            if !decl.generics.is_empty() =>
        {
            format!("{}{GENERIC_ARITY_SEPARATOR}{}", decl.name, decl.generics.len())
        }
        DeclarationKind::Method => format!("{}{}", decl.name, signature(graph, decl)),
        DeclarationKind::Constructor => {
            let type_name = graph
                .container_of(decl)
                .map(|c| c.name.as_str())
                .unwrap_or(decl.name.as_str());
            format!("{}{}", type_name, signature(graph, decl))
        }
        _ => decl.name.to_string(),
    }
}

fn is_overload_of(existing: &RegistryEntry, decl: &Declaration) -> bool {
    existing.kind.is_callable()
        && decl.kind.is_callable()
        && existing.container == decl.container
        && (existing.name == decl.name || existing.kind == DeclarationKind::Constructor)
}
