//! Presentation order of declarations.
//!
//! All sorts are stable and break ties on the normalized signature, so the
//! order never depends on hash iteration or input shuffling between equal
//! keys.

use crate::builder::registry::signature;
use crate::model::{Declaration, DeclarationGraph, DeclarationKind};
use crate::profile::LanguageProfile;

/// Order the contents of a namespace (or the global scope).
///
/// Properties and fields keep declaration order, then free functions by
/// name, then types by name. Namespaces are not part of the contents.
pub fn namespace_contents<'g>(
    graph: &'g DeclarationGraph,
    members: impl IntoIterator<Item = &'g Declaration>,
) -> Vec<&'g Declaration> {
    let mut values = Vec::new();
    let mut functions = Vec::new();
    let mut types = Vec::new();
    for decl in members {
        match decl.kind {
            k if k.is_value_member() => values.push(decl),
            k if k.is_callable() => functions.push(decl),
            k if k.is_type() => types.push(decl),
            _ => {}
        }
    }
    sort_by_name(graph, &mut functions);
    sort_types(&mut types);

    values.into_iter().chain(functions).chain(types).collect()
}

/// Order the members of a type body.
///
/// Fields, properties and enum members keep declaration order, then
/// constructors by ascending parameter count, then methods by name, then
/// nested types by name.
pub fn type_contents<'g>(
    graph: &'g DeclarationGraph,
    members: impl IntoIterator<Item = &'g Declaration>,
    profile: &LanguageProfile,
) -> Vec<&'g Declaration> {
    let mut values = Vec::new();
    let mut constructors = Vec::new();
    let mut methods = Vec::new();
    let mut types = Vec::new();
    for decl in members {
        match decl.kind {
            DeclarationKind::Constructor => constructors.push(decl),
            DeclarationKind::Method => methods.push(decl),
            k if k.is_value_member() => values.push(decl),
            k if k.is_type() => types.push(decl),
            _ => {}
        }
    }

    constructors.sort_by_cached_key(|d| (graph.parameters(&d.id).count(), signature(graph, d)));
    if profile.hide_lone_default_constructor
        && constructors.len() == 1
        && graph.parameters(&constructors[0].id).next().is_none()
    {
        tracing::trace!(id = %constructors[0].id, "lone default constructor omitted");
        constructors.clear();
    }
    sort_by_name(graph, &mut methods);
    sort_types(&mut types);

    values
        .into_iter()
        .chain(constructors)
        .chain(methods)
        .chain(types)
        .collect()
}

fn sort_by_name(graph: &DeclarationGraph, decls: &mut [&Declaration]) {
    decls.sort_by_cached_key(|d| (d.name.clone(), signature(graph, d)));
}

fn sort_types(decls: &mut [&Declaration]) {
    decls.sort_by_key(|d| (d.name.clone(), d.generics.len()));
}
