//! Foundation types for the API review toolchain.
//!
//! This module provides the identifiers shared by every build stage:
//! - [`DeclId`] - Front-end key of a declaration in the input graph
//! - [`DefinitionId`] - Canonical hierarchical id assigned by the name registry
//! - Domain constants (placeholder navigation target, render classes)
//!
//! This module has NO dependencies on other crate modules.

pub mod constants;
mod ids;

pub use ids::{DeclId, DefinitionId};
