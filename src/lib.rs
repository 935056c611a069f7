//! # apiview-base
//!
//! Language-agnostic builder for API review documents: turns a graph of
//! public declarations into a diffable, comment-anchorable token tree.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! builder   → Registry, emitter, line builder, resolver, navigation
//!   ↓
//! profile   → Per-language keywords, annotation filters, display rules
//!   ↓
//! review    → Output document: CodeFile, ReviewLine, ReviewToken
//!   ↓
//! model     → Input: Declaration, DeclarationGraph
//!   ↓
//! base      → Primitives (DeclId, DefinitionId, constants)
//! ```
//!
//! ## Example
//!
//! ```
//! use apiview::{Declaration, DeclarationGraph, DeclarationKind, DocumentBuilder, LanguageProfile};
//!
//! let graph = DeclarationGraph::new()
//!     .with(Declaration::new("ns", DeclarationKind::Namespace, "Azure.Storage"))
//!     .with(Declaration::new("c", DeclarationKind::Class, "BlobClient").in_container("ns"));
//! let profile = LanguageProfile::kotlin();
//! let file = DocumentBuilder::new(&graph, &profile)
//!     .package("azure-storage-blob", "12.0.0")
//!     .build()
//!     .unwrap();
//! assert!(file.find_line("Azure.Storage.BlobClient").is_some());
//! ```

// ============================================================================
// MODULES (dependency order: base → model → review → profile → builder)
// ============================================================================

/// Foundation types: declaration keys, definition ids, constants
pub mod base;

/// Build errors
pub mod error;

/// Input: the declaration graph supplied by a front end
pub mod model;

/// Output: the review document and its wire format
pub mod review;

/// Per-language display configuration
pub mod profile;

/// The build pipeline
pub mod builder;

// Re-export commonly needed items
pub use base::{DeclId, DefinitionId};
pub use builder::{BuildJob, Dependency, DocumentBuilder, build_many};
pub use error::{BuildError, Result};
pub use model::{Declaration, DeclarationGraph, DeclarationKind, Modifier, TypeRef};
pub use profile::{LanguageProfile, ObsoleteLinkRule};
pub use review::{CodeFile, Language, ReviewLine, ReviewToken, TokenKind};
