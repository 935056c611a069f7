//! Declaration graph: the language-independent input of a build.
//!
//! A front end (compiler reflection, documentation-model generator, AST
//! parser) discovers the public API of a package and describes it as a tree
//! of [`Declaration`]s. Nothing in this module knows how declarations are
//! rendered.

mod declaration;
mod graph;

pub use declaration::{
    Attribute, AttributeArg, AttributeValue, Declaration, DeclarationKind, DocNode,
    Documentation, GenericParam, Modifier, TypeRef,
};
pub use graph::DeclarationGraph;
