//! Type references, generic parameter lists and parameter lists.

use crate::base::constants::UNRESOLVED_TARGET;
use crate::builder::registry::lookup_keys;
use crate::model::{Declaration, GenericParam, TypeRef};
use crate::profile::TypePosition;
use crate::review::{PendingReference, ReviewToken};

use super::{EmitContext, TokenEmitter};

/// Tokens of one line under construction.
#[derive(Debug, Default)]
pub(crate) struct Tokens(Vec<ReviewToken>);

impl Tokens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: ReviewToken) {
        self.0.push(token);
    }

    /// Remove the space after the last content token.
    pub fn glue(&mut self) {
        if let Some(last) = self.0.iter_mut().rev().find(|t| !t.kind.is_range_marker()) {
            last.has_suffix_space = false;
        }
    }

    pub fn into_vec(self) -> Vec<ReviewToken> {
        self.0
    }
}

impl TokenEmitter<'_> {
    /// Tokens of a type reference, linking every name that can be linked.
    pub(super) fn type_tokens(&mut self, ty: &TypeRef, ctx: &EmitContext, out: &mut Tokens) {
        out.push(self.type_name_token(ty, ty.name.as_str(), ctx));

        if !ty.arguments.is_empty() {
            out.glue();
            out.push(ReviewToken::punctuation("<").no_space());
            for (i, argument) in ty.arguments.iter().enumerate() {
                if i > 0 {
                    out.glue();
                    out.push(ReviewToken::punctuation(","));
                }
                self.type_tokens(argument, ctx, out);
            }
            out.glue();
            out.push(ReviewToken::punctuation(">"));
        }
        if ty.nullable {
            out.glue();
            out.push(ReviewToken::punctuation("?"));
        }
    }

    /// A `TypeName` token showing `display`, linked to the definition of `ty`.
    ///
    /// Primitives and in-scope generic parameters stay unlinked. A name not
    /// registered yet gets the placeholder target and a pending lookup.
    pub(super) fn type_name_token(&mut self, ty: &TypeRef, display: &str, ctx: &EmitContext) -> ReviewToken {
        let token = ReviewToken::type_name(display);
        if self.profile.is_primitive(ty) || ctx.is_type_param(&ty.name) {
            return token;
        }
        match self.registry.resolve_type(ty, ctx.scopes()) {
            Some(id) => token.navigate_to(id.to_wire()),
            None => {
                self.placeholders += 1;
                tracing::trace!(name = %ty.name, "forward reference, placeholder emitted");
                token.pending(
                    UNRESOLVED_TARGET,
                    PendingReference {
                        keys: lookup_keys(ty),
                        scopes: ctx.scopes().to_vec(),
                    },
                )
            }
        }
    }

    /// `<T : Bound, U>`
    pub(super) fn generic_params(&mut self, generics: &[GenericParam], ctx: &EmitContext, out: &mut Tokens) {
        out.push(ReviewToken::punctuation("<").no_space());
        for (i, param) in generics.iter().enumerate() {
            if i > 0 {
                out.glue();
                out.push(ReviewToken::punctuation(","));
            }
            out.push(ReviewToken::type_name(param.name.as_str()));
            if !param.bounds.is_empty() {
                out.push(ReviewToken::punctuation(":"));
                for (j, bound) in param.bounds.iter().enumerate() {
                    if j > 0 {
                        out.glue();
                        out.push(ReviewToken::punctuation(","));
                    }
                    self.type_tokens(bound, ctx, out);
                }
            }
        }
        out.glue();
        out.push(ReviewToken::punctuation(">"));
    }

    /// `(name: Type = default, ...)` including the parentheses.
    pub(super) fn parameter_list(&mut self, params: &[&Declaration], ctx: &EmitContext, out: &mut Tokens) {
        out.glue();
        out.push(ReviewToken::punctuation("(").no_space());
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                out.glue();
                out.push(ReviewToken::punctuation(","));
            }
            for attribute in &param.attributes {
                if !self.profile.is_noise_annotation(&attribute.name) {
                    self.annotation_tokens(attribute, ctx, out);
                }
            }
            match self.profile.type_position {
                TypePosition::AfterName => {
                    out.push(ReviewToken::text(param.name.as_str()));
                    if let Some(ty) = &param.type_ref {
                        out.glue();
                        out.push(ReviewToken::punctuation(":"));
                        self.type_tokens(ty, ctx, out);
                    }
                }
                TypePosition::BeforeName => {
                    if let Some(ty) = &param.type_ref {
                        self.type_tokens(ty, ctx, out);
                    }
                    out.push(ReviewToken::text(param.name.as_str()));
                }
            }
            if let Some(value) = &param.value {
                out.push(ReviewToken::punctuation("="));
                out.push(ReviewToken::literal(value.as_str()));
            }
        }
        out.glue();
        out.push(ReviewToken::punctuation(")"));
    }
}
