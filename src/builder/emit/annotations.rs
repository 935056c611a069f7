//! Documentation and annotation lines emitted ahead of a declaration.

use crate::base::DefinitionId;
use crate::builder::emission::{Emission, LineMeta};
use crate::model::{Attribute, AttributeValue, Declaration, TypeRef};
use crate::review::{ReviewToken, TokenKind};

use super::types::Tokens;
use super::{EmitContext, TokenEmitter};

impl TokenEmitter<'_> {
    /// Documentation lines, then one line per rendered annotation. Every
    /// line is attached to `id`.
    pub(super) fn prologue(&mut self, decl: &Declaration, id: &DefinitionId, hidden: bool, ctx: &EmitContext) {
        self.documentation_lines(decl, id, hidden);
        for attribute in &decl.attributes {
            if self.profile.is_noise_annotation(&attribute.name) {
                tracing::trace!(annotation = %attribute.name, "noise annotation dropped");
                continue;
            }
            let mut tokens = Tokens::new();
            self.annotation_tokens(attribute, ctx, &mut tokens);
            self.emit_line(tokens, LineMeta::attached(id.clone()).hidden(hidden));
        }
    }

    fn documentation_lines(&mut self, decl: &Declaration, id: &DefinitionId, hidden: bool) {
        let Some(doc) = &decl.documentation else {
            return;
        };
        let lines = doc.lines();
        let last = lines.len().saturating_sub(1);
        for (i, text) in lines.iter().enumerate() {
            if i == 0 {
                self.push(ReviewToken::marker(TokenKind::DocumentationRangeStart));
            }
            let comment = if text.is_empty() {
                self.profile.doc_comment_prefix.to_string()
            } else {
                format!("{} {}", self.profile.doc_comment_prefix, text)
            };
            self.push(ReviewToken::comment(comment));
            if i == last {
                self.push(ReviewToken::marker(TokenKind::DocumentationRangeEnd));
            }
            self.out
                .push(Emission::EndLine(LineMeta::attached(id.clone()).hidden(hidden)));
        }
    }

    /// `@Name(arg, key = value)`, with the profile's brackets.
    pub(super) fn annotation_tokens(&mut self, attribute: &Attribute, ctx: &EmitContext, out: &mut Tokens) {
        out.push(ReviewToken::punctuation(self.profile.annotation_open.as_str()).no_space());
        let display = self.profile.strip_annotation_suffix(
            attribute.name.rsplit('.').next().unwrap_or(&attribute.name),
        );
        let reference = TypeRef::new(attribute.name.clone());
        let name = self.type_name_token(&reference, display, ctx);
        out.push(name);

        if !attribute.args.is_empty() {
            out.glue();
            out.push(ReviewToken::punctuation("(").no_space());
            for (i, arg) in attribute.args.iter().enumerate() {
                if i > 0 {
                    out.glue();
                    out.push(ReviewToken::punctuation(","));
                }
                if let Some(name) = &arg.name {
                    out.push(ReviewToken::text(name.as_str()));
                    out.push(ReviewToken::punctuation("="));
                }
                match &arg.value {
                    AttributeValue::String(s) => out.push(ReviewToken::string_literal(format!("\"{s}\""))),
                    AttributeValue::Literal(l) => out.push(ReviewToken::literal(l.as_str())),
                    AttributeValue::Type(ty) => self.type_tokens(ty, ctx, out),
                }
            }
            out.glue();
            out.push(ReviewToken::punctuation(")"));
        }
        if !self.profile.annotation_close.is_empty() {
            out.glue();
            out.push(ReviewToken::punctuation(self.profile.annotation_close.as_str()));
        }
    }
}
