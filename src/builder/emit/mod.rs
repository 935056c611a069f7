//! Token emitter: walks the declaration graph in presentation order and
//! produces the flat emission stream.
//!
//! ## Document order
//!
//! ```text
//! Dependencies header (optional)
//! global declarations          → ordered like namespace contents
//! namespaces, sorted by id     → flattened, namespace-only ones skipped
//!   values, functions, types
//!     values, constructors, methods, nested types
//! ```
//!
//! Declarations are registered as they are emitted. A type reference to a
//! declaration that comes later gets the placeholder target and is fixed up
//! by the reference resolver.

mod annotations;
mod order;
mod types;

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::base::DefinitionId;
use crate::base::constants::{DEPENDENCIES_LINE_ID, DEPENDENCIES_RENDER_CLASS, EMPTY_INTERFACE_COMMENT};
use crate::error::Result;
use crate::model::{Declaration, DeclarationGraph, DeclarationKind, Modifier};
use crate::profile::{LanguageProfile, TypePosition};
use crate::review::{NavigationNode, ReviewToken, TokenKind};

use super::Dependency;
use super::emission::{Emission, GroupContext, LineMeta, SiblingKey};
use super::navigation::NavigationStubs;
use super::registry::{NameRegistry, signature};

pub use order::{namespace_contents, type_contents};
use types::Tokens;

// ============================================================================
// EMIT CONTEXT
// ============================================================================

/// Where the emitter is, threaded explicitly through every call.
#[derive(Clone, Debug, Default)]
pub struct EmitContext {
    /// Enclosing namespaces and types, outermost first.
    scopes: Vec<DefinitionId>,
    namespace: Option<DefinitionId>,
    /// Inside a hidden declaration.
    hidden: bool,
    /// Generic parameters in scope.
    type_params: Vec<SmolStr>,
    depth: usize,
}

impl EmitContext {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn scopes(&self) -> &[DefinitionId] {
        &self.scopes
    }

    pub fn namespace(&self) -> Option<&DefinitionId> {
        self.namespace.as_ref()
    }

    /// Innermost enclosing declaration.
    pub fn container(&self) -> Option<&DefinitionId> {
        self.scopes.last()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_type_param(&self, name: &str) -> bool {
        self.type_params.iter().any(|p| p == name)
    }

    fn enter_namespace(&self, id: DefinitionId, hidden: bool) -> Self {
        Self {
            scopes: vec![id.clone()],
            namespace: Some(id),
            hidden: self.hidden || hidden,
            type_params: Vec::new(),
            depth: self.depth + 1,
        }
    }

    fn enter_type(&self, id: DefinitionId, decl: &Declaration) -> Self {
        let mut next = self.with_generics(decl);
        next.scopes.push(id);
        next.hidden |= decl.is_hidden;
        next.depth += 1;
        next
    }

    fn with_generics(&self, decl: &Declaration) -> Self {
        let mut next = self.clone();
        next.type_params
            .extend(decl.generics.iter().map(|g| g.name.clone()));
        next
    }
}

// ============================================================================
// EMITTER
// ============================================================================

/// Everything the emitter hands to the later stages.
#[derive(Debug, Default)]
pub struct EmitOutput {
    pub emissions: Vec<Emission>,
    pub stubs: NavigationStubs,
    /// Number of placeholder targets written.
    pub placeholders: usize,
}

/// Emits one document. Owns nothing but its output; the registry is shared
/// with the later stages of the same build.
pub struct TokenEmitter<'a> {
    graph: &'a DeclarationGraph,
    profile: &'a LanguageProfile,
    registry: &'a mut NameRegistry,
    out: Vec<Emission>,
    stubs: NavigationStubs,
    placeholders: usize,
}

impl<'a> TokenEmitter<'a> {
    pub fn new(
        graph: &'a DeclarationGraph,
        profile: &'a LanguageProfile,
        registry: &'a mut NameRegistry,
    ) -> Self {
        Self {
            graph,
            profile,
            registry,
            out: Vec::new(),
            stubs: NavigationStubs::default(),
            placeholders: 0,
        }
    }

    /// Emit the whole document.
    pub fn emit(mut self, dependencies: &[Dependency]) -> Result<EmitOutput> {
        let graph = self.graph;
        self.emit_dependencies(dependencies);

        let root = EmitContext::root();
        let globals = graph
            .roots()
            .filter(|d| d.kind != DeclarationKind::Namespace);
        for decl in namespace_contents(graph, globals) {
            if let Some(id) = self.emit_declaration(decl, &root)? {
                self.stubs
                    .global
                    .push(NavigationNode::new(decl.name.as_str(), id.as_str(), decl.kind));
            }
        }

        let mut namespaces = Vec::new();
        for ns in graph.iter().filter(|d| d.kind == DeclarationKind::Namespace) {
            let id = self.registry.register(graph, ns)?;
            namespaces.push((id, ns));
        }
        namespaces.sort_by(|a, b| a.0.cmp(&b.0));
        for (id, ns) in namespaces {
            self.emit_namespace(id, ns, &root)?;
        }

        tracing::debug!(
            emissions = self.out.len(),
            placeholders = self.placeholders,
            "emission complete"
        );
        Ok(EmitOutput {
            emissions: self.out,
            stubs: self.stubs,
            placeholders: self.placeholders,
        })
    }

    fn push(&mut self, token: ReviewToken) {
        self.out.push(Emission::Token(token));
    }

    fn emit_line(&mut self, tokens: Tokens, meta: LineMeta) {
        self.out
            .extend(tokens.into_vec().into_iter().map(Emission::Token));
        self.out.push(Emission::EndLine(meta));
    }

    fn emit_dependencies(&mut self, dependencies: &[Dependency]) {
        if dependencies.is_empty() {
            return;
        }
        let header = DefinitionId::new(DEPENDENCIES_LINE_ID);
        self.push(
            ReviewToken::string_literal(format!("{DEPENDENCIES_LINE_ID}:"))
                .with_display_name(DEPENDENCIES_LINE_ID)
                .with_render_class(DEPENDENCIES_RENDER_CLASS),
        );
        self.out
            .push(Emission::EndLine(LineMeta::declaration(header.clone())));
        // One line per package name; the first listing wins.
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for dependency in dependencies {
            if !seen.insert(dependency.name.as_str()) {
                tracing::warn!(
                    name = %dependency.name,
                    version = %dependency.version,
                    "duplicate dependency dropped"
                );
                continue;
            }
            self.push(ReviewToken::string_literal(dependency.name.as_str()).no_space());
            self.push(ReviewToken::marker(TokenKind::SkipDiffRangeStart));
            self.push(ReviewToken::string_literal(format!("-{}", dependency.version)));
            self.push(ReviewToken::marker(TokenKind::SkipDiffRangeEnd));
            self.out.push(Emission::EndLine(LineMeta::declaration(
                header.child(&dependency.name),
            )));
        }
        self.out.push(Emission::EndLine(LineMeta::attached(header)));
    }

    fn emit_namespace(&mut self, id: DefinitionId, ns: &Declaration, root: &EmitContext) -> Result<()> {
        let graph = self.graph;
        let members: Vec<&Declaration> = graph
            .members(&ns.id)
            .filter(|d| d.kind != DeclarationKind::Namespace)
            .collect();
        if members.is_empty() {
            tracing::trace!(namespace = %id, "namespace without declarations skipped");
            return Ok(());
        }

        let types: Vec<_> = members.iter().filter(|d| d.kind.is_type()).collect();
        let hidden = ns.is_hidden || (!types.is_empty() && types.iter().all(|d| d.is_hidden));
        let ctx = root.enter_namespace(id.clone(), hidden);

        self.prologue(ns, &id, ctx.is_hidden(), root);
        let mut tokens = Tokens::new();
        tokens.push(ReviewToken::keyword(self.profile.keywords.namespace.as_str()));
        tokens.push(
            ReviewToken::type_name(id.as_str())
                .declares(id.clone())
                .with_render_class(DeclarationKind::Namespace.render_class())
                .with_display_name(id.as_str()),
        );
        tokens.push(ReviewToken::punctuation("{"));
        self.emit_line(tokens, self.declaration_meta(ns, &id, &ctx, None, false));
        self.out.push(Emission::BeginGroup(GroupContext::braces(id.clone())));

        for decl in namespace_contents(graph, members) {
            if let Some(child) = self.emit_declaration(decl, &ctx)? {
                self.stubs
                    .namespace(&id)
                    .push(NavigationNode::new(decl.name.as_str(), child.as_str(), decl.kind));
            }
        }

        self.out.push(Emission::EndGroup(GroupContext::braces(id)));
        Ok(())
    }

    /// Emit one declaration; returns its id unless nothing was emitted.
    fn emit_declaration(&mut self, decl: &Declaration, ctx: &EmitContext) -> Result<Option<DefinitionId>> {
        match decl.kind {
            k if k.is_type() => self.emit_type(decl, ctx).map(Some),
            k if k.is_callable() => self.emit_callable(decl, ctx).map(Some),
            k if k.is_value_member() => self.emit_value(decl, ctx).map(Some),
            _ => Ok(None),
        }
    }

    fn is_obsolete(&self, decl: &Declaration) -> bool {
        decl.is_obsolete
            || decl
                .attributes
                .iter()
                .any(|a| self.profile.is_deprecation_annotation(&a.name))
    }

    fn declaration_meta(
        &self,
        decl: &Declaration,
        id: &DefinitionId,
        ctx: &EmitContext,
        container: Option<&DefinitionId>,
        obsolete: bool,
    ) -> LineMeta {
        let signature = if decl.kind.is_callable() {
            signature(self.graph, decl)
        } else {
            String::new()
        };
        LineMeta {
            line_id: Some(id.clone()),
            related_to: None,
            cross_language_id: decl.cross_language_id.clone(),
            hidden: ctx.is_hidden() || decl.is_hidden,
            sibling: Some(SiblingKey {
                container: container.cloned(),
                name: decl.name.clone(),
                signature,
                obsolete,
            }),
        }
    }

    fn modifier_tokens(&self, decl: &Declaration, skip: &[Modifier], out: &mut Tokens) {
        for modifier in decl.modifiers.iter().filter(|m| !skip.contains(m)) {
            out.push(ReviewToken::keyword(modifier.keyword()));
        }
    }

    /// The declared name, bracketed by deprecated-range markers when obsolete.
    fn name_tokens(&self, token: ReviewToken, obsolete: bool, out: &mut Tokens) {
        if obsolete {
            out.push(ReviewToken::marker(TokenKind::DeprecatedRangeStart));
        }
        out.push(token);
        if obsolete {
            out.push(ReviewToken::marker(TokenKind::DeprecatedRangeEnd));
        }
    }

    fn declaring_token(&self, kind: TokenKind, value: &str, id: &DefinitionId, decl: &Declaration) -> ReviewToken {
        let token = ReviewToken::new(kind, value)
            .declares(id.clone())
            .with_render_class(decl.kind.render_class());
        if decl.kind.is_type() {
            token.with_display_name(decl.name.as_str())
        } else {
            token
        }
    }

    fn type_keyword(&self, kind: DeclarationKind) -> &'a str {
        let keywords = &self.profile.keywords;
        match kind {
            DeclarationKind::Interface => keywords.interface.as_str(),
            DeclarationKind::Enum => keywords.enumeration.as_str(),
            DeclarationKind::Struct => keywords.structure.as_str(),
            DeclarationKind::Annotation => keywords.annotation.as_str(),
            _ => keywords.class.as_str(),
        }
    }

    // ------------------------------------------------------------------------
    // Types
    // ------------------------------------------------------------------------

    fn emit_type(&mut self, decl: &Declaration, ctx: &EmitContext) -> Result<DefinitionId> {
        let graph = self.graph;
        let id = self.registry.register(graph, decl)?;
        let obsolete = self.is_obsolete(decl);
        let inner = ctx.enter_type(id.clone(), decl);
        let hidden = inner.is_hidden();

        self.prologue(decl, &id, hidden, ctx);

        let mut tokens = Tokens::new();
        self.modifier_tokens(decl, &[], &mut tokens);
        tokens.push(ReviewToken::keyword(self.type_keyword(decl.kind)));
        let name = self.declaring_token(TokenKind::TypeName, &decl.name, &id, decl);
        self.name_tokens(name, obsolete, &mut tokens);
        if !decl.generics.is_empty() {
            tokens.glue();
            self.generic_params(&decl.generics, &inner, &mut tokens);
        }
        if !decl.supertypes.is_empty() {
            let separator = self.profile.inheritance_separator.as_str();
            tokens.push(if separator.chars().all(char::is_alphabetic) {
                ReviewToken::keyword(separator)
            } else {
                ReviewToken::punctuation(separator)
            });
            for (i, supertype) in decl.supertypes.iter().enumerate() {
                if i > 0 {
                    tokens.glue();
                    tokens.push(ReviewToken::punctuation(","));
                }
                self.type_tokens(supertype, &inner, &mut tokens);
            }
        }
        tokens.push(ReviewToken::punctuation("{"));
        let meta = self.declaration_meta(decl, &id, ctx, ctx.container(), obsolete);
        self.emit_line(tokens, meta);
        self.out.push(Emission::BeginGroup(GroupContext::braces(id.clone())));

        let members = type_contents(graph, graph.members(&decl.id), self.profile);
        if members.is_empty()
            && decl.kind == DeclarationKind::Interface
            && self.profile.comment_empty_interfaces
        {
            self.push(ReviewToken::comment(format!("// {EMPTY_INTERFACE_COMMENT}")));
            self.out
                .push(Emission::EndLine(LineMeta::attached(id.clone()).hidden(hidden)));
        }
        for member in members {
            self.emit_declaration(member, &inner)?;
        }

        self.out.push(Emission::EndGroup(GroupContext::braces(id.clone())));
        Ok(id)
    }

    // ------------------------------------------------------------------------
    // Methods and constructors
    // ------------------------------------------------------------------------

    fn emit_callable(&mut self, decl: &Declaration, ctx: &EmitContext) -> Result<DefinitionId> {
        let graph = self.graph;
        let id = self.registry.register(graph, decl)?;
        let params: Vec<&Declaration> = graph.parameters(&decl.id).collect();
        for param in &params {
            self.registry.register(graph, param)?;
        }
        let obsolete = self.is_obsolete(decl);
        let hidden = ctx.is_hidden() || decl.is_hidden;
        let inner = ctx.with_generics(decl);
        let is_constructor = decl.kind == DeclarationKind::Constructor;

        self.prologue(decl, &id, hidden, ctx);

        let mut tokens = Tokens::new();
        self.modifier_tokens(decl, &[], &mut tokens);

        let name = if is_constructor {
            match &self.profile.keywords.constructor {
                Some(keyword) => self.declaring_token(TokenKind::Keyword, keyword, &id, decl),
                None => {
                    let type_name = graph
                        .container_of(decl)
                        .map(|c| c.name.as_str())
                        .unwrap_or(decl.name.as_str());
                    self.declaring_token(TokenKind::TypeName, type_name, &id, decl)
                }
            }
        } else {
            self.declaring_token(TokenKind::MemberName, &decl.name, &id, decl)
        };
        let generics_first = self.profile.member_generics_before_name;

        match self.profile.type_position {
            TypePosition::AfterName => {
                if !is_constructor {
                    if let Some(keyword) = &self.profile.keywords.method {
                        tokens.push(ReviewToken::keyword(keyword.as_str()));
                    }
                }
                if generics_first && !decl.generics.is_empty() {
                    self.generic_params(&decl.generics, &inner, &mut tokens);
                }
                self.name_tokens(name, obsolete, &mut tokens);
                if !generics_first && !decl.generics.is_empty() {
                    tokens.glue();
                    self.generic_params(&decl.generics, &inner, &mut tokens);
                }
                self.parameter_list(&params, &inner, &mut tokens);
                if let Some(ret) = decl.type_ref.as_ref().filter(|t| !is_constructor && !self.profile.is_void(t)) {
                    let separator = self.profile.return_separator.as_str();
                    if separator == ":" {
                        tokens.glue();
                    }
                    tokens.push(ReviewToken::punctuation(separator));
                    self.type_tokens(ret, &inner, &mut tokens);
                }
            }
            TypePosition::BeforeName => {
                if !is_constructor {
                    if let Some(ret) = &decl.type_ref {
                        self.type_tokens(ret, &inner, &mut tokens);
                    }
                }
                self.name_tokens(name, obsolete, &mut tokens);
                if !decl.generics.is_empty() {
                    tokens.glue();
                    self.generic_params(&decl.generics, &inner, &mut tokens);
                }
                self.parameter_list(&params, &inner, &mut tokens);
            }
        }
        self.terminate(&mut tokens);

        let meta = self.declaration_meta(decl, &id, ctx, ctx.container(), obsolete);
        self.emit_line(tokens, meta);
        Ok(id)
    }

    // ------------------------------------------------------------------------
    // Properties, fields and enum members
    // ------------------------------------------------------------------------

    fn emit_value(&mut self, decl: &Declaration, ctx: &EmitContext) -> Result<DefinitionId> {
        let id = self.registry.register(self.graph, decl)?;
        let obsolete = self.is_obsolete(decl);
        let hidden = ctx.is_hidden() || decl.is_hidden;

        self.prologue(decl, &id, hidden, ctx);

        let mut tokens = Tokens::new();
        let name = self.declaring_token(TokenKind::MemberName, &decl.name, &id, decl);

        if decl.kind == DeclarationKind::EnumMember {
            self.name_tokens(name, obsolete, &mut tokens);
            if let Some(value) = &decl.value {
                tokens.push(ReviewToken::punctuation("="));
                tokens.push(ReviewToken::literal(value.as_str()));
            }
            tokens.glue();
            tokens.push(ReviewToken::punctuation(","));
        } else {
            let readonly = decl.has_modifier(Modifier::Readonly) || decl.has_modifier(Modifier::Const);
            match self.profile.type_position {
                TypePosition::AfterName => {
                    let keywords = &self.profile.keywords;
                    let keyword = match (decl.kind, readonly) {
                        (DeclarationKind::Field, _) if keywords.field.is_some() && !readonly => keywords.field.as_ref(),
                        (_, true) => keywords.readonly_property.as_ref(),
                        (_, false) => keywords.mutable_property.as_ref(),
                    };
                    let consumed: &[Modifier] = if keyword.is_some() && readonly {
                        &[Modifier::Readonly]
                    } else {
                        &[]
                    };
                    self.modifier_tokens(decl, consumed, &mut tokens);
                    if let Some(keyword) = keyword {
                        tokens.push(ReviewToken::keyword(keyword.as_str()));
                    }
                    self.name_tokens(name, obsolete, &mut tokens);
                    if let Some(ty) = &decl.type_ref {
                        tokens.glue();
                        tokens.push(ReviewToken::punctuation(":"));
                        self.type_tokens(ty, ctx, &mut tokens);
                    }
                    self.initializer(decl, &mut tokens);
                    self.terminate(&mut tokens);
                }
                TypePosition::BeforeName => {
                    self.modifier_tokens(decl, &[], &mut tokens);
                    if let Some(ty) = &decl.type_ref {
                        self.type_tokens(ty, ctx, &mut tokens);
                    }
                    self.name_tokens(name, obsolete, &mut tokens);
                    if decl.kind == DeclarationKind::Property && self.profile.property_accessors {
                        tokens.push(ReviewToken::punctuation("{"));
                        tokens.push(ReviewToken::keyword("get").no_space());
                        tokens.push(ReviewToken::punctuation(";"));
                        if !readonly {
                            tokens.push(ReviewToken::keyword("set").no_space());
                            tokens.push(ReviewToken::punctuation(";"));
                        }
                        tokens.push(ReviewToken::punctuation("}"));
                    } else {
                        self.initializer(decl, &mut tokens);
                        self.terminate(&mut tokens);
                    }
                }
            }
        }

        let meta = self.declaration_meta(decl, &id, ctx, ctx.container(), obsolete);
        self.emit_line(tokens, meta);
        Ok(id)
    }

    fn initializer(&self, decl: &Declaration, tokens: &mut Tokens) {
        if let Some(value) = &decl.value {
            tokens.push(ReviewToken::punctuation("="));
            tokens.push(ReviewToken::literal(value.as_str()));
        }
    }

    fn terminate(&self, tokens: &mut Tokens) {
        if !self.profile.member_terminator.is_empty() {
            tokens.glue();
            tokens.push(ReviewToken::punctuation(self.profile.member_terminator.as_str()));
        }
    }
}
