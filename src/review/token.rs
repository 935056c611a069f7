//! Review tokens: the smallest rendered unit of a review document.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::base::DefinitionId;

/// Classification of a token.
///
/// The range markers and layout kinds only exist inside the emission stream;
/// the line builder consumes them, so a finished document holds content
/// kinds only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Text,
    Punctuation,
    Keyword,
    TypeName,
    MemberName,
    StringLiteral,
    Literal,
    Comment,
    Whitespace,
    Newline,
    DeprecatedRangeStart,
    DeprecatedRangeEnd,
    DocumentationRangeStart,
    DocumentationRangeEnd,
    SkipDiffRangeStart,
    SkipDiffRangeEnd,
}

impl TokenKind {
    /// Returns true for the start/end markers of the three range kinds.
    pub fn is_range_marker(&self) -> bool {
        matches!(
            self,
            TokenKind::DeprecatedRangeStart
                | TokenKind::DeprecatedRangeEnd
                | TokenKind::DocumentationRangeStart
                | TokenKind::DocumentationRangeEnd
                | TokenKind::SkipDiffRangeStart
                | TokenKind::SkipDiffRangeEnd
        )
    }
}

/// Lookup recorded for a reference that could not be linked when emitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingReference {
    /// Candidate names, most specific first (`Pager`1`, `Pager`).
    pub keys: Vec<SmolStr>,
    /// Enclosing definitions at the reference site, outermost first.
    pub scopes: Vec<DefinitionId>,
}

fn default_true() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A single token of a review line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReviewToken {
    pub kind: TokenKind,
    pub value: String,

    /// Set on the token that declares a definition (its name). Used while
    /// building; the line carries the id on the wire.
    #[serde(skip)]
    pub definition_id: Option<DefinitionId>,

    /// Lookup to retry once every declaration is registered.
    #[serde(skip)]
    pub pending: Option<Box<PendingReference>>,

    /// Label shown in navigation for a declaring token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation_display_name: Option<String>,

    /// Definition this token links to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigate_to_id: Option<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub skip_diff: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_deprecated: bool,

    /// Render a space after this token. Only `false` goes on the wire.
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub has_suffix_space: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_documentation: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub render_classes: Vec<String>,
}

impl ReviewToken {
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            definition_id: None,
            pending: None,
            navigation_display_name: None,
            navigate_to_id: None,
            skip_diff: false,
            is_deprecated: false,
            has_suffix_space: true,
            is_documentation: false,
            render_classes: Vec::new(),
        }
    }

    pub fn keyword(value: impl Into<String>) -> Self {
        Self::new(TokenKind::Keyword, value)
    }

    pub fn punctuation(value: impl Into<String>) -> Self {
        Self::new(TokenKind::Punctuation, value)
    }

    pub fn type_name(value: impl Into<String>) -> Self {
        Self::new(TokenKind::TypeName, value)
    }

    pub fn member_name(value: impl Into<String>) -> Self {
        Self::new(TokenKind::MemberName, value)
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::new(TokenKind::Text, value)
    }

    pub fn string_literal(value: impl Into<String>) -> Self {
        Self::new(TokenKind::StringLiteral, value)
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Self::new(TokenKind::Literal, value)
    }

    pub fn comment(value: impl Into<String>) -> Self {
        Self::new(TokenKind::Comment, value)
    }

    /// An empty token of a marker or layout kind.
    pub fn marker(kind: TokenKind) -> Self {
        Self::new(kind, "")
    }

    /// No space after this token.
    pub fn no_space(mut self) -> Self {
        self.has_suffix_space = false;
        self
    }

    /// Link this token to a definition.
    pub fn navigate_to(mut self, target: impl Into<String>) -> Self {
        self.navigate_to_id = Some(target.into());
        self
    }

    /// Link to the placeholder target, recording how to retry the lookup.
    pub fn pending(mut self, target: impl Into<String>, reference: PendingReference) -> Self {
        self.navigate_to_id = Some(target.into());
        self.pending = Some(Box::new(reference));
        self
    }

    /// Mark this token as declaring `id`.
    pub fn declares(mut self, id: DefinitionId) -> Self {
        self.definition_id = Some(id);
        self
    }

    pub fn with_render_class(mut self, class: impl Into<String>) -> Self {
        self.render_classes.push(class.into());
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.navigation_display_name = Some(name.into());
        self
    }

    pub fn skip_diff(mut self) -> Self {
        self.skip_diff = true;
        self
    }
}
