//! The flat event stream passed from the token emitter to the line builder.

use smol_str::SmolStr;

use crate::base::DefinitionId;
use crate::review::{ReviewToken, TokenKind};

/// One event of the emission stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Emission {
    /// A content token or a range marker. A `Newline` token ends the current
    /// line with default metadata.
    Token(ReviewToken),
    /// End the current line.
    EndLine(LineMeta),
    /// The line just completed opens a group; following lines nest under it.
    BeginGroup(GroupContext),
    /// Close the innermost group.
    EndGroup(GroupContext),
}

impl Emission {
    pub fn newline() -> Self {
        Emission::Token(ReviewToken::marker(TokenKind::Newline))
    }
}

/// Metadata of a completed line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineMeta {
    /// Set only on commentable declaration lines.
    pub line_id: Option<DefinitionId>,
    /// Declaration an attached line belongs to.
    pub related_to: Option<DefinitionId>,
    pub cross_language_id: Option<String>,
    pub hidden: bool,
    /// Identity used to fold obsolete declarations under visible siblings.
    pub sibling: Option<SiblingKey>,
}

impl LineMeta {
    /// Metadata of a declaration line.
    pub fn declaration(id: DefinitionId) -> Self {
        Self {
            line_id: Some(id),
            ..Self::default()
        }
    }

    /// Metadata of a line attached to a declaration.
    pub fn attached(to: DefinitionId) -> Self {
        Self {
            related_to: Some(to),
            ..Self::default()
        }
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

/// Container, name and signature of a declaration line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiblingKey {
    pub container: Option<DefinitionId>,
    pub name: SmolStr,
    /// Normalized parameter signature, empty for non-callables.
    pub signature: String,
    pub obsolete: bool,
}

/// A group opened by a declaration line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupContext {
    /// Definition id of the opening line.
    pub id: DefinitionId,
    /// Closing punctuation written on the context-end line.
    pub close: SmolStr,
    /// Follow the closing line with a blank separator line.
    pub separated: bool,
}

impl GroupContext {
    pub fn braces(id: DefinitionId) -> Self {
        Self {
            id,
            close: "}".into(),
            separated: true,
        }
    }
}
