//! Review lines: one rendered row of the document, with nested children.

use serde::{Deserialize, Serialize};

use super::token::ReviewToken;

fn is_false(value: &bool) -> bool {
    !*value
}

/// A line of the review tree.
///
/// Only commentable declaration lines carry a `line_id`; attached lines
/// (documentation, annotations, closing braces, separators) point back at
/// their declaration through `related_to_line`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReviewLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_language_id: Option<String>,

    #[serde(default)]
    pub tokens: Vec<ReviewToken>,

    #[serde(default)]
    pub children: Vec<ReviewLine>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_hidden: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_context_end_line: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_to_line: Option<String>,
}

impl ReviewLine {
    pub fn new(tokens: Vec<ReviewToken>) -> Self {
        Self {
            tokens,
            ..Self::default()
        }
    }

    /// A line with no tokens.
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn is_blank(&self) -> bool {
        self.tokens.is_empty() && self.children.is_empty()
    }

    /// Token values joined the way a viewer renders them.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for (i, token) in self.tokens.iter().enumerate() {
            out.push_str(&token.value);
            if token.has_suffix_space && i + 1 < self.tokens.len() {
                out.push(' ');
            }
        }
        out
    }

    /// This line and all descendants, depth first, pre-order.
    pub fn walk(&self) -> Vec<&ReviewLine> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(line) = stack.pop() {
            out.push(line);
            stack.extend(line.children.iter().rev());
        }
        out
    }

    /// Visit every token of this line and its descendants.
    pub fn for_each_token_mut(&mut self, f: &mut impl FnMut(&mut ReviewToken)) {
        for token in &mut self.tokens {
            f(token);
        }
        for child in &mut self.children {
            child.for_each_token_mut(f);
        }
    }

    /// Hide this line and everything nested under it.
    pub fn hide_recursive(&mut self) {
        self.is_hidden = true;
        for child in &mut self.children {
            child.hide_recursive();
        }
    }
}
