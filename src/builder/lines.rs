//! Review line builder: folds the emission stream into the line tree.
//!
//! The builder keeps an explicit stack of open groups. Each level holds the
//! lines completed so far at that depth; closing a group attaches them as
//! children of the group's opening line and appends the context-end line
//! (and optional separator) as siblings of the opener.

use crate::base::DefinitionId;
use crate::error::{BuildError, Result};
use crate::profile::ObsoleteLinkRule;
use crate::review::{CodeDiagnostic, ReviewLine, ReviewToken, TokenKind};

use super::diagnostics::DiagnosticCollector;
use super::emission::{Emission, GroupContext, LineMeta};

/// Where the builder currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuilderState {
    AtRoot,
    InGroup(usize),
}

/// Result of folding an emission stream.
#[derive(Clone, Debug, Default)]
pub struct LineTree {
    pub lines: Vec<ReviewLine>,
    /// Warnings raised while building (force-closed groups).
    pub diagnostics: Vec<CodeDiagnostic>,
}

#[derive(Debug)]
struct Level {
    /// The line that opened this group with its metadata; `None` at the root.
    opener: Option<(ReviewLine, LineMeta)>,
    context: Option<GroupContext>,
    lines: Vec<(ReviewLine, LineMeta)>,
}

impl Level {
    fn root() -> Self {
        Self {
            opener: None,
            context: None,
            lines: Vec::new(),
        }
    }
}

/// Active range markers, as nesting counters.
#[derive(Debug, Default)]
struct Ranges {
    deprecated: usize,
    documentation: usize,
    skip_diff: usize,
}

/// Builds a [`LineTree`] from emissions.
#[derive(Debug)]
pub struct ReviewLineBuilder {
    rule: ObsoleteLinkRule,
    levels: Vec<Level>,
    current: Vec<ReviewToken>,
    ranges: Ranges,
    diagnostics: DiagnosticCollector,
}

impl ReviewLineBuilder {
    pub fn new(rule: ObsoleteLinkRule) -> Self {
        Self {
            rule,
            levels: vec![Level::root()],
            current: Vec::new(),
            ranges: Ranges::default(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    pub fn state(&self) -> BuilderState {
        match self.levels.len() {
            0 | 1 => BuilderState::AtRoot,
            n => BuilderState::InGroup(n - 1),
        }
    }

    /// Fold a whole stream and finish.
    pub fn build_tree(mut self, emissions: impl IntoIterator<Item = Emission>) -> Result<LineTree> {
        for emission in emissions {
            self.push(emission)?;
        }
        self.finish()
    }

    /// Process one emission.
    pub fn push(&mut self, emission: Emission) -> Result<()> {
        match emission {
            Emission::Token(token) => self.push_token(token),
            Emission::EndLine(meta) => {
                self.end_line(meta);
                Ok(())
            }
            Emission::BeginGroup(context) => self.begin_group(context),
            Emission::EndGroup(context) => self.end_group(&context),
        }
    }

    fn push_token(&mut self, mut token: ReviewToken) -> Result<()> {
        match token.kind {
            TokenKind::Newline => self.end_line(LineMeta::default()),
            TokenKind::DeprecatedRangeStart => self.ranges.deprecated += 1,
            TokenKind::DocumentationRangeStart => self.ranges.documentation += 1,
            TokenKind::SkipDiffRangeStart => self.ranges.skip_diff += 1,
            TokenKind::DeprecatedRangeEnd => {
                self.ranges.deprecated = close_range(self.ranges.deprecated, "deprecated")?;
            }
            TokenKind::DocumentationRangeEnd => {
                self.ranges.documentation = close_range(self.ranges.documentation, "documentation")?;
            }
            TokenKind::SkipDiffRangeEnd => {
                self.ranges.skip_diff = close_range(self.ranges.skip_diff, "skip-diff")?;
            }
            TokenKind::Whitespace => {
                if let Some(last) = self.current.last_mut() {
                    last.has_suffix_space = true;
                }
            }
            _ => {
                token.is_deprecated |= self.ranges.deprecated > 0;
                token.is_documentation |= self.ranges.documentation > 0;
                token.skip_diff |= self.ranges.skip_diff > 0;
                self.current.push(token);
            }
        }
        Ok(())
    }

    fn end_line(&mut self, meta: LineMeta) {
        let mut tokens = std::mem::take(&mut self.current);
        if let Some(last) = tokens.last_mut() {
            last.has_suffix_space = false;
        }
        let line = ReviewLine {
            line_id: meta.line_id.as_ref().map(DefinitionId::to_wire),
            cross_language_id: meta.cross_language_id.clone(),
            tokens,
            children: Vec::new(),
            is_hidden: meta.hidden,
            is_context_end_line: false,
            related_to_line: meta.related_to.as_ref().map(DefinitionId::to_wire),
        };
        self.top().lines.push((line, meta));
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.end_line(LineMeta::default());
        }
    }

    fn top(&mut self) -> &mut Level {
        let last = self.levels.len() - 1;
        &mut self.levels[last]
    }

    fn begin_group(&mut self, context: GroupContext) -> Result<()> {
        self.flush();
        let Some(opener) = self.top().lines.pop() else {
            return Err(BuildError::UnbalancedGroup(context.id.to_wire()));
        };
        tracing::trace!(id = %context.id, depth = self.levels.len(), "group opened");
        self.levels.push(Level {
            opener: Some(opener),
            context: Some(context),
            lines: Vec::new(),
        });
        Ok(())
    }

    fn end_group(&mut self, context: &GroupContext) -> Result<()> {
        self.flush();
        let open = match self.levels.last().and_then(|l| l.context.as_ref()) {
            Some(open) => open,
            None => return Err(BuildError::UnbalancedGroup(context.id.to_wire())),
        };
        if open.id != context.id {
            return Err(BuildError::MismatchedGroup {
                expected: open.id.to_wire(),
                found: context.id.to_wire(),
            });
        }
        self.close_top();
        Ok(())
    }

    /// Pop the innermost group and attach it to its parent level.
    fn close_top(&mut self) {
        if self.levels.len() <= 1 {
            return;
        }
        let Some(Level {
            opener: Some((mut opener, meta)),
            context: Some(context),
            lines: mut children,
        }) = self.levels.pop()
        else {
            return;
        };

        link_obsolete(&mut children, self.rule);
        opener.children = children.into_iter().map(|(line, _)| line).collect();
        let hidden = opener.is_hidden;

        let mut close = ReviewLine::new(vec![ReviewToken::punctuation(context.close.as_str()).no_space()]);
        close.is_context_end_line = true;
        close.is_hidden = hidden;
        close.related_to_line = Some(context.id.to_wire());

        let parent = self.top();
        parent.lines.push((opener, meta));
        parent
            .lines
            .push((close, LineMeta::attached(context.id.clone()).hidden(hidden)));
        if context.separated {
            let mut blank = ReviewLine::blank();
            blank.is_hidden = hidden;
            blank.related_to_line = Some(context.id.to_wire());
            parent
                .lines
                .push((blank, LineMeta::attached(context.id.clone()).hidden(hidden)));
        }
    }

    /// Close anything still open and return the tree.
    pub fn finish(mut self) -> Result<LineTree> {
        self.flush();
        while self.levels.len() > 1 {
            if let Some(context) = self.levels.last().and_then(|l| l.context.clone()) {
                tracing::warn!(id = %context.id, "group still open at end of document, closing");
                self.diagnostics.unclosed_context(context.id.as_str());
            }
            self.close_top();
        }

        let mut root = self.levels.pop().map(|l| l.lines).unwrap_or_default();
        link_obsolete(&mut root, self.rule);
        Ok(LineTree {
            lines: root.into_iter().map(|(line, _)| line).collect(),
            diagnostics: self.diagnostics.into_vec(),
        })
    }
}

fn close_range(depth: usize, what: &str) -> Result<usize> {
    depth
        .checked_sub(1)
        .ok_or_else(|| BuildError::UnbalancedGroup(format!("{what} range")))
}

/// Fold obsolete lines under a visible same-named sibling, per `rule`.
///
/// The linked line and every line attached to it are hidden, together with
/// their children.
fn link_obsolete(lines: &mut [(ReviewLine, LineMeta)], rule: ObsoleteLinkRule) {
    if rule == ObsoleteLinkRule::Disabled {
        return;
    }

    let mut links: Vec<(usize, DefinitionId, DefinitionId)> = Vec::new();
    for (i, (_, meta)) in lines.iter().enumerate() {
        let (Some(key), Some(id)) = (&meta.sibling, &meta.line_id) else {
            continue;
        };
        if !key.obsolete {
            continue;
        }
        let target = lines.iter().find_map(|(_, other)| {
            let other_key = other.sibling.as_ref()?;
            let matches = !other_key.obsolete
                && other_key.container == key.container
                && other_key.name == key.name
                && match rule {
                    ObsoleteLinkRule::NameOnly => true,
                    ObsoleteLinkRule::NameAndDifferentSignature => other_key.signature != key.signature,
                    ObsoleteLinkRule::NameAndSameSignature => other_key.signature == key.signature,
                    ObsoleteLinkRule::Disabled => false,
                };
            if matches { other.line_id.clone() } else { None }
        });
        if let Some(target) = target {
            links.push((i, id.clone(), target));
        }
    }

    for (index, id, target) in links {
        tracing::debug!(obsolete = %id, sibling = %target, "obsolete line linked to sibling");
        let (line, _) = &mut lines[index];
        line.hide_recursive();
        line.related_to_line = Some(target.to_wire());
        for (attached, meta) in lines.iter_mut() {
            if meta.related_to.as_ref() == Some(&id) {
                attached.hide_recursive();
            }
        }
    }
}
