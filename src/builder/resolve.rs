//! Reference resolver: second pass fixing links emitted before their target
//! was registered.

use crate::base::constants::UNRESOLVED_TARGET;
use crate::review::{ReviewLine, ReviewToken};

use super::registry::NameRegistry;

/// Counts reported after a resolver pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolveStats {
    /// Placeholders linked to a definition.
    pub resolved: usize,
    /// Placeholders turned into plain text.
    pub cleared: usize,
}

/// A reference that stayed unlinked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnresolvedName {
    /// Line id of the declaration the reference appears in, if any.
    pub anchor: Option<String>,
    pub name: String,
}

/// Outcome of [`ReferenceResolver::resolve`].
#[derive(Clone, Debug, Default)]
pub struct ResolveReport {
    pub stats: ResolveStats,
    pub unresolved: Vec<UnresolvedName>,
}

/// Re-resolves placeholder targets against a complete registry.
pub struct ReferenceResolver<'r> {
    registry: &'r NameRegistry,
}

impl<'r> ReferenceResolver<'r> {
    pub fn new(registry: &'r NameRegistry) -> Self {
        Self { registry }
    }

    /// Visit every token once. Placeholders are retried with the recorded
    /// scoped lookup, then an exact lookup of the token text, then the short
    /// name, each restricted to types and namespaces. Misses clear the
    /// target; they are never errors.
    pub fn resolve(&self, lines: &mut [ReviewLine]) -> ResolveReport {
        let mut report = ResolveReport::default();
        for line in lines.iter_mut() {
            self.resolve_line(line, None, &mut report);
        }
        tracing::debug!(
            resolved = report.stats.resolved,
            cleared = report.stats.cleared,
            "references resolved"
        );
        report
    }

    fn resolve_line(&self, line: &mut ReviewLine, anchor: Option<&str>, report: &mut ResolveReport) {
        let anchor: Option<String> = line
            .line_id
            .clone()
            .or_else(|| line.related_to_line.clone())
            .or_else(|| anchor.map(str::to_string));

        for token in &mut line.tokens {
            self.resolve_token(token, anchor.as_deref(), report);
        }
        for child in &mut line.children {
            self.resolve_line(child, anchor.as_deref(), report);
        }
    }

    fn resolve_token(&self, token: &mut ReviewToken, anchor: Option<&str>, report: &mut ResolveReport) {
        let pending = token.pending.take();
        if token.navigate_to_id.as_deref() != Some(UNRESOLVED_TARGET) {
            return;
        }

        let found = pending
            .and_then(|p| {
                p.keys
                    .iter()
                    .find_map(|key| self.registry.resolve_scoped_type(key, &p.scopes))
            })
            .or_else(|| self.registry.lookup_type(&token.value))
            .or_else(|| self.registry.lookup_type_by_short_name(&token.value));

        match found {
            Some(id) => {
                tracing::trace!(name = %token.value, target = %id, "placeholder resolved");
                token.navigate_to_id = Some(id.to_wire());
                report.stats.resolved += 1;
            }
            None => {
                tracing::trace!(name = %token.value, "placeholder cleared");
                token.navigate_to_id = None;
                report.stats.cleared += 1;
                report.unresolved.push(UnresolvedName {
                    anchor: anchor.map(str::to_string),
                    name: token.value.clone(),
                });
            }
        }
    }
}
